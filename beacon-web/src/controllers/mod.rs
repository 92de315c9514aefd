//! DOM wiring for each behaviour. Every `init` returns
//! [`WebError::MissingElement`](crate::error::WebError::MissingElement) when
//! the markup it binds to is absent.

pub mod accordion;
pub mod announce;
pub mod dialogs;
pub mod environment;
pub mod focus_visible;
pub mod form;
pub mod menu;
pub mod modal;
pub mod tables;
pub mod theme;
pub mod tooltip;
