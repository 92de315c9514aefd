//! Client-side form validation and the simulated submission cycle.
//!
//! Field checks follow the browser's constraint order: a missing required
//! value wins over a type mismatch, which wins over a short value.
//!
//! Submission runs `Idle -> Pending -> Confirming -> Idle`. Each cycle gets a
//! fresh [`Ticket`]; timer callbacks present their ticket and are ignored once
//! it is stale, so a cancelled or superseded cycle cannot touch the status.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::config::{Messages, Timings};

/// Class applied to the status region after a successful submission.
pub const SUCCESS_CLASS: &str = "success-message";

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .expect("email pattern is valid")
});

static URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z][a-zA-Z0-9+.\-]*:[^\s]+$").expect("url pattern is valid"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Email,
    Url,
    Tel,
    Number,
    Password,
    Search,
    TextArea,
    Other,
}

impl FieldKind {
    /// Map an input's `type` attribute. Unknown or empty types behave as text.
    #[must_use]
    pub fn from_type_attr(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "text" => Self::Text,
            "email" => Self::Email,
            "url" => Self::Url,
            "tel" => Self::Tel,
            "number" => Self::Number,
            "password" => Self::Password,
            "search" => Self::Search,
            "textarea" => Self::TextArea,
            _ => Self::Other,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text | Self::Other => "text",
            Self::Email => "email",
            Self::Url => "url",
            Self::Tel => "tel",
            Self::Number => "number",
            Self::Password => "password",
            Self::Search => "search",
            Self::TextArea => "textarea",
        }
    }

    fn accepts(self, value: &str) -> bool {
        match self {
            Self::Email => EMAIL_RE.is_match(value),
            Self::Url => URL_RE.is_match(value),
            _ => true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldConstraints {
    pub required: bool,
    pub kind: FieldKind,
    pub min_length: Option<usize>,
}

impl Default for FieldConstraints {
    fn default() -> Self {
        Self {
            required: false,
            kind: FieldKind::Text,
            min_length: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldError {
    ValueMissing,
    TypeMismatch(FieldKind),
    TooShort(usize),
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ValueMissing => f.write_str("This field is required"),
            Self::TypeMismatch(kind) => write!(f, "Please enter a valid {}", kind.as_str()),
            Self::TooShort(min) => write!(f, "Minimum {min} characters required"),
        }
    }
}

/// Check one value against its constraints.
///
/// # Errors
///
/// Returns the highest-priority constraint the value violates.
pub fn validate_field(constraints: &FieldConstraints, value: &str) -> Result<(), FieldError> {
    if value.is_empty() {
        return if constraints.required {
            Err(FieldError::ValueMissing)
        } else {
            Ok(())
        };
    }
    if !constraints.kind.accepts(value) {
        return Err(FieldError::TypeMismatch(constraints.kind));
    }
    // `minlength` counts UTF-16 code units, like the browser does.
    if let Some(min) = constraints.min_length
        && value.encode_utf16().count() < min
    {
        return Err(FieldError::TooShort(min));
    }
    Ok(())
}

/// What the shell should show for a field after blur or an invalid event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldFeedback {
    pub invalid: bool,
    /// Helper text; `None` clears whatever an earlier failure left behind.
    pub message: Option<String>,
}

impl FieldFeedback {
    #[must_use]
    pub fn evaluate(constraints: &FieldConstraints, value: &str) -> Self {
        match validate_field(constraints, value) {
            Ok(()) => Self {
                invalid: false,
                message: None,
            },
            Err(err) => Self {
                invalid: true,
                message: Some(err.to_string()),
            },
        }
    }

    #[must_use]
    pub const fn aria_invalid(&self) -> &'static str {
        if self.invalid { "true" } else { "false" }
    }
}

/// A field snapshot taken at submit time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldInput {
    pub id: String,
    pub constraints: FieldConstraints,
    pub value: String,
}

impl FieldInput {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        constraints: FieldConstraints,
        value: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            constraints,
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ticket(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "phase", content = "ticket")]
pub enum FormPhase {
    Idle,
    Pending(Ticket),
    Confirming(Ticket),
}

/// ARIA role given to the status region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusRole {
    Alert,
    Status,
}

impl StatusRole {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Alert => "alert",
            Self::Status => "status",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// At least one field failed; nothing was disabled.
    Rejected {
        summary: String,
        role: StatusRole,
        errors: Vec<(String, FieldError)>,
    },
    /// A cycle is already pending.
    Busy,
    Started {
        ticket: Ticket,
        pending_label: String,
        delay_ms: u32,
    },
}

/// Instructions for the shell once the simulated latency elapses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub ticket: Ticket,
    pub message: String,
    pub role: StatusRole,
    pub status_class: &'static str,
    pub clear_after_ms: u32,
}

#[derive(Debug, Clone)]
pub struct FormController {
    phase: FormPhase,
    next_ticket: u64,
    timings: Timings,
    messages: Messages,
}

impl Default for FormController {
    fn default() -> Self {
        Self::new(Timings::default(), Messages::default())
    }
}

impl FormController {
    #[must_use]
    pub const fn new(timings: Timings, messages: Messages) -> Self {
        Self {
            phase: FormPhase::Idle,
            next_ticket: 0,
            timings,
            messages,
        }
    }

    #[must_use]
    pub const fn phase(&self) -> FormPhase {
        self.phase
    }

    /// True while the submit control must stay disabled.
    #[must_use]
    pub const fn is_busy(&self) -> bool {
        matches!(self.phase, FormPhase::Pending(_))
    }

    pub fn submit(&mut self, fields: &[FieldInput]) -> SubmitOutcome {
        if self.is_busy() {
            log::debug!("submission ignored while a cycle is pending");
            return SubmitOutcome::Busy;
        }

        let errors: Vec<(String, FieldError)> = fields
            .iter()
            .filter_map(|field| {
                validate_field(&field.constraints, &field.value)
                    .err()
                    .map(|err| (field.id.clone(), err))
            })
            .collect();

        // A new outcome replaces any success message still on display.
        self.phase = FormPhase::Idle;

        if !errors.is_empty() {
            return SubmitOutcome::Rejected {
                summary: self.messages.form_invalid.clone(),
                role: StatusRole::Alert,
                errors,
            };
        }

        let ticket = Ticket(self.next_ticket);
        self.next_ticket += 1;
        self.phase = FormPhase::Pending(ticket);
        SubmitOutcome::Started {
            ticket,
            pending_label: self.messages.form_pending.clone(),
            delay_ms: self.timings.submit_latency_ms,
        }
    }

    /// Finish a pending cycle. Stale tickets yield `None`.
    pub fn complete(&mut self, ticket: Ticket) -> Option<Completion> {
        if self.phase != FormPhase::Pending(ticket) {
            return None;
        }
        self.phase = FormPhase::Confirming(ticket);
        Some(Completion {
            ticket,
            message: self.messages.form_success.clone(),
            role: StatusRole::Status,
            status_class: SUCCESS_CLASS,
            clear_after_ms: self.timings.success_display_ms,
        })
    }

    /// Drop the success message. Returns false for a stale ticket.
    pub fn clear(&mut self, ticket: Ticket) -> bool {
        if self.phase != FormPhase::Confirming(ticket) {
            return false;
        }
        self.phase = FormPhase::Idle;
        true
    }

    /// Abandon whatever cycle is in flight.
    pub fn cancel(&mut self) -> Option<Ticket> {
        let ticket = match self.phase {
            FormPhase::Idle => None,
            FormPhase::Pending(t) | FormPhase::Confirming(t) => Some(t),
        };
        self.phase = FormPhase::Idle;
        ticket
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn required() -> FieldConstraints {
        FieldConstraints {
            required: true,
            ..FieldConstraints::default()
        }
    }

    fn email() -> FieldConstraints {
        FieldConstraints {
            required: true,
            kind: FieldKind::Email,
            min_length: None,
        }
    }

    #[test]
    fn missing_beats_every_other_failure() {
        let cons = FieldConstraints {
            required: true,
            kind: FieldKind::Email,
            min_length: Some(5),
        };
        assert_eq!(validate_field(&cons, ""), Err(FieldError::ValueMissing));
        assert_eq!(
            validate_field(&cons, "ab"),
            Err(FieldError::TypeMismatch(FieldKind::Email))
        );
        assert_eq!(validate_field(&cons, "a@b"), Err(FieldError::TooShort(5)));
        assert_eq!(validate_field(&cons, "ann@b.example"), Ok(()));
    }

    #[test]
    fn empty_optional_field_is_valid() {
        let cons = FieldConstraints {
            kind: FieldKind::Url,
            min_length: Some(10),
            ..FieldConstraints::default()
        };
        assert_eq!(validate_field(&cons, ""), Ok(()));
        assert!(validate_field(&cons, "not a url").is_err());
        assert_eq!(validate_field(&cons, "https://example.org"), Ok(()));
    }

    #[test]
    fn min_length_counts_utf16_units() {
        let cons = FieldConstraints {
            min_length: Some(3),
            ..FieldConstraints::default()
        };
        assert_eq!(validate_field(&cons, "été"), Ok(()));
        assert_eq!(validate_field(&cons, "é"), Err(FieldError::TooShort(3)));

        // Astral characters take two units each.
        let cons = FieldConstraints {
            min_length: Some(4),
            ..FieldConstraints::default()
        };
        assert_eq!(validate_field(&cons, "😀😀"), Ok(()));
        assert_eq!(validate_field(&cons, "😀"), Err(FieldError::TooShort(4)));
        assert_eq!(validate_field(&cons, "abc"), Err(FieldError::TooShort(4)));
    }

    #[test]
    fn messages_match_the_page_copy() {
        assert_eq!(FieldError::ValueMissing.to_string(), "This field is required");
        assert_eq!(
            FieldError::TypeMismatch(FieldKind::Email).to_string(),
            "Please enter a valid email"
        );
        assert_eq!(
            FieldError::TooShort(10).to_string(),
            "Minimum 10 characters required"
        );
    }

    #[test]
    fn valid_feedback_clears_the_message() {
        let bad = FieldFeedback::evaluate(&required(), "");
        assert!(bad.invalid);
        assert_eq!(bad.aria_invalid(), "true");
        assert_eq!(bad.message.as_deref(), Some("This field is required"));
        let good = FieldFeedback::evaluate(&required(), "Ada");
        assert!(!good.invalid);
        assert_eq!(good.message, None);
    }

    #[test]
    fn type_attr_parsing() {
        assert_eq!(FieldKind::from_type_attr("EMAIL"), FieldKind::Email);
        assert_eq!(FieldKind::from_type_attr(""), FieldKind::Text);
        assert_eq!(FieldKind::from_type_attr("color"), FieldKind::Other);
    }

    #[test]
    fn invalid_submission_never_starts_a_cycle() {
        let mut form = FormController::default();
        let outcome = form.submit(&[
            FieldInput::new("name", required(), ""),
            FieldInput::new("email", email(), "nope"),
        ]);
        match outcome {
            SubmitOutcome::Rejected {
                summary,
                role,
                errors,
            } => {
                assert_eq!(summary, "Please fill in all required fields.");
                assert_eq!(role, StatusRole::Alert);
                assert_eq!(errors.len(), 2);
            }
            other => panic!("unexpected outcome {other:?}"),
        }
        assert!(!form.is_busy());
        assert_eq!(form.phase(), FormPhase::Idle);
    }

    #[test]
    fn full_cycle_and_busy_guard() {
        let mut form = FormController::default();
        let fields = [FieldInput::new("name", required(), "Ada")];
        let SubmitOutcome::Started {
            ticket,
            pending_label,
            delay_ms,
        } = form.submit(&fields)
        else {
            panic!("expected start");
        };
        assert_eq!(pending_label, "Sending...");
        assert_eq!(delay_ms, 1500);
        assert_eq!(form.submit(&fields), SubmitOutcome::Busy);

        let done = form.complete(ticket).expect("pending ticket completes");
        assert_eq!(done.role, StatusRole::Status);
        assert_eq!(done.status_class, SUCCESS_CLASS);
        assert_eq!(done.clear_after_ms, 5000);
        assert!(form.complete(ticket).is_none());
        assert!(form.clear(ticket));
        assert!(!form.clear(ticket));
        assert_eq!(form.phase(), FormPhase::Idle);
    }

    #[test]
    fn resubmission_invalidates_the_pending_clear() {
        let mut form = FormController::default();
        let fields = [FieldInput::new("name", required(), "Ada")];
        let SubmitOutcome::Started { ticket: first, .. } = form.submit(&fields) else {
            panic!("expected start");
        };
        form.complete(first);
        let SubmitOutcome::Started { ticket: second, .. } = form.submit(&fields) else {
            panic!("expected restart");
        };
        assert_ne!(first, second);
        assert!(!form.clear(first));
        assert!(form.is_busy());
    }

    #[test]
    fn cancel_makes_timers_stale() {
        let mut form = FormController::default();
        let SubmitOutcome::Started { ticket, .. } =
            form.submit(&[FieldInput::new("name", required(), "Ada")])
        else {
            panic!("expected start");
        };
        assert_eq!(form.cancel(), Some(ticket));
        assert!(form.complete(ticket).is_none());
        assert_eq!(form.cancel(), None);
    }
}
