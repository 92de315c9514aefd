//! Horizontal-scroll wrappers for wide tables.

/// Marker class on the scroll container around a table.
pub const TABLE_WRAPPER_CLASS: &str = "table-wrapper";

/// Whether a table whose parent carries `parent_classes` still needs wrapping.
#[must_use]
pub fn needs_wrapper<'a, I>(parent_classes: I) -> bool
where
    I: IntoIterator<Item = &'a str>,
{
    !parent_classes
        .into_iter()
        .any(|class| class == TABLE_WRAPPER_CLASS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_exactly_once() {
        assert!(needs_wrapper(["content", "prose"]));
        assert!(needs_wrapper(std::iter::empty()));
        assert!(!needs_wrapper(["x", TABLE_WRAPPER_CLASS]));
        assert!(needs_wrapper(["table-wrapper-old"]));
    }
}
