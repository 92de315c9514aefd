use beacon_core::{TABLE_WRAPPER_CLASS, needs_wrapper};

use crate::dom;
use crate::error::WebError;

/// Wrap each table in a horizontal scroll container, once.
///
/// # Errors
/// Fails when a wrapper cannot be created or inserted.
pub fn init() -> Result<(), WebError> {
    let doc = dom::document().ok_or_else(|| WebError::missing("document"))?;
    let mut wrapped = 0_usize;
    for table in dom::query_all("table") {
        let Some(parent) = table.parent_element() else {
            continue;
        };
        let classes = parent.class_name();
        if !needs_wrapper(classes.split_whitespace()) {
            continue;
        }
        let wrapper = doc.create_element("div")?;
        wrapper.set_class_name(TABLE_WRAPPER_CLASS);
        parent.insert_before(&wrapper, Some(&table))?;
        wrapper.append_child(&table)?;
        wrapped += 1;
    }
    log::debug!("wrapped {wrapped} table(s)");
    Ok(())
}
