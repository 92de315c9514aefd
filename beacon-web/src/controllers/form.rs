//! Contact form validation and the simulated submission.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use beacon_core::form::SUCCESS_CLASS;
use beacon_core::{
    FieldConstraints, FieldFeedback, FieldInput, FieldKind, FormController, SiteConfig,
    SubmitOutcome, Ticket,
};
use wasm_bindgen::JsCast;
use web_sys::{
    Element, Event, HtmlButtonElement, HtmlFormElement, HtmlInputElement, HtmlTextAreaElement,
};

use crate::dom::{self, Timeout};
use crate::error::WebError;
use crate::state::with_site;

const SKIPPED_INPUT_TYPES: [&str; 5] = ["submit", "button", "hidden", "reset", "image"];

thread_local! {
    // Only the newest cycle's timer is kept; replacing it cancels the old one.
    static TIMER: RefCell<Option<Timeout>> = const { RefCell::new(None) };
}

#[derive(Clone)]
struct FormParts {
    form: HtmlFormElement,
    status: Element,
    button: Option<HtmlButtonElement>,
    button_label: String,
    fields: Vec<Element>,
    help: Rc<HashMap<String, String>>,
}

/// Wire submit handling and per-field feedback.
///
/// # Errors
/// Fails when the form or its status region is missing.
pub fn init(config: &SiteConfig) -> Result<(), WebError> {
    let selectors = &config.selectors;
    let form = dom::by_id(&selectors.form)?
        .dyn_into::<HtmlFormElement>()
        .map_err(|_| WebError::missing(&selectors.form))?;
    let status = dom::by_id(&selectors.form_status)?;
    let button = form
        .query_selector(&selectors.submit_button)?
        .and_then(|el| el.dyn_into::<HtmlButtonElement>().ok());
    if button.is_none() {
        log::debug!("form has no {} control", selectors.submit_button);
    }

    let fields: Vec<Element> = dom::elements(&form.query_selector_all(&selectors.form_fields)?)
        .into_iter()
        .filter(is_validated)
        .collect();
    // Original helper copy, restored once a field becomes valid again.
    let help: HashMap<String, String> = fields
        .iter()
        .filter_map(|field| {
            let text = help_element(field)?.text_content()?;
            Some((field.id(), text))
        })
        .collect();

    let parts = FormParts {
        button_label: button
            .as_ref()
            .and_then(|b| b.text_content())
            .unwrap_or_default(),
        form: form.clone(),
        status,
        button,
        fields,
        help: Rc::new(help),
    };

    with_site(|site| {
        site.form = FormController::new(config.timings, config.messages.clone());
    });

    for field in &parts.fields {
        let help = Rc::clone(&parts.help);
        let target = field.clone();
        dom::listen(field, "blur", move |_| show_feedback(&target, &help))?;

        let help = Rc::clone(&parts.help);
        let target = field.clone();
        dom::listen(field, "invalid", move |event: Event| {
            event.prevent_default();
            show_feedback(&target, &help);
        })?;
    }

    dom::listen(&form, "submit", move |event: Event| {
        event.prevent_default();
        submit(&parts, &event);
    })?;
    Ok(())
}

fn submit(parts: &FormParts, event: &Event) {
    let inputs: Vec<FieldInput> = parts.fields.iter().map(snapshot).collect();
    let outcome = with_site(|site| site.form.submit(&inputs));
    match outcome {
        SubmitOutcome::Busy => {}
        SubmitOutcome::Rejected {
            summary,
            role,
            errors,
        } => {
            event.stop_propagation();
            TIMER.with(|slot| slot.borrow_mut().take());
            parts.status.set_text_content(Some(&summary));
            let _ = parts.status.set_attribute("role", role.as_str());
            let _ = parts.status.class_list().remove_1(SUCCESS_CLASS);
            for (id, err) in errors {
                let Some(field) = parts.fields.iter().find(|f| field_key(f) == id) else {
                    continue;
                };
                render_feedback(
                    field,
                    &FieldFeedback {
                        invalid: true,
                        message: Some(err.to_string()),
                    },
                    &parts.help,
                );
            }
        }
        SubmitOutcome::Started {
            ticket,
            pending_label,
            delay_ms,
        } => {
            if let Some(button) = parts.button.as_ref() {
                button.set_disabled(true);
                button.set_text_content(Some(&pending_label));
            }
            let parts = parts.clone();
            arm(delay_ms, move || complete(&parts, ticket));
        }
    }
}

fn complete(parts: &FormParts, ticket: Ticket) {
    let Some(done) = with_site(|site| site.form.complete(ticket)) else {
        log::debug!("stale submission completed; ignoring");
        return;
    };
    parts.status.set_text_content(Some(&done.message));
    let _ = parts.status.set_attribute("role", done.role.as_str());
    parts.status.set_class_name(done.status_class);
    parts.form.reset();
    if let Some(button) = parts.button.as_ref() {
        button.set_disabled(false);
        button.set_text_content(Some(&parts.button_label));
    }
    log::info!("form submitted");

    let status = parts.status.clone();
    arm(done.clear_after_ms, move || {
        if with_site(|site| site.form.clear(done.ticket)) {
            status.set_text_content(Some(""));
        }
    });
}

fn arm(delay_ms: u32, callback: impl FnOnce() + 'static) {
    match Timeout::schedule(delay_ms, callback) {
        Ok(timer) => TIMER.with(|slot| *slot.borrow_mut() = Some(timer)),
        Err(err) => {
            log::warn!("failed to schedule form timer: {err}");
            with_site(|site| site.form.cancel());
        }
    }
}

fn show_feedback(field: &Element, help: &HashMap<String, String>) {
    let input = snapshot(field);
    let feedback = FieldFeedback::evaluate(&input.constraints, &input.value);
    render_feedback(field, &feedback, help);
}

fn render_feedback(field: &Element, feedback: &FieldFeedback, help: &HashMap<String, String>) {
    let _ = field.set_attribute("aria-invalid", feedback.aria_invalid());
    let Some(helper) = help_element(field) else {
        return;
    };
    match feedback.message.as_deref() {
        Some(message) => helper.set_text_content(Some(message)),
        None => {
            let original = help.get(&field.id()).map_or("", String::as_str);
            helper.set_text_content(Some(original));
        }
    }
}

fn help_element(field: &Element) -> Option<Element> {
    let id = field.id();
    if id.is_empty() {
        return None;
    }
    dom::by_id(&format!("{id}-help")).ok()
}

fn is_validated(el: &Element) -> bool {
    el.dyn_ref::<HtmlInputElement>().is_none_or(|input| {
        !SKIPPED_INPUT_TYPES.contains(&input.type_().to_ascii_lowercase().as_str())
    })
}

fn field_key(field: &Element) -> String {
    let id = field.id();
    if id.is_empty() {
        field.get_attribute("name").unwrap_or_default()
    } else {
        id
    }
}

fn snapshot(field: &Element) -> FieldInput {
    let (kind, value) = if let Some(area) = field.dyn_ref::<HtmlTextAreaElement>() {
        (FieldKind::TextArea, area.value())
    } else if let Some(input) = field.dyn_ref::<HtmlInputElement>() {
        (FieldKind::from_type_attr(&input.type_()), input.value())
    } else {
        (FieldKind::Other, String::new())
    };
    let constraints = FieldConstraints {
        required: field.has_attribute("required"),
        kind,
        min_length: field
            .get_attribute("minlength")
            .and_then(|v| v.trim().parse().ok()),
    };
    FieldInput::new(field_key(field), constraints, value)
}
