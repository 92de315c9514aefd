use anyhow::{Context, Result, ensure};
use std::time::Duration;
use thirtyfour::prelude::*;

use super::{BrowserScenario, CombinedScenario, ScenarioCtx, TestScenario};
use beacon_core::{
    FieldConstraints, FieldError, FieldInput, FieldKind, FormController, FormPhase, SiteConfig,
    SubmitOutcome,
};

/// Fills every validated field with a value that satisfies its type.
const FILL_SCRIPT: &str = "\
const form = document.getElementById(arguments[0]);
if (!form) { return 0; }
let filled = 0;
for (const field of form.querySelectorAll('input, textarea')) {
  const type = (field.type || '').toLowerCase();
  if (['submit', 'button', 'hidden', 'reset', 'image', 'checkbox', 'radio'].includes(type)) { continue; }
  field.value = type === 'email' ? 'qa@example.org'
    : type === 'url' ? 'https://example.org'
    : 'Automated accessibility check';
  filled += 1;
}
return filled;";

pub struct FormScenario;

fn contact(name: &str, email: &str, message: &str) -> Vec<FieldInput> {
    vec![
        FieldInput::new(
            "name",
            FieldConstraints {
                required: true,
                ..FieldConstraints::default()
            },
            name,
        ),
        FieldInput::new(
            "email",
            FieldConstraints {
                required: true,
                kind: FieldKind::Email,
                min_length: None,
            },
            email,
        ),
        FieldInput::new(
            "message",
            FieldConstraints {
                required: true,
                kind: FieldKind::TextArea,
                min_length: Some(10),
            },
            message,
        ),
    ]
}

fn form_check(iteration: usize) -> Result<()> {
    let rejected = [
        (contact("", "qa@example.org", "Long enough text"), FieldError::ValueMissing),
        (
            contact("QA", "not-an-email", "Long enough text"),
            FieldError::TypeMismatch(FieldKind::Email),
        ),
        (contact("QA", "qa@example.org", "short"), FieldError::TooShort(10)),
    ];
    let (fields, expected) = &rejected[iteration % rejected.len()];
    let mut form = FormController::default();
    match form.submit(fields) {
        SubmitOutcome::Rejected { errors, .. } => {
            ensure!(
                errors.iter().any(|(_, err)| err == expected),
                "expected {expected:?}, got {errors:?}"
            );
        }
        other => anyhow::bail!("invalid submission was not rejected: {other:?}"),
    }
    ensure!(!form.is_busy(), "rejection must never disable the form");

    let SubmitOutcome::Started { ticket, .. } =
        form.submit(&contact("QA", "qa@example.org", "Long enough text"))
    else {
        anyhow::bail!("valid submission did not start");
    };
    ensure!(
        form.submit(&contact("QA", "qa@example.org", "Long enough text")) == SubmitOutcome::Busy,
        "second submit while pending must be ignored"
    );
    let done = form.complete(ticket).context("pending cycle must complete")?;
    ensure!(form.complete(ticket).is_none(), "completion must run once");
    ensure!(form.clear(done.ticket), "success message must clear");
    ensure!(form.phase() == FormPhase::Idle, "cycle must end idle");
    Ok(())
}

#[async_trait::async_trait]
impl BrowserScenario for FormScenario {
    async fn run_browser(&self, driver: &WebDriver, ctx: &ScenarioCtx<'_>) -> Result<()> {
        let config = SiteConfig::default();
        let form = config.selectors.form.clone();
        let status = format!("#{}", config.selectors.form_status);
        let submit = format!("#{form} {}", config.selectors.submit_button);
        driver.goto(&ctx.base_url).await?;
        ctx.bridge.ensure_available().await?;

        // Dispatch submit directly so native constraint bubbles do not intercept it.
        driver
            .execute(
                "document.getElementById(arguments[0]).dispatchEvent(\
                 new Event('submit', { bubbles: true, cancelable: true }));",
                vec![form.clone().into()],
            )
            .await?;
        ensure!(
            ctx.bridge.text(&status).await? == config.messages.form_invalid,
            "empty submission should report missing fields"
        );
        ensure!(
            ctx.bridge.attr(&status, "role").await?.as_deref() == Some("alert"),
            "validation summary should be an alert"
        );
        ensure!(
            ctx.bridge.attr(&submit, "disabled").await?.is_none(),
            "invalid submission must not disable the button"
        );

        let filled = driver.execute(FILL_SCRIPT, vec![form.clone().into()]).await?;
        if ctx.verbose {
            println!("  ✍️  Filled {} field(s)", filled.json());
        }
        ctx.bridge.click(&submit).await?;
        ensure!(
            ctx.bridge.attr(&submit, "disabled").await?.is_some(),
            "pending submission should disable the button"
        );
        ensure!(ctx.bridge.state().await?.form_phase == "pending", "form should be pending");

        let latency = u64::from(config.timings.submit_latency_ms);
        tokio::time::sleep(Duration::from_millis(latency + 500)).await;
        ensure!(
            ctx.bridge.text(&status).await? == config.messages.form_success,
            "success message should appear after the simulated latency"
        );
        ensure!(
            ctx.bridge.attr(&submit, "disabled").await?.is_none(),
            "button should be re-enabled"
        );
        Ok(())
    }
}

impl CombinedScenario for FormScenario {
    fn as_logic_scenario(&self) -> Option<TestScenario> {
        Some(TestScenario::new("Form", form_check))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_rejection_case_replays() {
        for i in 0..3 {
            form_check(i).unwrap();
        }
    }
}
