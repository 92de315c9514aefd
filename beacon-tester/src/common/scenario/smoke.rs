use anyhow::{Result, ensure};
use thirtyfour::prelude::*;

use super::{BrowserScenario, CombinedScenario, ScenarioCtx, TestScenario};
use beacon_core::{FormController, FormPhase, ModalController, PageState, SiteConfig};

pub struct SmokeScenario;

fn smoke_check(_iteration: usize) -> Result<()> {
    let config = SiteConfig::from_json("{}")?;
    ensure!(config == SiteConfig::default(), "empty config must equal defaults");
    let page = PageState::new();
    ensure!(!page.scroll_locked() && !page.keyboard_nav(), "page must start at rest");
    ensure!(!ModalController::new().is_open(), "modal must start closed");
    ensure!(
        FormController::default().phase() == FormPhase::Idle,
        "form must start idle"
    );
    Ok(())
}

#[async_trait::async_trait]
impl BrowserScenario for SmokeScenario {
    async fn run_browser(&self, driver: &WebDriver, ctx: &ScenarioCtx<'_>) -> Result<()> {
        driver.goto(&ctx.base_url).await?;
        driver.find(By::Css("body")).await?;
        ctx.bridge.ensure_available().await?;

        let state = ctx.bridge.state().await?;
        if ctx.verbose {
            println!("  📊 Initial state: {state:?}");
        }
        ensure!(!state.modal_open, "modal should start closed");
        ensure!(!state.scroll_locked, "page should not start scroll-locked");
        ensure!(state.form_phase == "idle", "form should start idle, got {}", state.form_phase);
        ensure!(state.active_dialogs.is_empty(), "no dialog should start active");
        Ok(())
    }
}

impl CombinedScenario for SmokeScenario {
    fn as_logic_scenario(&self) -> Option<TestScenario> {
        Some(TestScenario::new("Smoke", smoke_check))
    }
}
