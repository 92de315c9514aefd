use anyhow::{Result, ensure};
use thirtyfour::prelude::*;

use super::{BrowserScenario, CombinedScenario, ScenarioCtx, TestScenario};
use beacon_core::{Accordion, NavKey, SiteConfig};

pub struct AccordionScenario;

fn accordion_check(iteration: usize) -> Result<()> {
    let count = iteration % 5 + 1;
    let mut acc = Accordion::new();
    for i in 0..count {
        acc.push(&format!("trigger-{i}"), &format!("panel-{i}"), false);
    }
    let pick = iteration % count;
    ensure!(acc.toggle(pick) == Some(true), "first toggle expands");
    ensure!(
        acc.panels().iter().filter(|p| p.expanded).count() == 1,
        "panels are independent"
    );
    ensure!(acc.toggle(pick) == Some(false), "second toggle collapses");

    for current in 0..count {
        ensure!(acc.focus_target(current, NavKey::First) == Some(0), "Home goes first");
        ensure!(
            acc.focus_target(current, NavKey::Last) == Some(count - 1),
            "End goes last"
        );
    }
    ensure!(acc.focus_target(0, NavKey::Previous).is_none(), "no wrap backwards");
    ensure!(acc.focus_target(count - 1, NavKey::Next).is_none(), "no wrap forwards");
    Ok(())
}

#[async_trait::async_trait]
impl BrowserScenario for AccordionScenario {
    async fn run_browser(&self, driver: &WebDriver, ctx: &ScenarioCtx<'_>) -> Result<()> {
        let trigger = SiteConfig::default().selectors.accordion_trigger;
        driver.goto(&ctx.base_url).await?;
        ctx.bridge.ensure_available().await?;

        let before = ctx.bridge.state().await?.accordion_expanded;
        ensure!(!before.is_empty(), "no accordion panels registered");
        ctx.bridge.click(&trigger).await?;
        let after = ctx.bridge.state().await?.accordion_expanded;
        ensure!(after[0] != before[0], "first panel should toggle");
        ensure!(after[1..] == before[1..], "other panels must not change");
        let aria = ctx.bridge.attr(&trigger, "aria-expanded").await?;
        ensure!(
            aria.as_deref() == Some(if after[0] { "true" } else { "false" }),
            "aria-expanded should mirror the panel"
        );
        Ok(())
    }
}

impl CombinedScenario for AccordionScenario {
    fn as_logic_scenario(&self) -> Option<TestScenario> {
        Some(TestScenario::new("Accordion", accordion_check))
    }
}
