use anyhow::{Result, ensure};
use thirtyfour::prelude::*;

use super::{BrowserScenario, CombinedScenario, ScenarioCtx, TestScenario};
use beacon_core::{MobileMenu, SiteConfig};

pub struct MenuScenario;

fn menu_check(iteration: usize) -> Result<()> {
    let mut menu = MobileMenu::new(iteration % 2 == 1);
    let start = menu.expanded();
    ensure!(menu.toggle() != start, "toggle flips the menu");
    menu.toggle();
    ensure!(menu.expanded() == start, "double toggle is identity");

    let mut open = MobileMenu::new(true);
    ensure!(!open.document_click(true) && open.expanded(), "clicks inside nav keep it open");
    ensure!(open.document_click(false) && !open.expanded(), "outside click collapses");
    ensure!(!open.link_activated(), "collapsing twice reports no change");
    ensure!(open.aria_expanded() == "false", "aria-expanded mirrors state");
    Ok(())
}

#[async_trait::async_trait]
impl BrowserScenario for MenuScenario {
    async fn run_browser(&self, driver: &WebDriver, ctx: &ScenarioCtx<'_>) -> Result<()> {
        let toggle = SiteConfig::default().selectors.menu_toggle;
        driver.goto(&ctx.base_url).await?;
        ctx.bridge.ensure_available().await?;

        ctx.bridge.click(&toggle).await?;
        ensure!(ctx.bridge.state().await?.menu_expanded, "toggle should expand the menu");
        ensure!(
            ctx.bridge.attr(&toggle, "aria-expanded").await?.as_deref() == Some("true"),
            "aria-expanded should be true"
        );

        ctx.bridge.click("main, footer").await?;
        ensure!(
            !ctx.bridge.state().await?.menu_expanded,
            "clicking outside the nav should collapse the menu"
        );
        Ok(())
    }
}

impl CombinedScenario for MenuScenario {
    fn as_logic_scenario(&self) -> Option<TestScenario> {
        Some(TestScenario::new("Menu", menu_check))
    }
}
