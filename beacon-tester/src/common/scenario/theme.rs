use anyhow::{Context, Result, ensure};
use thirtyfour::prelude::*;

use super::{BrowserScenario, CombinedScenario, ScenarioCtx, TestScenario};
use beacon_core::{
    ColorScheme, MemoryPreferenceStore, PreferenceStore, SiteConfig, THEME_STORAGE_KEY, Theme,
    ThemeController,
};

pub struct ThemeScenario;

fn theme_check(iteration: usize) -> Result<()> {
    let stored = [None, Some("light"), Some("dark"), Some("sepia")][iteration % 4];
    let scheme = if iteration % 2 == 0 {
        ColorScheme::Dark
    } else {
        ColorScheme::Light
    };
    let store = stored.map_or_else(MemoryPreferenceStore::new, |value| {
        MemoryPreferenceStore::with(THEME_STORAGE_KEY, value)
    });
    let mut theme = ThemeController::new(store, scheme);

    let expected = match stored {
        Some("light") => Theme::Light,
        Some("dark") => Theme::Dark,
        _ if scheme == ColorScheme::Dark => Theme::Dark,
        _ => Theme::Light,
    };
    ensure!(
        theme.effective() == expected,
        "stored {stored:?} with {scheme:?} resolved to {}",
        theme.effective()
    );

    let flipped = theme.toggle();
    ensure!(flipped == expected.toggled(), "toggle must invert the theme");
    theme.toggle();
    ensure!(theme.effective() == expected, "double toggle must be identity");
    let persisted = theme.store().get(THEME_STORAGE_KEY)?;
    ensure!(
        persisted.as_deref() == Some(expected.as_str()),
        "last toggle must be persisted"
    );
    Ok(())
}

#[async_trait::async_trait]
impl BrowserScenario for ThemeScenario {
    async fn run_browser(&self, driver: &WebDriver, ctx: &ScenarioCtx<'_>) -> Result<()> {
        let toggle = format!("#{}", SiteConfig::default().selectors.theme_toggle);
        driver.goto(&ctx.base_url).await?;
        ctx.bridge.ensure_available().await?;

        let before = ctx.bridge.state().await?.theme.context("theme not initialised")?;
        ctx.bridge.click(&toggle).await?;
        let after = ctx.bridge.state().await?.theme.context("theme missing")?;
        ensure!(before != after, "toggle should switch the theme");
        let stored = driver
            .execute("return localStorage.getItem(arguments[0])", vec![THEME_STORAGE_KEY.into()])
            .await?;
        ensure!(
            stored.json().as_str() == Some(after.as_str()),
            "choice should be persisted to localStorage"
        );
        let checked = ctx.bridge.attr(&toggle, "aria-checked").await?;
        ensure!(
            checked.as_deref() == Some(if after == "dark" { "true" } else { "false" }),
            "aria-checked should mirror the theme"
        );

        ctx.bridge.click(&toggle).await?;
        let restored = ctx.bridge.state().await?.theme.context("theme missing")?;
        ensure!(restored == before, "double toggle should restore {before}");
        Ok(())
    }
}

impl CombinedScenario for ThemeScenario {
    fn as_logic_scenario(&self) -> Option<TestScenario> {
        Some(TestScenario::new("Theme", theme_check))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_preference_combinations_replay() {
        for i in 0..8 {
            theme_check(i).unwrap();
        }
    }
}
