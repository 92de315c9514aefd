use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use thirtyfour::prelude::*;

/// Controller state exposed by `window.__beaconTest.state()`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct SiteSnapshot {
    pub modal_open: bool,
    pub scroll_locked: bool,
    pub background_inert: bool,
    pub keyboard_nav: bool,
    pub reduced_motion: bool,
    pub theme: Option<String>,
    pub menu_expanded: bool,
    pub accordion_expanded: Vec<bool>,
    pub form_phase: String,
    pub active_dialogs: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct TestBridge<'a> {
    driver: &'a WebDriver,
}

impl<'a> TestBridge<'a> {
    pub const fn new(driver: &'a WebDriver) -> Self {
        Self { driver }
    }

    pub async fn ensure_available(&self) -> Result<()> {
        let result = self
            .driver
            .execute("return !!window.__beaconTest", vec![])
            .await?;
        let ok = result.json().as_bool().unwrap_or(false);
        if !ok {
            bail!("__beaconTest is not available. Did you pass ?test=1 and load the wasm bundle?");
        }
        Ok(())
    }

    pub async fn state(&self) -> Result<SiteSnapshot> {
        let result = self
            .driver
            .execute("return window.__beaconTest.state()", vec![])
            .await?;
        let v = result.json().clone();
        serde_json::from_value(v).context("parsing SiteSnapshot")
    }

    /// Dispatch a `keydown` on whichever element has focus.
    pub async fn key(&self, key: &str, shift: bool) -> Result<()> {
        self.driver
            .execute(
                "const target = document.activeElement || document.body;\n\
                 target.dispatchEvent(new KeyboardEvent('keydown', \
                 { key: arguments[0], shiftKey: arguments[1], bubbles: true, cancelable: true }));",
                vec![key.into(), shift.into()],
            )
            .await?;
        Ok(())
    }

    /// Press Tab (or Shift+Tab) as a real keystroke, so the browser moves focus itself.
    pub async fn press_tab(&self, shift: bool) -> Result<()> {
        let chain = self.driver.action_chain();
        let chain = if shift {
            chain
                .key_down(Key::Shift)
                .key_down(Key::Tab)
                .key_up(Key::Tab)
                .key_up(Key::Shift)
        } else {
            chain.key_down(Key::Tab).key_up(Key::Tab)
        };
        chain.perform().await.context("sending Tab keystroke")?;
        Ok(())
    }

    /// Where focus sits among the enabled `focusable` elements of `container`:
    /// `(index, count)`, with no index when focus is outside them.
    pub async fn focus_position(
        &self,
        container: &str,
        focusable: &str,
    ) -> Result<(Option<usize>, usize)> {
        let ret = self
            .driver
            .execute(
                "const root = document.querySelector(arguments[0]);\n\
                 if (!root) { return [-1, 0]; }\n\
                 const items = Array.from(root.querySelectorAll(arguments[1]))\n\
                   .filter(el => !el.hasAttribute('disabled'));\n\
                 return [items.indexOf(document.activeElement), items.length];",
                vec![container.into(), focusable.into()],
            )
            .await?;
        let pair = ret.json().as_array().cloned().unwrap_or_default();
        let index = pair
            .first()
            .and_then(serde_json::Value::as_i64)
            .and_then(|i| usize::try_from(i).ok());
        let count = pair
            .get(1)
            .and_then(serde_json::Value::as_u64)
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or(0);
        Ok((index, count))
    }

    pub async fn active_id(&self) -> Result<Option<String>> {
        let ret = self
            .driver
            .execute(
                "return document.activeElement ? document.activeElement.id : null",
                vec![],
            )
            .await?;
        Ok(ret.json().as_str().map(str::to_string))
    }

    pub async fn active_matches(&self, selector: &str) -> Result<bool> {
        let ret = self
            .driver
            .execute(
                "return !!(document.activeElement && document.activeElement.matches(arguments[0]));",
                vec![selector.into()],
            )
            .await?;
        Ok(ret.json().as_bool().unwrap_or(false))
    }

    /// Click through the DOM so hidden responsive controls still receive it.
    pub async fn click(&self, selector: &str) -> Result<()> {
        let ret = self
            .driver
            .execute(
                "const el = document.querySelector(arguments[0]);\n\
                 if (!el) { return false; }\n\
                 el.click();\n\
                 return true;",
                vec![selector.into()],
            )
            .await?;
        if !ret.json().as_bool().unwrap_or(false) {
            bail!("no element matches {selector}");
        }
        Ok(())
    }

    /// Read an attribute of the first element matching `selector`.
    pub async fn attr(&self, selector: &str, name: &str) -> Result<Option<String>> {
        let ret = self
            .driver
            .execute(
                "const el = document.querySelector(arguments[0]);\n\
                 return el ? el.getAttribute(arguments[1]) : null;",
                vec![selector.into(), name.into()],
            )
            .await?;
        Ok(ret.json().as_str().map(str::to_string))
    }

    pub async fn text(&self, selector: &str) -> Result<String> {
        let ret = self
            .driver
            .execute(
                "const el = document.querySelector(arguments[0]);\n\
                 return el ? el.textContent : '';",
                vec![selector.into()],
            )
            .await?;
        Ok(ret.json().as_str().unwrap_or_default().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn snapshot_tolerates_missing_fields() {
        let snap: SiteSnapshot =
            serde_json::from_value(json!({ "modal_open": true, "theme": "dark" })).unwrap();
        assert!(snap.modal_open);
        assert_eq!(snap.theme.as_deref(), Some("dark"));
        assert!(snap.accordion_expanded.is_empty());
        assert!(!snap.background_inert);
    }
}
