use anyhow::Result;
use thirtyfour::prelude::*;

use crate::browser::TestBridge;

pub mod accordion;
pub mod form;
pub mod menu;
pub mod modal;
pub mod smoke;
pub mod theme;

#[derive(Debug, Clone)]
pub struct ScenarioCtx<'a> {
    pub base_url: String,
    pub bridge: TestBridge<'a>,
    pub verbose: bool,
}

/// One replay of a behaviour property; the argument is the iteration index.
pub type LogicCheck = fn(usize) -> Result<()>;

// Logic test scenario
#[derive(Debug, Clone)]
pub struct TestScenario {
    pub name: String,
    pub check: LogicCheck,
}

impl TestScenario {
    #[must_use]
    pub fn new(name: impl Into<String>, check: LogicCheck) -> Self {
        Self {
            name: name.into(),
            check,
        }
    }
}

// Browser test scenario
#[async_trait::async_trait]
pub trait BrowserScenario {
    async fn run_browser(&self, driver: &WebDriver, ctx: &ScenarioCtx<'_>) -> Result<()>;
}

// Combined scenario that can run both logic and browser tests
pub trait CombinedScenario: BrowserScenario {
    fn as_logic_scenario(&self) -> Option<TestScenario>;
}

const CATALOG: [(&str, &str); 6] = [
    ("smoke", "Bridge loads and every controller starts at rest"),
    ("modal", "Scroll lock, focus trap and focus return for the modal"),
    ("form", "Validation feedback and the simulated submission cycle"),
    ("theme", "Theme resolution, persistence and double-toggle identity"),
    ("accordion", "Independent panels and bounded keyboard navigation"),
    ("menu", "Mobile navigation expand and collapse rules"),
];

pub fn get_scenario(name: &str) -> Option<Box<dyn CombinedScenario + Send + Sync>> {
    match name.to_lowercase().as_str() {
        "smoke" => Some(Box::new(smoke::SmokeScenario)),
        "modal" | "focus-trap" => Some(Box::new(modal::ModalScenario)),
        "form" | "contact-form" => Some(Box::new(form::FormScenario)),
        "theme" | "dark-mode" => Some(Box::new(theme::ThemeScenario)),
        "accordion" => Some(Box::new(accordion::AccordionScenario)),
        "menu" | "navigation" => Some(Box::new(menu::MenuScenario)),
        _ => None,
    }
}

pub fn list_scenarios() -> Vec<(&'static str, &'static str)> {
    CATALOG.to_vec()
}

/// Expand `all` into every catalogued scenario, keeping the others in order.
pub fn expand_scenarios(names: &[String]) -> Vec<String> {
    let mut expanded: Vec<String> = Vec::new();
    for name in names {
        if name.eq_ignore_ascii_case("all") {
            for (key, _) in CATALOG {
                if !expanded.iter().any(|n| n == key) {
                    expanded.push(key.to_string());
                }
            }
        } else if !expanded.contains(name) {
            expanded.push(name.clone());
        }
    }
    expanded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_catalogued_scenario_resolves_with_a_logic_replay() {
        for (key, _) in list_scenarios() {
            let scenario = get_scenario(key).unwrap_or_else(|| panic!("{key} missing"));
            let logic = scenario.as_logic_scenario().expect("logic replay");
            (logic.check)(0).unwrap_or_else(|err| panic!("{key}: {err:#}"));
        }
        assert!(get_scenario("unknown").is_none());
    }

    #[test]
    fn expand_all_keeps_explicit_order_without_duplicates() {
        let names = vec!["form".to_string(), "all".to_string()];
        let expanded = expand_scenarios(&names);
        assert_eq!(expanded[0], "form");
        assert_eq!(expanded.len(), CATALOG.len());
        assert_eq!(
            expand_scenarios(&["modal".to_string(), "smoke".to_string()]),
            vec!["modal".to_string(), "smoke".to_string()]
        );
    }
}
