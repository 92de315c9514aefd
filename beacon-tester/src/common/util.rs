use anyhow::{Context, Result};
use chrono::Utc;
use std::fs;
use std::path::{Path, PathBuf};
use thirtyfour::prelude::*;

const BRIDGE_STATE_JS: &str =
    "return window.__beaconTest && window.__beaconTest.state && window.__beaconTest.state();";

/// What a failed browser scenario leaves behind for triage.
#[derive(Debug, Default)]
pub struct FailureArtifacts {
    pub screenshot: Option<Vec<u8>>,
    pub dom: Option<String>,
    pub bridge_state: Option<serde_json::Value>,
    pub error_chain: String,
}

impl FailureArtifacts {
    /// Collect whatever the session can still provide. Each piece is best effort.
    pub async fn collect(driver: &WebDriver, err: &anyhow::Error) -> Self {
        Self {
            screenshot: driver.screenshot_as_png().await.ok(),
            dom: driver.source().await.ok(),
            bridge_state: driver
                .execute(BRIDGE_STATE_JS, Vec::new())
                .await
                .ok()
                .map(|ret| ret.json().clone())
                .filter(|state| !state.is_null()),
            error_chain: format!("{err:#}"),
        }
    }

    /// Write the collected files into `dir`, creating it first.
    ///
    /// # Errors
    /// Fails only when the directory cannot be created.
    pub fn write_to(&self, dir: &Path) -> Result<()> {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
        let mut files: Vec<(&str, Vec<u8>)> = vec![("error.txt", self.error_chain.clone().into_bytes())];
        if let Some(png) = &self.screenshot {
            files.push(("screenshot.png", png.clone()));
        }
        if let Some(dom) = &self.dom {
            files.push(("dom.html", dom.clone().into_bytes()));
        }
        if let Some(state) = &self.bridge_state {
            files.push(("state.json", serde_json::to_vec_pretty(state)?));
        }
        for (name, bytes) in files {
            if let Err(err) = fs::write(dir.join(name), bytes) {
                log::warn!("could not write {name}: {err}");
            }
        }
        Ok(())
    }
}

/// `<base>/<browser>/<scenario>/<UTC timestamp>`, unique per failing run.
pub fn artifacts_dir(base: &str, browser: &str, scenario: &str) -> PathBuf {
    let stamp = Utc::now().format("%Y%m%dT%H%M%S%3fZ").to_string();
    [base, browser, scenario, stamp.as_str()].iter().collect()
}

pub fn split_csv(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(ToString::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn csv_lists_drop_blank_entries() {
        assert_eq!(split_csv(" modal, ,form,  theme "), vec!["modal", "form", "theme"]);
        assert!(split_csv(" , ").is_empty());
    }

    #[test]
    fn artifact_paths_nest_browser_then_scenario() {
        let dir = artifacts_dir("target/out", "chrome", "modal");
        let parts: Vec<_> = dir.iter().map(|p| p.to_string_lossy().into_owned()).collect();
        assert_eq!(&parts[..4], ["target", "out", "chrome", "modal"]);
        assert!(parts[4].ends_with('Z'));
    }

    #[test]
    fn only_collected_files_are_written() {
        let base = std::env::temp_dir().join(format!("beacon-artifacts-{}", std::process::id()));
        let artifacts = FailureArtifacts {
            screenshot: Some(vec![1, 2, 3]),
            bridge_state: Some(json!({ "modal_open": true, "scroll_locked": true })),
            error_chain: "focus escaped the modal".to_string(),
            ..FailureArtifacts::default()
        };
        artifacts.write_to(&base).unwrap();

        assert!(base.join("screenshot.png").exists());
        assert!(base.join("state.json").exists());
        assert!(!base.join("dom.html").exists());
        assert_eq!(
            std::fs::read_to_string(base.join("error.txt")).unwrap(),
            "focus escaped the modal"
        );
        let _ = std::fs::remove_dir_all(base);
    }
}
