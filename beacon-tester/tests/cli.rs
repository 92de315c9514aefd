use std::path::PathBuf;
use std::process::{Command, Output};

/// Run the binary with `args`, writing its report to a fresh temp file.
fn run_with_report(label: &str, args: &[&str]) -> (Output, String) {
    let report: PathBuf =
        std::env::temp_dir().join(format!("beacon-cli-{label}-{}.out", std::process::id()));
    let output = Command::new(env!("CARGO_BIN_EXE_beacon-tester"))
        .args(args)
        .arg("--output")
        .arg(&report)
        .output()
        .expect("spawn beacon-tester");
    let text = std::fs::read_to_string(&report).unwrap_or_default();
    let _ = std::fs::remove_file(&report);
    (output, text)
}

#[test]
fn catalogue_lists_each_behaviour() {
    let (output, text) = run_with_report("list", &["--list-scenarios"]);
    assert!(output.status.success());
    assert!(text.starts_with("Available scenarios:"));
    for name in ["smoke", "modal", "form", "theme", "accordion", "menu"] {
        assert!(text.contains(name), "catalogue misses {name}");
    }
}

#[test]
fn logic_replay_of_everything_passes() {
    let (output, text) = run_with_report(
        "logic",
        &["--mode", "logic", "--scenarios", "all", "--iterations", "5", "--report", "json"],
    );
    assert!(
        output.status.success(),
        "{}",
        String::from_utf8_lossy(&output.stderr)
    );
    let report: serde_json::Value = serde_json::from_str(&text).expect("json report");
    let results = report.as_array().expect("array of results");
    assert_eq!(results.len(), 6);
    for result in results {
        assert_eq!(result["passed"], true, "{result}");
        assert_eq!(result["runs"], 5);
    }
}

#[test]
fn unknown_browser_is_reported_and_skipped() {
    let (output, text) = run_with_report(
        "browser",
        &["--mode", "browser", "--browsers", "unknown", "--report", "json"],
    );
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Unknown browser"));
    assert_eq!(text.trim(), "[]");
}
