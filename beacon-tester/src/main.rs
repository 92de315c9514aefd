mod browser;
mod common;
mod logic;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use thirtyfour::WebDriver;

use browser::{BrowserConfig, BrowserKind, TestBridge, new_session};
use common::scenario::{ScenarioCtx, expand_scenarios, get_scenario, list_scenarios};
use common::{FailureArtifacts, artifacts_dir, split_csv};
use logic::{LogicTester, ScenarioResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Replay controller behaviour against beacon-core, no browser needed
    Logic,
    /// Drive a served page over WebDriver
    Browser,
    /// Logic replay first, then the browser pass
    Both,
}

impl Mode {
    const fn replays_logic(self) -> bool {
        matches!(self, Self::Logic | Self::Both)
    }

    const fn drives_browsers(self) -> bool {
        matches!(self, Self::Browser | Self::Both)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Console,
    Json,
    Markdown,
}

#[derive(Debug, Parser)]
#[command(name = "beacon-tester", version)]
#[command(about = "Accessibility QA for Beacon: behaviour replay and browser automation")]
struct Args {
    #[arg(long, value_enum, default_value_t = Mode::Logic)]
    mode: Mode,

    /// Comma-separated scenario names, or `all`
    #[arg(long, default_value = "smoke")]
    scenarios: String,

    /// Print the scenario catalogue and exit
    #[arg(long)]
    list_scenarios: bool,

    /// Replay iterations per logic scenario
    #[arg(long, default_value_t = 10)]
    iterations: usize,

    #[arg(long, value_enum, default_value_t = ReportFormat::Console)]
    report: ReportFormat,

    #[arg(short, long)]
    verbose: bool,

    /// Write the report here instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Comma-separated browsers: chrome, edge, firefox, safari
    #[arg(long, default_value = "chrome")]
    browsers: String,

    /// Page under test; keep `test=1` so the page exposes its state bridge
    #[arg(long, default_value = "http://localhost:8080/?test=1")]
    base_url: String,

    /// Where failing browser scenarios leave screenshots and state dumps
    #[arg(long, default_value = "target/test-artifacts")]
    artifacts_dir: String,

    /// Selenium Grid hub used instead of local drivers
    #[arg(long)]
    hub: Option<String>,

    /// Show browser windows
    #[arg(long)]
    windowed: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.list_scenarios {
        let mut out = open_output(args.output.as_deref())?;
        print_catalog(&mut out)?;
        return Ok(());
    }

    println!("{}", "♿ Beacon Automated Tester".bright_cyan().bold());

    let mut suite = Suite::new(&args);
    if args.mode.replays_logic() {
        suite.replay_logic();
    }
    if args.mode.drives_browsers() {
        suite.drive_browsers().await;
    }

    let mut out = open_output(args.output.as_deref())?;
    suite.report(&mut out)?;

    if !suite.all_passed() {
        std::process::exit(1);
    }
    Ok(())
}

fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    Ok(match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("creating report file {}", path.display()))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(BufWriter::new(io::stdout())),
    })
}

fn print_catalog(out: &mut dyn Write) -> Result<()> {
    writeln!(out, "Available scenarios:")?;
    for (name, description) in list_scenarios() {
        writeln!(out, "  {name:12} - {description}")?;
    }
    out.flush()?;
    Ok(())
}

fn session_config(args: &Args) -> BrowserConfig {
    BrowserConfig {
        headless: !args.windowed,
        remote_hub: args.hub.clone(),
        ..BrowserConfig::default()
    }
}

/// One invocation's scenarios and the results gathered so far.
struct Suite<'a> {
    args: &'a Args,
    scenarios: Vec<String>,
    results: Vec<ScenarioResult>,
    started: Instant,
}

impl<'a> Suite<'a> {
    fn new(args: &'a Args) -> Self {
        Self {
            args,
            scenarios: expand_scenarios(&split_csv(&args.scenarios)),
            results: Vec::new(),
            started: Instant::now(),
        }
    }

    fn all_passed(&self) -> bool {
        self.results.iter().all(|r| r.passed)
    }

    fn replay_logic(&mut self) {
        println!("{}", "🧠 Logic replay".bright_yellow().bold());
        let tester = LogicTester::new(self.args.verbose);
        for name in &self.scenarios {
            match get_scenario(name).and_then(|s| s.as_logic_scenario()) {
                Some(replay) => self
                    .results
                    .push(tester.run_scenario(&replay, self.args.iterations)),
                None => eprintln!("⚠️  Unknown scenario: {}", name.yellow()),
            }
        }
    }

    async fn drive_browsers(&mut self) {
        println!("{}", "🌐 Browser pass".bright_blue().bold());
        let cfg = session_config(self.args);
        for name in split_csv(&self.args.browsers) {
            let Some(kind) = BrowserKind::parse(&name) else {
                eprintln!("⚠️  Unknown browser: {}", name.yellow());
                continue;
            };
            match new_session(kind, &cfg).await {
                Ok(driver) => {
                    self.drive_one(kind, &driver).await;
                    if let Err(err) = driver.quit().await {
                        log::debug!("{} session did not close cleanly: {err}", kind.label());
                    }
                }
                Err(err) => eprintln!("❌ {} unavailable: {err}", kind.label()),
            }
        }
    }

    async fn drive_one(&mut self, kind: BrowserKind, driver: &WebDriver) {
        let label = kind.label();
        for name in &self.scenarios {
            let Some(scenario) = get_scenario(name) else {
                continue;
            };
            let ctx = ScenarioCtx {
                base_url: self.args.base_url.clone(),
                bridge: TestBridge::new(driver),
                verbose: self.args.verbose,
            };

            let clock = Instant::now();
            let outcome = scenario.run_browser(driver, &ctx).await;
            let elapsed = clock.elapsed();
            let failure = match outcome {
                Ok(()) => {
                    println!("✅ [{}] {name} in {elapsed:?}", label.green());
                    None
                }
                Err(err) => {
                    eprintln!("❌ [{}] {name} in {elapsed:?}: {err:#}", label.red());
                    let dir = artifacts_dir(&self.args.artifacts_dir, label, name);
                    let artifacts = FailureArtifacts::collect(driver, &err).await;
                    if let Err(write_err) = artifacts.write_to(&dir) {
                        log::warn!("no artifacts in {}: {write_err:#}", dir.display());
                    }
                    Some(format!("{err:#}"))
                }
            };
            self.results
                .push(browser_result(label, name, elapsed, failure));
        }
    }

    fn report(&self, out: &mut dyn Write) -> Result<()> {
        let results = &self.results;
        match self.args.report {
            ReportFormat::Json if results.is_empty() => writeln!(out, "[]")?,
            ReportFormat::Json => logic::reports::generate_json_report(out, results)?,
            ReportFormat::Markdown if results.is_empty() => {
                writeln!(out, "# Beacon Test Results\n\n_No scenarios executed._")?;
            }
            ReportFormat::Markdown => logic::reports::generate_markdown_report(out, results)?,
            ReportFormat::Console => {
                if results.is_empty() {
                    writeln!(out, "No scenarios executed.")?;
                } else {
                    logic::reports::generate_console_report(out, results, self.started.elapsed())?;
                }
                writeln!(out, "\n🏁 Total time: {:?}", self.started.elapsed())?;
            }
        }
        out.flush()?;
        Ok(())
    }
}

/// Fold one browser run into the shape logic results use.
fn browser_result(
    label: &str,
    scenario: &str,
    duration: Duration,
    failure: Option<String>,
) -> ScenarioResult {
    ScenarioResult {
        scenario: format!("{scenario} ({label})"),
        passed: failure.is_none(),
        runs: 1,
        passed_runs: usize::from(failure.is_none()),
        failures: failure.into_iter().collect(),
        mean_duration: duration,
        timings: vec![duration],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(extra: &[&str]) -> Args {
        Args::parse_from(std::iter::once("beacon-tester").chain(extra.iter().copied()))
    }

    fn rendered(suite: &Suite<'_>) -> String {
        let mut buf = Vec::new();
        suite.report(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn defaults_match_a_local_dev_server() {
        let parsed = Args::parse_from(["beacon-tester"]);
        assert_eq!(parsed.mode, Mode::Logic);
        assert_eq!(parsed.base_url, "http://localhost:8080/?test=1");
        assert_eq!(parsed.report, ReportFormat::Console);
        assert!(!parsed.windowed);
    }

    #[test]
    fn logic_replay_covers_the_whole_catalog() {
        let args = args(&["--scenarios", "all", "--iterations", "12"]);
        let mut suite = Suite::new(&args);
        suite.replay_logic();
        assert_eq!(suite.results.len(), list_scenarios().len());
        for result in &suite.results {
            assert!(result.passed, "{}: {:?}", result.scenario, result.failures);
            assert_eq!(result.runs, 12);
        }
        assert!(suite.all_passed());
    }

    #[test]
    fn unknown_scenarios_produce_no_result() {
        let args = args(&["--scenarios", "nope", "--iterations", "1"]);
        let mut suite = Suite::new(&args);
        suite.replay_logic();
        assert!(suite.results.is_empty());
    }

    #[test]
    fn empty_reports_per_format() {
        let json = args(&["--report", "json"]);
        assert_eq!(rendered(&Suite::new(&json)).trim(), "[]");

        let md = args(&["--report", "markdown"]);
        assert!(rendered(&Suite::new(&md)).contains("No scenarios executed"));

        let console = args(&["--report", "console"]);
        let text = rendered(&Suite::new(&console));
        assert!(text.contains("No scenarios executed."));
        assert!(text.contains("Total time"));
    }

    #[test]
    fn console_report_names_replayed_scenarios() {
        let args = args(&["--report", "console", "--scenarios", "modal", "--iterations", "2"]);
        let mut suite = Suite::new(&args);
        suite.replay_logic();
        assert!(rendered(&suite).contains("Modal"));
    }

    #[test]
    fn catalog_lists_every_scenario() {
        let mut buf = Vec::new();
        print_catalog(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("Available scenarios:"));
        for (name, _) in list_scenarios() {
            assert!(text.contains(name), "missing {name}");
        }
    }

    #[test]
    fn session_config_follows_flags() {
        let args = args(&["--windowed", "--hub", "http://remote.example"]);
        let cfg = session_config(&args);
        assert!(!cfg.headless);
        assert_eq!(cfg.remote_hub.as_deref(), Some("http://remote.example"));
        assert!(session_config(&Args::parse_from(["beacon-tester"])).headless);
    }

    #[test]
    fn browser_result_records_failure() {
        let failed = browser_result("chrome", "modal", Duration::from_millis(5), Some("boom".into()));
        assert!(!failed.passed);
        assert_eq!(failed.scenario, "modal (chrome)");
        assert_eq!(failed.passed_runs, 0);
        let ok = browser_result("chrome", "modal", Duration::ZERO, None);
        assert!(ok.passed && ok.failures.is_empty());
    }

    #[test]
    fn unknown_browser_is_skipped_without_a_session() {
        let args = args(&["--mode", "browser", "--browsers", "unknown"]);
        let mut suite = Suite::new(&args);
        tokio_test::block_on(suite.drive_browsers());
        assert!(suite.results.is_empty());
        assert!(suite.all_passed());
    }
}
