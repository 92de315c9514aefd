use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

use crate::common::scenario::TestScenario;

/// Outcome of one scenario, shared by logic replays and browser runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub scenario: String,
    pub passed: bool,
    pub runs: usize,
    pub passed_runs: usize,
    pub failures: Vec<String>,
    /// Serialized in microseconds, like every duration in the report.
    #[serde(with = "micros")]
    pub mean_duration: Duration,
    #[serde(with = "micros::many")]
    pub timings: Vec<Duration>,
}

pub struct LogicTester {
    verbose: bool,
}

impl LogicTester {
    pub const fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Run `scenario.check` once per iteration index and fold the outcomes.
    pub fn run_scenario(&self, scenario: &TestScenario, iterations: usize) -> ScenarioResult {
        if self.verbose {
            println!("🧪 {} x{iterations}", scenario.name.bright_white());
        }

        let (timings, failures): (Vec<Duration>, Vec<Option<String>>) = (0..iterations)
            .map(|i| {
                let clock = Instant::now();
                let outcome = (scenario.check)(i);
                let failure = outcome.err().map(|err| {
                    if self.verbose {
                        println!("  ❌ run {i}: {}", format!("{err:#}").red());
                    }
                    format!("run {i}: {err:#}")
                });
                (clock.elapsed(), failure)
            })
            .unzip();
        let failures: Vec<String> = failures.into_iter().flatten().collect();

        ScenarioResult {
            scenario: scenario.name.clone(),
            passed: failures.is_empty(),
            runs: iterations,
            passed_runs: iterations - failures.len(),
            failures,
            mean_duration: mean(&timings),
            timings,
        }
    }
}

fn mean(samples: &[Duration]) -> Duration {
    match u32::try_from(samples.len()) {
        Ok(0) => Duration::ZERO,
        Ok(n) => samples.iter().sum::<Duration>() / n,
        Err(_) => Duration::MAX,
    }
}

mod micros {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    fn from_micros(value: u64) -> Duration {
        Duration::from_micros(value)
    }

    fn to_micros(value: &Duration) -> u64 {
        u64::try_from(value.as_micros()).unwrap_or(u64::MAX)
    }

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(to_micros(value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(from_micros)
    }

    pub mod many {
        use serde::{Deserialize, Deserializer, Serializer};
        use std::time::Duration;

        pub fn serialize<S: Serializer>(values: &[Duration], serializer: S) -> Result<S::Ok, S::Error> {
            serializer.collect_seq(values.iter().map(super::to_micros))
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Vec<Duration>, D::Error> {
            let raw = Vec::<u64>::deserialize(deserializer)?;
            Ok(raw.into_iter().map(super::from_micros).collect())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn always_ok(_: usize) -> anyhow::Result<()> {
        Ok(())
    }

    fn fails_on_odd(i: usize) -> anyhow::Result<()> {
        anyhow::ensure!(i % 2 == 0, "odd iteration {i}");
        Ok(())
    }

    #[test]
    fn counts_successes_and_failures() {
        let tester = LogicTester::new(false);
        let ok = tester.run_scenario(&TestScenario::new("ok", always_ok), 3);
        assert!(ok.passed);
        assert_eq!(ok.passed_runs, 3);
        assert_eq!(ok.timings.len(), 3);

        let mixed = tester.run_scenario(&TestScenario::new("mixed", fails_on_odd), 4);
        assert!(!mixed.passed);
        assert_eq!(mixed.passed_runs, 2);
        assert_eq!(mixed.failures.len(), 2);
        assert!(mixed.failures[0].starts_with("run 1: odd iteration 1"));
    }

    #[test]
    fn durations_serialize_as_microseconds() {
        let result = ScenarioResult {
            scenario: "x".to_string(),
            passed: true,
            runs: 1,
            passed_runs: 1,
            failures: Vec::new(),
            mean_duration: Duration::from_millis(2),
            timings: vec![Duration::from_micros(7)],
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["mean_duration"], 2000);
        assert_eq!(json["timings"][0], 7);
        let back: ScenarioResult = serde_json::from_value(json).unwrap();
        assert_eq!(back.mean_duration, Duration::from_millis(2));
    }

    #[test]
    fn zero_iterations_report_zero_duration() {
        let result = LogicTester::new(false).run_scenario(&TestScenario::new("none", always_ok), 0);
        assert!(result.passed);
        assert_eq!(result.mean_duration, Duration::ZERO);
    }
}
