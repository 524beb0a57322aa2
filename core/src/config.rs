//! Tunable constants for the engine and the scheduler.
//!
//! Defaults are the stock game balance. A JSON file may override any
//! subset of fields; missing fields fall back to the defaults.

use crate::{
    event::DayEvent,
    types::{Millis, Money},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    /// Lowest possible base revenue for a day.
    pub revenue_floor: Money,
    /// Width of the uniform base-revenue range. Draws land in
    /// [revenue_floor, revenue_floor + revenue_span).
    pub revenue_span: Money,
    /// Daily wage per employee.
    pub cost_per_employee: Money,
    /// Daily fixed operating cost.
    pub fixed_overhead: Money,
    /// Chance per day that one event fires.
    pub event_probability: f64,
    pub events: Vec<DayEvent>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            revenue_floor: 5_000,
            revenue_span: 10_000,
            cost_per_employee: 2_000,
            fixed_overhead: 5_000,
            event_probability: 0.10,
            events: DayEvent::default_table(),
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(self.revenue_floor >= 0, "revenue_floor must be >= 0");
        anyhow::ensure!(self.revenue_span > 0, "revenue_span must be > 0");
        anyhow::ensure!(
            self.cost_per_employee >= 0 && self.fixed_overhead >= 0,
            "daily costs must be >= 0"
        );
        // Largest base revenue times a 100% satisfaction must fit in Money.
        anyhow::ensure!(
            self.revenue_floor
                .checked_add(self.revenue_span)
                .and_then(|top| top.checked_mul(100))
                .is_some(),
            "revenue_floor + revenue_span is too large"
        );
        // Daily expenses for the largest possible headcount must fit too.
        anyhow::ensure!(
            self.cost_per_employee
                .checked_mul(Money::from(u32::MAX))
                .and_then(|wages| wages.checked_add(self.fixed_overhead))
                .is_some(),
            "cost_per_employee / fixed_overhead are too large"
        );
        anyhow::ensure!(
            (0.0..=1.0).contains(&self.event_probability),
            "event_probability must be within [0, 1], got {}",
            self.event_probability
        );
        anyhow::ensure!(
            self.event_probability == 0.0 || !self.events.is_empty(),
            "event table is empty but event_probability is {}",
            self.event_probability
        );
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Real time per simulated day at 1x.
    pub base_interval_ms: Millis,
    /// Speed multipliers, cycled in order on each speed change.
    pub speeds: Vec<u32>,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            base_interval_ms: 3_000,
            speeds: vec![1, 2, 4],
        }
    }
}

impl SchedulerConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(self.base_interval_ms > 0, "base_interval_ms must be > 0");
        anyhow::ensure!(!self.speeds.is_empty(), "at least one speed is required");
        anyhow::ensure!(
            self.speeds.iter().all(|&s| s > 0),
            "speed multipliers must be > 0"
        );
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    pub engine: EngineConfig,
    pub scheduler: SchedulerConfig,
}

impl GameConfig {
    /// Load and validate a JSON config file.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> anyhow::Result<Self> {
        let config: GameConfig = serde_json::from_str(content)?;
        config.engine.validate()?;
        config.scheduler.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = GameConfig::default();
        config.engine.validate().unwrap();
        config.scheduler.validate().unwrap();
        assert_eq!(config.engine.events.len(), 4);
    }

    #[test]
    fn partial_json_keeps_other_defaults() {
        let config =
            GameConfig::from_json(r#"{ "engine": { "event_probability": 0.25 } }"#).unwrap();
        assert_eq!(config.engine.event_probability, 0.25);
        assert_eq!(config.engine.cost_per_employee, 2_000);
        assert_eq!(config.scheduler, SchedulerConfig::default());
    }

    #[test]
    fn rejects_probability_above_one() {
        let err = GameConfig::from_json(r#"{ "engine": { "event_probability": 1.5 } }"#);
        assert!(err.is_err());
    }

    #[test]
    fn rejects_revenue_that_would_overflow() {
        let err = GameConfig::from_json(
            r#"{ "engine": { "revenue_floor": 9223372036854770000 } }"#,
        );
        assert!(err.is_err());

        let err = GameConfig::from_json(
            r#"{ "engine": { "revenue_span": 1000000000000000000 } }"#,
        );
        assert!(err.is_err());
    }

    #[test]
    fn rejects_wages_that_would_overflow() {
        let err = GameConfig::from_json(
            r#"{ "engine": { "cost_per_employee": 4611686018427387904 } }"#,
        );
        assert!(err.is_err());

        let err = GameConfig::from_json(
            r#"{ "engine": { "fixed_overhead": 9223372036854775807 } }"#,
        );
        assert!(err.is_err());
    }

    #[test]
    fn large_but_safe_values_are_accepted() {
        let config = GameConfig::from_json(
            r#"{ "engine": { "revenue_floor": 1000000000, "cost_per_employee": 1000000 } }"#,
        )
        .unwrap();
        assert_eq!(config.engine.revenue_floor, 1_000_000_000);
    }

    #[test]
    fn rejects_zero_speed() {
        let err = GameConfig::from_json(r#"{ "scheduler": { "speeds": [1, 0] } }"#);
        assert!(err.is_err());
    }
}
