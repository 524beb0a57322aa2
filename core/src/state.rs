//! The game state and the persisted game record.

use crate::{
    profile::CeoProfile,
    startup::StartupConfig,
    types::{Day, Money},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const METRIC_MIN: u32 = 0;
pub const METRIC_MAX: u32 = 100;

pub const INITIAL_EMPLOYEES: u32 = 1;
pub const INITIAL_SATISFACTION: u32 = 50;
pub const INITIAL_MORALE: u32 = 70;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub day: Day,
    pub cash: Money,
    pub employees: u32,
    pub inventory: u64,
    /// Cumulative since day 1.
    pub revenue: Money,
    /// Cumulative since day 1.
    pub expenses: Money,
    pub customer_satisfaction: u32,
    pub employee_morale: u32,
}

impl GameState {
    /// Day 1 of a new business: the CEO alone, no stock, no history.
    pub fn initial(starting_capital: Money) -> Self {
        Self {
            day: 1,
            cash: starting_capital,
            employees: INITIAL_EMPLOYEES,
            inventory: 0,
            revenue: 0,
            expenses: 0,
            customer_satisfaction: INITIAL_SATISFACTION,
            employee_morale: INITIAL_MORALE,
        }
    }

    pub fn net_profit(&self) -> Money {
        self.revenue - self.expenses
    }

    /// Net profit as a percentage of revenue, to one decimal place.
    /// Zero before any revenue has been earned.
    pub fn profit_margin(&self) -> f64 {
        if self.revenue <= 0 {
            return 0.0;
        }
        let pct = self.net_profit() as f64 / self.revenue as f64 * 100.0;
        (pct * 10.0).round() / 10.0
    }

    pub fn margin_rating(&self) -> MarginRating {
        MarginRating::for_margin(self.profit_margin())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MarginRating {
    Excellent,
    Good,
    Low,
}

impl MarginRating {
    pub fn for_margin(margin_pct: f64) -> Self {
        if margin_pct >= 20.0 {
            Self::Excellent
        } else if margin_pct >= 10.0 {
            Self::Good
        } else {
            Self::Low
        }
    }

    pub fn advice(&self) -> &'static str {
        match self {
            Self::Excellent => "Excellent! Your business is highly profitable.",
            Self::Good => "Good profit margin. Room for improvement.",
            Self::Low => "Low profit margin. Consider optimizing costs or increasing prices.",
        }
    }
}

/// Everything persisted for one game.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GameRecord {
    pub ceo_profile: CeoProfile,
    pub startup: StartupConfig,
    pub game_state: GameState,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_totals(revenue: Money, expenses: Money) -> GameState {
        GameState {
            revenue,
            expenses,
            ..GameState::initial(0)
        }
    }

    #[test]
    fn margin_is_zero_without_revenue() {
        let state = with_totals(0, 12_000);
        assert_eq!(state.profit_margin(), 0.0);
        assert_eq!(state.net_profit(), -12_000);
        assert_eq!(state.margin_rating(), MarginRating::Low);
    }

    #[test]
    fn margin_rounds_to_one_decimal() {
        // 1/3 profit margin
        let state = with_totals(30_000, 20_000);
        assert_eq!(state.profit_margin(), 33.3);
        assert_eq!(state.margin_rating(), MarginRating::Excellent);
    }

    #[test]
    fn rating_thresholds() {
        assert_eq!(MarginRating::for_margin(20.0), MarginRating::Excellent);
        assert_eq!(MarginRating::for_margin(19.9), MarginRating::Good);
        assert_eq!(MarginRating::for_margin(10.0), MarginRating::Good);
        assert_eq!(MarginRating::for_margin(9.9), MarginRating::Low);
        assert_eq!(MarginRating::for_margin(-50.0), MarginRating::Low);
    }

    #[test]
    fn serializes_with_camel_case_fields() {
        let json = serde_json::to_value(GameState::initial(700_000)).unwrap();
        assert_eq!(json["customerSatisfaction"], 50);
        assert_eq!(json["employeeMorale"], 70);
        assert_eq!(json["cash"], 700_000);
    }
}
