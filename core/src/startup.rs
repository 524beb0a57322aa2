//! Startup registration: validating the setup form and deriving day 1.

use crate::{
    catalog::{BusinessType, City},
    error::{GameError, GameResult},
    profile::CeoProfile,
    state::{GameRecord, GameState},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const ALLOCATION_MIN: u32 = 5;
pub const ALLOCATION_MAX: u32 = 70;
pub const ALLOCATION_TOTAL: u32 = 100;

/// Price the setup form starts with.
pub const DEFAULT_PRODUCT_PRICE: f64 = 100.0;

/// A strictly positive, finite unit price. The engine divides by it, so
/// zero and negative prices are rejected here and nowhere else.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct ProductPrice(f64);

impl ProductPrice {
    pub fn new(value: f64) -> GameResult<Self> {
        if value.is_finite() && value > 0.0 {
            Ok(Self(value))
        } else {
            Err(GameError::validation(
                "Invalid Product Price",
                format!("Product price must be a positive amount, got {value}."),
            ))
        }
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for ProductPrice {
    type Error = GameError;

    fn try_from(value: f64) -> GameResult<Self> {
        Self::new(value)
    }
}

impl From<ProductPrice> for f64 {
    fn from(price: ProductPrice) -> f64 {
        price.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetCategory {
    Research,
    Hr,
    Marketing,
    Operations,
}

/// Percentage split of the starting capital. Whole percentages only.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct BudgetAllocation {
    pub research: u32,
    pub hr: u32,
    pub marketing: u32,
    pub operations: u32,
}

impl Default for BudgetAllocation {
    fn default() -> Self {
        Self {
            research: 25,
            hr: 25,
            marketing: 25,
            operations: 25,
        }
    }
}

impl BudgetAllocation {
    pub fn new(research: u32, hr: u32, marketing: u32, operations: u32) -> Self {
        Self {
            research,
            hr,
            marketing,
            operations,
        }
    }

    pub fn total(&self) -> u32 {
        self.research + self.hr + self.marketing + self.operations
    }

    pub fn get(&self, category: BudgetCategory) -> u32 {
        match category {
            BudgetCategory::Research => self.research,
            BudgetCategory::Hr => self.hr,
            BudgetCategory::Marketing => self.marketing,
            BudgetCategory::Operations => self.operations,
        }
    }

    fn slot(&mut self, category: BudgetCategory) -> &mut u32 {
        match category {
            BudgetCategory::Research => &mut self.research,
            BudgetCategory::Hr => &mut self.hr,
            BudgetCategory::Marketing => &mut self.marketing,
            BudgetCategory::Operations => &mut self.operations,
        }
    }

    /// Move one slider. The change is kept only if the share stays within
    /// [5, 70] and the total stays at or below 100. Returns whether the
    /// allocation changed.
    pub fn adjust(&mut self, category: BudgetCategory, value: u32) -> bool {
        if !(ALLOCATION_MIN..=ALLOCATION_MAX).contains(&value) {
            return false;
        }
        let others = self.total() - self.get(category);
        if others + value > ALLOCATION_TOTAL {
            return false;
        }
        *self.slot(category) = value;
        true
    }

    pub fn validate(&self) -> GameResult<()> {
        let shares = [self.research, self.hr, self.marketing, self.operations];
        if shares
            .iter()
            .any(|s| !(ALLOCATION_MIN..=ALLOCATION_MAX).contains(s))
        {
            return Err(GameError::validation(
                "Budget Allocation Error",
                format!(
                    "Each budget share must be between {ALLOCATION_MIN}% and {ALLOCATION_MAX}%."
                ),
            ));
        }
        if self.total() != ALLOCATION_TOTAL {
            return Err(GameError::validation(
                "Budget Allocation Error",
                "Please allocate exactly 100% of your budget across all categories.",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StartupConfig {
    pub business_name: String,
    pub city: City,
    pub business_type: BusinessType,
    pub product_name: String,
    pub product_price: ProductPrice,
    pub budget_allocation: BudgetAllocation,
}

/// The setup form as filled in so far.
#[derive(Debug, Clone)]
pub struct StartupDraft {
    pub business_name: String,
    pub city: Option<City>,
    pub business_type: Option<BusinessType>,
    pub product_name: String,
    pub product_price: f64,
    pub budget_allocation: BudgetAllocation,
}

impl Default for StartupDraft {
    fn default() -> Self {
        Self {
            business_name: String::new(),
            city: None,
            business_type: None,
            product_name: String::new(),
            product_price: DEFAULT_PRODUCT_PRICE,
            budget_allocation: BudgetAllocation::default(),
        }
    }
}

impl StartupDraft {
    /// Validate the form. Required fields first, then the budget, then
    /// the price.
    pub fn build(self) -> GameResult<StartupConfig> {
        let business_name = self.business_name.trim();
        let product_name = self.product_name.trim();
        let (Some(city), Some(business_type)) = (self.city, self.business_type) else {
            return Err(incomplete());
        };
        if business_name.is_empty() || product_name.is_empty() {
            return Err(incomplete());
        }

        self.budget_allocation.validate()?;
        let product_price = ProductPrice::new(self.product_price)?;

        Ok(StartupConfig {
            business_name: business_name.to_string(),
            city,
            business_type,
            product_name: product_name.to_string(),
            product_price,
            budget_allocation: self.budget_allocation,
        })
    }
}

fn incomplete() -> GameError {
    GameError::validation(
        "Incomplete Setup",
        "Please fill in all required fields to start your business.",
    )
}

/// Day-1 state for a freshly registered startup.
pub fn initial_game_state(profile: &CeoProfile) -> GameState {
    GameState::initial(profile.starting_capital)
}

/// Validate the setup form and assemble the record the dashboard loads.
pub fn register_startup(
    profile: CeoProfile,
    draft: StartupDraft,
    created_at: DateTime<Utc>,
) -> GameResult<GameRecord> {
    let startup = draft.build()?;
    let game_state = initial_game_state(&profile);
    Ok(GameRecord {
        ceo_profile: profile,
        startup,
        game_state,
        created_at,
    })
}
