//! Static choice tables: personalities, industries, experience levels,
//! cities and business types.
//!
//! Every choice serializes as its kebab-case id and parses back from it.

use crate::{
    error::{GameError, GameResult},
    types::Money,
};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// One lakh, in currency units.
pub const LAKH: Money = 100_000;

/// Base capital used when an industry's capital label cannot be read.
pub const FALLBACK_BASE_CAPITAL: Money = 5 * LAKH;

/// A fixed set of choices identified by stable string ids.
pub trait Choice: Sized + Copy + 'static {
    const ALL: &'static [Self];
    /// Human-readable name of the choice set, used in error messages.
    const KIND: &'static str;

    fn id(&self) -> &'static str;
    fn label(&self) -> &'static str;
}

fn parse_choice<T: Choice>(s: &str) -> GameResult<T> {
    let wanted = s.trim();
    T::ALL
        .iter()
        .copied()
        .find(|c| c.id().eq_ignore_ascii_case(wanted))
        .ok_or_else(|| {
            let known: Vec<&str> = T::ALL.iter().map(|c| c.id()).collect();
            GameError::validation(
                format!("Unknown {}", T::KIND),
                format!("'{wanted}' is not one of: {}", known.join(", ")),
            )
        })
}

// ── Personality ────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Personality {
    FinanceWizard,
    Innovator,
    PeoplePerson,
    RiskManager,
}

impl Choice for Personality {
    const ALL: &'static [Self] = &[
        Self::FinanceWizard,
        Self::Innovator,
        Self::PeoplePerson,
        Self::RiskManager,
    ];
    const KIND: &'static str = "personality";

    fn id(&self) -> &'static str {
        match self {
            Self::FinanceWizard => "finance-wizard",
            Self::Innovator => "innovator",
            Self::PeoplePerson => "people-person",
            Self::RiskManager => "risk-manager",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::FinanceWizard => "Finance Wizard",
            Self::Innovator => "Tech Innovator",
            Self::PeoplePerson => "People Person",
            Self::RiskManager => "Risk Manager",
        }
    }
}

impl Personality {
    pub fn description(&self) -> &'static str {
        match self {
            Self::FinanceWizard => "Excellent at managing money, budgets, and investments",
            Self::Innovator => "Great at R&D and developing new products",
            Self::PeoplePerson => "Skilled at HR management and team building",
            Self::RiskManager => "Conservative approach, lower risk tolerance",
        }
    }

    /// Advertised bonus. Only the capital bonus is modelled by the
    /// simulation; the rest is flavour text.
    pub fn bonus(&self) -> &'static str {
        match self {
            Self::FinanceWizard => "+20% starting capital, +10% loan approval rates",
            Self::Innovator => "+15% R&D efficiency, +25% product innovation speed",
            Self::PeoplePerson => "+20% employee satisfaction, -15% hiring costs",
            Self::RiskManager => "+25% insurance benefits, -20% crisis impact",
        }
    }

    /// Starting-capital multiplier in percent.
    pub fn capital_bonus_percent(&self) -> Money {
        match self {
            Self::FinanceWizard => 120,
            _ => 100,
        }
    }
}

// ── Industry ───────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Industry {
    Technology,
    Fashion,
    Food,
    Consulting,
    Manufacturing,
}

impl Choice for Industry {
    const ALL: &'static [Self] = &[
        Self::Technology,
        Self::Fashion,
        Self::Food,
        Self::Consulting,
        Self::Manufacturing,
    ];
    const KIND: &'static str = "industry";

    fn id(&self) -> &'static str {
        match self {
            Self::Technology => "technology",
            Self::Fashion => "fashion",
            Self::Food => "food",
            Self::Consulting => "consulting",
            Self::Manufacturing => "manufacturing",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Technology => "Technology",
            Self::Fashion => "Fashion & Retail",
            Self::Food => "Food & Beverage",
            Self::Consulting => "Consulting Services",
            Self::Manufacturing => "Manufacturing",
        }
    }
}

impl Industry {
    /// Base capital as shown to the player, in lakh notation.
    pub fn capital_label(&self) -> &'static str {
        match self {
            Self::Technology => "₹10L",
            Self::Fashion => "₹7L",
            Self::Food => "₹5L",
            Self::Consulting => "₹8L",
            Self::Manufacturing => "₹12L",
        }
    }

    pub fn demand(&self) -> &'static str {
        match self {
            Self::Technology | Self::Food => "High",
            Self::Fashion | Self::Consulting | Self::Manufacturing => "Medium",
        }
    }

    /// Base capital parsed from the capital label.
    pub fn base_capital(&self) -> Money {
        parse_lakh(self.capital_label()).unwrap_or(FALLBACK_BASE_CAPITAL)
    }
}

/// Parse a label such as `₹10L` into currency units.
pub fn parse_lakh(label: &str) -> Option<Money> {
    let digits = label.trim().trim_start_matches('₹').strip_suffix('L')?;
    let lakhs: Money = digits.trim().parse().ok()?;
    lakhs.checked_mul(LAKH)
}

// ── Experience ─────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Experience {
    #[default]
    Fresher,
    Experienced,
    Expert,
}

impl Choice for Experience {
    const ALL: &'static [Self] = &[Self::Fresher, Self::Experienced, Self::Expert];
    const KIND: &'static str = "experience level";

    fn id(&self) -> &'static str {
        match self {
            Self::Fresher => "fresher",
            Self::Experienced => "experienced",
            Self::Expert => "expert",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Fresher => "Fresher",
            Self::Experienced => "Experienced",
            Self::Expert => "Expert",
        }
    }
}

// ── City ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum City {
    Mumbai,
    Delhi,
    Bangalore,
    Pune,
    Ahmedabad,
}

impl Choice for City {
    const ALL: &'static [Self] = &[
        Self::Mumbai,
        Self::Delhi,
        Self::Bangalore,
        Self::Pune,
        Self::Ahmedabad,
    ];
    const KIND: &'static str = "city";

    fn id(&self) -> &'static str {
        match self {
            Self::Mumbai => "mumbai",
            Self::Delhi => "delhi",
            Self::Bangalore => "bangalore",
            Self::Pune => "pune",
            Self::Ahmedabad => "ahmedabad",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Mumbai => "Mumbai",
            Self::Delhi => "Delhi",
            Self::Bangalore => "Bangalore",
            Self::Pune => "Pune",
            Self::Ahmedabad => "Ahmedabad",
        }
    }
}

impl City {
    /// Monthly office rent.
    pub fn monthly_rent(&self) -> Money {
        match self {
            Self::Mumbai => 50_000,
            Self::Delhi => 45_000,
            Self::Bangalore => 40_000,
            Self::Pune => 30_000,
            Self::Ahmedabad => 25_000,
        }
    }

    pub fn demand(&self) -> &'static str {
        match self {
            Self::Mumbai => "Very High",
            Self::Delhi | Self::Bangalore => "High",
            Self::Pune | Self::Ahmedabad => "Medium",
        }
    }

    pub fn tax_level(&self) -> &'static str {
        match self {
            Self::Mumbai | Self::Delhi => "High",
            Self::Bangalore | Self::Pune => "Medium",
            Self::Ahmedabad => "Low",
        }
    }
}

// ── Business type ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum BusinessType {
    SoleProprietorship,
    Partnership,
    PrivateLimited,
}

impl Choice for BusinessType {
    const ALL: &'static [Self] = &[
        Self::SoleProprietorship,
        Self::Partnership,
        Self::PrivateLimited,
    ];
    const KIND: &'static str = "business type";

    fn id(&self) -> &'static str {
        match self {
            Self::SoleProprietorship => "sole-proprietorship",
            Self::Partnership => "partnership",
            Self::PrivateLimited => "private-limited",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::SoleProprietorship => "Sole Proprietorship",
            Self::Partnership => "Partnership",
            Self::PrivateLimited => "Private Limited Company",
        }
    }
}

impl BusinessType {
    pub fn complexity(&self) -> &'static str {
        match self {
            Self::SoleProprietorship => "Simple",
            Self::Partnership => "Medium",
            Self::PrivateLimited => "Complex",
        }
    }

    /// One-off registration cost.
    pub fn registration_cost(&self) -> Money {
        match self {
            Self::SoleProprietorship => 5_000,
            Self::Partnership => 15_000,
            Self::PrivateLimited => 25_000,
        }
    }
}

impl FromStr for Personality {
    type Err = GameError;
    fn from_str(s: &str) -> GameResult<Self> {
        parse_choice(s)
    }
}

impl FromStr for Industry {
    type Err = GameError;
    fn from_str(s: &str) -> GameResult<Self> {
        parse_choice(s)
    }
}

impl FromStr for Experience {
    type Err = GameError;
    fn from_str(s: &str) -> GameResult<Self> {
        parse_choice(s)
    }
}

impl FromStr for City {
    type Err = GameError;
    fn from_str(s: &str) -> GameResult<Self> {
        parse_choice(s)
    }
}

impl FromStr for BusinessType {
    type Err = GameError;
    fn from_str(s: &str) -> GameResult<Self> {
        parse_choice(s)
    }
}
