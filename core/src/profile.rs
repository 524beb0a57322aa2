//! CEO profile creation.

use crate::{
    catalog::{Experience, Industry, Personality},
    error::{GameError, GameResult},
    types::Money,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CeoProfile {
    pub name: String,
    pub personality: Personality,
    pub industry: Industry,
    pub experience: Experience,
    pub starting_capital: Money,
    pub created_at: DateTime<Utc>,
}

/// The profile form as filled in so far.
#[derive(Debug, Clone, Default)]
pub struct ProfileDraft {
    pub name: String,
    pub personality: Option<Personality>,
    pub industry: Option<Industry>,
    pub experience: Experience,
}

/// Industry base capital, scaled by the personality bonus and floored.
pub fn starting_capital(personality: Personality, industry: Industry) -> Money {
    industry.base_capital() * personality.capital_bonus_percent() / 100
}

/// Validate the draft and derive the profile.
pub fn build_profile(draft: ProfileDraft, created_at: DateTime<Utc>) -> GameResult<CeoProfile> {
    let name = draft.name.trim();
    let (Some(personality), Some(industry)) = (draft.personality, draft.industry) else {
        return Err(incomplete());
    };
    if name.is_empty() {
        return Err(incomplete());
    }

    Ok(CeoProfile {
        name: name.to_string(),
        personality,
        industry,
        experience: draft.experience,
        starting_capital: starting_capital(personality, industry),
        created_at,
    })
}

fn incomplete() -> GameError {
    GameError::validation(
        "Incomplete Profile",
        "Please fill in all required fields to create your CEO profile.",
    )
}
