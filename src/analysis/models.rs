
use serde::{Deserialize, Deserializer, Serialize};
use strum::{EnumIter, IntoStaticStr};

use super::error::AnalysisError;
use crate::search::SearchResult;


#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, IntoStaticStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RiskBand {
    LikelyLegitimate,
    Mixed,
    RedFlags,
    LikelyScam,
}

impl RiskBand {

    pub fn from_score(score: u8) -> Self {
        match score {
            0..=30 => Self::LikelyLegitimate,
            31..=50 => Self::Mixed,
            51..=70 => Self::RedFlags,
            _ => Self::LikelyScam,
        }
    }

    /// Inclusive score bounds.
    pub fn range(&self) -> (u8, u8) {
        match self {
            Self::LikelyLegitimate => (0, 30),
            Self::Mixed => (31, 50),
            Self::RedFlags => (51, 70),
            Self::LikelyScam => (71, 100),
        }
    }

    pub fn guidance(&self) -> &'static str {
        match self {
            Self::LikelyLegitimate => "Likely legitimate with strong positive reputation",
            Self::Mixed => "Mixed reviews, some concerns but not definitive",
            Self::RedFlags => "Multiple red flags, proceed with caution",
            Self::LikelyScam => "High probability of scam, strong evidence of fraud",
        }
    }
}


/// Negative-signal results first, then positive-signal results. Never deduplicated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    results: Vec<SearchResult>,
}

impl ResultSet {
    pub fn merge(negative: Vec<SearchResult>, positive: Vec<SearchResult>) -> Self {
        let mut results = negative;
        results.extend(positive);
        Self { results }
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SearchResult> {
        self.results.iter()
    }

    pub fn first_image_url(&self) -> Option<&str> {
        self.results.iter().find_map(SearchResult::image_url)
    }
}


#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelVerdict {
    pub scammer_score: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub summary: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub reasons: Vec<String>,
}

/// Missing and `null` both decode to the type's default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl ModelVerdict {
    /// Scores must be finite and within [0, 100]; fractions round to the nearest integer.
    pub fn validated_score(&self) -> Result<u8, AnalysisError> {
        let score = self.scammer_score;
        if !score.is_finite() || !(0.0..=100.0).contains(&score) {
            return Err(AnalysisError::ScoreOutOfRange(score));
        }
        Ok(score.round() as u8)
    }
}


#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub name: String,
    pub scammer_score: u8,
    pub summary: String,
    pub reasons: Vec<String>,
    pub image_url: Option<String>,
    pub sources_count: usize,
    pub risk_band: RiskBand,
}
