//! Domain types of the supported datasets.
//!
//! Key Rust concepts demonstrated here:
//! - Type aliases for domain clarity (SeriesId, RecommendationId)
//! - A newtype over a fixed bit array (FeatureSignature)
//! - Enums for fixed sets of values, with fallible conversion from raw codes
//! - Derive macros for common traits

use crate::error::{DataLoadError, Result};
use interactions::{ItemId, UserId};
use serde::{Deserialize, Serialize};

// =============================================================================
// Type Aliases
// =============================================================================

/// Identifier of a ContentWise series (the item side of series matrices)
pub type SeriesId = u32;

/// Identifier of a ContentWise recommendation list
pub type RecommendationId = i64;

// =============================================================================
// ContentWise
// =============================================================================

/// Kind of a ContentWise item, coded 0..=3 in the source files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemType {
    Movie,
    MovieClip,
    TvMovie,
    TvSeries,
}

impl ItemType {
    pub fn from_code(code: u8) -> Result<Self> {
        match code {
            0 => Ok(ItemType::Movie),
            1 => Ok(ItemType::MovieClip),
            2 => Ok(ItemType::TvMovie),
            3 => Ok(ItemType::TvSeries),
            _ => Err(DataLoadError::InvalidValue {
                field: "item_type".to_string(),
                value: code.to_string(),
            }),
        }
    }
}

/// Metadata of a ContentWise item (movie or episode)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentWiseItem {
    pub id: ItemId,
    pub series_id: SeriesId,
    pub episode_number: u32,
    pub item_type: ItemType,
}

/// Metadata of a ContentWise series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentWiseSeries {
    pub id: SeriesId,
    /// Number of episodes
    pub length: u32,
}

/// One row of the ContentWise interactions file
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContentWiseInteraction {
    pub timestamp: i64,
    pub user_id: UserId,
    pub item: ContentWiseItem,
    pub series_length: u32,
    /// Negative when the interaction did not come from a recommendation
    pub recommendation_id: RecommendationId,
}

impl ContentWiseInteraction {
    pub fn from_recommendation(&self) -> bool {
        self.recommendation_id >= 0
    }
}

/// One row of an impressions file: the series shown in one recommendation list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImpressionRecord<K> {
    /// Recommendation id (direct-link file) or user id (non-direct file)
    pub key: K,
    pub series: Vec<SeriesId>,
}

// =============================================================================
// Replayer (Yahoo! R6B)
// =============================================================================

/// Number of user feature slots in a Yahoo! R6B record
pub const USER_FEATURES: usize = 135;

/// Set of active user features, which stands in for a user identity.
///
/// Feature `k` (k >= 2) of the source file sets bit `k - 2`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FeatureSignature([u64; 3]);

impl FeatureSignature {
    /// Set the bit of a raw feature index; indices 0 and 1 carry no identity
    pub fn set(&mut self, feature: usize) -> Result<()> {
        if feature < 2 {
            return Ok(());
        }
        let bit = feature - 2;
        if bit >= USER_FEATURES {
            return Err(DataLoadError::InvalidValue {
                field: "user feature".to_string(),
                value: feature.to_string(),
            });
        }
        self.0[bit / 64] |= 1 << (bit % 64);
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|&word| word == 0)
    }
}

/// One line of a Yahoo! R6B event log
#[derive(Debug, Clone, PartialEq)]
pub struct ReplayerEvent {
    pub timestamp: i64,
    pub displayed_item: String,
    pub click: f64,
    pub user: FeatureSignature,
    /// Article pool the displayed item was picked from
    pub pool: Vec<String>,
}
