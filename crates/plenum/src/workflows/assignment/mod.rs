//! Weighting knobs consumed by the external committee-assignment algorithm.
//!
//! The matching algorithm itself runs outside this service; this module only
//! owns the explicitly-constructed configuration object and the per-candidate
//! weighting arithmetic. Callers pass the configuration by reference instead
//! of reaching for ambient module state.

use serde::{Deserialize, Serialize};

const DEFAULT_NULL_RATING: u32 = 3;
const DEFAULT_RATING_FACTOR: f64 = 1.0;
const DEFAULT_MARK_BONUS: f64 = 2.0;
const DEFAULT_NON_WISH_MALUS: f64 = 4.0;

/// Scoring configuration for delegation-to-committee assignment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AssignmentWeights {
    null_rating: u32,
    rating_factor: f64,
    mark_bonus: f64,
    non_wish_malus: f64,
}

impl Default for AssignmentWeights {
    fn default() -> Self {
        Self {
            null_rating: DEFAULT_NULL_RATING,
            rating_factor: DEFAULT_RATING_FACTOR,
            mark_bonus: DEFAULT_MARK_BONUS,
            non_wish_malus: DEFAULT_NON_WISH_MALUS,
        }
    }
}

impl AssignmentWeights {
    pub fn new(null_rating: u32, rating_factor: f64, mark_bonus: f64, non_wish_malus: f64) -> Self {
        Self {
            null_rating,
            rating_factor,
            mark_bonus,
            non_wish_malus,
        }
    }

    pub fn null_rating(&self) -> u32 {
        self.null_rating
    }

    pub fn set_null_rating(&mut self, value: u32) {
        self.null_rating = value;
    }

    pub fn rating_factor(&self) -> f64 {
        self.rating_factor
    }

    pub fn set_rating_factor(&mut self, value: f64) {
        self.rating_factor = value;
    }

    pub fn mark_bonus(&self) -> f64 {
        self.mark_bonus
    }

    pub fn set_mark_bonus(&mut self, value: f64) {
        self.mark_bonus = value;
    }

    pub fn non_wish_malus(&self) -> f64 {
        self.non_wish_malus
    }

    pub fn set_non_wish_malus(&mut self, value: f64) {
        self.non_wish_malus = value;
    }

    /// Weight one candidate placement: unrated candidates fall back to the
    /// null rating, head delegates earn the mark bonus, and placements the
    /// delegation never wished for pay the malus.
    pub fn weigh(&self, rating: Option<u32>, head_delegate: bool, wished: bool) -> f64 {
        let rating = rating.unwrap_or(self.null_rating);
        let mut weight = self.rating_factor * f64::from(rating);
        if head_delegate {
            weight += self.mark_bonus;
        }
        if !wished {
            weight -= self.non_wish_malus;
        }
        weight
    }
}
