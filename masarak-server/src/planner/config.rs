//! Search configuration for the route planner.

use chrono::Duration;

use super::fare::FarePolicy;

/// Weights for the composite rank score.
///
/// The score is `duration * w.duration + fare * w.fare +
/// (5 - rating) * w.rating`; lower is better.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreWeights {
    pub duration: f64,
    pub fare: f64,
    pub rating: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            duration: 1.0,
            // 2500 SYP contributes as much as five minutes of riding.
            fare: 0.002,
            rating: 3.0,
        }
    }
}

/// Configuration parameters for itinerary search.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Maximum number of route changes allowed.
    pub max_transfers: usize,

    /// Maximum direct itineraries returned.
    pub max_direct: usize,

    /// Maximum transfer itineraries returned.
    pub max_transfer: usize,

    /// Travel time per station-to-station hop (minutes).
    pub hop_mins: i64,

    /// Fixed time penalty per route change (minutes).
    pub transfer_penalty_mins: i64,

    /// Fare rule in force.
    pub fare_policy: FarePolicy,

    /// Rank score weights.
    pub weights: ScoreWeights,

    /// Rating assumed for routes nobody has rated yet.
    pub neutral_rating: f32,
}

impl SearchConfig {
    /// Returns the per-hop travel time as a Duration.
    pub fn hop_time(&self) -> Duration {
        Duration::minutes(self.hop_mins)
    }

    /// Returns the transfer penalty as a Duration.
    pub fn transfer_penalty(&self) -> Duration {
        Duration::minutes(self.transfer_penalty_mins)
    }

    /// Copy of this config with per-query overrides applied.
    ///
    /// `max_results` caps both groups at once, the way the client's
    /// result-count bound is specified.
    pub fn with_overrides(
        &self,
        max_transfers: Option<usize>,
        max_results: Option<usize>,
    ) -> Self {
        let mut config = self.clone();
        if let Some(transfers) = max_transfers {
            config.max_transfers = transfers;
        }
        if let Some(results) = max_results {
            config.max_direct = results;
            config.max_transfer = results;
        }
        config
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_transfers: 1,
            max_direct: 5,
            max_transfer: 5,
            hop_mins: 5,
            transfer_penalty_mins: 10,
            fare_policy: FarePolicy::default(),
            weights: ScoreWeights::default(),
            neutral_rating: 3.0,
        }
    }
}
