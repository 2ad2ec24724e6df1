//! Scoring and ordering of found itineraries.
//!
//! Each itinerary gets a composite score from its duration, fare and
//! aggregated rider rating, scaled by a penalty when the endpoints were
//! resolved with low confidence. Lower scores sort first; ties fall back
//! to the lexicographic itinerary key so reruns produce identical output.

use std::collections::BTreeMap;

use tracing::trace;

use crate::domain::{Itinerary, ItineraryKey};
use crate::ratings::RatingSource;

use super::config::SearchConfig;

/// Ranked results, split the way the client renders them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RankedItineraries {
    pub direct: Vec<Itinerary>,
    pub transfer: Vec<Itinerary>,
}

impl RankedItineraries {
    pub fn is_empty(&self) -> bool {
        self.direct.is_empty() && self.transfer.is_empty()
    }
}

/// Score, deduplicate, order and cap the search output.
///
/// `confidence_penalty` is 1.0 for exact endpoint matches and grows as
/// resolution confidence drops, pushing uncertain suggestions down
/// without hiding them.
pub fn rank(
    itineraries: Vec<Itinerary>,
    config: &SearchConfig,
    ratings: &dyn RatingSource,
    confidence_penalty: f64,
) -> RankedItineraries {
    let mut best: BTreeMap<ItineraryKey, Itinerary> = BTreeMap::new();

    for mut itinerary in itineraries {
        let rating = ratings.rating_for(&itinerary.trip_id());
        itinerary.set_rating(rating);

        let effective = rating.unwrap_or(config.neutral_rating) as f64;
        let base = itinerary.duration_mins() as f64 * config.weights.duration
            + itinerary.fare() as f64 * config.weights.fare
            + (5.0 - effective) * config.weights.rating;
        itinerary.set_score(base * confidence_penalty);
        trace!(trip = %itinerary.trip_id(), score = itinerary.score(), "scored itinerary");

        let key = itinerary.key();
        if let Some(existing) = best.get_mut(&key) {
            if itinerary.score() < existing.score() {
                *existing = itinerary;
            }
        } else {
            best.insert(key, itinerary);
        }
    }

    let (mut direct, mut transfer): (Vec<Itinerary>, Vec<Itinerary>) =
        best.into_values().partition(Itinerary::is_direct);

    for group in [&mut direct, &mut transfer] {
        group.sort_by(|a, b| {
            a.score()
                .partial_cmp(&b.score())
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.key().cmp(&b.key()))
        });
    }
    direct.truncate(config.max_direct);
    transfer.truncate(config.max_transfer);

    RankedItineraries { direct, transfer }
}
