//! Aggregated trip ratings.
//!
//! The engine consumes aggregated ratings as a ranking input; durable
//! persistence of individual ratings belongs to an external collaborator.
//! [`InMemoryRatings`] keeps a running aggregate per trip id so the
//! rate-trip endpoint has an effect within the process lifetime, and can
//! be seeded from the network data file.

use std::collections::HashMap;
use std::sync::RwLock;

/// Error for out-of-scale ratings.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("rating {0} is outside the 1-5 scale")]
pub struct InvalidRating(pub f32);

/// Read access to aggregated ratings, keyed by trip id.
pub trait RatingSource: Send + Sync {
    /// Mean rating for a trip, if anyone has rated it.
    fn rating_for(&self, trip_id: &str) -> Option<f32>;
}

#[derive(Debug, Clone, Copy)]
struct Aggregate {
    count: u32,
    mean: f32,
}

/// In-process running aggregates.
#[derive(Debug, Default)]
pub struct InMemoryRatings {
    inner: RwLock<HashMap<String, Aggregate>>,
}

impl InMemoryRatings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed aggregates, e.g. from the network data file. Each seed counts
    /// as one prior rating.
    pub fn seeded(seed: impl IntoIterator<Item = (String, f32)>) -> Self {
        let map = seed
            .into_iter()
            .map(|(k, mean)| (k, Aggregate { count: 1, mean }))
            .collect();
        Self {
            inner: RwLock::new(map),
        }
    }

    /// Record one rating on the 1-5 scale.
    pub fn record(&self, trip_id: &str, rating: f32) -> Result<(), InvalidRating> {
        if !(1.0..=5.0).contains(&rating) || !rating.is_finite() {
            return Err(InvalidRating(rating));
        }

        let mut guard = match self.inner.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        let entry = guard.entry(trip_id.to_string()).or_insert(Aggregate {
            count: 0,
            mean: 0.0,
        });
        entry.count += 1;
        entry.mean += (rating - entry.mean) / entry.count as f32;
        Ok(())
    }
}

impl RatingSource for InMemoryRatings {
    fn rating_for(&self, trip_id: &str) -> Option<f32> {
        let guard = match self.inner.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.get(trip_id).map(|a| a.mean)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unrated_trip_has_no_rating() {
        let ratings = InMemoryRatings::new();
        assert_eq!(ratings.rating_for("خط المزة جبل"), None);
    }

    #[test]
    fn record_and_average() {
        let ratings = InMemoryRatings::new();
        ratings.record("خط المزة جبل", 4.0).unwrap();
        ratings.record("خط المزة جبل", 5.0).unwrap();
        let mean = ratings.rating_for("خط المزة جبل").unwrap();
        assert!((mean - 4.5).abs() < 1e-6);
    }

    #[test]
    fn seeded_rating_shifts_with_new_votes() {
        let ratings = InMemoryRatings::seeded([("خط".to_string(), 4.0)]);
        assert_eq!(ratings.rating_for("خط"), Some(4.0));

        ratings.record("خط", 2.0).unwrap();
        let mean = ratings.rating_for("خط").unwrap();
        assert!((mean - 3.0).abs() < 1e-6);
    }

    #[test]
    fn out_of_scale_rejected() {
        let ratings = InMemoryRatings::new();
        assert!(ratings.record("خط", 0.5).is_err());
        assert!(ratings.record("خط", 5.5).is_err());
        assert!(ratings.record("خط", f32::NAN).is_err());
        assert_eq!(ratings.rating_for("خط"), None);
    }
}
