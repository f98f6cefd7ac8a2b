//! # Trending Score
//!
//! Time-decayed like count used to rank photos independent of raw
//! chronology. Pure read-side transform: nothing here is persisted, and the
//! same inputs at the same instant always produce the same ordering.

use chrono::{DateTime, Utc};

use crate::models::Photo;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Decay factor for a photo of the given age: `1 / (age_days + 1)`.
///
/// Age can be fractional; for non-future timestamps it is clamped at zero,
/// so the factor always lies in (0, 1].
pub fn decay_factor(created_at: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let age_days = (now - created_at).num_milliseconds() as f64 / 1000.0 / SECONDS_PER_DAY;
    1.0 / (age_days.max(0.0) + 1.0)
}

/// Trending score: `likes * decay`. Zero likes scores zero regardless of age.
pub fn score(photo: &Photo, now: DateTime<Utc>) -> f64 {
    photo.likes as f64 * decay_factor(photo.created_at, now)
}

/// Sorts photos descending by trending score, recomputed for this call.
///
/// The sort is stable, so equal scores keep the caller's base order
/// (creation descending). Hidden filtering happens before ranking at the
/// listing query; this function ranks whatever it is given.
pub fn rank(photos: &mut [Photo], now: DateTime<Utc>) {
    photos.sort_by(|a, b| {
        score(b, now)
            .partial_cmp(&score(a, now))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}
