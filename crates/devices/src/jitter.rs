//! Seeded position noise for simulated fleet tracking.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

/// Uniform jitter of at most `max_offset_deg` on each axis.
#[derive(Debug, Clone)]
pub struct PositionJitter {
    rng: StdRng,
    max_offset_deg: f64,
}

impl PositionJitter {
    pub fn new(seed: u64, max_offset_deg: f64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            max_offset_deg: if max_offset_deg.is_finite() { max_offset_deg.abs() } else { 0.0 },
        }
    }

    /// Latitude is clamped to ±90°, longitude wrapped into [-180°, 180°).
    pub fn apply(&mut self, point: GeoPoint) -> GeoPoint {
        if self.max_offset_deg == 0.0 {
            return point;
        }
        let m = self.max_offset_deg;
        let lat = (point.lat + self.rng.gen_range(-m..=m)).clamp(-90.0, 90.0);
        let lon = (point.lon + self.rng.gen_range(-m..=m) + 180.0).rem_euclid(360.0) - 180.0;
        GeoPoint { lat, lon }
    }
}
