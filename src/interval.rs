//! Ranges of ray parameters

/// Interval [min, max] over ray distances, with `min <= max`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f64,
    pub max: f64,
}
impl Interval {
    pub fn new(min: f64, max: f64) -> Self {
        debug_assert!(min <= max, "interval [{min}, {max}] is inverted");
        Self { min, max }
    }

    /// Whether `x` lies strictly inside (min, max)
    pub fn surrounds(&self, x: f64) -> bool {
        self.min < x && x < self.max
    }

    pub fn clamp(&self, x: f64) -> f64 {
        x.clamp(self.min, self.max)
    }

    /// The same interval with its upper end pulled in to `max`
    pub fn with_max(&self, max: f64) -> Self {
        Self::new(self.min, max)
    }
}
