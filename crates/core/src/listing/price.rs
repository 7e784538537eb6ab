//! Price range domain and the policy for out-of-domain URL input.

use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Errors constructing [`PriceBounds`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceBoundsError {
    /// The lower bound exceeds the upper bound.
    #[error("price bounds are inverted: {min} > {max}")]
    Inverted {
        /// Requested lower bound.
        min: i64,
        /// Requested upper bound.
        max: i64,
    },
    /// Negative lower bound.
    #[error("price bounds cannot be negative (got {0})")]
    Negative(i64),
}

/// The allowed domain of the price slider, in whole currency units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PriceBounds {
    min: i64,
    max: i64,
}

impl PriceBounds {
    /// Storefront default domain: `0..=500`.
    pub const DEFAULT: Self = Self { min: 0, max: 500 };

    /// Create bounds.
    ///
    /// # Errors
    ///
    /// Returns an error if `min` is negative or greater than `max`.
    pub const fn new(min: i64, max: i64) -> Result<Self, PriceBoundsError> {
        if min < 0 {
            return Err(PriceBoundsError::Negative(min));
        }
        if min > max {
            return Err(PriceBoundsError::Inverted { min, max });
        }
        Ok(Self { min, max })
    }

    /// Lower bound.
    #[must_use]
    pub const fn min(&self) -> i64 {
        self.min
    }

    /// Upper bound.
    #[must_use]
    pub const fn max(&self) -> i64 {
        self.max
    }

    /// The range covering the whole domain (the unfiltered default).
    #[must_use]
    pub const fn full_range(&self) -> PriceRange {
        PriceRange {
            min: self.min,
            max: self.max,
        }
    }

    /// Whether `value` lies inside the domain.
    #[must_use]
    pub const fn contains(&self, value: i64) -> bool {
        value >= self.min && value <= self.max
    }

    const fn clamp(&self, value: i64) -> i64 {
        if value < self.min {
            self.min
        } else if value > self.max {
            self.max
        } else {
            value
        }
    }
}

impl Default for PriceBounds {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// A selected `[min, max]` price range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PriceRange {
    /// Lower end, inclusive.
    pub min: i64,
    /// Upper end, inclusive.
    pub max: i64,
}

impl PriceRange {
    /// Create a range. No ordering or domain check is performed.
    #[must_use]
    pub const fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }
}

/// What decoding does with a price range that is inverted or outside the
/// configured [`PriceBounds`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PricePolicy {
    /// Swap inverted ends, then clamp both into the bounds.
    #[default]
    Clamp,
    /// Fall back to the full range.
    Reject,
    /// Keep the values exactly as given.
    #[serde(rename = "passthrough")]
    PassThrough,
}

/// Error parsing a [`PricePolicy`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown price policy '{0}' (expected clamp, reject or passthrough)")]
pub struct PricePolicyError(String);

impl PricePolicy {
    /// Configuration value for the policy.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Clamp => "clamp",
            Self::Reject => "reject",
            Self::PassThrough => "passthrough",
        }
    }

    /// Apply the policy to a decoded range.
    #[must_use]
    pub const fn apply(self, range: PriceRange, bounds: PriceBounds) -> PriceRange {
        match self {
            Self::Clamp => {
                let (lo, hi) = if range.min > range.max {
                    (range.max, range.min)
                } else {
                    (range.min, range.max)
                };
                PriceRange::new(bounds.clamp(lo), bounds.clamp(hi))
            }
            Self::Reject => {
                if range.min > range.max
                    || !bounds.contains(range.min)
                    || !bounds.contains(range.max)
                {
                    bounds.full_range()
                } else {
                    range
                }
            }
            Self::PassThrough => range,
        }
    }
}

impl fmt::Display for PricePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PricePolicy {
    type Err = PricePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "clamp" => Ok(Self::Clamp),
            "reject" => Ok(Self::Reject),
            "passthrough" | "pass-through" => Ok(Self::PassThrough),
            other => Err(PricePolicyError(other.to_owned())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_rejects_inverted() {
        assert_eq!(
            PriceBounds::new(10, 5),
            Err(PriceBoundsError::Inverted { min: 10, max: 5 })
        );
        assert_eq!(PriceBounds::new(-1, 5), Err(PriceBoundsError::Negative(-1)));
        assert!(PriceBounds::new(5, 5).is_ok());
    }

    #[test]
    fn test_clamp_swaps_and_clamps() {
        let bounds = PriceBounds::DEFAULT;
        let clamped = PricePolicy::Clamp.apply(PriceRange::new(900, -20), bounds);
        assert_eq!(clamped, PriceRange::new(0, 500));

        let clamped = PricePolicy::Clamp.apply(PriceRange::new(300, 100), bounds);
        assert_eq!(clamped, PriceRange::new(100, 300));
    }

    #[test]
    fn test_clamp_keeps_valid_range() {
        let range = PriceRange::new(25, 75);
        assert_eq!(PricePolicy::Clamp.apply(range, PriceBounds::DEFAULT), range);
    }

    #[test]
    fn test_reject_falls_back_to_full_range() {
        let bounds = PriceBounds::DEFAULT;
        assert_eq!(
            PricePolicy::Reject.apply(PriceRange::new(300, 100), bounds),
            bounds.full_range()
        );
        assert_eq!(
            PricePolicy::Reject.apply(PriceRange::new(0, 501), bounds),
            bounds.full_range()
        );
        assert_eq!(
            PricePolicy::Reject.apply(PriceRange::new(10, 20), bounds),
            PriceRange::new(10, 20)
        );
    }

    #[test]
    fn test_passthrough_keeps_everything() {
        let range = PriceRange::new(900, -20);
        assert_eq!(
            PricePolicy::PassThrough.apply(range, PriceBounds::DEFAULT),
            range
        );
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!("clamp".parse::<PricePolicy>().unwrap(), PricePolicy::Clamp);
        assert_eq!(" Reject ".parse::<PricePolicy>().unwrap(), PricePolicy::Reject);
        assert_eq!(
            "passthrough".parse::<PricePolicy>().unwrap(),
            PricePolicy::PassThrough
        );
        assert!("ignore".parse::<PricePolicy>().is_err());
    }
}
