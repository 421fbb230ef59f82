//! Occupancy classification against lot capacity.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

/// Errors raised while classifying occupancy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OccupancyError {
    /// Capacity must be strictly positive.
    #[error("invalid capacity {total}: total must be greater than zero")]
    InvalidCapacity {
        /// Capacity that was rejected.
        total: i64,
    },
    /// Threshold pair is not ordered or exceeds 100%.
    #[error("invalid thresholds: medium {medium}% must not exceed high {high}% (max 100%)")]
    InvalidThresholds {
        /// Requested high threshold.
        high: u32,
        /// Requested medium threshold.
        medium: u32,
    },
    /// Basis string could not be parsed.
    #[error("unknown basis '{0}' (expected 'occupied' or 'available')")]
    UnknownBasis(String),
}

/// Which quantity a count refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Basis {
    /// The count is the number of occupied (or predicted occupied) spots.
    #[default]
    Occupied,
    /// The count is the number of free spots.
    Available,
}

impl Basis {
    /// Lowercase identifier used in configuration and CLI flags.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Occupied => "occupied",
            Self::Available => "available",
        }
    }
}

impl fmt::Display for Basis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Basis {
    type Err = OccupancyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "occupied" => Ok(Self::Occupied),
            "available" => Ok(Self::Available),
            other => Err(OccupancyError::UnknownBasis(other.to_owned())),
        }
    }
}

/// Coarse severity of an occupancy state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Plenty of room.
    Low,
    /// Filling up.
    Medium,
    /// Nearly or completely full.
    High,
}

impl Tier {
    /// Lowercase label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tier boundaries on the usage scale, as whole percentages.
///
/// A usage at or above `high` is [`Tier::High`], at or above `medium` is
/// [`Tier::Medium`], anything lower is [`Tier::Low`]. Both bounds are
/// inclusive, which makes "15% available" and "85% occupied" the same state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thresholds {
    /// Lower bound of the high tier.
    pub high: u32,
    /// Lower bound of the medium tier.
    pub medium: u32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self::USAGE
    }
}

impl Thresholds {
    /// Policy applied to lot occupancy.
    pub const USAGE: Self = Self {
        high: 85,
        medium: 60,
    };

    /// Policy applied to the expected occupancy of lots impacted by events.
    pub const EVENT_IMPACT: Self = Self {
        high: 90,
        medium: 75,
    };

    /// Build a validated threshold pair.
    ///
    /// # Errors
    /// Returns [`OccupancyError::InvalidThresholds`] when `medium > high` or
    /// `high > 100`.
    pub const fn new(high: u32, medium: u32) -> Result<Self, OccupancyError> {
        if medium > high || high > 100 {
            return Err(OccupancyError::InvalidThresholds { high, medium });
        }
        Ok(Self { high, medium })
    }

    /// Check an already constructed pair (e.g. one deserialized from config).
    ///
    /// # Errors
    /// Same conditions as [`Thresholds::new`].
    pub const fn validate(self) -> Result<Self, OccupancyError> {
        Self::new(self.high, self.medium)
    }

    /// Classify `count` against `total` under this policy.
    ///
    /// # Errors
    /// Returns [`OccupancyError::InvalidCapacity`] when `total <= 0`.
    pub fn classify(self, total: i64, count: u64, basis: Basis) -> Result<Occupancy, OccupancyError> {
        if total <= 0 {
            return Err(OccupancyError::InvalidCapacity { total });
        }

        let total_wide = i128::from(total);
        let count_wide = i128::from(count);
        let used = match basis {
            Basis::Occupied => count_wide,
            Basis::Available => total_wide - count_wide,
        };

        let percentage = ratio_percent(count_wide, total_wide);
        let usage_percentage = ratio_percent(used, total_wide);
        let tier = self.tier_for_used(used, total_wide);

        let overflow = clamp_to_u64(count_wide - total_wide);
        let available = match basis {
            Basis::Occupied => clamp_to_u64(total_wide - count_wide),
            Basis::Available => clamp_to_u64(count_wide.min(total_wide)),
        };

        Ok(Occupancy {
            total,
            count,
            basis,
            percentage,
            usage_percentage,
            tier,
            overflow,
            is_queued: overflow > 0,
            available,
        })
    }

    /// Classify a usage percentage that was computed elsewhere.
    ///
    /// Non-finite input is treated as [`Tier::Low`].
    #[must_use]
    pub fn tier_for_percent(self, usage_percent: f64) -> Tier {
        if !usage_percent.is_finite() {
            return Tier::Low;
        }
        if usage_percent >= f64::from(self.high) {
            Tier::High
        } else if usage_percent >= f64::from(self.medium) {
            Tier::Medium
        } else {
            Tier::Low
        }
    }

    fn tier_for_used(self, used: i128, total: i128) -> Tier {
        // Exact comparison of used/total against whole-percent bounds.
        let scaled = used * 100;
        if scaled >= i128::from(self.high) * total {
            Tier::High
        } else if scaled >= i128::from(self.medium) * total {
            Tier::Medium
        } else {
            Tier::Low
        }
    }
}

/// Result of classifying a count against capacity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Occupancy {
    /// Capacity the count was measured against.
    pub total: i64,
    /// Raw count in the requested basis.
    pub count: u64,
    /// Basis of `count` and `percentage`.
    pub basis: Basis,
    /// `count / total * 100`, not clamped.
    pub percentage: f64,
    /// Percentage of capacity in use after normalizing the basis.
    pub usage_percentage: f64,
    /// Severity tier.
    pub tier: Tier,
    /// Demand beyond capacity (`max(0, count - total)`).
    pub overflow: u64,
    /// True when `overflow > 0`.
    pub is_queued: bool,
    /// Effective free spots, never negative.
    pub available: u64,
}

impl Occupancy {
    /// `percentage` rounded to the nearest whole number, half away from zero.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn rounded_percentage(&self) -> u64 {
        // percentage is non-negative and finite for any valid input
        self.percentage.round().max(0.0) as u64
    }

    /// Usage clamped into `[0.0, 1.0]` for gauges.
    #[must_use]
    pub fn gauge_ratio(&self) -> f64 {
        (self.usage_percentage / 100.0).clamp(0.0, 1.0)
    }
}

/// Classify `count` against `total` with the default [`Thresholds::USAGE`] policy.
///
/// # Errors
/// Returns [`OccupancyError::InvalidCapacity`] when `total <= 0`.
pub fn classify(total: i64, count: u64, basis: Basis) -> Result<Occupancy, OccupancyError> {
    Thresholds::USAGE.classify(total, count, basis)
}

#[allow(clippy::cast_precision_loss)]
fn ratio_percent(numerator: i128, denominator: i128) -> f64 {
    (numerator as f64 / denominator as f64) * 100.0
}

fn clamp_to_u64(value: i128) -> u64 {
    u64::try_from(value.max(0)).unwrap_or(u64::MAX)
}
