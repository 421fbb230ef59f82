//! Parking lots, predictions, hourly usage and campus events.

use serde::{Deserialize, Serialize};

use crate::occupancy::{Basis, Occupancy, OccupancyError, Thresholds, classify};

/// Current snapshot of a parking lot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParkingLot {
    /// Short stable identifier (e.g. `"a"`).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Free spots right now.
    pub available: u64,
    /// Capacity.
    pub total: u64,
}

impl ParkingLot {
    /// Construct a lot snapshot.
    pub fn new(id: impl Into<String>, name: impl Into<String>, available: u64, total: u64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            available,
            total,
        }
    }

    /// Occupied spots, never negative.
    #[must_use]
    pub const fn used(&self) -> u64 {
        self.total.saturating_sub(self.available)
    }

    /// Classify the occupied share of the lot.
    ///
    /// # Errors
    /// Returns [`OccupancyError::InvalidCapacity`] when the lot has no capacity.
    pub fn occupancy(&self) -> Result<Occupancy, OccupancyError> {
        classify(capacity(self.total), self.used(), Basis::Occupied)
    }

    /// Like [`ParkingLot::occupancy`] with a custom policy.
    ///
    /// # Errors
    /// Returns [`OccupancyError::InvalidCapacity`] when the lot has no capacity.
    pub fn occupancy_with(&self, thresholds: Thresholds) -> Result<Occupancy, OccupancyError> {
        thresholds.classify(capacity(self.total), self.used(), Basis::Occupied)
    }

    /// Classify the free share of the lot.
    ///
    /// # Errors
    /// Returns [`OccupancyError::InvalidCapacity`] when the lot has no capacity.
    pub fn availability(&self) -> Result<Occupancy, OccupancyError> {
        classify(capacity(self.total), self.available, Basis::Available)
    }
}

/// Predicted occupied count at a future horizon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prediction {
    /// Human label for the horizon, e.g. `"2 hours"`.
    pub horizon: String,
    /// Predicted occupied spots; may exceed capacity.
    pub predicted: u64,
}

/// Default predictions derived from the current occupancy of `lot`.
///
/// Used counts drift by -20, -50 and +30 over the next three hours.
#[must_use]
pub fn default_predictions(lot: &ParkingLot) -> Vec<Prediction> {
    let used = lot.used();
    vec![
        Prediction {
            horizon: "1 hour".to_owned(),
            predicted: used.saturating_sub(20),
        },
        Prediction {
            horizon: "2 hours".to_owned(),
            predicted: used.saturating_sub(50),
        },
        Prediction {
            horizon: "3 hours".to_owned(),
            predicted: used.saturating_add(30),
        },
    ]
}

/// Occupied count observed at a time of day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourlySample {
    /// Time-of-day label, e.g. `"12 PM"`.
    pub label: String,
    /// Occupied spots, including vehicles queueing beyond capacity.
    pub used: u64,
}

/// Overview of a day of hourly samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageSummary {
    /// Highest usage percentage of the day.
    pub peak_percentage: f64,
    /// Label of the first sample that reached the peak.
    pub peak_label: String,
    /// Mean usage percentage, rounded.
    pub average_percentage: u64,
}

/// Summarize a day of samples against `total` capacity.
///
/// Returns `None` for zero capacity or an empty day.
#[must_use]
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn summarize(total: u64, samples: &[HourlySample]) -> Option<UsageSummary> {
    if total == 0 || samples.is_empty() {
        return None;
    }

    let percent = |sample: &HourlySample| sample.used as f64 / total as f64 * 100.0;

    let mut peak: Option<(&HourlySample, f64)> = None;
    let mut sum = 0.0;
    for sample in samples {
        let value = percent(sample);
        sum += value;
        if peak.is_none_or(|(_, best)| value > best) {
            peak = Some((sample, value));
        }
    }

    let (peak_sample, peak_percentage) = peak?;
    let average = sum / samples.len() as f64;
    Some(UsageSummary {
        peak_percentage,
        peak_label: peak_sample.label.clone(),
        average_percentage: average.round().max(0.0) as u64,
    })
}

/// A lot expected to be affected by an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImpactedLot {
    /// Lot display name.
    pub name: String,
    /// Expected occupancy during the event, in percent.
    pub expected_occupancy: u8,
}

/// An upcoming campus event with its parking impact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampusEvent {
    /// Numeric identifier.
    pub id: u32,
    /// Event title.
    pub name: String,
    /// Human date, e.g. `"Mon, 15 July"`.
    pub date: String,
    /// Human time range.
    pub time: String,
    /// Where on campus.
    pub location: String,
    /// Expected headcount.
    pub expected_attendance: u32,
    /// Lots expected to fill up.
    pub impacted_lots: Vec<ImpactedLot>,
}

fn capacity(total: u64) -> i64 {
    i64::try_from(total).unwrap_or(i64::MAX)
}
