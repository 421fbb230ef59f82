//! Occupancy classification and relative-time formatting for parking lots.

/// Lot, prediction, hourly usage and event types.
pub mod lot;
/// Occupancy calculator.
pub mod occupancy;
/// Relative time formatter.
pub mod relative_time;

pub use lot::{
    CampusEvent, HourlySample, ImpactedLot, ParkingLot, Prediction, UsageSummary,
    default_predictions, summarize,
};
pub use occupancy::{Basis, Occupancy, OccupancyError, Thresholds, Tier, classify};
pub use relative_time::{
    elapsed_between, epoch_millis, format_elapsed, format_remaining, remaining_between,
};
