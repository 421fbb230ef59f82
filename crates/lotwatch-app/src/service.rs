//! Report rows derived from a [`LotSource`] for the CLI and TUI.

use anyhow::Result;
use lotwatch_core::{
    Basis, CampusEvent, HourlySample, ImpactedLot, Occupancy, OccupancyError, ParkingLot,
    Prediction, Thresholds, Tier, UsageSummary, default_predictions, summarize,
};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::source::LotSource;

/// Viewer count shown on the detail screen when the source has none.
pub const DEFAULT_ACTIVE_VIEWERS: u32 = 12;

/// Domain failures raised by [`ParkingService`].
#[derive(Debug, Error)]
pub enum ServiceError {
    /// No lot with the requested id.
    #[error("parking lot '{0}' not found")]
    LotNotFound(String),
    /// A lot could not be classified.
    #[error("cannot classify lot '{lot}': {source}")]
    Occupancy {
        /// Lot identifier.
        lot: String,
        /// Underlying calculator error.
        #[source]
        source: OccupancyError,
    },
}

/// A lot with its current occupancy.
#[derive(Debug, Clone, Serialize)]
pub struct LotRow {
    /// Lot snapshot.
    pub lot: ParkingLot,
    /// Occupied-basis classification.
    pub occupancy: Occupancy,
}

/// A prediction with its classification.
#[derive(Debug, Clone, Serialize)]
pub struct PredictionRow {
    /// Predicted occupied count.
    pub prediction: Prediction,
    /// Classification of the predicted count.
    pub occupancy: Occupancy,
}

/// Everything the lot detail screen shows.
#[derive(Debug, Clone, Serialize)]
pub struct LotDetail {
    /// Lot snapshot.
    pub lot: ParkingLot,
    /// Current occupancy.
    pub occupancy: Occupancy,
    /// Number of people looking at this lot.
    pub active_viewers: u32,
    /// Predictions for the next hours.
    pub predictions: Vec<PredictionRow>,
}

/// An hourly sample with its classification.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryRow {
    /// Raw sample.
    pub sample: HourlySample,
    /// Classification; `overflow` is the queue length.
    pub occupancy: Occupancy,
}

/// Historical usage of one lot.
#[derive(Debug, Clone, Serialize)]
pub struct LotHistory {
    /// Lot snapshot.
    pub lot: ParkingLot,
    /// Hourly breakdown.
    pub rows: Vec<HistoryRow>,
    /// Peak and average of the day, if there is any data.
    pub summary: Option<UsageSummary>,
}

/// Expected impact on one lot.
#[derive(Debug, Clone, Serialize)]
pub struct EventImpactRow {
    /// Impacted lot.
    pub lot: ImpactedLot,
    /// Severity under the event policy.
    pub tier: Tier,
}

/// An event with classified impacts.
#[derive(Debug, Clone, Serialize)]
pub struct EventReport {
    /// Event details.
    pub event: CampusEvent,
    /// Impact rows in source order.
    pub impacts: Vec<EventImpactRow>,
}

/// Read-only facade feeding source data through the occupancy calculator.
#[derive(Debug, Clone)]
pub struct ParkingService<S: LotSource> {
    source: S,
    lot_thresholds: Thresholds,
    event_thresholds: Thresholds,
}

impl<S: LotSource> ParkingService<S> {
    /// Service with the default lot and event policies.
    pub const fn new(source: S) -> Self {
        Self::with_thresholds(source, Thresholds::USAGE, Thresholds::EVENT_IMPACT)
    }

    /// Service with explicit policies.
    pub const fn with_thresholds(
        source: S,
        lot_thresholds: Thresholds,
        event_thresholds: Thresholds,
    ) -> Self {
        Self {
            source,
            lot_thresholds,
            event_thresholds,
        }
    }

    /// Borrow the underlying source.
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// Lot policy in use.
    pub const fn lot_thresholds(&self) -> Thresholds {
        self.lot_thresholds
    }

    /// Every lot with its current occupancy.
    ///
    /// # Errors
    /// Propagates source failures and lots without capacity.
    pub fn lot_rows(&self) -> Result<Vec<LotRow>> {
        let lots = self.source.list_lots()?;
        debug!(count = lots.len(), "loaded lots");
        lots.into_iter()
            .map(|lot| {
                let occupancy = self.classify_lot(&lot, lot.used())?;
                Ok(LotRow { lot, occupancy })
            })
            .collect()
    }

    /// Look a lot up by id.
    ///
    /// # Errors
    /// [`ServiceError::LotNotFound`] when no lot matches.
    pub fn find_lot(&self, id: &str) -> Result<ParkingLot> {
        self.source
            .list_lots()?
            .into_iter()
            .find(|lot| lot.id == id)
            .ok_or_else(|| ServiceError::LotNotFound(id.to_owned()).into())
    }

    /// Current status and predictions for one lot.
    ///
    /// # Errors
    /// Unknown ids, source failures and lots without capacity.
    pub fn lot_detail(&self, id: &str) -> Result<LotDetail> {
        let lot = self.find_lot(id)?;
        let occupancy = self.classify_lot(&lot, lot.used())?;
        let predictions = default_predictions(&lot)
            .into_iter()
            .map(|prediction| {
                let occupancy = self.classify_lot(&lot, prediction.predicted)?;
                Ok(PredictionRow {
                    prediction,
                    occupancy,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(LotDetail {
            lot,
            occupancy,
            active_viewers: DEFAULT_ACTIVE_VIEWERS,
            predictions,
        })
    }

    /// Today's hourly usage for one lot.
    ///
    /// # Errors
    /// Unknown ids, source failures and lots without capacity.
    pub fn history(&self, id: &str) -> Result<LotHistory> {
        let lot = self.find_lot(id)?;
        let samples = self.source.hourly_usage(&lot)?;
        let summary = summarize(lot.total, &samples);
        let rows = samples
            .into_iter()
            .map(|sample| {
                let occupancy = self.classify_lot(&lot, sample.used)?;
                Ok(HistoryRow { sample, occupancy })
            })
            .collect::<Result<Vec<_>>>()?;
        debug!(lot = %lot.id, rows = rows.len(), "built history");

        Ok(LotHistory { lot, rows, summary })
    }

    /// Upcoming events with impact tiers.
    ///
    /// # Errors
    /// Propagates source failures.
    pub fn events(&self) -> Result<Vec<EventReport>> {
        let events = self.source.upcoming_events()?;
        Ok(events
            .into_iter()
            .map(|event| {
                let impacts = event
                    .impacted_lots
                    .iter()
                    .map(|lot| EventImpactRow {
                        lot: lot.clone(),
                        tier: self
                            .event_thresholds
                            .tier_for_percent(f64::from(lot.expected_occupancy)),
                    })
                    .collect();
                EventReport { event, impacts }
            })
            .collect())
    }

    fn classify_lot(&self, lot: &ParkingLot, used: u64) -> Result<Occupancy, ServiceError> {
        let total = i64::try_from(lot.total).unwrap_or(i64::MAX);
        self.lot_thresholds
            .classify(total, used, Basis::Occupied)
            .map_err(|source| ServiceError::Occupancy {
                lot: lot.id.clone(),
                source,
            })
    }
}
