//! Where lot data comes from.

use anyhow::Result;
use lotwatch_core::{CampusEvent, HourlySample, ImpactedLot, ParkingLot};

/// Data source abstraction so the service and TUI can be unit-tested.
pub trait LotSource {
    /// Current snapshot of every lot.
    fn list_lots(&self) -> Result<Vec<ParkingLot>>;
    /// Today's hourly occupied counts for `lot`.
    fn hourly_usage(&self, lot: &ParkingLot) -> Result<Vec<HourlySample>>;
    /// Events expected to affect parking this week.
    fn upcoming_events(&self) -> Result<Vec<CampusEvent>>;
}

impl<T: LotSource + ?Sized> LotSource for &T {
    fn list_lots(&self) -> Result<Vec<ParkingLot>> {
        (**self).list_lots()
    }

    fn hourly_usage(&self, lot: &ParkingLot) -> Result<Vec<HourlySample>> {
        (**self).hourly_usage(lot)
    }

    fn upcoming_events(&self) -> Result<Vec<CampusEvent>> {
        (**self).upcoming_events()
    }
}

/// Time-of-day labels and the share of capacity used at each.
///
/// Samples are capped at capacity, so the midday factor reads as a full lot.
const HOURLY_FACTORS: [(&str, f64); 6] = [
    ("8 AM", 0.3),
    ("10 AM", 0.7),
    ("12 PM", 1.2),
    ("2 PM", 0.8),
    ("4 PM", 0.5),
    ("6 PM", 0.2),
];

/// In-memory dataset bundled with the application.
#[derive(Debug, Clone)]
pub struct MockLotSource {
    lots: Vec<ParkingLot>,
    events: Vec<CampusEvent>,
}

impl Default for MockLotSource {
    fn default() -> Self {
        Self {
            lots: default_lots(),
            events: default_events(),
        }
    }
}

impl MockLotSource {
    /// Replace the bundled lots, keeping the bundled events.
    #[must_use]
    pub fn with_lots(lots: Vec<ParkingLot>) -> Self {
        Self {
            lots,
            events: default_events(),
        }
    }
}

impl LotSource for MockLotSource {
    fn list_lots(&self) -> Result<Vec<ParkingLot>> {
        Ok(self.lots.clone())
    }

    fn hourly_usage(&self, lot: &ParkingLot) -> Result<Vec<HourlySample>> {
        Ok(HOURLY_FACTORS
            .iter()
            .map(|&(label, factor)| HourlySample {
                label: label.to_owned(),
                used: scaled_floor(lot.total, factor).min(lot.total),
            })
            .collect())
    }

    fn upcoming_events(&self) -> Result<Vec<CampusEvent>> {
        Ok(self.events.clone())
    }
}

#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
fn scaled_floor(total: u64, factor: f64) -> u64 {
    (total as f64 * factor).floor().max(0.0) as u64
}

fn default_lots() -> Vec<ParkingLot> {
    vec![
        ParkingLot::new("a", "Structure A", 4, 600),
        ParkingLot::new("b", "Structure B", 100, 600),
        ParkingLot::new("c", "Visitor Lot", 380, 400),
    ]
}

fn impacted(name: &str, expected_occupancy: u8) -> ImpactedLot {
    ImpactedLot {
        name: name.to_owned(),
        expected_occupancy,
    }
}

fn default_events() -> Vec<CampusEvent> {
    vec![
        CampusEvent {
            id: 1,
            name: "Open Day".to_owned(),
            date: "Mon, 15 July".to_owned(),
            time: "9:00 AM - 4:00 PM".to_owned(),
            location: "Entire Campus".to_owned(),
            expected_attendance: 5000,
            impacted_lots: vec![
                impacted("Bayliss Parking", 95),
                impacted("Reid Library", 90),
                impacted("EZONE Lot A", 100),
            ],
        },
        CampusEvent {
            id: 2,
            name: "Engineering Career Fair".to_owned(),
            date: "Wed, 17 July".to_owned(),
            time: "10:00 AM - 2:00 PM".to_owned(),
            location: "EZONE".to_owned(),
            expected_attendance: 800,
            impacted_lots: vec![impacted("EZONE Lot A", 100), impacted("Bayliss Parking", 75)],
        },
        CampusEvent {
            id: 3,
            name: "Graduation Ceremony".to_owned(),
            date: "Fri, 19 July".to_owned(),
            time: "2:00 PM - 5:00 PM".to_owned(),
            location: "Winthrop Hall".to_owned(),
            expected_attendance: 1200,
            impacted_lots: vec![impacted("Reid Library", 95), impacted("Bayliss Parking", 85)],
        },
    ]
}
