//! Service behaviour against custom and failing sources.

use anyhow::{Result, anyhow};
use lotwatch_app::{
    AppConfig, LotSource, MockLotSource, NavStack, ParkingService, Screen, ServiceError,
};
use lotwatch_core::{CampusEvent, HourlySample, ParkingLot, Thresholds, Tier};

struct OfflineSource;

impl LotSource for OfflineSource {
    fn list_lots(&self) -> Result<Vec<ParkingLot>> {
        Err(anyhow!("connection refused"))
    }

    fn hourly_usage(&self, _lot: &ParkingLot) -> Result<Vec<HourlySample>> {
        Err(anyhow!("connection refused"))
    }

    fn upcoming_events(&self) -> Result<Vec<CampusEvent>> {
        Err(anyhow!("connection refused"))
    }
}

#[test]
fn offline_source_errors_propagate() {
    let service = ParkingService::new(OfflineSource);
    let Err(err) = service.lot_rows() else {
        panic!("offline source should fail");
    };
    assert!(err.to_string().contains("connection refused"));
    assert!(err.downcast_ref::<ServiceError>().is_none());
    assert!(service.events().is_err());
}

#[test]
fn configured_thresholds_reach_the_service() -> Result<()> {
    let config = AppConfig {
        thresholds: Thresholds::new(95, 90)?,
        ..AppConfig::default()
    };
    let service = ParkingService::with_thresholds(
        MockLotSource::default(),
        config.thresholds,
        config.event_thresholds,
    );
    let tiers: Vec<Tier> = service.lot_rows()?.iter().map(|row| row.occupancy.tier).collect();
    assert_eq!(tiers, vec![Tier::High, Tier::Low, Tier::Low]);
    Ok(())
}

#[test]
fn service_works_through_a_borrowed_source() -> Result<()> {
    let source = MockLotSource::default();
    let service = ParkingService::new(&source);
    assert_eq!(service.find_lot("b")?.name, "Structure B");
    Ok(())
}

#[test]
fn browsing_flow_walks_the_stack() -> Result<()> {
    let service = ParkingService::new(MockLotSource::default());
    let mut nav = NavStack::new();

    let first = service.lot_rows()?.remove(0);
    nav.push(Screen::LotDetails {
        lot_id: first.lot.id.clone(),
    });
    let Screen::LotDetails { lot_id } = nav.current().clone() else {
        panic!("expected lot details");
    };
    let history = service.history(&lot_id)?;
    nav.push(Screen::History { lot_id });

    assert_eq!(history.rows.len(), 6);
    assert_eq!(nav.depth(), 3);
    nav.pop();
    nav.pop();
    assert!(nav.is_root());
    Ok(())
}

#[test]
fn visitor_lot_detail_and_default_config() -> Result<()> {
    let service = ParkingService::new(MockLotSource::default());
    let detail = service.lot_detail("c")?;
    let text = toml::to_string(&AppConfig::default())?;
    assert!(text.contains("refresh_interval_secs"));
    assert_eq!(detail.lot.name, "Visitor Lot");
    assert_eq!(detail.occupancy.tier, Tier::Low);
    Ok(())
}
