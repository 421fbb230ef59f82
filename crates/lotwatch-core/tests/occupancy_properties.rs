//! Exhaustive checks of the calculator's documented properties over small lots.

use lotwatch_core::{Basis, OccupancyError, Thresholds, Tier, classify, format_elapsed, format_remaining};

fn classify_ok(total: i64, count: u64, basis: Basis) -> lotwatch_core::Occupancy {
    match classify(total, count, basis) {
        Ok(occ) => occ,
        Err(err) => panic!("classify({total}, {count}, {basis}) failed: {err}"),
    }
}

#[test]
fn overflow_matches_excess_demand() {
    for total in 1..=120_i64 {
        for count in 0..=150_u64 {
            let occ = classify_ok(total, count, Basis::Occupied);
            let expected = u64::try_from((i64::try_from(count).unwrap_or(i64::MAX) - total).max(0))
                .unwrap_or_default();
            assert_eq!(occ.overflow, expected, "total={total} count={count}");
            assert_eq!(occ.is_queued, occ.overflow > 0);
        }
    }
}

#[test]
fn non_positive_capacity_always_fails() {
    for total in [-600_i64, -1, 0] {
        assert_eq!(
            classify(total, 0, Basis::Available),
            Err(OccupancyError::InvalidCapacity { total })
        );
    }
}

#[test]
fn both_bases_rank_the_same_state_identically() {
    for total in 1..=120_u64 {
        for used in 0..=total {
            let signed_total = i64::try_from(total).unwrap_or(i64::MAX);
            let by_use = classify_ok(signed_total, used, Basis::Occupied);
            let by_free = classify_ok(signed_total, total - used, Basis::Available);
            assert_eq!(by_use.tier, by_free.tier, "total={total} used={used}");
        }
    }
}

#[test]
fn tier_never_decreases_as_usage_grows() {
    let total = 97_i64;
    let mut previous = Tier::Low;
    for count in 0..=200_u64 {
        let tier = classify_ok(total, count, Basis::Occupied).tier;
        assert!(tier >= previous, "count={count}");
        previous = tier;
    }
}

#[test]
fn custom_thresholds_shift_the_boundaries() {
    let strict = match Thresholds::new(50, 25) {
        Ok(policy) => policy,
        Err(err) => panic!("{err}"),
    };
    let occ = match strict.classify(100, 50, Basis::Occupied) {
        Ok(occ) => occ,
        Err(err) => panic!("{err}"),
    };
    assert_eq!(occ.tier, Tier::High);
    assert_eq!(classify_ok(100, 50, Basis::Occupied).tier, Tier::Low);
}

#[test]
fn documented_examples() {
    let now = 1_720_000_000_000_i64;
    let occ = classify_ok(600, 596, Basis::Occupied);
    assert!((occ.percentage - 99.33).abs() < 0.01);
    assert_eq!(occ.tier, Tier::High);
    assert!(!occ.is_queued);

    let occ = classify_ok(600, 620, Basis::Occupied);
    assert_eq!(occ.overflow, 20);
    assert!(occ.is_queued);

    assert_eq!(format_elapsed(now - 30_000, now), "Just now");
    assert_eq!(format_elapsed(now - 125_000, now), "2m ago");
    assert_eq!(format_elapsed(now - 7_200_000, now), "2h ago");
    assert_eq!(format_remaining(now + 45_000, now), "45s");
    assert_eq!(format_remaining(now - 1, now), "any moment");
}

#[test]
fn occupancy_serializes_with_lowercase_enums() {
    let occ = classify_ok(600, 620, Basis::Occupied);
    let json = match serde_json::to_value(occ) {
        Ok(value) => value,
        Err(err) => panic!("{err}"),
    };
    assert_eq!(json["tier"], "high");
    assert_eq!(json["basis"], "occupied");
    assert_eq!(json["is_queued"], true);
}
