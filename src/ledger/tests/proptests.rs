use crate::ledger::ledger::Ledger;
use crate::ledger::tests::utils::{Op, add_facility, arb_op, tokens_at};
use crate::tariff::Tariff;
use crate::time::Timestamp;
use proptest::prelude::*;
use proptest::proptest;

proptest! {
    #[test]
    fn test_price_is_monotonic(
        minutes in 0..10_000u64,
        step in 0..3_000u64,
        x in 1..50u32,
        dy in 1..50u32,
        dz in 1..500u32,
    ) {
        let first_hour = f64::from(x) / 4.0;
        let after_first_hour = first_hour + f64::from(dy) / 4.0;
        let daily_cap = after_first_hour + f64::from(dz) / 4.0;
        let tariff = Tariff::new(first_hour, after_first_hour, daily_cap).unwrap();

        prop_assert!(tariff.price(minutes) <= tariff.price(minutes + step));
        prop_assert_eq!(0.0, tariff.price(0).0);
        prop_assert_eq!(tariff.daily_cap, tariff.price(1440));
    }

    #[test]
    fn test_clock_only_moves_forward(offsets in prop::collection::vec(0..200_000u64, 1..40)) {
        let mut ledger = Ledger::new();
        add_facility(&mut ledger, "P1", 100);
        let mut last_accepted: Option<Timestamp> = None;

        for (i, offset) in offsets.into_iter().enumerate() {
            let (date, time) = tokens_at(offset);
            let plate = ["AA-00-AA", "12-AB-34", "ZZ-99-00", "00-XY-ZW"][i % 4];
            let before = ledger.clock_floor();
            let result = ledger.enter("P1", plate, &date, &time);
            let at = Timestamp::parse(&date, Some(&time)).unwrap();

            if let Some(prev) = last_accepted {
                if at < prev {
                    prop_assert!(result.is_err());
                    prop_assert_eq!(before, ledger.clock_floor());
                }
            }
            if result.is_ok() {
                prop_assert_eq!(Some(at), ledger.clock_floor());
                last_accepted = Some(at);
            }
            let _ = ledger.exit("P1", plate, &date, &time);
        }
    }

    #[test]
    fn test_ledger_invariants(
        ops in prop::collection::vec((arb_op(), 0..600u64), 1..80)
    ) {
        let mut ledger = Ledger::new();
        add_facility(&mut ledger, "P1", 2);
        add_facility(&mut ledger, "P2", 3);
        add_facility(&mut ledger, "P3", 1);

        let mut offset = 0;
        for (op, step) in ops {
            offset += step;
            let (date, time) = tokens_at(offset);
            match op {
                Op::Enter { facility, plate } => { let _ = ledger.enter(facility, plate, &date, &time); }
                Op::Exit { facility, plate } => { let _ = ledger.exit(facility, plate, &date, &time); }
                Op::Remove { facility } => {
                    if ledger.remove_facility(facility).is_ok() {
                        prop_assert!(ledger.vehicles.iter().all(|v| !v.is_parked_at(facility)));
                        prop_assert!(ledger.vehicles.iter().all(|v| v.events_at(facility).next().is_none()));
                        prop_assert!(ledger.revenue(facility, None).is_err());
                    }
                }
            }

            for facility in ledger.facilities() {
                let parked_here = ledger.vehicles.iter().filter(|v| v.is_parked_at(&facility.id)).count() as u32;
                prop_assert_eq!(facility.capacity, facility.free_spaces + parked_here);
                prop_assert!(facility.billing_days.windows(2).all(|ds| ds[0].date.cmp_day(&ds[1].date).is_lt()));
            }
            for vehicle in ledger.vehicles.iter() {
                for facility in ledger.facilities() {
                    let entries = vehicle.events_at(&facility.id).map(|e| e.entry).collect::<Vec<_>>();
                    prop_assert!(entries.windows(2).all(|es| es[0] <= es[1]));
                }
            }
        }
    }
}
