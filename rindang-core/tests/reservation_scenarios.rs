//! End-to-end scenarios across registry, status store, flow and cart

use chrono::{NaiveDate, NaiveTime};
use rindang_core::reservation::{CustomerInfo, ScheduleInput};
use rindang_core::storage::MemoryStorage;
use rindang_core::{
    Cart, FixedClock, FloorPlan, FlowError, FlowState, LocalStorage, MenuEntry, Pick, PointerPos,
    RedbStorage, ReservationFlow, TableRegistry, TableStatusStore,
};
use shared::models::{HitRegion, Table, TableArea, TableStatus};
use std::sync::Arc;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 8, 17).unwrap()
}

fn slot(hour: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, 0, 0).unwrap()
}

fn single_table_registry() -> TableRegistry {
    TableRegistry::new(vec![Table {
        id: "T1".into(),
        label: "Meja T1".into(),
        seats: 2,
        area: TableArea::Indoor,
        hit_region: HitRegion::new(100.0, 100.0, 20.0),
    }])
    .unwrap()
}

#[test]
fn ana_books_t1_for_tomorrow() {
    let registry = single_table_registry();
    let mut store = TableStatusStore::load(&registry, Arc::new(MemoryStorage::new()));
    let clock = FixedClock::at(today(), 13, 0);
    let mut flow = ReservationFlow::new(20_000);

    flow.submit_info(CustomerInfo::new("Ana", "a@b.com", "0812...")).unwrap();
    flow.submit_schedule(
        ScheduleInput {
            date: today().succ_opt().unwrap(),
            time: slot(10),
            guests: 2,
        },
        &clock,
    )
    .unwrap();

    let plan = FloorPlan::default();
    let pick = flow
        .pick_table(&plan, &registry, &store, PointerPos::new(100.0, 100.0))
        .unwrap();
    assert!(matches!(pick, Pick::Selected(t) if t.id == "T1"));

    flow.proceed_to_payment(&store).unwrap();
    assert_eq!(flow.fee(), 20_000);
    let summary = flow.confirm_payment(&mut store).unwrap().clone();

    assert_eq!(flow.state(), FlowState::Confirmed);
    assert_eq!(store.status("T1"), TableStatus::Reserved);
    assert_eq!(summary.name, "Ana");
    assert_eq!(summary.fee, 20_000);
    assert_eq!(summary.table_id, "T1");
}

#[test]
fn confirm_requires_every_step_in_order() {
    let registry = single_table_registry();
    let mut store = TableStatusStore::load(&registry, Arc::new(MemoryStorage::new()));
    let clock = FixedClock::at(today(), 9, 0);
    let mut flow = ReservationFlow::default();

    assert!(matches!(
        flow.confirm_payment(&mut store),
        Err(FlowError::InvalidTransition { .. })
    ));
    flow.submit_info(CustomerInfo::new("Ana", "a@b.com", "0812")).unwrap();
    assert!(flow.confirm_payment(&mut store).is_err());
    assert!(flow.select_table("T1", &registry, &store).is_err());

    flow.submit_schedule(
        ScheduleInput {
            date: today(),
            time: slot(11),
            guests: 1,
        },
        &clock,
    )
    .unwrap();
    flow.select_table("T1", &registry, &store).unwrap();
    assert!(flow.confirm_payment(&mut store).is_err());
    assert_eq!(store.status("T1"), TableStatus::Free);

    flow.proceed_to_payment(&store).unwrap();
    flow.confirm_payment(&mut store).unwrap();
    assert_eq!(flow.state(), FlowState::Confirmed);
}

#[test]
fn two_flows_race_for_the_same_table() {
    let registry = single_table_registry();
    let mut store = TableStatusStore::load(&registry, Arc::new(MemoryStorage::new()));
    let clock = FixedClock::at(today(), 9, 0);

    let mut flows: Vec<ReservationFlow> = (0..2)
        .map(|_| {
            let mut flow = ReservationFlow::default();
            flow.submit_info(CustomerInfo::new("Ana", "a@b.com", "0812")).unwrap();
            flow.submit_schedule(
                ScheduleInput {
                    date: today(),
                    time: slot(12),
                    guests: 2,
                },
                &clock,
            )
            .unwrap();
            flow.select_table("T1", &registry, &store).unwrap();
            flow.proceed_to_payment(&store).unwrap();
            flow
        })
        .collect();

    flows[0].confirm_payment(&mut store).unwrap();
    let err = flows[1].confirm_payment(&mut store).unwrap_err();
    assert!(matches!(
        err,
        FlowError::TableUnavailable {
            status: TableStatus::Reserved,
            ..
        }
    ));
    assert_eq!(flows[1].state(), FlowState::AwaitingPayment);
}

#[test]
fn occupied_table_pick_reports_occupied() {
    let registry = single_table_registry();
    let mut store = TableStatusStore::load(&registry, Arc::new(MemoryStorage::new()));
    store.set("T1", TableStatus::Occupied).unwrap();
    let plan = FloorPlan::default();

    match plan.pick(&registry, &store, PointerPos::new(100.0, 100.0)) {
        Pick::Unavailable { table, status } => {
            assert_eq!(table.id, "T1");
            assert_eq!(status, TableStatus::Occupied);
        }
        other => panic!("expected unavailable, got {:?}", other),
    }
}

#[test]
fn hit_test_with_scaled_image() {
    let registry = TableRegistry::default_floor();
    let store = TableStatusStore::load(&registry, Arc::new(MemoryStorage::new()));
    let mut plan = FloorPlan::default();
    plan.resize(460.0);

    // I6-1 at (180,148) r=33 in natural pixels
    let inside = PointerPos::new(90.0 + 10.0, 74.0);
    assert!(matches!(plan.pick(&registry, &store, inside), Pick::Selected(t) if t.id == "I6-1"));

    let outside = PointerPos::new(90.0 + 17.0, 74.0);
    assert_eq!(plan.pick(&registry, &store, outside), Pick::Miss);
}

#[test]
fn espresso_twice_costs_thirty_thousand() {
    let mut cart = Cart::new();
    let espresso = MenuEntry::new(1, "Espresso", "15.000");
    cart.add(&espresso);
    cart.add(&espresso);

    assert_eq!(cart.items().len(), 1);
    assert_eq!(cart.items()[0].quantity, 2);
    assert_eq!(cart.total(), 30_000);

    cart.update_quantity("Espresso", -2);
    assert!(cart.is_empty());
}

#[test]
fn statuses_survive_reopening_the_storage_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("work").join("local.redb");
    let registry = TableRegistry::default_floor();

    {
        let storage: Arc<dyn LocalStorage> = Arc::new(RedbStorage::open(&path).unwrap());
        let mut store = TableStatusStore::load(&registry, storage);
        store.set("O4-2", TableStatus::Reserved).unwrap();
        store.set("I7-1", TableStatus::Occupied).unwrap();
    }

    let storage: Arc<dyn LocalStorage> = Arc::new(RedbStorage::open(&path).unwrap());
    let mut store = TableStatusStore::load(&registry, storage.clone());
    assert_eq!(store.status("O4-2"), TableStatus::Reserved);
    assert_eq!(store.status("I7-1"), TableStatus::Occupied);

    store.reset().unwrap();
    drop(store);
    let reloaded = TableStatusStore::load(&registry, storage);
    assert!(reloaded.snapshot().values().all(|s| s.is_free()));
}
