//! Reservation flow state machine
//!
//! ```text
//! CollectingInfo ─► CollectingSchedule ─► SelectingTable ─► AwaitingPayment ─► Confirmed
//!        ▲                  │ back              │ back  ◄── cancel ──┘             │
//!        └──────────────────┴───────────────────┴──────────── reset ◄──────────────┘
//! ```
//!
//! Nothing is persisted before `Confirmed`. Confirmation is the single
//! write: the selected table becomes `reserved` in the status store.

use super::schedule::{MAX_GUESTS, MIN_GUESTS, available_slots, format_slot};
use crate::clock::Clock;
use crate::config::DEFAULT_RESERVATION_FEE;
use crate::tables::{FloorPlan, Pick, PointerPos, StoreError, TableRegistry, TableStatusStore};
use crate::validation::{
    MAX_EMAIL_LEN, MAX_NAME_LEN, MAX_NOTE_LEN, MAX_PHONE_LEN, ValidationError,
    validate_optional_text, validate_required_text,
};
use chrono::{NaiveDate, NaiveTime, TimeZone};
use serde::{Deserialize, Serialize};
use shared::models::{CreateReservationRequest, Table, TableStatus};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlowState {
    CollectingInfo,
    CollectingSchedule,
    SelectingTable,
    AwaitingPayment,
    Confirmed,
}

impl fmt::Display for FlowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::CollectingInfo => "collecting info",
            Self::CollectingSchedule => "collecting schedule",
            Self::SelectingTable => "selecting table",
            Self::AwaitingPayment => "awaiting payment",
            Self::Confirmed => "confirmed",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum FlowError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Table {table_id} is {status}")]
    TableUnavailable {
        table_id: String,
        status: TableStatus,
    },

    #[error("Unknown table: {0}")]
    UnknownTable(String),

    #[error("Please select a table first")]
    TableNotSelected,

    #[error("Cannot {action} while {state}")]
    InvalidTransition {
        state: FlowState,
        action: &'static str,
    },

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub special_request: Option<String>,
}

impl CustomerInfo {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
            special_request: None,
        }
    }

    pub fn with_special_request(mut self, note: impl Into<String>) -> Self {
        self.special_request = Some(note.into());
        self
    }

    fn validate(&self) -> Result<(), ValidationError> {
        validate_required_text(&self.name, "name", MAX_NAME_LEN)?;
        validate_required_text(&self.email, "email", MAX_EMAIL_LEN)?;
        validate_required_text(&self.phone, "phone", MAX_PHONE_LEN)?;
        validate_optional_text(self.special_request.as_deref(), "special request", MAX_NOTE_LEN)
    }

    fn trimmed(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            special_request: self
                .special_request
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleInput {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub guests: u32,
}

/// Snapshot taken at confirmation, shown on the success screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationSummary {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub guests: u32,
    pub table_id: String,
    pub table_label: String,
    pub fee: i64,
    pub special_request: Option<String>,
}

impl ReservationSummary {
    pub fn time_label(&self) -> String {
        format_slot(self.time)
    }
}

#[derive(Debug, Clone)]
pub struct ReservationFlow {
    state: FlowState,
    fee: i64,
    info: Option<CustomerInfo>,
    schedule: Option<ScheduleInput>,
    selected: Option<String>,
    summary: Option<ReservationSummary>,
}

impl Default for ReservationFlow {
    fn default() -> Self {
        Self::new(DEFAULT_RESERVATION_FEE)
    }
}

impl ReservationFlow {
    pub fn new(fee: i64) -> Self {
        Self {
            state: FlowState::CollectingInfo,
            fee,
            info: None,
            schedule: None,
            selected: None,
            summary: None,
        }
    }

    pub fn state(&self) -> FlowState {
        self.state
    }

    /// Fixed reservation fee, independent of guests and table
    pub fn fee(&self) -> i64 {
        self.fee
    }

    pub fn info(&self) -> Option<&CustomerInfo> {
        self.info.as_ref()
    }

    pub fn schedule(&self) -> Option<&ScheduleInput> {
        self.schedule.as_ref()
    }

    pub fn selected_table(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn special_request(&self) -> Option<&str> {
        self.info.as_ref().and_then(|i| i.special_request.as_deref())
    }

    pub fn summary(&self) -> Option<&ReservationSummary> {
        self.summary.as_ref()
    }

    fn expect_state(&self, expected: FlowState, action: &'static str) -> Result<(), FlowError> {
        if self.state == expected {
            Ok(())
        } else {
            Err(FlowError::InvalidTransition {
                state: self.state,
                action,
            })
        }
    }

    fn transition(&mut self, next: FlowState) {
        tracing::info!(from = %self.state, to = %next, "Reservation flow transition");
        self.state = next;
    }

    pub fn submit_info(&mut self, info: CustomerInfo) -> Result<(), FlowError> {
        self.expect_state(FlowState::CollectingInfo, "submit customer info")?;
        info.validate()?;
        self.info = Some(info.trimmed());
        self.transition(FlowState::CollectingSchedule);
        Ok(())
    }

    pub fn slots_for(&self, date: NaiveDate, clock: &dyn Clock) -> Vec<NaiveTime> {
        available_slots(date, clock)
    }

    pub fn submit_schedule(
        &mut self,
        input: ScheduleInput,
        clock: &dyn Clock,
    ) -> Result<(), FlowError> {
        self.expect_state(FlowState::CollectingSchedule, "submit schedule")?;

        if input.date < clock.today() {
            return Err(ValidationError::DateInPast(input.date).into());
        }
        let slots = available_slots(input.date, clock);
        if slots.is_empty() {
            return Err(ValidationError::NoSlotsAvailable(input.date).into());
        }
        if !slots.contains(&input.time) {
            return Err(ValidationError::SlotUnavailable(input.time).into());
        }
        if !(MIN_GUESTS..=MAX_GUESTS).contains(&input.guests) {
            return Err(ValidationError::GuestsOutOfRange {
                got: input.guests,
                min: MIN_GUESTS,
                max: MAX_GUESTS,
            }
            .into());
        }

        self.schedule = Some(input);
        self.transition(FlowState::SelectingTable);
        Ok(())
    }

    /// Click on the floor plan; only free tables become the selection
    pub fn pick_table<'a>(
        &mut self,
        plan: &FloorPlan,
        registry: &'a TableRegistry,
        store: &TableStatusStore,
        pos: PointerPos,
    ) -> Result<Pick<'a>, FlowError> {
        self.expect_state(FlowState::SelectingTable, "select a table")?;
        let pick = plan.pick(registry, store, pos);
        match pick {
            Pick::Selected(table) => {
                self.selected = Some(table.id.clone());
                Ok(pick)
            }
            Pick::Unavailable { table, status } => Err(FlowError::TableUnavailable {
                table_id: table.id.clone(),
                status,
            }),
            Pick::Miss => Ok(pick),
        }
    }

    /// Select by id (keyboard / list selection)
    pub fn select_table<'a>(
        &mut self,
        id: &str,
        registry: &'a TableRegistry,
        store: &TableStatusStore,
    ) -> Result<&'a Table, FlowError> {
        self.expect_state(FlowState::SelectingTable, "select a table")?;
        let table = registry
            .get(id)
            .ok_or_else(|| FlowError::UnknownTable(id.to_string()))?;
        ensure_free(store, &table.id)?;
        self.selected = Some(table.id.clone());
        Ok(table)
    }

    pub fn proceed_to_payment(&mut self, store: &TableStatusStore) -> Result<(), FlowError> {
        self.expect_state(FlowState::SelectingTable, "proceed to payment")?;
        let id = self.selected.as_deref().ok_or(FlowError::TableNotSelected)?;
        ensure_free(store, id)?;
        self.transition(FlowState::AwaitingPayment);
        Ok(())
    }

    pub fn cancel_payment(&mut self) -> Result<(), FlowError> {
        self.expect_state(FlowState::AwaitingPayment, "cancel payment")?;
        self.transition(FlowState::SelectingTable);
        Ok(())
    }

    /// Trusted user action: no payment verification happens here
    pub fn confirm_payment(
        &mut self,
        store: &mut TableStatusStore,
    ) -> Result<&ReservationSummary, FlowError> {
        self.expect_state(FlowState::AwaitingPayment, "confirm payment")?;
        let (Some(info), Some(schedule), Some(table_id)) =
            (self.info.as_ref(), self.schedule.as_ref(), self.selected.as_deref())
        else {
            return Err(FlowError::TableNotSelected);
        };

        ensure_free(store, table_id)?;
        let table_label = store
            .registry()
            .get(table_id)
            .map(|t| t.label.clone())
            .ok_or_else(|| FlowError::UnknownTable(table_id.to_string()))?;
        store.set(table_id, TableStatus::Reserved)?;

        let summary = ReservationSummary {
            name: info.name.clone(),
            email: info.email.clone(),
            phone: info.phone.clone(),
            date: schedule.date,
            time: schedule.time,
            guests: schedule.guests,
            table_id: table_id.to_string(),
            table_label,
            fee: self.fee,
            special_request: info.special_request.clone(),
        };
        tracing::info!(
            table_id = %summary.table_id,
            date = %summary.date,
            time = %summary.time_label(),
            guests = summary.guests,
            "Reservation confirmed"
        );
        self.transition(FlowState::Confirmed);
        Ok(self.summary.insert(summary))
    }

    /// One step back; entered data is kept
    pub fn back(&mut self) -> Result<(), FlowError> {
        let previous = match self.state {
            FlowState::CollectingSchedule => FlowState::CollectingInfo,
            FlowState::SelectingTable => FlowState::CollectingSchedule,
            FlowState::AwaitingPayment => FlowState::SelectingTable,
            state @ (FlowState::CollectingInfo | FlowState::Confirmed) => {
                return Err(FlowError::InvalidTransition {
                    state,
                    action: "go back",
                });
            }
        };
        self.transition(previous);
        Ok(())
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.fee);
    }

    /// Backend payload for a confirmed reservation
    ///
    /// The slot is local wall time; `clock` supplies its UTC offset.
    pub fn to_backend_request(
        summary: &ReservationSummary,
        backend_table_id: i64,
        clock: &dyn Clock,
    ) -> CreateReservationRequest {
        let naive = summary.date.and_time(summary.time);
        let offset = clock.offset_at(naive);
        let reservation_date = match offset.from_local_datetime(&naive).single() {
            Some(local) => local.to_rfc3339(),
            None => naive.and_utc().to_rfc3339(),
        };
        CreateReservationRequest {
            name: summary.name.clone(),
            phone: summary.phone.clone(),
            email: summary.email.clone(),
            table_id: backend_table_id,
            reservation_date,
        }
    }
}

fn ensure_free(store: &TableStatusStore, table_id: &str) -> Result<(), FlowError> {
    match store.status(table_id) {
        TableStatus::Free => Ok(()),
        status => Err(FlowError::TableUnavailable {
            table_id: table_id.to_string(),
            status,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::storage::MemoryStorage;
    use chrono::{DateTime, FixedOffset};
    use std::sync::Arc;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 5, 4).unwrap()
    }

    fn ten() -> NaiveTime {
        NaiveTime::from_hms_opt(10, 0, 0).unwrap()
    }

    fn clock() -> FixedClock {
        FixedClock::at(today(), 9, 15)
    }

    fn ana() -> CustomerInfo {
        CustomerInfo::new("Ana", "a@b.com", "0812345678")
    }

    fn tomorrow_at_ten(guests: u32) -> ScheduleInput {
        ScheduleInput {
            date: today().succ_opt().unwrap(),
            time: ten(),
            guests,
        }
    }

    fn store() -> TableStatusStore {
        TableStatusStore::load(&TableRegistry::default_floor(), Arc::new(MemoryStorage::new()))
    }

    fn at_selecting_table() -> ReservationFlow {
        let mut flow = ReservationFlow::default();
        flow.submit_info(ana()).unwrap();
        flow.submit_schedule(tomorrow_at_ten(2), &clock()).unwrap();
        flow
    }

    #[test]
    fn test_info_validation_keeps_state() {
        let mut flow = ReservationFlow::default();
        let err = flow
            .submit_info(CustomerInfo::new("  ", "a@b.com", "0812"))
            .unwrap_err();
        assert!(matches!(
            err,
            FlowError::Validation(ValidationError::Required { field: "name" })
        ));
        assert_eq!(flow.state(), FlowState::CollectingInfo);
        assert!(flow.info().is_none());

        assert!(flow.submit_info(CustomerInfo::new("Ana", "a@b.com", "")).is_err());
        assert!(matches!(
            flow.submit_info(CustomerInfo::new("Ana", " ", "0812")),
            Err(FlowError::Validation(ValidationError::Required { field: "email" }))
        ));
        let long_email = format!("{}@b.com", "a".repeat(MAX_EMAIL_LEN));
        assert!(matches!(
            flow.submit_info(CustomerInfo::new("Ana", long_email, "0812")),
            Err(FlowError::Validation(ValidationError::TooLong { field: "email", .. }))
        ));
        assert_eq!(flow.state(), FlowState::CollectingInfo);

        // Only presence is checked, not the address shape
        flow.submit_info(CustomerInfo::new(" Ana ", "ana", "0812")).unwrap();
        assert_eq!(flow.state(), FlowState::CollectingSchedule);
        assert_eq!(flow.info().unwrap().name, "Ana");
        assert_eq!(flow.info().unwrap().email, "ana");
    }

    #[test]
    fn test_schedule_rules() {
        let clock = clock();
        let mut flow = ReservationFlow::default();
        flow.submit_info(ana()).unwrap();

        let past = ScheduleInput {
            date: today().pred_opt().unwrap(),
            ..tomorrow_at_ten(2)
        };
        assert!(matches!(
            flow.submit_schedule(past, &clock),
            Err(FlowError::Validation(ValidationError::DateInPast(_)))
        ));

        let early = ScheduleInput {
            date: today(),
            time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            guests: 2,
        };
        assert!(matches!(
            flow.submit_schedule(early, &clock),
            Err(FlowError::Validation(ValidationError::SlotUnavailable(_)))
        ));

        for guests in [0, 11] {
            assert!(matches!(
                flow.submit_schedule(tomorrow_at_ten(guests), &clock),
                Err(FlowError::Validation(ValidationError::GuestsOutOfRange { .. }))
            ));
        }
        assert_eq!(flow.state(), FlowState::CollectingSchedule);

        flow.submit_schedule(tomorrow_at_ten(10), &clock).unwrap();
        assert_eq!(flow.state(), FlowState::SelectingTable);
    }

    #[test]
    fn test_no_slots_left_today() {
        let late = FixedClock::at(today(), 20, 45);
        let mut flow = ReservationFlow::default();
        flow.submit_info(ana()).unwrap();
        assert!(flow.slots_for(today(), &late).is_empty());

        let input = ScheduleInput {
            date: today(),
            time: NaiveTime::from_hms_opt(20, 0, 0).unwrap(),
            guests: 2,
        };
        assert!(matches!(
            flow.submit_schedule(input, &late),
            Err(FlowError::Validation(ValidationError::NoSlotsAvailable(_)))
        ));
    }

    #[test]
    fn test_out_of_order_calls_rejected() {
        let mut flow = ReservationFlow::default();
        let mut store = store();
        assert!(matches!(
            flow.submit_schedule(tomorrow_at_ten(2), &clock()),
            Err(FlowError::InvalidTransition { state: FlowState::CollectingInfo, .. })
        ));
        assert!(matches!(
            flow.confirm_payment(&mut store),
            Err(FlowError::InvalidTransition { .. })
        ));
        assert!(flow.proceed_to_payment(&store).is_err());
        assert!(flow.cancel_payment().is_err());
        assert!(flow.back().is_err());
        assert!(store.snapshot().values().all(|s| s.is_free()));
    }

    #[test]
    fn test_occupied_table_never_selected() {
        let registry = TableRegistry::default_floor();
        let mut store = store();
        store.set("I4-1", TableStatus::Occupied).unwrap();
        let mut flow = at_selecting_table();

        let err = flow.select_table("I4-1", &registry, &store).unwrap_err();
        assert!(matches!(
            err,
            FlowError::TableUnavailable { status: TableStatus::Occupied, .. }
        ));
        assert_eq!(flow.selected_table(), None);

        let plan = FloorPlan::default();
        let err = flow
            .pick_table(&plan, &registry, &store, PointerPos::new(523.0, 436.0))
            .unwrap_err();
        assert!(matches!(
            err,
            FlowError::TableUnavailable { status: TableStatus::Occupied, .. }
        ));
        assert_eq!(flow.selected_table(), None);

        flow.select_table("I4-2", &registry, &store).unwrap();
        flow.pick_table(&plan, &registry, &store, PointerPos::new(523.0, 436.0))
            .unwrap_err();
        assert_eq!(flow.selected_table(), Some("I4-2"));

        assert!(matches!(
            flow.pick_table(&plan, &registry, &store, PointerPos::new(1.0, 1.0)),
            Ok(Pick::Miss)
        ));
        assert_eq!(flow.selected_table(), Some("I4-2"));
    }

    #[test]
    fn test_proceed_requires_selection() {
        let store = store();
        let mut flow = at_selecting_table();
        assert!(matches!(
            flow.proceed_to_payment(&store),
            Err(FlowError::TableNotSelected)
        ));
        assert!(matches!(
            flow.select_table("Z9", store.registry(), &store),
            Err(FlowError::UnknownTable(_))
        ));
    }

    #[test]
    fn test_confirm_revalidates_at_commit() {
        let registry = TableRegistry::default_floor();
        let mut store = store();
        let mut flow = at_selecting_table();
        flow.select_table("O4-3", &registry, &store).unwrap();
        flow.proceed_to_payment(&store).unwrap();

        // another flow took the table meanwhile
        store.set("O4-3", TableStatus::Reserved).unwrap();

        assert!(matches!(
            flow.confirm_payment(&mut store),
            Err(FlowError::TableUnavailable { status: TableStatus::Reserved, .. })
        ));
        assert_eq!(flow.state(), FlowState::AwaitingPayment);
        assert!(flow.summary().is_none());
    }

    #[test]
    fn test_confirm_reserves_and_summarizes() {
        let registry = TableRegistry::default_floor();
        let mut store = store();
        let mut flow = ReservationFlow::new(20_000);
        flow.submit_info(ana().with_special_request("  near the window ")).unwrap();
        flow.submit_schedule(tomorrow_at_ten(2), &clock()).unwrap();
        flow.select_table("I2-1", &registry, &store).unwrap();
        flow.proceed_to_payment(&store).unwrap();
        flow.cancel_payment().unwrap();
        assert_eq!(flow.state(), FlowState::SelectingTable);
        assert!(store.status("I2-1").is_free());
        flow.proceed_to_payment(&store).unwrap();

        let summary = flow.confirm_payment(&mut store).unwrap().clone();
        assert_eq!(flow.state(), FlowState::Confirmed);
        assert_eq!(store.status("I2-1"), TableStatus::Reserved);
        assert_eq!(summary.table_label, "Meja Indoor (2 kursi) - 1");
        assert_eq!(summary.fee, 20_000);
        assert_eq!(summary.time_label(), "10:00");
        assert_eq!(summary.special_request.as_deref(), Some("near the window"));
        assert_eq!(flow.special_request(), Some("near the window"));

        flow.reset();
        assert_eq!(flow.state(), FlowState::CollectingInfo);
        assert!(flow.info().is_none());
        assert!(flow.schedule().is_none());
        assert!(flow.selected_table().is_none());
        assert!(flow.summary().is_none());
        assert_eq!(flow.fee(), 20_000);
    }

    #[test]
    fn test_back_navigation_keeps_data() {
        let mut flow = at_selecting_table();
        flow.back().unwrap();
        assert_eq!(flow.state(), FlowState::CollectingSchedule);
        assert!(flow.schedule().is_some());
        flow.back().unwrap();
        assert_eq!(flow.state(), FlowState::CollectingInfo);
        assert_eq!(flow.info().unwrap().name, "Ana");
        assert!(flow.back().is_err());
    }

    #[test]
    fn test_backend_request() {
        let summary = ReservationSummary {
            name: "Ana".into(),
            email: "a@b.com".into(),
            phone: "0812".into(),
            date: today(),
            time: ten(),
            guests: 2,
            table_id: "I6-1".into(),
            table_label: "Meja Indoor (6 kursi) - 1".into(),
            fee: 20_000,
            special_request: None,
        };
        let wib = FixedOffset::east_opt(7 * 3600).unwrap();
        let request =
            ReservationFlow::to_backend_request(&summary, 7, &clock().with_offset(wib));
        assert_eq!(request.table_id, 7);
        assert_eq!(request.name, "Ana");
        assert_eq!(request.reservation_date, "2026-05-04T10:00:00+07:00");

        let parsed = DateTime::parse_from_rfc3339(&request.reservation_date).unwrap();
        assert_eq!(parsed.naive_local(), today().and_time(ten()));
        assert_eq!(parsed.offset(), &wib);

        let utc = ReservationFlow::to_backend_request(&summary, 7, &clock());
        assert_eq!(utc.reservation_date, "2026-05-04T10:00:00+00:00");
    }
}
