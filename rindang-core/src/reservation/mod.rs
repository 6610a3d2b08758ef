//! Reservation booking: schedule rules and the step-by-step flow

pub mod flow;
pub mod schedule;

pub use flow::{
    CustomerInfo, FlowError, FlowState, ReservationFlow, ReservationSummary, ScheduleInput,
};
pub use schedule::{
    FIRST_SLOT_HOUR, LAST_SLOT_HOUR, MAX_GUESTS, MIN_GUESTS, available_slots, format_slot,
    parse_slot, time_slots,
};
