//! Daily time slots and lead-time filtering

use crate::clock::Clock;
use chrono::{NaiveDate, NaiveTime, Timelike};

pub const FIRST_SLOT_HOUR: u32 = 8;
pub const LAST_SLOT_HOUR: u32 = 20;

/// Same-hour slots stay bookable while the current minute is below this
const SAME_HOUR_CUTOFF_MINUTE: u32 = 30;

pub const MIN_GUESTS: u32 = 1;
pub const MAX_GUESTS: u32 = 10;

/// `08:00 ..= 20:00`, hourly
pub fn time_slots() -> Vec<NaiveTime> {
    (FIRST_SLOT_HOUR..=LAST_SLOT_HOUR)
        .filter_map(|h| NaiveTime::from_hms_opt(h, 0, 0))
        .collect()
}

/// Slots still bookable on `date` as seen from `clock`
pub fn available_slots(date: NaiveDate, clock: &dyn Clock) -> Vec<NaiveTime> {
    let now = clock.now();
    let today = now.date();

    if date < today {
        return Vec::new();
    }
    if date > today {
        return time_slots();
    }

    time_slots()
        .into_iter()
        .filter(|slot| {
            slot.hour() > now.hour()
                || (slot.hour() == now.hour() && now.minute() < SAME_HOUR_CUTOFF_MINUTE)
        })
        .collect()
}

pub fn format_slot(slot: NaiveTime) -> String {
    slot.format("%H:%M").to_string()
}

/// Parse `"HH:MM"` (or `"HH"`) into one of the fixed slots
pub fn parse_slot(value: &str) -> Option<NaiveTime> {
    let value = value.trim();
    let time = NaiveTime::parse_from_str(value, "%H:%M")
        .ok()
        .or_else(|| value.parse::<u32>().ok().and_then(|h| NaiveTime::from_hms_opt(h, 0, 0)))?;
    time_slots().into_iter().find(|slot| *slot == time)
}
