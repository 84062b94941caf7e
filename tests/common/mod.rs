#![allow(dead_code)]

use attendance_tracker::model::worker::NewWorker;
use attendance_tracker::{AttendanceService, FixedClock, Store};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

pub fn date(s: &str) -> NaiveDate {
    s.parse().expect("valid date")
}

pub fn time(s: &str) -> NaiveTime {
    s.parse().expect("valid time")
}

pub fn worker(name: &str, role: &str) -> NewWorker {
    NewWorker {
        name: name.to_string(),
        role: role.to_string(),
        ..NewWorker::default()
    }
}

pub async fn open_store() -> Store {
    let store = Store::in_memory();
    store.open().await.expect("in-memory store opens");
    store
}

/// A service on a fresh in-memory store whose clock is stuck at `now`
/// (`YYYY-MM-DDTHH:MM:SS`).
pub async fn open_service(now: &str) -> AttendanceService {
    let now: NaiveDateTime = now.parse().expect("valid timestamp");
    AttendanceService::with_clock(open_store().await, FixedClock(now))
}
