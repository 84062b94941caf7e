//! Worker registry and daily attendance tracking on an embedded SQLite store,
//! with the statistics built on top of it and a JSON API to reach both.

pub mod api;
pub mod config;
pub mod db;
pub mod docs;
pub mod error;
pub mod model;
pub mod routes;
pub mod service;
pub mod utils;

pub use db::{Store, init_db};
pub use error::{Result, StoreError};
pub use service::{AttendanceService, Clock, FixedClock, SystemClock};
