//! Calendar core for the event planner: date arithmetic for month and week
//! grids, overlap detection, search and view filtering, reminder scheduling
//! and form validation. The terminal front end in `main.rs` only renders what
//! this crate computes.

pub mod calendar;
pub mod config;
pub mod error;

pub use config::Config;
pub use error::{CalendarError, Result};
