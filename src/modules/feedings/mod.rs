pub mod controller;
pub mod model;
pub mod router;
pub mod schedule;
pub mod service;

pub use model::*;
pub use router::init_feedings_router;
pub use schedule::{FeedingWindow, OverlapStore, ScheduleError, validate_schedule};
