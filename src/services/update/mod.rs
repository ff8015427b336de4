pub mod update_service;

pub use update_service::{evaluate_feed, UpdateService, UpdateStatus};
