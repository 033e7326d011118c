pub mod config;
pub mod features;
pub mod models;
pub mod service;
pub mod ui;
pub mod utils;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;
