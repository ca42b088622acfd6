// Library target shared by the binary, the integration tests and the
// criterion benchmarks.

pub mod app;
pub mod auth;
pub mod config;
pub mod event;
pub mod questions;
pub mod session;
pub mod store;
pub mod ui;
