//! TrueStake prediction-market mini app.
//!
//! Library modules are shared by the web binary and the tests; everything
//! above `ui` is plain Rust with no DOM dependency.

pub mod api;
pub mod auth;
pub mod categories;
pub mod config;
pub mod controller;
pub mod i18n;
pub mod market;
pub mod state;
pub mod store;
pub mod ui;
pub mod view;
