//! Pokedex catalog viewer - tui-dispatch app
//!
//! The library exposes the app's modules for the binaries and tests.

pub mod action;
pub mod api;
pub mod catalog_builder;
pub mod components;
pub mod config;
pub mod effect;
pub mod logging;
pub mod reducer;
pub mod state;
