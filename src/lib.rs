//! # Autotheme Library
//!
//! Internal library for the autotheme binary application
//!
//! This library exists to enable testing of the poll loop and the interval
//! evaluator, and to keep CLI dispatch (main.rs) separate from application logic.
//!
//! ## Architecture
//!
//! - **Entry Point**: `AutoTheme` struct runs the background loop with resource management
//! - **Core Logic**: `core` module with the interval evaluator, transition detection and poll loop
//! - **Backends**: `backend` module with the `ThemeApplier` seam and the gsettings implementation
//! - **Configuration**: `config` module for the TOML light/dark profiles and the dark period
//! - **Commands**: `commands` module for CLI subcommands (start, stop, configure, ...)
//! - **Infrastructure**: lock file, instance management, signal handling, logging

// Import macros from logger module for use in all submodules
#[macro_use]
pub mod logger;

pub mod args;
pub mod backend;
pub mod commands;
pub mod common;
pub mod config;
pub mod core;
pub mod io;
pub mod time;

mod autotheme;

pub use autotheme::AutoTheme;
pub use core::{Core, CoreParams, TickOutcome};
pub use core::boundary::TimeBoundary;
pub use core::mode::Mode;
