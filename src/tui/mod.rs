//! TUI module for the interactive chapter reader.
//!
//! Organized along FP/Unix boundaries:
//! - `state`: Pure data types (App, Action, Transition)
//! - `update`: Pure transitions
//! - `blocks`, `view`: Pure rendering
//! - `theme`: Style constants
//! - `run`: Effects (terminal, threads, clipboard)

pub mod blocks;
pub mod run;
pub mod state;
pub mod theme;
pub mod update;
pub mod view;
