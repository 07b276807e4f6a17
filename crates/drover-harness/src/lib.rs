//! Deterministic simulation harness for drover session testing.
//!
//! This crate provides robot peers that run against the server over
//! turmoil's simulated network: a frame-level [`ScriptedRobot`] for exact
//! wire transcripts and a self-driving [`GridRobot`] that simulates a robot
//! on the grid, obstacles and recharging pauses included.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod robot;

pub use robot::{GridRobot, ScriptedRobot};
