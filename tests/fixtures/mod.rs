//! Test fixtures for evac-planner.
//!
//! Provides realistic test data including:
//! - Real San Francisco facilities (from OpenStreetMap)
//! - In-process fakes for the facility and route services

#![allow(dead_code)]

pub mod fakes;
pub mod san_francisco;

pub use fakes::*;
pub use san_francisco::*;
