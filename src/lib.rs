#![forbid(unsafe_code)]

//! Renal function estimation and anticoagulant dosing decision engine.
//!
//! This crate provides:
//! - Unit conversion for patient measurements (weight, height)
//! - Ideal/adjusted body-weight resolution
//! - Creatinine clearance (Cockcroft-Gault) and pediatric eGFR
//!   (Bedside Schwartz)
//! - Per-drug dosing decision tables (DOAC and Lovenox protocols)
//!
//! Every operation is a pure, synchronous function of its inputs: nothing
//! is persisted, no I/O is performed, and no state survives a call, so
//! invocations may run concurrently without synchronization. The intended
//! caller is a presentation layer that collects raw form values, invokes
//! one of the three `compute_*` entry points and renders the returned
//! [`CalculationResult`] or validation error.

pub mod engine;
pub mod error;
pub mod logging;
pub mod renal;
pub mod rules;
pub mod types;
pub mod units;
pub mod weight;

// Re-export commonly used types
pub use engine::{
    compute_adult_doac_dosing, compute_lovenox_dosing, compute_pediatric_renal_function,
};
pub use error::{Error, Result};
pub use types::*;
