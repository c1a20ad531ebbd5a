#![allow(clippy::doc_markdown)]
#![doc = include_str!("../README.md")]

pub mod anomaly;
pub mod engine;
pub mod error;
pub mod health;
pub mod quantity;
pub mod recommendation;
pub mod report;
pub mod telemetry;

pub use self::{
    anomaly::{Category, Finding, Severity, Thresholds},
    engine::Engine,
    error::{DivisionError, EngineError, ReportError, ValidationError},
    report::Report,
    telemetry::{Snapshot, ValidationPolicy},
};
