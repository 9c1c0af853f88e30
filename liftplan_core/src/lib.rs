#![forbid(unsafe_code)]

//! Core domain model and parsing engine for liftplan.
//!
//! This crate provides:
//! - Domain types (exercises, cycles, workout templates, overrides)
//! - Plan grammars (week headers, workout headers, exercise lines)
//! - Exercise library and built-in catalog
//! - Plan parser (text and structured input)
//! - Progression calculator and schedule export

pub mod types;
pub mod error;
pub mod clock;
pub mod config;
pub mod logging;
pub mod headers;
pub mod exercise_line;
pub mod sections;
pub mod library;
pub mod catalog;
pub mod resolver;
pub mod schedule;
pub mod overrides;
pub mod progression;
pub mod structured;
pub mod parser;
pub mod export;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use clock::{Clock, FixedClock, IdGenerator, RandomIds, SequentialIds, SystemClock};
pub use config::Config;
pub use catalog::{build_default_catalog, get_default_catalog};
pub use library::{ExerciseLibrary, InMemoryLibrary, LibraryLock};
pub use parser::{ParseReport, ParsedPlan, PlanParser};
pub use progression::{effective_targets, targets_for_weeks, TargetSource, WeekTargets};
pub use structured::StructuredPlan;
pub use export::{export_schedule_csv, export_schedule_csv_to};
