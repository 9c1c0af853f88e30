//! Core domain types for the training plan engine.
//!
//! This module defines the fundamental types used throughout the system:
//! - Exercises and their library taxonomy
//! - Rep and load targets (numeric or textual)
//! - Workout templates and their exercises
//! - The cycle aggregate produced by a parse

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

// ============================================================================
// Exercise Library Types
// ============================================================================

/// Muscle-group category of an exercise
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ExerciseCategory {
    Chest,
    Back,
    Legs,
    Shoulders,
    Arms,
    Core,
    FullBody,
    Other,
}

/// Equipment an exercise is performed with
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum Equipment {
    Barbell,
    Bodyweight,
    #[default]
    Dumbbell,
    Machine,
}

/// An exercise library entry (e.g., "Bench Press")
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Exercise {
    pub id: Uuid,
    pub name: String,
    pub category: ExerciseCategory,
    pub equipment: Equipment,
    /// True when the resolver synthesized the entry during a parse
    pub is_custom: bool,
}

// ============================================================================
// Target Types
// ============================================================================

/// A rep target: a plain count or a verbatim token such as "30 sec"
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum RepTarget {
    Count(u32),
    Text(String),
}

impl RepTarget {
    pub fn as_count(&self) -> Option<u32> {
        match self {
            RepTarget::Count(n) => Some(*n),
            RepTarget::Text(_) => None,
        }
    }
}

impl fmt::Display for RepTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepTarget::Count(n) => write!(f, "{}", n),
            RepTarget::Text(t) => write!(f, "{}", t),
        }
    }
}

/// A load target: numeric (0 = bodyweight) or qualitative such as "light"
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum WeightTarget {
    Load(f64),
    Qualitative(String),
}

impl WeightTarget {
    pub const BODYWEIGHT: WeightTarget = WeightTarget::Load(0.0);

    pub fn as_load(&self) -> Option<f64> {
        match self {
            WeightTarget::Load(w) => Some(*w),
            WeightTarget::Qualitative(_) => None,
        }
    }

    pub fn is_bodyweight(&self) -> bool {
        matches!(self, WeightTarget::Load(w) if *w == 0.0)
    }
}

impl Default for WeightTarget {
    fn default() -> Self {
        Self::BODYWEIGHT
    }
}

impl fmt::Display for WeightTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            w if w.is_bodyweight() => write!(f, "BW"),
            WeightTarget::Load(w) => write!(f, "{}", w),
            WeightTarget::Qualitative(q) => write!(f, "{}", q),
        }
    }
}

/// How an exercise's targets move from week to week
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProgressionType {
    Weight,
    Reps,
    /// Reps-then-weight escalation; currently computed exactly like `Weight`
    Double,
    #[default]
    None,
}

/// Exact values the author wrote for one specific week
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct WeeklyOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<WeightTarget>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sets: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reps_min: Option<RepTarget>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reps_max: Option<RepTarget>,
}

// ============================================================================
// Workout Types
// ============================================================================

/// Closed set of workout types
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum WorkoutType {
    Push,
    Pull,
    Legs,
    #[serde(rename = "Full Body")]
    FullBody,
    Other,
}

impl WorkoutType {
    /// Infer the workout type from a display name ("Push A", "Leg Day", ...)
    pub fn from_name(name: &str) -> Self {
        let lower = name.to_lowercase();
        if lower.contains("push") {
            WorkoutType::Push
        } else if lower.contains("pull") {
            WorkoutType::Pull
        } else if lower.contains("leg") {
            WorkoutType::Legs
        } else if lower.contains("full") {
            WorkoutType::FullBody
        } else {
            WorkoutType::Other
        }
    }
}

impl fmt::Display for WorkoutType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            WorkoutType::Push => "Push",
            WorkoutType::Pull => "Pull",
            WorkoutType::Legs => "Legs",
            WorkoutType::FullBody => "Full Body",
            WorkoutType::Other => "Other",
        };
        f.write_str(s)
    }
}

/// One exercise slot inside a workout template
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WorkoutTemplateExercise {
    pub id: Uuid,
    pub exercise_id: Uuid,
    pub exercise_name: String,
    pub order_index: u32,
    pub target_sets: u32,
    pub target_reps_min: RepTarget,
    pub target_reps_max: RepTarget,
    pub target_weight: WeightTarget,
    pub progression_type: ProgressionType,
    pub progression_value: f64,
    /// Week number → author-supplied exact values
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weekly_overrides: Option<BTreeMap<u32, WeeklyOverride>>,
}

/// A named training day within a cycle
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WorkoutTemplate {
    pub id: Uuid,
    pub cycle_id: Uuid,
    pub name: String,
    pub workout_type: WorkoutType,
    /// 1 = Monday .. 7 = Sunday, `None` when unassigned
    pub day_of_week: Option<u8>,
    pub exercises: Vec<WorkoutTemplateExercise>,
}

// ============================================================================
// Cycle Type
// ============================================================================

/// A multi-week training block
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Cycle {
    pub id: Uuid,
    pub cycle_number: u32,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub length_in_weeks: u32,
    pub created_at: DateTime<Utc>,
    pub workouts: Vec<WorkoutTemplate>,
}

impl Cycle {
    /// End of a cycle that starts at `start` and runs `weeks` weeks
    ///
    /// `None` when the end would fall past the latest representable date.
    pub fn compute_end_date(start: DateTime<Utc>, weeks: u32) -> Option<DateTime<Utc>> {
        let length = Duration::try_days(7 * i64::from(weeks))?;
        start.checked_add_signed(length)
    }

    /// Look up a workout template by name (case-insensitive)
    pub fn workout(&self, name: &str) -> Option<&WorkoutTemplate> {
        self.workouts
            .iter()
            .find(|w| w.name.eq_ignore_ascii_case(name))
    }
}

/// English weekday name for a 1-based weekday number
pub fn weekday_name(day: u8) -> &'static str {
    match day {
        1 => "Monday",
        2 => "Tuesday",
        3 => "Wednesday",
        4 => "Thursday",
        5 => "Friday",
        6 => "Saturday",
        7 => "Sunday",
        _ => "Unassigned",
    }
}
