//! Plan parser: text or structured input in, [`Cycle`] out.
//!
//! ## Text path
//!
//! 1. Split the plan by week headers; only week 1 builds templates
//! 2. Split week 1 by `DAY n - Name` headers
//! 3. Parse each exercise line, skipping (and reporting) the rest
//! 4. Resolve names against the library, scanning later weeks for
//!    overrides once per distinct exercise
//! 5. Assign a weekday, then keep the workout only if it has exercises and
//!    its (name, weekday) pair is new
//!
//! ## Structured path
//!
//! Same as steps 4 and 5 without grammars or override scanning, so both paths
//! yield the same Cycle shape.

use crate::clock::{Clock, IdGenerator, RandomIds, SystemClock};
use crate::config::ProgressionConfig;
use crate::exercise_line::{parse_exercise_line, ExerciseLine};
use crate::headers::is_workout_header;
use crate::library::ExerciseLibrary;
use crate::overrides::{extract_overrides, OverrideScan};
use crate::progression::infer_progression;
use crate::resolver::{resolve_exercise, Resolution};
use crate::schedule::assign_weekday;
use crate::sections::{split_weeks, split_workouts};
use crate::structured::StructuredPlan;
use crate::{
    Cycle, Error, Exercise, Result, WorkoutTemplate, WorkoutTemplateExercise, WorkoutType,
};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

/// What the parser skipped or created along the way
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ParseReport {
    /// Lines inside workout sections that matched no grammar rule
    pub skipped_lines: Vec<String>,
    /// Workout sections dropped for having no parsed exercises
    pub empty_sections: Vec<String>,
    /// Workouts dropped because their (name, weekday) was already taken
    pub duplicate_workouts: Vec<String>,
    /// Names of exercises newly added to the library
    pub created_exercises: Vec<String>,
}

/// A parsed cycle plus its report
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ParsedPlan {
    pub cycle: Cycle,
    pub report: ParseReport,
}

/// Turns plans into cycles
///
/// Time and identities come from the injected [`Clock`] and [`IdGenerator`].
pub struct PlanParser<C = SystemClock, G = RandomIds> {
    clock: C,
    ids: G,
    progression: ProgressionConfig,
}

impl PlanParser {
    /// Parser using the wall clock and random ids
    pub fn new() -> Self {
        Self::with_sources(SystemClock, RandomIds)
    }
}

impl Default for PlanParser {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock, G: IdGenerator> PlanParser<C, G> {
    pub fn with_sources(clock: C, ids: G) -> Self {
        Self {
            clock,
            ids,
            progression: ProgressionConfig::default(),
        }
    }

    pub fn with_progression(mut self, progression: ProgressionConfig) -> Self {
        self.progression = progression;
        self
    }

    /// Parse free-form plan text into a cycle
    pub fn parse_text<L>(&self, text: &str, cycle_number: i64, library: &mut L) -> Result<ParsedPlan>
    where
        L: ExerciseLibrary + ?Sized,
    {
        if text.trim().is_empty() {
            return Err(Error::InvalidInput("plan text is empty".into()));
        }
        let cycle_number = validate_cycle_number(cycle_number)?;

        let weeks = split_weeks(text);
        tracing::info!(
            "Parsing cycle {}: {} week header(s), {} week(s) total",
            cycle_number,
            weeks.headers.len(),
            weeks.total_weeks
        );

        let mut builder = CycleBuilder::new(self.ids.next_id());
        let mut scans: HashMap<String, OverrideScan> = HashMap::new();

        for section in split_workouts(weeks.week_one) {
            let mut exercises = Vec::new();

            for raw in section.body.lines() {
                let line = raw.trim();
                if line.is_empty() || is_workout_header(line) {
                    continue;
                }

                let Some(parsed) = parse_exercise_line(line) else {
                    tracing::debug!("Skipping unparsed line in '{}': {}", section.name, line);
                    builder.report.skipped_lines.push(line.to_string());
                    continue;
                };

                let exercise = builder.resolve(library, &self.ids, &parsed.name)?;
                let scan = scans
                    .entry(parsed.name.to_lowercase())
                    .or_insert_with(|| {
                        extract_overrides(text, &weeks.headers, weeks.total_weeks, &parsed)
                    })
                    .clone();

                let order_index = exercises.len() as u32;
                exercises.push(self.template_exercise(&exercise, &parsed, scan, order_index));
            }

            builder.push_workout(&section.name, exercises, &self.ids);
        }

        builder.finish(cycle_number, weeks.total_weeks, &self.clock)
    }

    /// Build a cycle from already-structured workouts
    pub fn parse_structured<L>(
        &self,
        plan: &StructuredPlan,
        cycle_number: i64,
        library: &mut L,
    ) -> Result<ParsedPlan>
    where
        L: ExerciseLibrary + ?Sized,
    {
        let cycle_number = validate_cycle_number(cycle_number)?;
        if plan.cycle_length == 0 {
            return Err(Error::InvalidInput("cycle length must be at least 1 week".into()));
        }
        if let Some(per_week) = plan.workouts_per_week {
            if per_week as usize != plan.workouts.len() {
                tracing::warn!(
                    "Plan declares {} workouts per week but lists {}",
                    per_week,
                    plan.workouts.len()
                );
            }
        }

        let mut builder = CycleBuilder::new(self.ids.next_id());

        for workout in &plan.workouts {
            let mut exercises = Vec::new();

            for item in &workout.exercises {
                if item.sets == 0 || item.name.trim().is_empty() {
                    tracing::debug!("Skipping unusable exercise in '{}': {:?}", workout.name, item);
                    builder
                        .report
                        .skipped_lines
                        .push(format!("{}: {} sets", item.name, item.sets));
                    continue;
                }

                let (reps_min, reps_max) = item.normalized_reps();
                let parsed = ExerciseLine {
                    name: item.name.trim().to_string(),
                    sets: item.sets,
                    reps_min,
                    reps_max,
                    weight: item.normalized_weight(),
                };
                let exercise = builder.resolve(library, &self.ids, &parsed.name)?;
                let order_index = exercises.len() as u32;
                exercises.push(self.template_exercise(
                    &exercise,
                    &parsed,
                    OverrideScan::default(),
                    order_index,
                ));
            }

            builder.push_workout(workout.name.trim(), exercises, &self.ids);
        }

        builder.finish(cycle_number, plan.cycle_length, &self.clock)
    }

    fn template_exercise(
        &self,
        exercise: &Exercise,
        parsed: &ExerciseLine,
        scan: OverrideScan,
        order_index: u32,
    ) -> WorkoutTemplateExercise {
        let (progression_type, progression_value) =
            infer_progression(&parsed.weight, scan.week_two_delta, &self.progression);

        WorkoutTemplateExercise {
            id: self.ids.next_id(),
            exercise_id: exercise.id,
            exercise_name: exercise.name.clone(),
            order_index,
            target_sets: parsed.sets,
            target_reps_min: parsed.reps_min.clone(),
            target_reps_max: parsed.reps_max.clone(),
            target_weight: parsed.weight.clone(),
            progression_type,
            progression_value,
            weekly_overrides: scan.overrides,
        }
    }
}

fn validate_cycle_number(cycle_number: i64) -> Result<u32> {
    u32::try_from(cycle_number)
        .ok()
        .filter(|n| *n >= 1)
        .ok_or_else(|| {
            Error::InvalidInput(format!(
                "cycle number must be a positive integer, got {}",
                cycle_number
            ))
        })
}

/// Accumulates templates for one cycle and suppresses duplicates
struct CycleBuilder {
    cycle_id: Uuid,
    workouts: Vec<WorkoutTemplate>,
    seen: HashSet<(String, Option<u8>)>,
    report: ParseReport,
}

impl CycleBuilder {
    fn new(cycle_id: Uuid) -> Self {
        Self {
            cycle_id,
            workouts: Vec::new(),
            seen: HashSet::new(),
            report: ParseReport::default(),
        }
    }

    fn resolve<L, G>(&mut self, library: &mut L, ids: &G, name: &str) -> Result<Exercise>
    where
        L: ExerciseLibrary + ?Sized,
        G: IdGenerator + ?Sized,
    {
        let resolution = resolve_exercise(library, ids, name)?;
        if let Resolution::Created(created) = &resolution {
            self.report.created_exercises.push(created.name.clone());
        }
        Ok(resolution.into_exercise())
    }

    fn push_workout<G>(&mut self, name: &str, exercises: Vec<WorkoutTemplateExercise>, ids: &G)
    where
        G: IdGenerator + ?Sized,
    {
        if exercises.is_empty() {
            tracing::warn!("Workout '{}' has no parsable exercises, dropping it", name);
            self.report.empty_sections.push(name.to_string());
            return;
        }

        let day_of_week = assign_weekday(name, &self.workouts);
        if !self.seen.insert((name.to_string(), day_of_week)) {
            tracing::warn!(
                "Workout '{}' on day {:?} already exists, keeping the first",
                name,
                day_of_week
            );
            self.report.duplicate_workouts.push(name.to_string());
            return;
        }

        self.workouts.push(WorkoutTemplate {
            id: ids.next_id(),
            cycle_id: self.cycle_id,
            name: name.to_string(),
            workout_type: WorkoutType::from_name(name),
            day_of_week,
            exercises,
        });
    }

    fn finish<C>(self, cycle_number: u32, weeks: u32, clock: &C) -> Result<ParsedPlan>
    where
        C: Clock + ?Sized,
    {
        if self.workouts.is_empty() {
            return Err(Error::NoWorkouts);
        }

        let length_in_weeks = weeks.max(1);
        let start_date = clock.now();
        let end_date = Cycle::compute_end_date(start_date, length_in_weeks).ok_or_else(|| {
            Error::InvalidInput(format!(
                "cycle length out of range: {} weeks",
                length_in_weeks
            ))
        })?;
        let cycle = Cycle {
            id: self.cycle_id,
            cycle_number,
            start_date,
            end_date,
            length_in_weeks,
            created_at: start_date,
            workouts: self.workouts,
        };

        tracing::info!(
            "Built cycle {} with {} workout(s) over {} week(s); {} line(s) skipped, {} new exercise(s)",
            cycle.cycle_number,
            cycle.workouts.len(),
            cycle.length_in_weeks,
            self.report.skipped_lines.len(),
            self.report.created_exercises.len()
        );

        Ok(ParsedPlan {
            cycle,
            report: self.report,
        })
    }
}
