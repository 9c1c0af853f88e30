//! Week-by-week target calculation.
//!
//! An exercise's effective targets for a week come from its explicit
//! override for that week when the author wrote one, otherwise from the base
//! values and the progression rule:
//! - Weight: load grows by `progression_value` per elapsed week
//! - Reps: rep targets move by `progression_value` per elapsed week
//! - Double: currently identical to Weight (reps-then-weight escalation is
//!   not implemented)
//! - None: base values every week
//!
//! Computed targets are clamped (load ≥ 0, reps min ≥ 1, reps max ≥ reps
//! min) and computed loads are rounded to hundredths so repeated fractional
//! increments read as `62.5`, not `62.50000000000001`. Override weeks are
//! returned exactly as written.

use crate::config::ProgressionConfig;
use crate::{ProgressionType, RepTarget, WeightTarget, WorkoutTemplateExercise};
use serde::Serialize;

/// Where a week's targets came from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetSource {
    Override,
    Progression,
}

/// Effective targets for one exercise in one week
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct WeekTargets {
    pub week: u32,
    pub weight: WeightTarget,
    pub sets: u32,
    pub reps_min: RepTarget,
    pub reps_max: RepTarget,
    pub source: TargetSource,
}

/// Targets for `exercise` in `week` (1-based; 0 is treated as week 1)
pub fn effective_targets(exercise: &WorkoutTemplateExercise, week: u32) -> WeekTargets {
    let week = week.max(1);

    if let Some(ov) = exercise
        .weekly_overrides
        .as_ref()
        .and_then(|map| map.get(&week))
    {
        let reps_min = ov
            .reps_min
            .clone()
            .unwrap_or_else(|| exercise.target_reps_min.clone());
        let reps_max = ov
            .reps_max
            .clone()
            .or_else(|| ov.reps_min.clone())
            .unwrap_or_else(|| exercise.target_reps_max.clone());
        return WeekTargets {
            week,
            weight: ov
                .weight
                .clone()
                .unwrap_or_else(|| exercise.target_weight.clone()),
            sets: ov.sets.unwrap_or(exercise.target_sets),
            reps_min,
            reps_max,
            source: TargetSource::Override,
        };
    }

    let weeks_of_progression = f64::from(week - 1);
    let step = exercise.progression_value * weeks_of_progression;

    let mut weight = exercise.target_weight.clone();
    let mut reps_min = exercise.target_reps_min.clone();
    let mut reps_max = exercise.target_reps_max.clone();

    match exercise.progression_type {
        ProgressionType::Weight | ProgressionType::Double => {
            weight = add_load(&weight, step);
        }
        ProgressionType::Reps => {
            reps_min = shift_reps(&reps_min, step);
            reps_max = shift_reps(&reps_max, step);
        }
        ProgressionType::None => {}
    }

    let (weight, reps_min, reps_max) = clamp(weight, reps_min, reps_max);

    WeekTargets {
        week,
        weight,
        sets: exercise.target_sets,
        reps_min,
        reps_max,
        source: TargetSource::Progression,
    }
}

/// Targets for every week of a cycle, week 1 first
pub fn targets_for_weeks(exercise: &WorkoutTemplateExercise, weeks: u32) -> Vec<WeekTargets> {
    (1..=weeks.max(1))
        .map(|week| effective_targets(exercise, week))
        .collect()
}

/// Per-week load increment used when the plan does not spell one out:
/// heavier lifts move in bigger jumps
pub fn default_progression_increment(weight: f64, config: &ProgressionConfig) -> f64 {
    if weight >= config.heavy_weight_threshold {
        config.heavy_increment
    } else {
        config.light_increment
    }
}

/// Progression rule for a freshly parsed exercise
///
/// A numeric load progresses by weight, using the author's week 2 jump when
/// there is one and the default increment otherwise. Bodyweight and
/// qualitative loads do not progress.
pub fn infer_progression(
    weight: &WeightTarget,
    week_two_delta: Option<f64>,
    config: &ProgressionConfig,
) -> (ProgressionType, f64) {
    match weight.as_load() {
        Some(load) if load > 0.0 => {
            let value = week_two_delta
                .filter(|delta| *delta > 0.0)
                .unwrap_or_else(|| default_progression_increment(load, config));
            (ProgressionType::Weight, value)
        }
        _ => (ProgressionType::None, 0.0),
    }
}

fn add_load(weight: &WeightTarget, step: f64) -> WeightTarget {
    match weight {
        WeightTarget::Load(w) => WeightTarget::Load(round_to_hundredth(w + step)),
        qualitative => qualitative.clone(),
    }
}

fn shift_reps(reps: &RepTarget, step: f64) -> RepTarget {
    match reps {
        RepTarget::Count(n) => {
            let shifted = (f64::from(*n) + step).round().max(0.0);
            RepTarget::Count(shifted.min(f64::from(u32::MAX)) as u32)
        }
        text => text.clone(),
    }
}

fn clamp(
    weight: WeightTarget,
    reps_min: RepTarget,
    reps_max: RepTarget,
) -> (WeightTarget, RepTarget, RepTarget) {
    let weight = match weight {
        WeightTarget::Load(w) if w < 0.0 => WeightTarget::Load(0.0),
        other => other,
    };
    let reps_min = match reps_min {
        RepTarget::Count(n) => RepTarget::Count(n.max(1)),
        other => other,
    };
    let reps_max = match (&reps_min, reps_max) {
        (RepTarget::Count(min), RepTarget::Count(max)) => RepTarget::Count(max.max(*min)),
        (_, other) => other,
    };
    (weight, reps_min, reps_max)
}

fn round_to_hundredth(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::WeeklyOverride;
    use proptest::prelude::*;
    use std::collections::BTreeMap;
    use uuid::Uuid;

    fn exercise(
        weight: WeightTarget,
        reps: (u32, u32),
        progression_type: ProgressionType,
        progression_value: f64,
    ) -> WorkoutTemplateExercise {
        WorkoutTemplateExercise {
            id: Uuid::nil(),
            exercise_id: Uuid::nil(),
            exercise_name: "Squats".into(),
            order_index: 0,
            target_sets: 4,
            target_reps_min: RepTarget::Count(reps.0),
            target_reps_max: RepTarget::Count(reps.1),
            target_weight: weight,
            progression_type,
            progression_value,
            weekly_overrides: None,
        }
    }

    #[test]
    fn test_weight_progression_week_three() {
        let ex = exercise(WeightTarget::Load(100.0), (6, 8), ProgressionType::Weight, 5.0);
        let targets = effective_targets(&ex, 3);
        assert_eq!(targets.weight, WeightTarget::Load(110.0));
        assert_eq!(targets.sets, 4);
        assert_eq!(targets.reps_min, RepTarget::Count(6));
        assert_eq!(targets.reps_max, RepTarget::Count(8));
        assert_eq!(targets.source, TargetSource::Progression);
    }

    #[test]
    fn test_computed_load_is_rounded_to_hundredths() {
        let ex = exercise(WeightTarget::Load(13.8), (10, 12), ProgressionType::Weight, 0.1);
        assert_eq!(effective_targets(&ex, 4).weight, WeightTarget::Load(14.1));

        let ex = exercise(WeightTarget::Load(20.0), (5, 5), ProgressionType::Weight, 1.125);
        assert_eq!(effective_targets(&ex, 2).weight, WeightTarget::Load(21.13));
    }

    #[test]
    fn test_week_one_is_base() {
        let ex = exercise(WeightTarget::Load(100.0), (6, 8), ProgressionType::Weight, 5.0);
        assert_eq!(effective_targets(&ex, 1).weight, WeightTarget::Load(100.0));
        assert_eq!(effective_targets(&ex, 0).weight, WeightTarget::Load(100.0));
    }

    #[test]
    fn test_double_matches_weight() {
        let weight = exercise(WeightTarget::Load(60.0), (8, 12), ProgressionType::Weight, 2.5);
        let double = exercise(WeightTarget::Load(60.0), (8, 12), ProgressionType::Double, 2.5);
        for week in 1..=6 {
            let a = effective_targets(&weight, week);
            let b = effective_targets(&double, week);
            assert_eq!(a.weight, b.weight);
            assert_eq!(a.reps_min, b.reps_min);
        }
    }

    #[test]
    fn test_reps_progression() {
        let ex = exercise(WeightTarget::BODYWEIGHT, (8, 10), ProgressionType::Reps, 1.0);
        let targets = effective_targets(&ex, 4);
        assert_eq!(targets.reps_min, RepTarget::Count(11));
        assert_eq!(targets.reps_max, RepTarget::Count(13));
        assert_eq!(targets.weight, WeightTarget::BODYWEIGHT);
    }

    #[test]
    fn test_negative_reps_progression_is_clamped() {
        let ex = exercise(WeightTarget::Load(80.0), (3, 5), ProgressionType::Reps, -2.0);
        let targets = effective_targets(&ex, 4);
        assert_eq!(targets.reps_min, RepTarget::Count(1));
        assert_eq!(targets.reps_max, RepTarget::Count(1));
    }

    #[test]
    fn test_negative_weight_is_clamped() {
        let ex = exercise(WeightTarget::Load(10.0), (5, 5), ProgressionType::Weight, -5.0);
        assert_eq!(effective_targets(&ex, 5).weight, WeightTarget::Load(0.0));
    }

    #[test]
    fn test_none_keeps_base() {
        let ex = exercise(WeightTarget::Load(40.0), (10, 12), ProgressionType::None, 5.0);
        let targets = effective_targets(&ex, 8);
        assert_eq!(targets.weight, WeightTarget::Load(40.0));
        assert_eq!(targets.reps_max, RepTarget::Count(12));
    }

    #[test]
    fn test_qualitative_load_does_not_progress() {
        let ex = exercise(
            WeightTarget::Qualitative("light".into()),
            (12, 15),
            ProgressionType::Weight,
            2.5,
        );
        assert_eq!(
            effective_targets(&ex, 3).weight,
            WeightTarget::Qualitative("light".into())
        );
    }

    #[test]
    fn test_override_takes_precedence() {
        let mut ex = exercise(WeightTarget::Load(100.0), (6, 8), ProgressionType::Weight, 5.0);
        let mut overrides = BTreeMap::new();
        overrides.insert(
            3,
            WeeklyOverride {
                weight: Some(WeightTarget::Load(107.5)),
                sets: None,
                reps_min: Some(RepTarget::Count(5)),
                reps_max: None,
            },
        );
        ex.weekly_overrides = Some(overrides);

        let targets = effective_targets(&ex, 3);
        assert_eq!(targets.source, TargetSource::Override);
        assert_eq!(targets.weight, WeightTarget::Load(107.5));
        assert_eq!(targets.sets, 4);
        assert_eq!(targets.reps_min, RepTarget::Count(5));
        // reps max falls back to the override's reps min
        assert_eq!(targets.reps_max, RepTarget::Count(5));

        // week 2 has no override and uses the formula
        let week_two = effective_targets(&ex, 2);
        assert_eq!(week_two.source, TargetSource::Progression);
        assert_eq!(week_two.weight, WeightTarget::Load(105.0));
    }

    #[test]
    fn test_override_without_reps_uses_base() {
        let mut ex = exercise(WeightTarget::Load(100.0), (6, 8), ProgressionType::Weight, 5.0);
        let mut overrides = BTreeMap::new();
        overrides.insert(2, WeeklyOverride {
            weight: Some(WeightTarget::Load(102.5)),
            ..Default::default()
        });
        ex.weekly_overrides = Some(overrides);

        let targets = effective_targets(&ex, 2);
        assert_eq!(targets.reps_min, RepTarget::Count(6));
        assert_eq!(targets.reps_max, RepTarget::Count(8));
    }

    #[test]
    fn test_default_increment() {
        let config = ProgressionConfig::default();
        assert_eq!(default_progression_increment(50.0, &config), 5.0);
        assert_eq!(default_progression_increment(120.0, &config), 5.0);
        assert_eq!(default_progression_increment(49.9, &config), 2.5);
    }

    #[test]
    fn test_infer_progression() {
        let config = ProgressionConfig::default();
        assert_eq!(
            infer_progression(&WeightTarget::Load(100.0), Some(7.5), &config),
            (ProgressionType::Weight, 7.5)
        );
        assert_eq!(
            infer_progression(&WeightTarget::Load(100.0), None, &config),
            (ProgressionType::Weight, 5.0)
        );
        assert_eq!(
            infer_progression(&WeightTarget::Load(20.0), Some(0.0), &config),
            (ProgressionType::Weight, 2.5)
        );
        assert_eq!(
            infer_progression(&WeightTarget::BODYWEIGHT, Some(5.0), &config),
            (ProgressionType::None, 0.0)
        );
        assert_eq!(
            infer_progression(&WeightTarget::Qualitative("light".into()), None, &config),
            (ProgressionType::None, 0.0)
        );
    }

    proptest! {
        #[test]
        fn test_week_one_override_always_wins(
            base in 0u32..400,
            value in 0u32..20,
            ov_weight in 0u32..400,
            sets in 1u32..10,
            reps in 1u32..20,
        ) {
            let mut ex = exercise(
                WeightTarget::Load(f64::from(base)),
                (reps, reps + 2),
                ProgressionType::Weight,
                f64::from(value),
            );
            let week_one = WeeklyOverride {
                weight: Some(WeightTarget::Load(f64::from(ov_weight))),
                sets: Some(sets),
                reps_min: Some(RepTarget::Count(reps)),
                reps_max: Some(RepTarget::Count(reps + 1)),
            };
            ex.weekly_overrides = Some(BTreeMap::from([(1, week_one.clone())]));

            let targets = effective_targets(&ex, 1);
            prop_assert_eq!(targets.source, TargetSource::Override);
            prop_assert_eq!(Some(targets.weight), week_one.weight);
            prop_assert_eq!(Some(targets.sets), week_one.sets);
            prop_assert_eq!(Some(targets.reps_min), week_one.reps_min);
            prop_assert_eq!(Some(targets.reps_max), week_one.reps_max);
        }

        #[test]
        fn test_computed_targets_respect_bounds(
            base in 0u32..300,
            value in -20i32..20,
            reps_min in 1u32..15,
            week in 1u32..12,
            by_reps in any::<bool>(),
        ) {
            let kind = if by_reps { ProgressionType::Reps } else { ProgressionType::Weight };
            let ex = exercise(
                WeightTarget::Load(f64::from(base)),
                (reps_min, reps_min + 2),
                kind,
                f64::from(value),
            );
            let targets = effective_targets(&ex, week);
            let weight = targets.weight.as_load().unwrap();
            let min = targets.reps_min.as_count().unwrap();
            let max = targets.reps_max.as_count().unwrap();
            prop_assert!(weight >= 0.0);
            prop_assert!(min >= 1);
            prop_assert!(max >= min);
        }
    }
}
