//! Week-specific values the author wrote out explicitly.
//!
//! For an exercise first seen in week 1, each later week's section is searched
//! for a line naming the same exercise. A hit becomes `weekly_overrides[w]`;
//! a miss leaves that week to the progression calculator.

use crate::exercise_line::{named_line_pattern, parse_prescription, ExerciseLine};
use crate::headers::WeekHeader;
use crate::sections::week_text;
use crate::{WeeklyOverride, WeightTarget};
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};

/// Overrides found for one exercise
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OverrideScan {
    /// Week → exact values; includes week 1 whenever any later week matched
    pub overrides: Option<BTreeMap<u32, WeeklyOverride>>,
    /// |week 2 load − week 1 load| when both are numeric
    pub week_two_delta: Option<f64>,
}

impl From<&ExerciseLine> for WeeklyOverride {
    fn from(line: &ExerciseLine) -> Self {
        WeeklyOverride {
            weight: Some(line.weight.clone()),
            sets: Some(line.sets),
            reps_min: Some(line.reps_min.clone()),
            reps_max: Some(line.reps_max.clone()),
        }
    }
}

/// Scan weeks 2..=`total_weeks` of `text` for `base.name`
pub fn extract_overrides(
    text: &str,
    headers: &[WeekHeader<'_>],
    total_weeks: u32,
    base: &ExerciseLine,
) -> OverrideScan {
    if total_weeks < 2 {
        return OverrideScan::default();
    }

    let pattern = match Regex::new(&named_line_pattern(&base.name)) {
        Ok(re) => re,
        Err(e) => {
            tracing::warn!("Cannot build override pattern for '{}': {}", base.name, e);
            return OverrideScan::default();
        }
    };

    // Only weeks with a header can hold an override
    let weeks: BTreeSet<u32> = headers
        .iter()
        .map(|h| h.week)
        .filter(|w| (2..=total_weeks).contains(w))
        .collect();

    let mut overrides = BTreeMap::new();
    for week in weeks {
        let Some(section) = week_text(text, headers, week) else {
            tracing::debug!("No text for week {}, progression will fill it", week);
            continue;
        };

        let found = pattern.captures(section).and_then(|caps| {
            parse_prescription(
                caps.name("sets")?.as_str(),
                caps.name("reps")?.as_str(),
                caps.name("weight").map(|m| m.as_str()),
            )
        });

        if let Some((sets, reps_min, reps_max, weight)) = found {
            tracing::debug!("Week {} override for '{}'", week, base.name);
            overrides.insert(
                week,
                WeeklyOverride {
                    weight: Some(weight),
                    sets: Some(sets),
                    reps_min: Some(reps_min),
                    reps_max: Some(reps_max),
                },
            );
        }
    }

    if overrides.is_empty() {
        return OverrideScan::default();
    }

    let week_two_delta = match (
        &base.weight,
        overrides.get(&2).and_then(|o| o.weight.as_ref()),
    ) {
        (WeightTarget::Load(w1), Some(WeightTarget::Load(w2))) => Some((w2 - w1).abs()),
        _ => None,
    };

    overrides.insert(1, WeeklyOverride::from(base));

    OverrideScan {
        overrides: Some(overrides),
        week_two_delta,
    }
}
