//! Pre-structured plan input.
//!
//! Some callers already hold a plan as data (for example the JSON an
//! external generator returns). It skips the text grammars and goes straight
//! to exercise resolution, weekday assignment and duplicate suppression.
//!
//! ```json
//! {
//!   "cycleLength": 4,
//!   "workoutsPerWeek": 3,
//!   "workouts": [
//!     { "name": "Push A",
//!       "exercises": [
//!         { "name": "Bench Press", "sets": 4, "repsMin": 6, "repsMax": 8, "weight": 60 }
//!       ] }
//!   ]
//! }
//! ```

use crate::exercise_line::{parse_reps, parse_weight};
use crate::{RepTarget, Result, WeightTarget};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StructuredPlan {
    pub cycle_length: u32,
    #[serde(default)]
    pub workouts_per_week: Option<u32>,
    #[serde(default)]
    pub workouts: Vec<StructuredWorkout>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StructuredWorkout {
    pub name: String,
    #[serde(default)]
    pub exercises: Vec<StructuredExercise>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StructuredExercise {
    pub name: String,
    pub sets: u32,
    pub reps_min: RepTarget,
    #[serde(default)]
    pub reps_max: Option<RepTarget>,
    #[serde(default)]
    pub weight: Option<WeightTarget>,
}

impl StructuredPlan {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }
}

impl StructuredExercise {
    /// Reps normalized the same way the line grammar would read them
    /// (`"8-10"` → 8/10); a missing max falls back to the min
    pub fn normalized_reps(&self) -> (RepTarget, RepTarget) {
        let (min, parsed_max) = match &self.reps_min {
            RepTarget::Text(text) => parse_reps(text),
            count => (count.clone(), count.clone()),
        };
        let max = match &self.reps_max {
            Some(RepTarget::Text(text)) => parse_reps(text).1,
            Some(count) => count.clone(),
            None => parsed_max,
        };
        (min, max)
    }

    /// Load normalized the same way the line grammar would read it
    /// (`"BW"` → 0, `"60kg"` → 60, `"light"` stays qualitative)
    pub fn normalized_weight(&self) -> WeightTarget {
        match &self.weight {
            None => WeightTarget::BODYWEIGHT,
            Some(WeightTarget::Qualitative(text)) => parse_weight(Some(text)),
            Some(load) => load.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const JSON: &str = r#"{
        "cycleLength": 4,
        "workoutsPerWeek": 2,
        "workouts": [
            { "name": "Push A", "exercises": [
                { "name": "Bench Press", "sets": 4, "repsMin": 6, "repsMax": 8, "weight": 60 },
                { "name": "Dips", "sets": 3, "repsMin": "8-12", "weight": "BW" }
            ] },
            { "name": "Legs", "exercises": [
                { "name": "Plank", "sets": 3, "repsMin": "45 sec" },
                { "name": "Goblet Squat", "sets": 3, "repsMin": 10, "weight": "light" }
            ] }
        ]
    }"#;

    #[test]
    fn test_deserialize_camel_case() {
        let plan = StructuredPlan::from_json(JSON).unwrap();
        assert_eq!(plan.cycle_length, 4);
        assert_eq!(plan.workouts_per_week, Some(2));
        assert_eq!(plan.workouts.len(), 2);
        assert_eq!(plan.workouts[0].exercises[0].reps_max, Some(RepTarget::Count(8)));
    }

    #[test]
    fn test_normalization() {
        let plan = StructuredPlan::from_json(JSON).unwrap();
        let dips = &plan.workouts[0].exercises[1];
        assert_eq!(
            dips.normalized_reps(),
            (RepTarget::Count(8), RepTarget::Count(12))
        );
        assert_eq!(dips.normalized_weight(), WeightTarget::BODYWEIGHT);

        let plank = &plan.workouts[1].exercises[0];
        assert_eq!(
            plank.normalized_reps(),
            (RepTarget::Text("45 sec".into()), RepTarget::Text("45 sec".into()))
        );
        assert_eq!(plank.normalized_weight(), WeightTarget::BODYWEIGHT);

        let goblet = &plan.workouts[1].exercises[1];
        assert_eq!(
            goblet.normalized_reps(),
            (RepTarget::Count(10), RepTarget::Count(10))
        );
        assert_eq!(
            goblet.normalized_weight(),
            WeightTarget::Qualitative("light".into())
        );
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(StructuredPlan::from_json("{ \"workouts\": [] }").is_err());
    }
}
