//! Exercise name resolution against the library.
//!
//! Known names resolve to the existing entry. Unknown names become custom
//! exercises whose category and equipment are guessed from keywords, and are
//! inserted right away so later lines in the same parse reuse them.

use crate::clock::IdGenerator;
use crate::library::ExerciseLibrary;
use crate::{Equipment, Exercise, ExerciseCategory, Result};

/// Outcome of resolving one name
#[derive(Clone, Debug, PartialEq)]
pub enum Resolution {
    Existing(Exercise),
    Created(Exercise),
}

impl Resolution {
    pub fn exercise(&self) -> &Exercise {
        match self {
            Resolution::Existing(e) | Resolution::Created(e) => e,
        }
    }

    pub fn into_exercise(self) -> Exercise {
        match self {
            Resolution::Existing(e) | Resolution::Created(e) => e,
        }
    }
}

/// Look up `name`, or synthesize and register a custom exercise
pub fn resolve_exercise<L, G>(library: &mut L, ids: &G, name: &str) -> Result<Resolution>
where
    L: ExerciseLibrary + ?Sized,
    G: IdGenerator + ?Sized,
{
    let name = name.trim();
    if let Some(existing) = library.find_by_name(name) {
        tracing::debug!("Resolved '{}' to library exercise {}", name, existing.id);
        return Ok(Resolution::Existing(existing));
    }

    let exercise = Exercise {
        id: ids.next_id(),
        name: name.to_string(),
        category: infer_category(name),
        equipment: infer_equipment(name),
        is_custom: true,
    };
    library.insert(exercise.clone())?;

    tracing::info!(
        "Created custom exercise '{}' ({:?}, {:?})",
        exercise.name,
        exercise.category,
        exercise.equipment
    );
    Ok(Resolution::Created(exercise))
}

/// Category from name keywords; the first matching rule wins
pub fn infer_category(name: &str) -> ExerciseCategory {
    let n = name.to_lowercase();
    let has = |words: &[&str]| words.iter().any(|w| n.contains(w));

    if has(&["bench", "chest", "fly"]) {
        ExerciseCategory::Chest
    } else if has(&["pull", "row", "lat"]) {
        ExerciseCategory::Back
    } else if has(&["squat", "leg", "lunge"]) {
        ExerciseCategory::Legs
    } else if n.contains("press") && has(&["overhead", "shoulder"]) {
        ExerciseCategory::Shoulders
    } else if has(&["curl", "tricep", "extension"]) {
        ExerciseCategory::Arms
    } else if has(&["dead", "rdl"]) {
        ExerciseCategory::Back
    } else if n.contains("calf") {
        ExerciseCategory::Legs
    } else if has(&["plank", "crunch", "sit-up", "situp", "ab wheel", "core"]) {
        ExerciseCategory::Core
    } else if has(&["clean", "snatch", "thruster", "burpee"]) {
        ExerciseCategory::FullBody
    } else {
        ExerciseCategory::Other
    }
}

/// Equipment from name keywords; the first matching rule wins, Dumbbell otherwise
pub fn infer_equipment(name: &str) -> Equipment {
    let n = name.to_lowercase();
    let has = |words: &[&str]| words.iter().any(|w| n.contains(w));
    let dumbbell_named = has(&["dumbbell", "db "]) || n.starts_with("db");

    if n.contains("barbell")
        || (!dumbbell_named
            && has(&[
                "bench press",
                "deadlift",
                "back squat",
                "front squat",
                "overhead press",
                "rdl",
                "hip thrust",
                "good morning",
            ]))
    {
        Equipment::Barbell
    } else if has(&[
        "pull-up", "pullup", "pull up", "chin-up", "chinup", "chin up", "push-up", "pushup",
        "push up", "dip", "plank", "bodyweight", "burpee", "sit-up", "situp", "crunch",
        "inverted row",
    ]) {
        Equipment::Bodyweight
    } else if dumbbell_named || has(&["curl", "lunge"]) {
        Equipment::Dumbbell
    } else if has(&["cable", "machine", "leg press", "pulldown", "smith"]) {
        Equipment::Machine
    } else {
        Equipment::default()
    }
}
