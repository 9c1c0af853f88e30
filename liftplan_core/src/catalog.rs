//! Default exercise catalog.
//!
//! Seeds a fresh library with common lifts so typical plans resolve to
//! non-custom entries. Ids are name-derived v5 UUIDs, stable across runs.

use crate::library::InMemoryLibrary;
use crate::{Equipment, Exercise, ExerciseCategory};
use once_cell::sync::Lazy;
use uuid::Uuid;

/// Cached default catalog - built once and reused across all operations
static DEFAULT_CATALOG: Lazy<InMemoryLibrary> = Lazy::new(build_default_catalog);

/// Get a reference to the cached default catalog
pub fn get_default_catalog() -> &'static InMemoryLibrary {
    &DEFAULT_CATALOG
}

/// Stable id for a built-in exercise
pub fn catalog_id(name: &str) -> Uuid {
    Uuid::new_v5(&Uuid::NAMESPACE_OID, name.to_lowercase().as_bytes())
}

/// Builds the default catalog of built-in exercises
pub fn build_default_catalog() -> InMemoryLibrary {
    use Equipment::*;
    use ExerciseCategory::*;

    let entries: &[(&str, ExerciseCategory, Equipment)] = &[
        // Chest
        ("Bench Press", Chest, Barbell),
        ("Incline Bench Press", Chest, Barbell),
        ("Dumbbell Bench Press", Chest, Dumbbell),
        ("Incline Dumbbell Press", Chest, Dumbbell),
        ("Cable Fly", Chest, Machine),
        ("Push-ups", Chest, Bodyweight),
        ("Dips", Chest, Bodyweight),
        // Back
        ("Deadlift", Back, Barbell),
        ("Barbell Row", Back, Barbell),
        ("Dumbbell Row", Back, Dumbbell),
        ("Pull-ups", Back, Bodyweight),
        ("Chin-ups", Back, Bodyweight),
        ("Lat Pulldown", Back, Machine),
        ("Seated Cable Row", Back, Machine),
        ("Face Pulls", Shoulders, Machine),
        // Legs
        ("Squats", Legs, Barbell),
        ("Front Squat", Legs, Barbell),
        ("Romanian Deadlift", Legs, Barbell),
        ("Leg Press", Legs, Machine),
        ("Walking Lunges", Legs, Dumbbell),
        ("Bulgarian Split Squat", Legs, Dumbbell),
        ("Leg Curl", Legs, Machine),
        ("Leg Extension", Legs, Machine),
        ("Calf Raises", Legs, Machine),
        ("Hip Thrust", Legs, Barbell),
        // Shoulders
        ("Overhead Press", Shoulders, Barbell),
        ("Dumbbell Shoulder Press", Shoulders, Dumbbell),
        ("Lateral Raises", Shoulders, Dumbbell),
        // Arms
        ("Barbell Curl", Arms, Barbell),
        ("Dumbbell Curl", Arms, Dumbbell),
        ("Hammer Curl", Arms, Dumbbell),
        ("Tricep Pushdown", Arms, Machine),
        ("Overhead Tricep Extension", Arms, Dumbbell),
        // Core
        ("Plank", Core, Bodyweight),
        ("Hanging Leg Raise", Core, Bodyweight),
        ("Cable Crunch", Core, Machine),
        // Full body
        ("Kettlebell Swing", FullBody, Dumbbell),
        ("Burpees", FullBody, Bodyweight),
    ];

    let exercises = entries
        .iter()
        .map(|(name, category, equipment)| Exercise {
            id: catalog_id(name),
            name: (*name).to_string(),
            category: *category,
            equipment: *equipment,
            is_custom: false,
        })
        .collect();

    InMemoryLibrary::new(exercises)
}
