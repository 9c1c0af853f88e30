//! Weekday assignment for workout templates.
//!
//! Keyword rules, checked in order:
//!
//! 1. "push"               → Monday
//! 2. "full" and "a"       → Tuesday
//! 3. "pull"               → Friday
//! 4. "full" and "b"       → Saturday
//! 5. "leg"/"legs"         → Wednesday, or Sunday if an earlier workout
//!                           already claimed the leg slot
//! 6. anything else        → unassigned
//!
//! The order matters: "pull" is checked after the "full"+"a" rule and before
//! the leg rule so overlapping substrings land where authors expect.

use crate::WorkoutTemplate;

pub const MONDAY: u8 = 1;
pub const TUESDAY: u8 = 2;
pub const WEDNESDAY: u8 = 3;
pub const FRIDAY: u8 = 5;
pub const SATURDAY: u8 = 6;
pub const SUNDAY: u8 = 7;

/// Weekday (1 = Monday .. 7 = Sunday) for a workout name, given the
/// templates already assigned in this cycle
pub fn assign_weekday(name: &str, assigned: &[WorkoutTemplate]) -> Option<u8> {
    let name = name.to_lowercase();

    if name.contains("push") {
        Some(MONDAY)
    } else if name.contains("full") && name.contains('a') {
        Some(TUESDAY)
    } else if name.contains("pull") {
        Some(FRIDAY)
    } else if name.contains("full") && name.contains('b') {
        Some(SATURDAY)
    } else if name.contains("leg") {
        let leg_slot_taken = assigned
            .iter()
            .any(|w| w.name.to_lowercase().contains("leg"));
        Some(if leg_slot_taken { SUNDAY } else { WEDNESDAY })
    } else {
        None
    }
}
