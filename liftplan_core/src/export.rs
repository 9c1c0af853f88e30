//! CSV export of a cycle's week-by-week schedule.
//!
//! One row per (week, workout, exercise), with the effective targets the
//! progression calculator produces and where they came from.

use crate::progression::{effective_targets, TargetSource};
use crate::{weekday_name, Cycle, Result};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// A row in the CSV output
#[derive(Debug, serde::Serialize)]
struct ScheduleRow<'a> {
    week: u32,
    workout: &'a str,
    day: &'static str,
    exercise: &'a str,
    sets: u32,
    reps_min: String,
    reps_max: String,
    weight: String,
    source: TargetSource,
}

/// Write the cycle's schedule to `writer`, returning the number of rows
pub fn export_schedule_csv<W: Write>(cycle: &Cycle, writer: W) -> Result<usize> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    let mut rows = 0;

    for week in 1..=cycle.length_in_weeks.max(1) {
        for workout in &cycle.workouts {
            let day = workout.day_of_week.map(weekday_name).unwrap_or("");
            for exercise in &workout.exercises {
                let targets = effective_targets(exercise, week);
                csv_writer.serialize(ScheduleRow {
                    week,
                    workout: &workout.name,
                    day,
                    exercise: &exercise.exercise_name,
                    sets: targets.sets,
                    reps_min: targets.reps_min.to_string(),
                    reps_max: targets.reps_max.to_string(),
                    weight: targets.weight.to_string(),
                    source: targets.source,
                })?;
                rows += 1;
            }
        }
    }

    csv_writer.flush()?;
    Ok(rows)
}

/// Export to a file, creating parent directories and syncing before returning
pub fn export_schedule_csv_to(cycle: &Cycle, path: &Path) -> Result<usize> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let file = File::create(path)?;
    let rows = export_schedule_csv(cycle, &file)?;
    file.sync_all()?;

    tracing::info!("Wrote {} schedule rows to {:?}", rows, path);
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::build_default_catalog;
    use crate::clock::{FixedClock, SequentialIds};
    use crate::parser::PlanParser;
    use chrono::{TimeZone, Utc};

    const PLAN: &str = "\
Week 1
DAY 1 - Push
- Bench Press: 3 × 5 @ 60kg
- Dips: 3 × 8-12 @ BW
Week 2
DAY 1 - Push
- Bench Press: 3 × 5 @ 62.5kg
Week 3
";

    fn cycle() -> Cycle {
        let now = Utc.with_ymd_and_hms(2024, 3, 4, 6, 0, 0).unwrap();
        PlanParser::with_sources(FixedClock(now), SequentialIds::new())
            .parse_text(PLAN, 1, &mut build_default_catalog())
            .unwrap()
            .cycle
    }

    #[test]
    fn test_one_row_per_week_and_exercise() {
        let mut buffer = Vec::new();
        let rows = export_schedule_csv(&cycle(), &mut buffer).unwrap();
        assert_eq!(rows, 6);

        let mut reader = csv::Reader::from_reader(buffer.as_slice());
        let headers = reader.headers().unwrap().clone();
        assert_eq!(
            headers.iter().collect::<Vec<_>>(),
            vec!["week", "workout", "day", "exercise", "sets", "reps_min", "reps_max", "weight", "source"]
        );

        let records: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(records.len(), 6);
        assert_eq!(&records[0][2], "Monday");
        assert_eq!(&records[0][3], "Bench Press");
        assert_eq!(&records[0][7], "60");
        assert_eq!(&records[0][8], "override");
        assert_eq!(&records[1][3], "Dips");
        assert_eq!(&records[1][6], "12");
        assert_eq!(&records[1][7], "BW");
        assert_eq!(&records[1][8], "progression");
    }

    #[test]
    fn test_override_then_progression() {
        let mut buffer = Vec::new();
        export_schedule_csv(&cycle(), &mut buffer).unwrap();
        let mut reader = csv::Reader::from_reader(buffer.as_slice());
        let bench: Vec<(String, String)> = reader
            .records()
            .map(|r| r.unwrap())
            .filter(|r| &r[3] == "Bench Press")
            .map(|r| (r[7].to_string(), r[8].to_string()))
            .collect();

        assert_eq!(
            bench,
            vec![
                ("60".to_string(), "override".to_string()),
                ("62.5".to_string(), "override".to_string()),
                ("65".to_string(), "progression".to_string()),
            ]
        );
    }

    #[test]
    fn test_export_to_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("out").join("schedule.csv");

        let rows = export_schedule_csv_to(&cycle(), &path).unwrap();
        assert_eq!(rows, 6);

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("week,workout,day,exercise"));
        assert_eq!(contents.lines().count(), 7);
    }
}
