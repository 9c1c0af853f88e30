use clap::{Parser, Subcommand};
use liftplan_core::exercise_line::render_reps;
use liftplan_core::*;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "liftplan")]
#[command(about = "Strength-training plan parser and progression engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Override exercise library file
    #[arg(long, global = true)]
    library: Option<PathBuf>,

    /// Load configuration from this file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log output (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a free-form text plan into a cycle
    Parse {
        /// Plan text file
        file: PathBuf,

        /// Cycle number (defaults to the configured default)
        #[arg(long, allow_negative_numbers = true)]
        cycle: Option<i64>,

        /// Print the parsed cycle as JSON
        #[arg(long)]
        json: bool,

        /// Also write the parsed cycle as JSON to this file
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Import a structured JSON plan into a cycle
    Import {
        /// Structured plan JSON file
        file: PathBuf,

        #[arg(long, allow_negative_numbers = true)]
        cycle: Option<i64>,

        #[arg(long)]
        json: bool,
    },

    /// Show effective targets for one week of a plan
    Week {
        /// Plan file (.json is read as a structured plan, anything else as text)
        file: PathBuf,

        /// Week number, starting at 1
        #[arg(long)]
        week: u32,

        #[arg(long, allow_negative_numbers = true)]
        cycle: Option<i64>,
    },

    /// Export the whole cycle schedule as CSV
    Export {
        /// Plan file (.json is read as a structured plan, anything else as text)
        file: PathBuf,

        /// Destination CSV file
        #[arg(long)]
        csv: PathBuf,

        #[arg(long, allow_negative_numbers = true)]
        cycle: Option<i64>,
    },

    /// List the exercise library
    Library {
        /// Only show exercises created from parsed plans
        #[arg(long)]
        custom: bool,
    },
}

/// How a plan file should be read
#[derive(Clone, Copy)]
enum PlanFormat {
    Text,
    Structured,
}

impl PlanFormat {
    fn detect(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => PlanFormat::Structured,
            _ => PlanFormat::Text,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    liftplan_core::logging::init_for_verbosity(cli.verbose);

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(dir) = cli.data_dir {
        config.data.data_dir = dir;
    }
    if let Some(path) = cli.library {
        config.data.library_path = Some(path);
    }

    match cli.command {
        Commands::Parse {
            file,
            cycle,
            json,
            output,
        } => cmd_parse(&config, &file, PlanFormat::Text, cycle, json, output),
        Commands::Import { file, cycle, json } => {
            cmd_parse(&config, &file, PlanFormat::Structured, cycle, json, None)
        }
        Commands::Week { file, week, cycle } => cmd_week(&config, &file, week, cycle),
        Commands::Export { file, csv, cycle } => cmd_export(&config, &file, &csv, cycle),
        Commands::Library { custom } => cmd_library(&config, custom),
    }
}

/// Parse a plan against the on-disk library, saving any new exercises
///
/// The library lock is held from load to save so concurrent invocations
/// cannot both create the same custom exercise.
fn parse_plan(
    config: &Config,
    file: &Path,
    format: PlanFormat,
    cycle: Option<i64>,
) -> Result<ParsedPlan> {
    let cycle_number = cycle.unwrap_or(i64::from(config.parsing.default_cycle_number));
    let library_path = config.data.library_path();

    let _lock = LibraryLock::acquire(&library_path)?;
    let mut library = InMemoryLibrary::load_or(&library_path, build_default_catalog())?;
    for problem in library.validate() {
        tracing::warn!("Library {:?}: {}", library_path, problem);
    }

    let parser = PlanParser::new().with_progression(config.progression.clone());
    let parsed = match format {
        PlanFormat::Text => {
            let text = std::fs::read_to_string(file)?;
            parser.parse_text(&text, cycle_number, &mut library)?
        }
        PlanFormat::Structured => {
            let plan = StructuredPlan::load(file)?;
            parser.parse_structured(&plan, cycle_number, &mut library)?
        }
    };

    library.save(&library_path)?;
    for name in &parsed.report.created_exercises {
        tracing::info!("Added custom exercise '{}' to {:?}", name, library_path);
    }

    Ok(parsed)
}

fn cmd_parse(
    config: &Config,
    file: &Path,
    format: PlanFormat,
    cycle: Option<i64>,
    json: bool,
    output: Option<PathBuf>,
) -> Result<()> {
    let parsed = parse_plan(config, file, format, cycle)?;

    if let Some(path) = output {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, serde_json::to_string_pretty(&parsed)?)?;
        tracing::info!("Wrote parsed cycle to {:?}", path);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&parsed)?);
    } else {
        display_cycle(&parsed);
    }

    Ok(())
}

fn cmd_week(config: &Config, file: &Path, week: u32, cycle: Option<i64>) -> Result<()> {
    if week == 0 {
        return Err(Error::InvalidInput("week numbers start at 1".into()));
    }

    let format = PlanFormat::detect(file);
    let parsed = parse_plan(config, file, format, cycle)?;
    let cycle = &parsed.cycle;

    if week > cycle.length_in_weeks {
        println!(
            "Note: week {} is past the end of this {}-week cycle",
            week, cycle.length_in_weeks
        );
    }

    println!("\nWeek {} of cycle {}", week, cycle.cycle_number);
    for workout in &cycle.workouts {
        println!();
        println!("  {} ({})", workout.name, day_label(workout.day_of_week));
        for exercise in &workout.exercises {
            let targets = effective_targets(exercise, week);
            let marker = match targets.source {
                TargetSource::Override => " *",
                TargetSource::Progression => "",
            };
            println!(
                "    {}: {} × {} @ {}{}",
                exercise.exercise_name,
                targets.sets,
                render_reps(&targets.reps_min, &targets.reps_max),
                targets.weight,
                marker
            );
        }
    }
    println!();
    println!("  * written out in the plan for this week");

    Ok(())
}

fn cmd_export(config: &Config, file: &Path, csv: &Path, cycle: Option<i64>) -> Result<()> {
    let format = PlanFormat::detect(file);
    let parsed = parse_plan(config, file, format, cycle)?;
    let rows = export_schedule_csv_to(&parsed.cycle, csv)?;

    println!("✓ Exported {} rows", rows);
    println!("  CSV: {}", csv.display());
    Ok(())
}

fn cmd_library(config: &Config, custom_only: bool) -> Result<()> {
    let library_path = config.data.library_path();
    let library = InMemoryLibrary::load_or(&library_path, build_default_catalog())?;

    let mut exercises: Vec<&Exercise> = library
        .exercises
        .iter()
        .filter(|e| !custom_only || e.is_custom)
        .collect();
    exercises.sort_by_key(|e| e.name.to_lowercase());

    if exercises.is_empty() {
        println!("No exercises found.");
        return Ok(());
    }

    for exercise in exercises {
        println!(
            "{:<32} {:<10} {:<10}{}",
            exercise.name,
            format!("{:?}", exercise.category),
            format!("{:?}", exercise.equipment),
            if exercise.is_custom { " (custom)" } else { "" }
        );
    }

    Ok(())
}

fn display_cycle(parsed: &ParsedPlan) {
    let cycle = &parsed.cycle;
    let report = &parsed.report;

    println!(
        "\n✓ Parsed cycle {}: {} workouts over {} weeks",
        cycle.cycle_number,
        cycle.workouts.len(),
        cycle.length_in_weeks
    );
    println!(
        "  {} → {}",
        cycle.start_date.format("%Y-%m-%d"),
        cycle.end_date.format("%Y-%m-%d")
    );

    for workout in &cycle.workouts {
        println!();
        println!(
            "  {:<10} {} [{}]",
            day_label(workout.day_of_week),
            workout.name,
            workout.workout_type
        );
        for exercise in &workout.exercises {
            println!(
                "    {}. {}: {} × {} @ {}{}",
                exercise.order_index + 1,
                exercise.exercise_name,
                exercise.target_sets,
                render_reps(&exercise.target_reps_min, &exercise.target_reps_max),
                exercise.target_weight,
                progression_label(exercise)
            );
        }
    }

    println!();
    if !report.created_exercises.is_empty() {
        println!("  New exercises: {}", report.created_exercises.join(", "));
    }
    if !report.skipped_lines.is_empty() {
        println!("  Skipped {} unparsed line(s)", report.skipped_lines.len());
    }
    if !report.empty_sections.is_empty() {
        println!("  Dropped empty: {}", report.empty_sections.join(", "));
    }
    if !report.duplicate_workouts.is_empty() {
        println!("  Dropped duplicates: {}", report.duplicate_workouts.join(", "));
    }
}

fn progression_label(exercise: &WorkoutTemplateExercise) -> String {
    let overrides = exercise
        .weekly_overrides
        .as_ref()
        .map(|o| o.len().saturating_sub(1))
        .unwrap_or(0);
    let rule = match exercise.progression_type {
        ProgressionType::Weight | ProgressionType::Double => {
            format!(" (+{}/week)", exercise.progression_value)
        }
        ProgressionType::Reps => format!(" (+{} reps/week)", exercise.progression_value),
        ProgressionType::None => String::new(),
    };
    if overrides > 0 {
        format!("{} [{} week override(s)]", rule, overrides)
    } else {
        rule
    }
}

fn day_label(day: Option<u8>) -> &'static str {
    day.map(weekday_name).unwrap_or("Unassigned")
}
