//! Exercise line grammar.
//!
//! A line such as `- Bench Press: 4 × 6-8 @ 50kg` decomposes into a name,
//! a set count, a rep spec and an optional load spec. Anything that does not
//! fit is reported as unmatched and the caller skips it.

use crate::{RepTarget, WeightTarget};
use once_cell::sync::Lazy;
use regex::Regex;

/// Bullet or hyphen marker that opens an exercise line
const BULLET: &str = r"[-*+•·▪▫◦‣⁃–—]";
/// Name/prescription separator: colon, hyphen, en dash, em dash
const SEPARATOR: &str = r"[:\-–—]";
/// Sets × reps joiner
const TIMES: &str = r"[×xX]";
/// Rep spec runs until the load marker or end of line
const REPS: &str = r"(?P<reps>[^@\r\n]+?)";
const WEIGHT: &str = r"(?:@[ \t]*(?P<weight>[^\r\n]*?))?";
const UNIT: &str = r"(?:kgs?|lbs?|pounds?|kilos?)";

static EXERCISE_LINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"^\s*{BULLET}[ \t]*(?P<name>[^\r\n]+?)[ \t]*{SEPARATOR}[ \t]*(?P<sets>\d+)[ \t]*{TIMES}[ \t]*{REPS}[ \t]*{WEIGHT}\s*$"
    ))
    .expect("valid exercise line regex")
});

static SINGLE_REPS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)$").expect("valid single reps regex"));

static RANGE_REPS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)\s*[-–—]\s*(\d+)$").expect("valid rep range regex"));

static SINGLE_WEIGHT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"(?i)^\+?\s*(\d+(?:\.\d+)?)\s*{UNIT}?$"))
        .expect("valid single weight regex")
});

static RANGE_WEIGHT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i)^\+?\s*(\d+(?:\.\d+)?)\s*{UNIT}?\s*[-–—]\s*\+?\s*(\d+(?:\.\d+)?)\s*{UNIT}?$"
    ))
    .expect("valid weight range regex")
});

/// A successfully decomposed exercise line
#[derive(Clone, Debug, PartialEq)]
pub struct ExerciseLine {
    pub name: String,
    pub sets: u32,
    pub reps_min: RepTarget,
    pub reps_max: RepTarget,
    pub weight: WeightTarget,
}

impl ExerciseLine {
    /// Render back to `- <name>: <sets> × <reps> @ <weight>`
    pub fn canonical(&self) -> String {
        format!(
            "- {}: {} × {} @ {}",
            self.name,
            self.sets,
            render_reps(&self.reps_min, &self.reps_max),
            self.weight
        )
    }
}

/// Render a rep pair as `8`, `6-8` or its textual token
pub fn render_reps(min: &RepTarget, max: &RepTarget) -> String {
    match (min, max) {
        (RepTarget::Count(a), RepTarget::Count(b)) if a != b => format!("{}-{}", a, b),
        _ => min.to_string(),
    }
}

/// Parse one line; `None` means the line is not an exercise line
pub fn parse_exercise_line(line: &str) -> Option<ExerciseLine> {
    let caps = EXERCISE_LINE_RE.captures(line)?;
    let name = clean_exercise_name(caps.name("name")?.as_str());
    if name.is_empty() {
        return None;
    }
    let (sets, reps_min, reps_max, weight) = parse_prescription(
        caps.name("sets")?.as_str(),
        caps.name("reps")?.as_str(),
        caps.name("weight").map(|m| m.as_str()),
    )?;
    Some(ExerciseLine {
        name,
        sets,
        reps_min,
        reps_max,
        weight,
    })
}

/// Parse the captured set/rep/weight texts shared by the line grammar and
/// the per-exercise override patterns. Zero sets is rejected.
pub(crate) fn parse_prescription(
    sets: &str,
    reps: &str,
    weight: Option<&str>,
) -> Option<(u32, RepTarget, RepTarget, WeightTarget)> {
    let sets: u32 = sets.parse().ok().filter(|s| *s >= 1)?;
    let (reps_min, reps_max) = parse_reps(reps);
    Some((sets, reps_min, reps_max, parse_weight(weight)))
}

/// Regex fragments for building a pattern that only matches lines naming
/// `name` (case-insensitive, multi-line). Captures `sets`, `reps`, `weight`.
pub(crate) fn named_line_pattern(name: &str) -> String {
    format!(
        r"(?im)^[ \t]*{BULLET}[ \t]*[*_]*{}[*_]*[ \t]*{SEPARATOR}[ \t]*(?P<sets>\d+)[ \t]*{TIMES}[ \t]*{REPS}[ \t]*{WEIGHT}[ \t]*\r?$",
        regex::escape(name)
    )
}

/// Rep spec: `8` → 8/8, `6-8` → 6/8, anything else kept verbatim
pub fn parse_reps(spec: &str) -> (RepTarget, RepTarget) {
    let spec = spec.trim();

    if let Some(caps) = SINGLE_REPS_RE.captures(spec) {
        if let Ok(n) = caps[1].parse::<u32>() {
            return (RepTarget::Count(n), RepTarget::Count(n));
        }
    }

    if let Some(caps) = RANGE_REPS_RE.captures(spec) {
        if let (Ok(a), Ok(b)) = (caps[1].parse::<u32>(), caps[2].parse::<u32>()) {
            return (RepTarget::Count(a.min(b)), RepTarget::Count(a.max(b)));
        }
    }

    let text = RepTarget::Text(spec.to_string());
    (text.clone(), text)
}

/// Load spec: absent/`BW` → 0, `light` → "light", `A-B` → average to one
/// decimal, single number → number, anything else → 0
pub fn parse_weight(spec: Option<&str>) -> WeightTarget {
    let spec = match spec.map(str::trim) {
        Some(s) if !s.is_empty() => s,
        _ => return WeightTarget::BODYWEIGHT,
    };

    if spec.eq_ignore_ascii_case("bw") {
        return WeightTarget::BODYWEIGHT;
    }
    if spec.eq_ignore_ascii_case("light") {
        return WeightTarget::Qualitative("light".to_string());
    }

    if let Some(caps) = RANGE_WEIGHT_RE.captures(spec) {
        if let (Ok(a), Ok(b)) = (caps[1].parse::<f64>(), caps[2].parse::<f64>()) {
            return WeightTarget::Load(round_to_tenth((a + b) / 2.0));
        }
    }

    if let Some(caps) = SINGLE_WEIGHT_RE.captures(spec) {
        if let Ok(w) = caps[1].parse::<f64>() {
            return WeightTarget::Load(w);
        }
    }

    tracing::debug!("Unrecognized load '{}', treating as bodyweight", spec);
    WeightTarget::BODYWEIGHT
}

pub(crate) fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Trim whitespace and markdown emphasis (`**Bench Press**`)
pub(crate) fn clean_exercise_name(raw: &str) -> String {
    raw.trim_matches(|c: char| c.is_whitespace() || matches!(c, '*' | '_'))
        .to_string()
}
