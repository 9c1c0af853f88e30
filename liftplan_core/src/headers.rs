//! Week and workout header recognition.
//!
//! Week headers look like `Week 1`, `## WEEK 2`, `📅 Week 3:`; they only count
//! at the start of a line. Workout headers look like `DAY 1 - Push A`, with a
//! hyphen, en dash or em dash between the day number and the name.

use once_cell::sync::Lazy;
use regex::Regex;

/// Optional decoration in front of a header word (markdown hashes, bold
/// markers, emoji, bullets). Letters and digits end the decoration.
const DECORATION: &str = r"[^A-Za-z0-9\r\n]*?";

static WEEK_HEADER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"(?im)^{DECORATION}week[ \t]*(\d+)\b"))
        .expect("valid week header regex")
});

static WORKOUT_HEADER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?im)^{DECORATION}day[ \t]*(\d+)[ \t]*[-–—][ \t]*([^\r\n]+)"
    ))
    .expect("valid workout header regex")
});

/// A recognized week boundary
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WeekHeader<'a> {
    /// The full matched header text, decoration included
    pub text: &'a str,
    pub week: u32,
    /// Byte offset of the header's line start
    pub offset: usize,
}

/// A recognized workout/day boundary
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkoutHeader<'a> {
    pub text: &'a str,
    pub day: u32,
    /// Workout name with trailing decoration removed ("Push A")
    pub name: String,
    pub offset: usize,
}

/// All week headers in order of appearance
pub fn week_headers(text: &str) -> Vec<WeekHeader<'_>> {
    WEEK_HEADER_RE
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let week = caps.get(1)?.as_str().parse().ok()?;
            Some(WeekHeader {
                text: whole.as_str(),
                week,
                offset: whole.start(),
            })
        })
        .collect()
}

/// All workout headers in order of appearance
pub fn workout_headers(text: &str) -> Vec<WorkoutHeader<'_>> {
    WORKOUT_HEADER_RE
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let day = caps.get(1)?.as_str().parse().ok()?;
            let name = clean_header_name(caps.get(2)?.as_str());
            if name.is_empty() {
                return None;
            }
            Some(WorkoutHeader {
                text: whole.as_str(),
                day,
                name,
                offset: whole.start(),
            })
        })
        .collect()
}

/// Whether a single line is a workout header (used to skip header lines
/// when scanning a section for exercises)
pub fn is_workout_header(line: &str) -> bool {
    WORKOUT_HEADER_RE.is_match(line)
}

fn clean_header_name(raw: &str) -> String {
    raw.trim_matches(|c: char| c.is_whitespace() || matches!(c, '*' | '_' | '#' | ':' | '='))
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_week_headers() {
        let text = "Week 1\n- Squat: 3 × 5\nWeek 2\n- Squat: 3 × 5\n";
        let headers = week_headers(text);
        assert_eq!(headers.len(), 2);
        assert_eq!(headers[0].week, 1);
        assert_eq!(headers[0].offset, 0);
        assert_eq!(headers[1].week, 2);
        assert_eq!(&text[headers[1].offset..headers[1].offset + 6], "Week 2");
    }

    #[test]
    fn test_decorated_week_headers() {
        let text = "## WEEK 1\n📅 Week 2:\n**week 3**\n🗓️ Week 4";
        let weeks: Vec<u32> = week_headers(text).iter().map(|h| h.week).collect();
        assert_eq!(weeks, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_mid_sentence_week_is_not_a_header() {
        let text = "Week 1\nDAY 1 - Push (formerly Week 2)\nNotes: repeat week 3 twice";
        let headers = week_headers(text);
        assert_eq!(headers.len(), 1);
        assert_eq!(headers[0].week, 1);
    }

    #[test]
    fn test_weekly_is_not_a_header() {
        assert!(week_headers("Weekly volume: high").is_empty());
    }

    #[test]
    fn test_workout_headers_with_dash_variants() {
        let text = "DAY 1 - Push A\nDay 2 – Pull A\nday 3—Legs\nDAY 4 -Full Body A";
        let headers = workout_headers(text);
        let names: Vec<&str> = headers.iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names, vec!["Push A", "Pull A", "Legs", "Full Body A"]);
        let days: Vec<u32> = headers.iter().map(|h| h.day).collect();
        assert_eq!(days, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_workout_header_strips_decoration() {
        let headers = workout_headers("### **DAY 1 - Upper Strength**");
        assert_eq!(headers.len(), 1);
        assert_eq!(headers[0].name, "Upper Strength");
        assert_eq!(headers[0].offset, 0);
    }

    #[test]
    fn test_workout_header_offsets_preserve_order() {
        let text = "intro\nDAY 1 - Push\n- Bench: 3 × 5\nDAY 2 - Pull\n";
        let headers = workout_headers(text);
        assert_eq!(headers.len(), 2);
        assert!(headers[0].offset < headers[1].offset);
        assert!(text[headers[1].offset..].starts_with("DAY 2"));
    }

    #[test]
    fn test_is_workout_header() {
        assert!(is_workout_header("DAY 1 - Push"));
        assert!(!is_workout_header("- Bench Press: 4 × 6-8 @ 50kg"));
    }
}
