//! Slicing plan text into week and workout sections.

use crate::headers::{week_headers, workout_headers, WeekHeader};

/// Result of splitting the full plan by week headers
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WeekSections<'a> {
    /// Highest week number seen in any header (1 when there are none)
    pub total_weeks: u32,
    /// Text templates are built from
    pub week_one: &'a str,
    pub headers: Vec<WeekHeader<'a>>,
}

/// One workout's slice of a week
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkoutSection<'a> {
    pub day: u32,
    pub name: String,
    /// Header line included
    pub body: &'a str,
}

/// Split the plan into week sections
///
/// With two or more week headers, week 1 runs from the first header to the
/// second; otherwise the whole text is week 1.
pub fn split_weeks(text: &str) -> WeekSections<'_> {
    let headers = week_headers(text);
    let total_weeks = headers.iter().map(|h| h.week).max().unwrap_or(1).max(1);

    let week_one = match headers.as_slice() {
        [first, second, ..] => &text[first.offset..second.offset],
        _ => text,
    };

    WeekSections {
        total_weeks,
        week_one,
        headers,
    }
}

/// Split one week's text into workout sections
///
/// Each section spans from its header to the next header, or to the end of
/// the week for the last one. No headers means no sections.
pub fn split_workouts(week: &str) -> Vec<WorkoutSection<'_>> {
    let headers = workout_headers(week);
    if headers.is_empty() {
        tracing::warn!("No workout headers found in week text");
    }

    let ends: Vec<usize> = headers
        .iter()
        .skip(1)
        .map(|h| h.offset)
        .chain(std::iter::once(week.len()))
        .collect();

    headers
        .into_iter()
        .zip(ends)
        .map(|(header, end)| WorkoutSection {
            day: header.day,
            name: header.name,
            body: &week[header.offset..end],
        })
        .collect()
}

/// Text of week `week`: from its header to the header of week `week + 1`
/// (or the end of the plan). `None` when the plan has no such header.
pub fn week_text<'a>(text: &'a str, headers: &[WeekHeader<'a>], week: u32) -> Option<&'a str> {
    let start = headers.iter().position(|h| h.week == week)?;
    let offset = headers[start].offset;
    let next = week.checked_add(1);
    let end = headers[start + 1..]
        .iter()
        .find(|h| Some(h.week) == next)
        .map_or(text.len(), |h| h.offset);
    Some(&text[offset..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAN: &str = "\
Intro line
Week 1
DAY 1 - Push A
- Bench Press: 4 × 6-8 @ 50kg
DAY 2 - Legs
- Squats: 4 × 6-8 @ 100kg
Week 2
DAY 1 - Push A
- Bench Press: 4 × 6-8 @ 52.5kg
Week 3
- Bench Press: 4 × 6-8 @ 55kg
";

    #[test]
    fn test_split_weeks_bounds_week_one() {
        let weeks = split_weeks(PLAN);
        assert_eq!(weeks.total_weeks, 3);
        assert!(weeks.week_one.starts_with("Week 1"));
        assert!(weeks.week_one.contains("Squats"));
        assert!(!weeks.week_one.contains("52.5kg"));
        assert!(!weeks.week_one.contains("Intro"));
    }

    #[test]
    fn test_split_weeks_without_headers() {
        let text = "DAY 1 - Push\n- Bench Press: 3 × 5";
        let weeks = split_weeks(text);
        assert_eq!(weeks.total_weeks, 1);
        assert_eq!(weeks.week_one, text);
    }

    #[test]
    fn test_single_week_header_uses_whole_text() {
        let text = "Preamble\nWeek 4\nDAY 1 - Push\n- Bench Press: 3 × 5";
        let weeks = split_weeks(text);
        assert_eq!(weeks.total_weeks, 4);
        assert_eq!(weeks.week_one, text);
    }

    #[test]
    fn test_total_weeks_is_max_not_count() {
        let text = "Week 1\nx\nWeek 6\ny\nWeek 3\nz";
        assert_eq!(split_weeks(text).total_weeks, 6);
    }

    #[test]
    fn test_split_workouts() {
        let weeks = split_weeks(PLAN);
        let sections = split_workouts(weeks.week_one);
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].name, "Push A");
        assert_eq!(sections[0].day, 1);
        assert!(sections[0].body.contains("Bench Press"));
        assert!(!sections[0].body.contains("Squats"));
        assert_eq!(sections[1].name, "Legs");
        assert!(sections[1].body.contains("Squats"));
    }

    #[test]
    fn test_split_workouts_without_headers_is_empty() {
        assert!(split_workouts("- Bench Press: 3 × 5").is_empty());
    }

    #[test]
    fn test_week_text_bounds() {
        let weeks = split_weeks(PLAN);
        let week_two = week_text(PLAN, &weeks.headers, 2).unwrap();
        assert!(week_two.starts_with("Week 2"));
        assert!(week_two.contains("52.5kg"));
        assert!(!week_two.contains("55kg"));

        let week_three = week_text(PLAN, &weeks.headers, 3).unwrap();
        assert!(week_three.contains("55kg"));
        assert!(week_text(PLAN, &weeks.headers, 4).is_none());
    }

    #[test]
    fn test_week_text_for_largest_week_number() {
        let text = "Week 1\n- Squats: 3 × 5\nWeek 4294967295\n- Squats: 3 × 5 @ 100kg\n";
        let weeks = split_weeks(text);
        assert_eq!(weeks.total_weeks, u32::MAX);
        let last = week_text(text, &weeks.headers, u32::MAX).unwrap();
        assert!(last.contains("100kg"));
    }
}
