//! Presentation helpers shared by the discovery pages.

use std::collections::HashSet;

use chrono::NaiveDate;
use rand::Rng;
use rand::seq::IndexedRandom;

use crate::tmdb::{CrewMember, MediaItem, MediaType, Video};

/// Heading shown when a search or listing has no entries.
pub const NO_RESULTS: &str = "Sorry, Results not found!";

/// Placeholder for a missing or unparsable date.
pub const MISSING_DATE: &str = "-";

/// Entries considered for the hero backdrop.
const BACKDROP_POOL: usize = 20;

/// Crew jobs credited as writers.
const WRITER_JOBS: [&str; 3] = ["Screenplay", "Story", "Writer"];

/// Rating with one decimal (`8.7`).
#[must_use]
pub fn format_rating(vote_average: f64) -> String {
    format!("{vote_average:.1}")
}

/// Runtime as hours and minutes (`2h 22m`, `45m`, `2h`).
#[must_use]
pub fn format_runtime(minutes: u32) -> String {
    let hours = minutes / 60;
    let rest = minutes % 60;
    match (hours, rest) {
        (0, m) => format!("{m}m"),
        (h, 0) => format!("{h}h"),
        (h, m) => format!("{h}h {m}m"),
    }
}

/// Release date as `23 Sep, 1994`.
///
/// Missing or invalid dates render as [`MISSING_DATE`].
#[must_use]
pub fn format_date(date: Option<&str>) -> String {
    date.and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
        .map_or_else(
            || String::from(MISSING_DATE),
            |d| d.format("%-d %b, %Y").to_string(),
        )
}

/// Crew members credited as director, deduplicated by person.
#[must_use]
pub fn directors(crew: &[CrewMember]) -> Vec<&CrewMember> {
    crew_with_jobs(crew, &["Director"])
}

/// Crew members credited as writers, deduplicated by person.
#[must_use]
pub fn writers(crew: &[CrewMember]) -> Vec<&CrewMember> {
    crew_with_jobs(crew, &WRITER_JOBS)
}

fn crew_with_jobs<'a>(crew: &'a [CrewMember], jobs: &[&str]) -> Vec<&'a CrewMember> {
    let mut seen = HashSet::new();
    crew.iter()
        .filter(|member| jobs.contains(&member.job.as_str()))
        .filter(|member| seen.insert(member.id))
        .collect()
}

/// Video behind the "Watch Trailer" button.
#[must_use]
pub fn official_trailer(videos: &[Video]) -> Option<&Video> {
    videos.first()
}

/// Heading of the search results page.
#[must_use]
pub fn search_heading(query: &str, total_results: u32) -> String {
    let noun = if total_results == 1 {
        "result"
    } else {
        "results"
    };
    format!("Search {noun} of '{query}'")
}

/// Heading of the explore page.
#[must_use]
pub fn explore_heading(media: MediaType) -> String {
    format!("Explore {}", media.label())
}

/// Heading of the similar carousel on the details page.
#[must_use]
pub fn similar_heading(media: MediaType) -> String {
    format!("Similar {}", media.label())
}

/// Drops person entries from a multi-search result.
#[must_use]
pub fn without_people(items: Vec<MediaItem>) -> Vec<MediaItem> {
    items.into_iter().filter(|item| !item.is_person()).collect()
}

/// Picks the hero backdrop among the leading entries that have one.
///
/// Returns `None` when none of them does.
pub fn pick_backdrop<'a, R>(items: &'a [MediaItem], rng: &mut R) -> Option<&'a str>
where
    R: Rng + ?Sized,
{
    let candidates: Vec<&str> = items
        .iter()
        .take(BACKDROP_POOL)
        .filter_map(|item| item.backdrop_path.as_deref())
        .collect();
    candidates.choose(rng).copied()
}
