//! Text and JSON rendering of play listings and facet counts

use anyhow::Result;
use film_core::PlayRecord;
use serde::Serialize;
use std::fmt::Write as _;

use crate::filters::{CategoryInfo, FacetCounts};

/// Summary wrapper for JSON output
#[derive(Debug, Serialize)]
pub struct PlayListing<'a> {
    pub total: usize,
    pub matched: usize,
    pub plays: &'a [PlayRecord],
}

/// One line per play: id, game, quarter, down & distance, yard line, type, detail
pub fn play_row(play: &PlayRecord) -> String {
    let detail = match play.play_type() {
        "Pass" => play.pass_result().unwrap_or(""),
        "Run" => play.run_direction().unwrap_or(""),
        _ => play.special_teams_type().unwrap_or(""),
    };
    let mut flags = Vec::new();
    if play.is_touchdown {
        flags.push("TD");
    }
    if play.is_first_down {
        flags.push("1D");
    }
    if play.is_penalty {
        flags.push("PEN");
    }

    format!(
        "{:<12} {:<20} Q{} {:<9} {:<7} {:<14} {:<12} {:>4} {}",
        play.id,
        truncate(&play.game, 20),
        play.quarter,
        play.down_and_distance(),
        play.yard_line,
        play.play_type(),
        detail,
        play.yards_gained,
        flags.join(" ")
    )
}

/// Plain-text table of plays; `max_rows == 0` prints every play
pub fn render_play_table(plays: &[PlayRecord], total: usize, max_rows: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<12} {:<20} {:<2} {:<9} {:<7} {:<14} {:<12} {:>4} {}",
        "ID", "GAME", "Q", "D&D", "YL", "TYPE", "RESULT", "YDS", "FLAGS"
    );

    let limit = if max_rows == 0 { plays.len() } else { max_rows };
    for play in plays.iter().take(limit) {
        let _ = writeln!(out, "{}", play_row(play));
    }
    if plays.len() > limit {
        let _ = writeln!(out, "... {} more", plays.len() - limit);
    }
    let _ = writeln!(out, "{} of {} plays match", plays.len(), total);
    out
}

pub fn render_play_json(plays: &[PlayRecord], total: usize) -> Result<String> {
    let listing = PlayListing {
        total,
        matched: plays.len(),
        plays,
    };
    Ok(serde_json::to_string_pretty(&listing)?)
}

pub fn render_facets(category: &str, facets: &FacetCounts) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", category);
    if facets.is_empty() {
        let _ = writeln!(out, "  (no values)");
    }
    for facet in facets {
        let _ = writeln!(out, "  {:<24} {:>6}", facet.value, facet.count);
    }
    out
}

pub fn render_categories(categories: &[CategoryInfo]) -> String {
    let mut out = String::new();
    for category in categories {
        let _ = writeln!(
            out,
            "{:<24} {:<10} {}",
            category.name,
            format!("{:?}", category.kind),
            category.label
        );
    }
    out
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let mut cut: String = s.chars().take(max_chars.saturating_sub(1)).collect();
        cut.push('…');
        cut
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::FacetCount;
    use film_core::PlayKind;

    fn sample() -> Vec<PlayRecord> {
        vec![
            PlayRecord::new("p1", PlayKind::pass("Complete"))
                .with_game("Week 1 vs Bears")
                .with_touchdown(true),
            PlayRecord::new("r1", PlayKind::run("Left")).with_yards_gained(4),
        ]
    }

    #[test]
    fn test_play_row_contents() {
        let plays = sample();
        let row = play_row(&plays[0]);
        assert!(row.starts_with("p1"));
        assert!(row.contains("Week 1 vs Bears"));
        assert!(row.contains("1st & 10"));
        assert!(row.contains("Complete"));
        assert!(row.ends_with("TD"));

        assert!(play_row(&plays[1]).contains("Left"));
    }

    #[test]
    fn test_table_respects_row_limit() {
        let plays = sample();
        let table = render_play_table(&plays, 10, 1);
        assert!(table.contains("p1"));
        assert!(!table.contains("r1"));
        assert!(table.contains("... 1 more"));
        assert!(table.contains("2 of 10 plays match"));

        let full = render_play_table(&plays, 2, 0);
        assert!(full.contains("r1"));
    }

    #[test]
    fn test_json_listing() {
        let plays = sample();
        let json = render_play_json(&plays, 5).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["total"], 5);
        assert_eq!(value["matched"], 2);
        assert_eq!(value["plays"][1]["runDirection"], "Left");
    }

    #[test]
    fn test_render_facets() {
        let facets = vec![FacetCount { value: "Pass".to_string(), count: 3 }];
        let text = render_facets("playType", &facets);
        assert!(text.starts_with("playType"));
        assert!(text.contains("Pass"));

        assert!(render_facets("down", &Vec::new()).contains("(no values)"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 20), "short");
        assert_eq!(truncate("abcdef", 4), "abc…");
    }
}
