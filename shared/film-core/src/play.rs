//! Play record structures
//!
//! A play is one snap of game film. Most fields are shared by every play;
//! the fields that only make sense for one kind of play (pass result, run
//! direction, kick type) live on [`PlayKind`] so they can only be read when
//! the play actually is that kind.

use serde::{Deserialize, Serialize};

/// Hash mark the ball was spotted on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HashMark {
    Left,
    Middle,
    Right,
}

impl HashMark {
    pub fn as_str(&self) -> &'static str {
        match self {
            HashMark::Left => "Left",
            HashMark::Middle => "Middle",
            HashMark::Right => "Right",
        }
    }
}

/// Play-type specific payload, tagged by `playType` in play data files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "playType")]
pub enum PlayKind {
    #[serde(rename_all = "camelCase")]
    Pass {
        /// Complete, Incomplete, Interception, Sack, ...
        #[serde(default)]
        pass_result: String,

        /// Short Left, Deep Middle, ...
        #[serde(default)]
        pass_location: String,
    },

    #[serde(rename_all = "camelCase")]
    Run {
        /// Left, Middle, Right
        #[serde(default)]
        run_direction: String,

        /// A-gap, B-gap, C-gap, Outside
        #[serde(default)]
        run_gap: String,
    },

    #[serde(rename = "Special Teams", rename_all = "camelCase")]
    SpecialTeams {
        /// Punt, Kickoff, Field Goal, Extra Point
        #[serde(default)]
        special_teams_type: String,
    },
}

impl PlayKind {
    /// Display name of the play type, identical to the `playType` tag
    pub fn play_type(&self) -> &'static str {
        match self {
            PlayKind::Pass { .. } => "Pass",
            PlayKind::Run { .. } => "Run",
            PlayKind::SpecialTeams { .. } => "Special Teams",
        }
    }

    pub fn pass(result: impl Into<String>) -> Self {
        PlayKind::Pass {
            pass_result: result.into(),
            pass_location: String::new(),
        }
    }

    pub fn run(direction: impl Into<String>) -> Self {
        PlayKind::Run {
            run_direction: direction.into(),
            run_gap: String::new(),
        }
    }

    pub fn special_teams(kind: impl Into<String>) -> Self {
        PlayKind::SpecialTeams {
            special_teams_type: kind.into(),
        }
    }
}

/// A single play in the film library
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayRecord {
    /// Stable identifier used for selection and de-duplication
    pub id: String,

    /// Game label, e.g. "Week 3 vs Eagles"
    #[serde(default)]
    pub game: String,

    /// Quarter (5 = overtime)
    pub quarter: u8,

    pub down: u8,

    /// Yards to go for a first down
    pub distance: u32,

    /// Display form of the line of scrimmage, e.g. "OPP 30"
    #[serde(default)]
    pub yard_line: String,

    /// Yards from our own goal line (0-100)
    pub yard_line_numeric: i32,

    #[serde(default)]
    pub hash: Option<HashMark>,

    #[serde(default)]
    pub formation: String,

    #[serde(default)]
    pub offensive_personnel: String,

    #[serde(default)]
    pub defensive_personnel: String,

    /// Negative for a loss
    #[serde(default)]
    pub yards_gained: i32,

    /// Expected points added (absent when the model has no estimate)
    #[serde(default)]
    pub epa: Option<f64>,

    #[serde(default)]
    pub is_touchdown: bool,

    #[serde(default)]
    pub is_first_down: bool,

    #[serde(default)]
    pub is_penalty: bool,

    #[serde(default)]
    pub is_two_minute_drill: bool,

    #[serde(default)]
    pub is_shotgun: bool,

    /// Path or URL of the video clip for this play
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clip: Option<String>,

    #[serde(flatten)]
    pub kind: PlayKind,
}

impl PlayRecord {
    /// Create a play with the given id and kind; everything else starts
    /// at 1st & 10 from our own 25
    pub fn new(id: impl Into<String>, kind: PlayKind) -> Self {
        Self {
            id: id.into(),
            game: String::new(),
            quarter: 1,
            down: 1,
            distance: 10,
            yard_line: "OWN 25".to_string(),
            yard_line_numeric: 25,
            hash: None,
            formation: String::new(),
            offensive_personnel: String::new(),
            defensive_personnel: String::new(),
            yards_gained: 0,
            epa: None,
            is_touchdown: false,
            is_first_down: false,
            is_penalty: false,
            is_two_minute_drill: false,
            is_shotgun: false,
            clip: None,
            kind,
        }
    }

    pub fn with_game(mut self, game: impl Into<String>) -> Self {
        self.game = game.into();
        self
    }

    pub fn with_quarter(mut self, quarter: u8) -> Self {
        self.quarter = quarter;
        self
    }

    pub fn with_down_and_distance(mut self, down: u8, distance: u32) -> Self {
        self.down = down;
        self.distance = distance;
        self
    }

    /// Set the line of scrimmage from yards-from-own-goal, deriving the display form
    pub fn with_yard_line(mut self, yard_line_numeric: i32) -> Self {
        self.yard_line_numeric = yard_line_numeric;
        self.yard_line = format_yard_line(yard_line_numeric);
        self
    }

    pub fn with_hash(mut self, hash: HashMark) -> Self {
        self.hash = Some(hash);
        self
    }

    pub fn with_formation(mut self, formation: impl Into<String>) -> Self {
        self.formation = formation.into();
        self
    }

    pub fn with_personnel(mut self, offense: impl Into<String>, defense: impl Into<String>) -> Self {
        self.offensive_personnel = offense.into();
        self.defensive_personnel = defense.into();
        self
    }

    pub fn with_yards_gained(mut self, yards: i32) -> Self {
        self.yards_gained = yards;
        self
    }

    pub fn with_epa(mut self, epa: f64) -> Self {
        self.epa = Some(epa);
        self
    }

    pub fn with_touchdown(mut self, touchdown: bool) -> Self {
        self.is_touchdown = touchdown;
        self
    }

    pub fn with_first_down(mut self, first_down: bool) -> Self {
        self.is_first_down = first_down;
        self
    }

    pub fn with_penalty(mut self, penalty: bool) -> Self {
        self.is_penalty = penalty;
        self
    }

    pub fn with_two_minute_drill(mut self, two_minute: bool) -> Self {
        self.is_two_minute_drill = two_minute;
        self
    }

    pub fn with_shotgun(mut self, shotgun: bool) -> Self {
        self.is_shotgun = shotgun;
        self
    }

    pub fn with_clip(mut self, clip: impl Into<String>) -> Self {
        self.clip = Some(clip.into());
        self
    }

    pub fn play_type(&self) -> &'static str {
        self.kind.play_type()
    }

    pub fn pass_result(&self) -> Option<&str> {
        match &self.kind {
            PlayKind::Pass { pass_result, .. } => Some(pass_result.as_str()),
            _ => None,
        }
    }

    pub fn pass_location(&self) -> Option<&str> {
        match &self.kind {
            PlayKind::Pass { pass_location, .. } => Some(pass_location.as_str()),
            _ => None,
        }
    }

    pub fn run_direction(&self) -> Option<&str> {
        match &self.kind {
            PlayKind::Run { run_direction, .. } => Some(run_direction.as_str()),
            _ => None,
        }
    }

    pub fn run_gap(&self) -> Option<&str> {
        match &self.kind {
            PlayKind::Run { run_gap, .. } => Some(run_gap.as_str()),
            _ => None,
        }
    }

    pub fn special_teams_type(&self) -> Option<&str> {
        match &self.kind {
            PlayKind::SpecialTeams { special_teams_type } => Some(special_teams_type.as_str()),
            _ => None,
        }
    }

    /// Get formatted down & distance string, e.g. "3rd & 7"
    pub fn down_and_distance(&self) -> String {
        let suffix = match self.down {
            1 => "st",
            2 => "nd",
            3 => "rd",
            _ => "th",
        };
        format!("{}{} & {}", self.down, suffix, self.distance)
    }
}

/// Format yards-from-own-goal as "OWN n", "OPP n" or "50"
pub fn format_yard_line(yard_line_numeric: i32) -> String {
    match yard_line_numeric {
        50 => "50".to_string(),
        n if n < 50 => format!("OWN {}", n),
        n => format!("OPP {}", 100 - n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pass_play_deserializes_from_flat_json() {
        let json = r#"{
            "id": "p1",
            "quarter": 2,
            "down": 3,
            "distance": 7,
            "yardLineNumeric": 70,
            "playType": "Pass",
            "passResult": "Complete",
            "isTouchdown": true
        }"#;

        let play: PlayRecord = serde_json::from_str(json).unwrap();
        assert_eq!(play.play_type(), "Pass");
        assert_eq!(play.pass_result(), Some("Complete"));
        assert_eq!(play.pass_location(), Some(""));
        assert_eq!(play.run_direction(), None);
        assert!(play.is_touchdown);
        assert!(!play.is_penalty);
        assert_eq!(play.epa, None);
    }

    #[test]
    fn test_special_teams_tag() {
        let json = r#"{
            "id": "k1",
            "quarter": 1,
            "down": 1,
            "distance": 10,
            "yardLineNumeric": 35,
            "playType": "Special Teams",
            "specialTeamsType": "Kickoff"
        }"#;

        let play: PlayRecord = serde_json::from_str(json).unwrap();
        assert_eq!(play.play_type(), "Special Teams");
        assert_eq!(play.special_teams_type(), Some("Kickoff"));
        assert_eq!(play.pass_result(), None);
    }

    #[test]
    fn test_serialized_play_keeps_flat_layout() {
        let play = PlayRecord::new("r1", PlayKind::run("Left")).with_yard_line(45);
        let value = serde_json::to_value(&play).unwrap();

        assert_eq!(value["playType"], "Run");
        assert_eq!(value["runDirection"], "Left");
        assert_eq!(value["yardLine"], "OWN 45");
        assert!(value.get("clip").is_none());
    }

    #[test]
    fn test_yard_line_formatting() {
        assert_eq!(format_yard_line(20), "OWN 20");
        assert_eq!(format_yard_line(50), "50");
        assert_eq!(format_yard_line(70), "OPP 30");
    }

    #[test]
    fn test_down_and_distance() {
        let play = PlayRecord::new("p", PlayKind::pass("Incomplete")).with_down_and_distance(3, 7);
        assert_eq!(play.down_and_distance(), "3rd & 7");
    }
}
