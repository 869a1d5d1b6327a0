//! Category identifiers and value extraction for play records

use film_core::PlayRecord;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Every play field that can be used as a discrete filter category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Game,
    Quarter,
    Down,
    Distance,
    YardLine,
    YardLineNumeric,
    Hash,
    PlayType,
    Formation,
    OffensivePersonnel,
    DefensivePersonnel,
    PassResult,
    PassLocation,
    RunDirection,
    RunGap,
    SpecialTeamsType,
    YardsGained,
    Epa,
    IsTouchdown,
    IsFirstDown,
    IsPenalty,
    IsTwoMinuteDrill,
    IsShotgun,
}

impl Category {
    pub const ALL: [Category; 23] = [
        Category::Game,
        Category::Quarter,
        Category::Down,
        Category::Distance,
        Category::YardLine,
        Category::YardLineNumeric,
        Category::Hash,
        Category::PlayType,
        Category::Formation,
        Category::OffensivePersonnel,
        Category::DefensivePersonnel,
        Category::PassResult,
        Category::PassLocation,
        Category::RunDirection,
        Category::RunGap,
        Category::SpecialTeamsType,
        Category::YardsGained,
        Category::Epa,
        Category::IsTouchdown,
        Category::IsFirstDown,
        Category::IsPenalty,
        Category::IsTwoMinuteDrill,
        Category::IsShotgun,
    ];

    /// Category name as used in filter state and play data files
    pub fn name(&self) -> &'static str {
        match self {
            Category::Game => "game",
            Category::Quarter => "quarter",
            Category::Down => "down",
            Category::Distance => "distance",
            Category::YardLine => "yardLine",
            Category::YardLineNumeric => "yardLineNumeric",
            Category::Hash => "hash",
            Category::PlayType => "playType",
            Category::Formation => "formation",
            Category::OffensivePersonnel => "offensivePersonnel",
            Category::DefensivePersonnel => "defensivePersonnel",
            Category::PassResult => "passResult",
            Category::PassLocation => "passLocation",
            Category::RunDirection => "runDirection",
            Category::RunGap => "runGap",
            Category::SpecialTeamsType => "specialTeamsType",
            Category::YardsGained => "yardsGained",
            Category::Epa => "epa",
            Category::IsTouchdown => "isTouchdown",
            Category::IsFirstDown => "isFirstDown",
            Category::IsPenalty => "isPenalty",
            Category::IsTwoMinuteDrill => "isTwoMinuteDrill",
            Category::IsShotgun => "isShotgun",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|category| category.name() == name)
    }

    /// The play's value for this category, `""` when it does not apply
    pub fn value_of<'a>(&self, play: &'a PlayRecord) -> Cow<'a, str> {
        match self {
            Category::Game => Cow::Borrowed(play.game.as_str()),
            Category::Quarter => Cow::Owned(play.quarter.to_string()),
            Category::Down => Cow::Owned(play.down.to_string()),
            Category::Distance => Cow::Owned(play.distance.to_string()),
            Category::YardLine => Cow::Borrowed(play.yard_line.as_str()),
            Category::YardLineNumeric => Cow::Owned(play.yard_line_numeric.to_string()),
            Category::Hash => Cow::Borrowed(play.hash.map(|hash| hash.as_str()).unwrap_or("")),
            Category::PlayType => Cow::Borrowed(play.play_type()),
            Category::Formation => Cow::Borrowed(play.formation.as_str()),
            Category::OffensivePersonnel => Cow::Borrowed(play.offensive_personnel.as_str()),
            Category::DefensivePersonnel => Cow::Borrowed(play.defensive_personnel.as_str()),
            Category::PassResult => Cow::Borrowed(play.pass_result().unwrap_or("")),
            Category::PassLocation => Cow::Borrowed(play.pass_location().unwrap_or("")),
            Category::RunDirection => Cow::Borrowed(play.run_direction().unwrap_or("")),
            Category::RunGap => Cow::Borrowed(play.run_gap().unwrap_or("")),
            Category::SpecialTeamsType => Cow::Borrowed(play.special_teams_type().unwrap_or("")),
            Category::YardsGained => Cow::Owned(play.yards_gained.to_string()),
            Category::Epa => play
                .epa
                .map(|epa| Cow::Owned(epa.to_string()))
                .unwrap_or(Cow::Borrowed("")),
            Category::IsTouchdown => yes_no(play.is_touchdown),
            Category::IsFirstDown => yes_no(play.is_first_down),
            Category::IsPenalty => yes_no(play.is_penalty),
            Category::IsTwoMinuteDrill => yes_no(play.is_two_minute_drill),
            Category::IsShotgun => yes_no(play.is_shotgun),
        }
    }
}

fn yes_no(flag: bool) -> Cow<'static, str> {
    Cow::Borrowed(if flag { "Yes" } else { "No" })
}

/// Value of `category` on `play` as a comparable string
///
/// Unknown categories and fields that do not apply to the play's type
/// resolve to `""`.
pub fn get_value_for_category<'a>(play: &'a PlayRecord, category: &str) -> Cow<'a, str> {
    match Category::from_name(category) {
        Some(category) => category.value_of(play),
        None => Cow::Borrowed(""),
    }
}

/// Numeric play fields usable as range and bucket sources
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NumericField {
    Distance,
    YardLineNumeric,
    YardsGained,
    Epa,
}

impl NumericField {
    pub fn name(&self) -> &'static str {
        match self {
            NumericField::Distance => "distance",
            NumericField::YardLineNumeric => "yardLineNumeric",
            NumericField::YardsGained => "yardsGained",
            NumericField::Epa => "epa",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        [
            NumericField::Distance,
            NumericField::YardLineNumeric,
            NumericField::YardsGained,
            NumericField::Epa,
        ]
        .into_iter()
        .find(|field| field.name() == name)
    }

    /// Whether the field only takes whole-number values
    pub fn is_integral(&self) -> bool {
        !matches!(self, NumericField::Epa)
    }

    /// The play's value for this field; `None` when the play has no value
    pub fn value_of(&self, play: &PlayRecord) -> Option<f64> {
        match self {
            NumericField::Distance => Some(f64::from(play.distance)),
            NumericField::YardLineNumeric => Some(f64::from(play.yard_line_numeric)),
            NumericField::YardsGained => Some(f64::from(play.yards_gained)),
            NumericField::Epa => play.epa,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use film_core::{HashMark, PlayKind};

    fn pass_play() -> PlayRecord {
        PlayRecord::new("p1", PlayKind::pass("Complete"))
            .with_quarter(3)
            .with_down_and_distance(2, 5)
            .with_hash(HashMark::Right)
            .with_touchdown(true)
    }

    fn run_play() -> PlayRecord {
        PlayRecord::new("r1", PlayKind::run("Left")).with_yards_gained(-2)
    }

    #[test]
    fn test_names_round_trip() {
        for category in Category::ALL {
            assert_eq!(Category::from_name(category.name()), Some(category));
        }
        assert_eq!(Category::from_name("notAField"), None);
    }

    #[test]
    fn test_scalar_values() {
        let play = pass_play();
        assert_eq!(get_value_for_category(&play, "quarter"), "3");
        assert_eq!(get_value_for_category(&play, "down"), "2");
        assert_eq!(get_value_for_category(&play, "distance"), "5");
        assert_eq!(get_value_for_category(&play, "hash"), "Right");
        assert_eq!(get_value_for_category(&play, "playType"), "Pass");
        assert_eq!(get_value_for_category(&run_play(), "yardsGained"), "-2");
    }

    #[test]
    fn test_boolean_values() {
        let play = pass_play();
        assert_eq!(get_value_for_category(&play, "isTouchdown"), "Yes");
        assert_eq!(get_value_for_category(&play, "isPenalty"), "No");
    }

    #[test]
    fn test_conditional_fields_are_isolated() {
        assert_eq!(get_value_for_category(&run_play(), "passResult"), "");
        assert_eq!(get_value_for_category(&pass_play(), "runDirection"), "");
        assert_eq!(get_value_for_category(&pass_play(), "passResult"), "Complete");
        assert_eq!(get_value_for_category(&run_play(), "runDirection"), "Left");
    }

    #[test]
    fn test_absent_and_unknown_values_are_empty() {
        let play = run_play();
        assert_eq!(get_value_for_category(&play, "hash"), "");
        assert_eq!(get_value_for_category(&play, "epa"), "");
        assert_eq!(get_value_for_category(&play, "distanceType"), "");
        assert_eq!(get_value_for_category(&play, ""), "");
    }

    #[test]
    fn test_numeric_fields() {
        let play = pass_play().with_yard_line(30).with_epa(-0.5);
        assert_eq!(NumericField::Distance.value_of(&play), Some(5.0));
        assert_eq!(NumericField::YardLineNumeric.value_of(&play), Some(30.0));
        assert_eq!(NumericField::Epa.value_of(&play), Some(-0.5));
        assert_eq!(NumericField::Epa.value_of(&run_play()), None);
        assert_eq!(NumericField::from_name("yardsGained"), Some(NumericField::YardsGained));
        assert_eq!(NumericField::from_name("yardLine"), None);
    }
}
