//! Named allow-list views over upstream records.
//!
//! The upstream provider returns wide records; each view keeps a fixed set
//! of fields, copied verbatim. A record missing any allow-listed field is
//! rejected with [`MissingFieldError`] for every view alike: the allow-list
//! is a contract with the provider's schema.

use serde_json::{Map, Value};
use std::fmt;
use thiserror::Error;

/// Fields exposed for a scheduled or finished game.
pub const GAME_FIELDS: &[&str] = &[
    "GameEndDateTime",
    "GameID",
    "Season",
    "SeasonType",
    "Status",
    "Day",
    "DateTime",
    "AwayTeam",
    "HomeTeam",
    "AwayTeamID",
    "HomeTeamID",
    "StadiumID",
    "AwayTeamScore",
    "HomeTeamScore",
    "Updated",
    "IsClosed",
    "NeutralVenue",
    "DateTimeUTC",
];

/// Fields exposed for one player's box score in one game.
pub const PLAYER_STAT_FIELDS: &[&str] = &[
    "StatID",
    "TeamID",
    "PlayerID",
    "Season",
    "Name",
    "Team",
    "Position",
    "Started",
    "Updated",
    "Games",
    "Minutes",
    "Seconds",
    "FieldGoalsMade",
    "FieldGoalsAttempted",
    "FieldGoalsPercentage",
    "EffectiveFieldGoalsPercentage",
    "TwoPointersMade",
    "TwoPointersAttempted",
    "TwoPointersPercentage",
    "ThreePointersMade",
    "ThreePointersAttempted",
    "ThreePointersPercentage",
    "FreeThrowsMade",
    "FreeThrowsAttempted",
    "FreeThrowsPercentage",
    "OffensiveRebounds",
    "DefensiveRebounds",
    "Rebounds",
    "OffensiveReboundsPercentage",
    "DefensiveReboundsPercentage",
    "TotalReboundsPercentage",
    "Assists",
    "Steals",
    "BlockedShots",
    "Turnovers",
    "PersonalFouls",
    "Points",
    "TrueShootingAttempts",
    "TrueShootingPercentage",
    "PlayerEfficiencyRating",
    "AssistsPercentage",
    "StealsPercentage",
    "BlocksPercentage",
    "TurnOversPercentage",
    "UsageRatePercentage",
    "PlusMinus",
    "DoubleDoubles",
    "TripleDoubles",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Game,
    PlayerStat,
}

impl View {
    pub fn fields(self) -> &'static [&'static str] {
        match self {
            View::Game => GAME_FIELDS,
            View::PlayerStat => PLAYER_STAT_FIELDS,
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            View::Game => f.write_str("game"),
            View::PlayerStat => f.write_str("player stat"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{view} record is missing field `{field}`")]
pub struct MissingFieldError {
    pub view: View,
    pub field: &'static str,
}

/// Project `record` onto `view`. Non-object records are treated as having
/// no fields at all.
pub fn project(record: &Value, view: View) -> Result<Value, MissingFieldError> {
    let source = record.as_object();
    let mut out = Map::with_capacity(view.fields().len());

    for &field in view.fields() {
        let value = source
            .and_then(|obj| obj.get(field))
            .ok_or(MissingFieldError { view, field })?;
        out.insert(field.to_string(), value.clone());
    }

    Ok(Value::Object(out))
}

/// Upstream answered with something other than a list of records, e.g. the
/// provider's `{"Code": .., "Description": ..}` error object.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expected a list of {view} records from upstream, got {found}")]
pub struct UnexpectedShapeError {
    pub view: View,
    pub found: &'static str,
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// The records of an upstream list body. Any other shape is a contract
/// violation, not an empty list.
pub fn records(body: &Value, view: View) -> Result<&[Value], UnexpectedShapeError> {
    body.as_array()
        .map(Vec::as_slice)
        .ok_or(UnexpectedShapeError {
            view,
            found: kind(body),
        })
}

/// Project every record of an upstream list.
pub fn project_all(records: &[Value], view: View) -> Result<Value, MissingFieldError> {
    let projected = records
        .iter()
        .map(|r| project(r, view))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Value::Array(projected))
}
