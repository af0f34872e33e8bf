use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

/// One ranked hit from the vector index, passed through to callers as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchMatch {
    pub id: String,
    pub score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
}

/// Outcome of semantic enrichment.
///
/// Serializes to `null` when no search ran and to the bare match array
/// otherwise, so an empty result list stays distinguishable from a skip.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchResults {
    NotPerformed,
    Matches(Vec<SearchMatch>),
}

impl Serialize for SearchResults {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            SearchResults::NotPerformed => serializer.serialize_none(),
            SearchResults::Matches(matches) => matches.serialize(serializer),
        }
    }
}

/// Upstream data and search matches answered together under two keys.
#[derive(Debug, Clone, PartialEq)]
pub struct CombinedResult {
    /// Key the upstream payload is reported under, e.g. `game_data`
    pub data_key: &'static str,
    pub data: Value,
    pub search_results: SearchResults,
}

impl CombinedResult {
    pub fn new(data_key: &'static str, data: Value, search_results: SearchResults) -> Self {
        Self {
            data_key,
            data,
            search_results,
        }
    }
}

impl Serialize for CombinedResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry(self.data_key, &self.data)?;
        map.serialize_entry("search_results", &self.search_results)?;
        map.end()
    }
}

/// GET /games
#[derive(Debug, Clone, Deserialize)]
pub struct GamesQuery {
    pub day: String,
    pub message: Option<String>,
}

/// GET /year_standings
#[derive(Debug, Clone, Deserialize)]
pub struct StandingsQuery {
    pub year: String,
}

/// GET /allstar_roster
#[derive(Debug, Clone, Deserialize)]
pub struct AllStarQuery {
    pub year: String,
    pub message: Option<String>,
}

/// GET /current_roster_list
#[derive(Debug, Clone, Deserialize)]
pub struct RosterQuery {
    pub team_abv: String,
}

/// GET /player_stats_by_date
#[derive(Debug, Clone, Deserialize)]
pub struct PlayerStatsQuery {
    #[serde(alias = "day")]
    pub date: String,
    pub player_name: Option<String>,
    pub player_id: Option<String>,
}
