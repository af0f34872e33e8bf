use serde_json::Value;

use crate::projection::{project, MissingFieldError, View};

/// Find one player's line in a day's box scores.
///
/// An identifier match wins over a name match; within each pass the first
/// record in list order wins. `Ok(None)` means nothing matched, which is a
/// normal outcome for a player who did not play that day.
pub fn find_player(
    records: &[Value],
    player_id: Option<i64>,
    player_name: Option<&str>,
) -> Result<Option<Value>, MissingFieldError> {
    let by_id = player_id.and_then(|id| records.iter().find(|r| id_matches(r, id)));
    let found = by_id.or_else(|| {
        player_name.and_then(|name| {
            records
                .iter()
                .find(|r| r.get("Name").and_then(Value::as_str) == Some(name))
        })
    });

    found.map(|r| project(r, View::PlayerStat)).transpose()
}

/// The provider sends numeric IDs; tolerate string-typed ones as well.
fn id_matches(record: &Value, id: i64) -> bool {
    match record.get("PlayerID") {
        Some(Value::Number(n)) => n.as_i64() == Some(id),
        Some(Value::String(s)) => s.trim().parse::<i64>().ok() == Some(id),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::tests::full_record;
    use serde_json::json;

    fn player(id: i64, name: &str) -> Value {
        let mut record = full_record(View::PlayerStat);
        record["PlayerID"] = json!(id);
        record["Name"] = json!(name);
        record["Points"] = json!(id * 10);
        record
    }

    fn roster() -> Vec<Value> {
        vec![player(1, "A"), player(2, "B"), player(3, "C")]
    }

    #[test]
    fn test_id_lookup_ignores_name() {
        let found = find_player(&roster(), Some(2), Some("C")).unwrap().unwrap();
        assert_eq!(found["PlayerID"], json!(2));
        assert_eq!(found["Name"], json!("B"));
    }

    #[test]
    fn test_name_lookup_without_id() {
        let found = find_player(&roster(), None, Some("C")).unwrap().unwrap();
        assert_eq!(found["PlayerID"], json!(3));
    }

    #[test]
    fn test_unknown_id_without_name_is_no_match() {
        assert_eq!(find_player(&roster(), Some(99), None).unwrap(), None);
    }

    #[test]
    fn test_unknown_id_falls_back_to_name() {
        let found = find_player(&roster(), Some(99), Some("A")).unwrap().unwrap();
        assert_eq!(found["PlayerID"], json!(1));
    }

    #[test]
    fn test_no_criteria_is_no_match() {
        assert_eq!(find_player(&roster(), None, None).unwrap(), None);
    }

    #[test]
    fn test_first_match_wins() {
        let mut records = roster();
        let mut duplicate = player(2, "B");
        duplicate["Points"] = json!(-1);
        records.push(duplicate);

        let found = find_player(&records, Some(2), None).unwrap().unwrap();
        assert_eq!(found["Points"], json!(20));
    }

    #[test]
    fn test_string_ids_are_compared_numerically() {
        let mut records = roster();
        records[0]["PlayerID"] = json!("1");
        let found = find_player(&records, Some(1), None).unwrap().unwrap();
        assert_eq!(found["Name"], json!("A"));
    }

    #[test]
    fn test_match_is_projected() {
        let mut records = roster();
        records[1]["InjuryStatus"] = json!("Probable");
        let found = find_player(&records, Some(2), None).unwrap().unwrap();
        assert!(found.get("InjuryStatus").is_none());
    }

    #[test]
    fn test_matching_record_with_missing_field_is_an_error() {
        let mut records = roster();
        records[2].as_object_mut().unwrap().remove("Turnovers");
        let err = find_player(&records, None, Some("C")).unwrap_err();
        assert_eq!(err.field, "Turnovers");
    }
}
