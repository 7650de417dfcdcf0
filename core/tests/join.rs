//! Join resolver tests.

use fpl_core::{
    join::join_standings,
    league::build_league_tables,
    table::Table,
};
use serde_json::json;
use std::collections::BTreeSet;

fn table(value: serde_json::Value) -> Table {
    Table::from_records("test", &value).unwrap()
}

/// Standings for "1", "2", "99" against entries "1", "2": three rows out,
/// "99" keeps a null name and is the only unmatched id.
#[test]
fn left_join_keeps_unmatched_rows_and_reports_them() {
    let standings = table(json!([
        { "league_entry": "1", "total": 10 },
        { "league_entry": "2", "total": 20 },
        { "league_entry": "99", "total": 30 }
    ]));
    let entries = table(json!([
        { "id": "1", "entry_name": "Alpha FC" },
        { "id": "2", "entry_name": "Bravo United" }
    ]));

    let joined = join_standings(&standings, &entries);

    assert_eq!(joined.rows.len(), 3);
    assert_eq!(joined.rows[0].entry_name.as_deref(), Some("Alpha FC"));
    assert_eq!(joined.rows[1].entry_name.as_deref(), Some("Bravo United"));
    assert_eq!(joined.rows[2].entry_name, None);
    assert_eq!(joined.unmatched_ids, BTreeSet::from(["99".to_string()]));
    assert!(!joined.is_fully_matched());
}

#[test]
fn numeric_and_string_ids_match() {
    let standings = table(json!([
        { "league_entry": 1 },
        { "league_entry": "2" },
        { "league_entry": 3.0 }
    ]));
    let entries = table(json!([
        { "id": "1", "entry_name": "Alpha FC" },
        { "id": 2, "entry_name": "Bravo United" },
        { "id": 3, "entry_name": "Charlie Athletic" }
    ]));

    let joined = join_standings(&standings, &entries);

    assert!(joined.is_fully_matched(), "unmatched: {:?}", joined.unmatched_ids);
    let names: Vec<_> = joined.rows.iter().map(|r| r.entry_name.clone().unwrap()).collect();
    assert_eq!(names, vec!["Alpha FC", "Bravo United", "Charlie Athletic"]);
}

#[test]
fn rows_without_key_are_counted_not_dropped() {
    let standings = table(json!([
        { "league_entry": null, "total": 1 },
        { "total": 2 },
        { "league_entry": 1, "total": 3 }
    ]));
    let entries = table(json!([{ "id": 1, "entry_name": "Alpha FC" }]));

    let joined = join_standings(&standings, &entries);

    assert_eq!(joined.rows.len(), 3);
    assert_eq!(joined.rows_without_key, 2);
    assert!(joined.unmatched_ids.is_empty());
    assert_eq!(joined.rows[2].entry_name.as_deref(), Some("Alpha FC"));
}

#[test]
fn duplicate_entry_ids_keep_the_first() {
    let standings = table(json!([{ "league_entry": 4 }]));
    let entries = table(json!([
        { "id": 4, "entry_name": "First" },
        { "id": "4", "entry_name": "Second" }
    ]));

    let joined = join_standings(&standings, &entries);
    assert_eq!(joined.rows[0].entry_name.as_deref(), Some("First"));
}

#[test]
fn joined_rows_feed_the_weekly_chart() {
    let details = json!({
        "league": { "name": "Sunday League" },
        "league_entries": [{ "id": 1, "entry_name": "Alpha FC" }],
        "standings": [{ "league_entry": 1, "weekly_points": [40, 52], "total": 92 }]
    });
    let tables = build_league_tables(&details).unwrap();
    let joined = join_standings(&tables.standings, &tables.entries);

    let points: Vec<(Option<u64>, Option<f64>)> =
        joined.rows.iter().map(|r| (r.week(), r.total())).collect();
    assert_eq!(points, vec![(Some(1), Some(92.0)), (Some(2), Some(92.0))]);

    let row = joined.rows[1].to_row();
    assert_eq!(row["entry_name"], json!("Alpha FC"));
    assert_eq!(row["weekly_points"], json!(52));
    assert_eq!(joined.rows[0].key().as_deref(), Some("1"));
}

#[test]
fn unmatched_rows_render_a_null_entry_name() {
    let standings = table(json!([{ "league_entry": 5 }]));
    let joined = join_standings(&standings, &Table::default());

    assert_eq!(joined.rows[0].to_row()["entry_name"], json!(null));
    assert_eq!(joined.unmatched_ids, BTreeSet::from(["5".to_string()]));
}
