//! Same payload in, same tables out. No state survives between calls.

use fpl_core::{
    dashboard::{build_league_section, build_player_section},
    league::build_league_tables,
};
use serde_json::json;

fn details() -> serde_json::Value {
    json!({
        "league": { "name": "Repeatable League" },
        "league_entries": [
            { "id": 1, "entry_name": "Alpha FC" },
            { "id": 2, "entry_name": "Bravo United" }
        ],
        "standings": [
            { "league_entry": 1, "weekly_points": [12, 30, 41], "total": 83 },
            { "league_entry": 2, "weekly_points": [20, 22, 19], "total": 61 },
            { "league_entry": 3, "weekly_points": [1], "total": 1 }
        ]
    })
}

#[test]
fn league_builder_is_idempotent() {
    let payload = details();
    let before = payload.clone();

    let first = build_league_tables(&payload).unwrap();
    let second = build_league_tables(&payload).unwrap();

    assert_eq!(first, second);
    assert_eq!(payload, before, "input payload was mutated");
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn league_section_is_idempotent() {
    let payload = details();
    let first = build_league_section(&payload).unwrap();
    let second = build_league_section(&payload).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.joined.unmatched_ids.len(), 1);
}

#[test]
fn player_section_is_idempotent() {
    let payload = json!({
        "teams": [{ "id": 1, "name": "Wolves" }],
        "element_types": [{ "id": 2, "singular_name": "Defender" }],
        "elements": [
            { "id": 1, "web_name": "Kilman", "team": 1, "element_type": 2, "total_points": 70 },
            { "id": 2, "web_name": "Semedo", "team": 1, "element_type": 2, "total_points": 70 }
        ]
    });
    let first = build_player_section(&payload, 10).unwrap();
    let second = build_player_section(&payload, 10).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.top[0].name, "Kilman");
}
