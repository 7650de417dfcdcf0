//! Dashboard assembly tests: independent sections, surfaced diagnostics.

use fpl_core::{
    config::DashboardConfig,
    dashboard::{build_dashboard, DashboardInputs, FetchOutcome},
    error::PipelineError,
};
use serde_json::{json, Value};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn bootstrap() -> Value {
    json!({
        "teams": [{ "id": 1, "name": "Arsenal" }, { "id": 2, "name": "Brighton" }],
        "element_types": [{ "id": 3, "singular_name": "Midfielder" }],
        "elements": [
            { "id": 1, "web_name": "Saka",   "team": 1, "element_type": 3, "total_points": 180 },
            { "id": 2, "web_name": "Odegaard", "team": 1, "element_type": 3, "total_points": 160 },
            { "id": 3, "web_name": "Mitoma", "team": 2, "element_type": 3, "total_points": 110 }
        ]
    })
}

fn details() -> Value {
    json!({
        "league": { "name": "Office League" },
        "league_entries": [{ "id": 11, "entry_name": "Desk Gunners" }],
        "standings": [
            { "league_entry": 11, "weekly_points": [50, 61] },
            { "league_entry": 12, "weekly_points": [44] }
        ]
    })
}

fn inputs() -> DashboardInputs {
    DashboardInputs {
        bootstrap:    FetchOutcome::Fetched(bootstrap()),
        details:      FetchOutcome::Fetched(details()),
        choices:      FetchOutcome::Fetched(json!({ "choices": [{ "round": 1, "pick": 1 }] })),
        transactions: FetchOutcome::Fetched(json!({ "transactions": [] })),
    }
}

#[test]
fn all_sections_build_from_valid_payloads() {
    init_logging();
    let config = DashboardConfig { top_n: 2, ..DashboardConfig::default() };
    let dashboard = build_dashboard(&inputs(), &config);

    let players = dashboard.players.as_ref().unwrap();
    assert_eq!(players.players.len(), 3);
    assert_eq!(players.top.len(), 2);
    assert_eq!(players.top[0].name, "Saka");
    assert_eq!(players.team_distribution.get("Brighton"), Some(1));
    assert_eq!(players.position_distribution.total(), 3);
    assert_eq!(players.elements.len(), 3);

    let league = dashboard.league.as_ref().unwrap();
    assert_eq!(league.league_name, "Office League");
    assert_eq!(league.standings.len(), 3);
    assert_eq!(league.joined.rows.len(), 3);

    assert_eq!(dashboard.choices.as_ref().unwrap().len(), 1);
    assert!(dashboard.transactions.as_ref().unwrap().is_empty());
}

#[test]
fn unmatched_ids_surface_as_diagnostics() {
    init_logging();
    let dashboard = build_dashboard(&inputs(), &DashboardConfig::default());

    let diagnostics = dashboard.diagnostics();
    assert_eq!(diagnostics.len(), 1, "{diagnostics:?}");
    assert_eq!(diagnostics[0].section, "league");
    assert!(diagnostics[0].message.contains("12"), "{}", diagnostics[0].message);
}

/// A broken league payload must not take the other sections down with it.
#[test]
fn failing_builder_does_not_block_the_others() {
    init_logging();
    let mut inputs = inputs();
    inputs.details = FetchOutcome::Fetched(json!({ "league": { "name": "No standings" }, "league_entries": [] }));
    inputs.choices = FetchOutcome::FetchFailed { reason: "status 503".into() };

    let dashboard = build_dashboard(&inputs, &DashboardConfig::default());

    assert!(matches!(
        dashboard.league,
        Err(PipelineError::MissingField { ref field }) if field == "standings"
    ));
    assert!(matches!(dashboard.choices, Err(PipelineError::FetchFailed { .. })));
    assert!(dashboard.players.is_ok());
    assert!(dashboard.transactions.is_ok());

    let sections: Vec<&str> = dashboard.diagnostics().iter().map(|d| d.section).collect();
    assert_eq!(sections, vec!["league", "choices"]);
}

#[test]
fn unresolved_player_fails_only_the_player_section() {
    init_logging();
    let mut payload = bootstrap();
    payload["elements"][2]["team"] = json!(7);
    let mut inputs = inputs();
    inputs.bootstrap = FetchOutcome::Fetched(payload);

    let dashboard = build_dashboard(&inputs, &DashboardConfig::default());

    match &dashboard.players {
        Err(err @ PipelineError::UnresolvedReference { id: 7, .. }) => assert!(!err.is_structural()),
        other => panic!("expected UnresolvedReference, got {other:?}"),
    }
    assert!(dashboard.league.is_ok());
}
