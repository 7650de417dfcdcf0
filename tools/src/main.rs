//! dashboard-runner: headless runner for the league dashboard pipeline.
//!
//! Stands in for the fetch collaborator: payloads are read from JSON files
//! in a data directory instead of the league API.
//!
//! Usage:
//!   dashboard-runner --data-dir ./data --league 148968
//!   dashboard-runner --data-dir ./data --config dashboard.json --json

use anyhow::Result;
use fpl_core::{
    aggregate::Distribution,
    auxiliary::{choice_records, transaction_records},
    config::DashboardConfig,
    dashboard::{build_dashboard, Dashboard, DashboardInputs, Diagnostic, FetchOutcome},
    types::Row,
};
use std::env;
use std::path::Path;

/// Rendering model handed to a chart/page layer.
#[derive(serde::Serialize)]
struct RenderModel<'a> {
    league_name: Option<&'a str>,
    standings_over_weeks: Vec<Row>,
    top_players: Vec<(&'a str, &'a str, i64)>,
    team_distribution: Option<&'a Distribution>,
    position_distribution: Option<&'a Distribution>,
    draft_picks: Vec<(Option<i64>, Option<i64>, String, Option<String>)>,
    transactions: usize,
    diagnostics: Vec<Diagnostic>,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let data_dir = args
        .windows(2)
        .find(|w| w[0] == "--data-dir")
        .map(|w| w[1].as_str())
        .unwrap_or("./data");
    let json_mode = args.iter().any(|a| a == "--json");

    let mut config = match args.windows(2).find(|w| w[0] == "--config") {
        Some(w) => DashboardConfig::load(&w[1])?,
        None => DashboardConfig::default(),
    };
    config.league_id = parse_arg(&args, "--league", config.league_id);
    config.top_n = parse_arg(&args, "--top", config.top_n).max(1);

    if !json_mode {
        println!("League dashboard — dashboard-runner");
        println!("  league:    {}", config.league_id);
        println!("  top_n:     {}", config.top_n);
        println!("  data_dir:  {data_dir}");
        println!();
    }

    let dir = Path::new(data_dir);
    let inputs = DashboardInputs {
        bootstrap:    read_payload(dir, &config.bootstrap_path()),
        details:      read_payload(dir, &config.details_path()),
        choices:      read_payload(dir, &config.choices_path()),
        transactions: read_payload(dir, &config.transactions_path()),
    };

    let dashboard = build_dashboard(&inputs, &config);

    if json_mode {
        let model = render_model(&dashboard);
        println!("{}", serde_json::to_string_pretty(&model)?);
    } else {
        print_summary(&dashboard);
    }
    Ok(())
}

/// File-backed fetch: any read or parse failure becomes `FetchFailed`.
fn read_payload(dir: &Path, name: &str) -> FetchOutcome {
    let path = dir.join(name);
    let content = match std::fs::read_to_string(&path) {
        Ok(c) => c,
        Err(e) => {
            log::warn!("cannot read {}: {e}", path.display());
            return FetchOutcome::FetchFailed { reason: format!("{}: {e}", path.display()) };
        }
    };
    match serde_json::from_str(&content) {
        Ok(value) => FetchOutcome::Fetched(value),
        Err(e) => FetchOutcome::FetchFailed { reason: format!("{}: {e}", path.display()) },
    }
}

fn render_model(dashboard: &Dashboard) -> RenderModel<'_> {
    let players = dashboard.players.as_ref().ok();
    let league = dashboard.league.as_ref().ok();

    RenderModel {
        league_name: league.map(|l| l.league_name.as_str()),
        standings_over_weeks: league
            .map(|l| l.joined.rows.iter().map(|r| r.to_row()).collect())
            .unwrap_or_default(),
        top_players: players
            .map(|p| {
                p.top
                    .iter()
                    .map(|pl| (pl.name.as_str(), pl.team.as_str(), pl.total_points))
                    .collect()
            })
            .unwrap_or_default(),
        team_distribution: players.map(|p| &p.team_distribution),
        position_distribution: players.map(|p| &p.position_distribution),
        draft_picks: dashboard
            .choices
            .as_ref()
            .map(|table| {
                choice_records(table)
                    .into_iter()
                    .map(|c| {
                        let player = c.player_full_name();
                        (c.round, c.pick, player, c.entry_name)
                    })
                    .collect()
            })
            .unwrap_or_default(),
        transactions: dashboard.transactions.as_ref().map(|t| t.len()).unwrap_or(0),
        diagnostics: dashboard.diagnostics(),
    }
}

fn print_summary(dashboard: &Dashboard) {
    match &dashboard.league {
        Ok(league) => {
            println!("=== LEAGUE: {} ===", league.league_name);
            println!("  entries:         {}", league.entries.len());
            println!("  standings rows:  {}", league.standings.len());
            for row in league.joined.rows.iter().filter(|r| r.week() == Some(1)) {
                println!(
                    "  {:<24} week 1 total {}",
                    row.entry_name.as_deref().unwrap_or("(unknown)"),
                    row.total().map(|t| format!("{t:.0}")).unwrap_or_else(|| "-".into())
                );
            }
        }
        Err(e) => println!("=== LEAGUE: no data ({e}) ==="),
    }

    println!();
    match &dashboard.players {
        Ok(players) => {
            println!("=== TOP {} PLAYERS ===", players.top.len());
            for (rank, p) in players.top.iter().enumerate() {
                println!("  {:>2}. {:<20} {:<16} {:<12} {}", rank + 1, p.name, p.team, p.position, p.total_points);
            }
            println!();
            println!("=== PLAYERS BY POSITION ===");
            for (position, count) in players.position_distribution.iter() {
                println!("  {position:<12} {count}");
            }
            println!();
            println!("=== PLAYERS BY TEAM ===");
            for (team, count) in players.team_distribution.iter() {
                println!("  {team:<16} {count}");
            }
        }
        Err(e) => println!("=== PLAYERS: no data ({e}) ==="),
    }

    println!();
    match &dashboard.choices {
        Ok(choices) => println!("  draft picks:     {}", choices.len()),
        Err(e) => println!("  draft picks:     no data ({e})"),
    }
    match &dashboard.transactions {
        Ok(transactions) => {
            let dated = transaction_records(transactions)
                .iter()
                .filter(|t| t.added.is_some())
                .count();
            println!("  transactions:    {} ({dated} dated)", transactions.len());
        }
        Err(e) => println!("  transactions:    no data ({e})"),
    }

    let diagnostics = dashboard.diagnostics();
    if !diagnostics.is_empty() {
        println!();
        println!("=== DIAGNOSTICS ===");
        for d in diagnostics {
            println!("  [{}] {}", d.section, d.message);
        }
    }
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
