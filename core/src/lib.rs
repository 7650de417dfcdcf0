//! Normalization pipeline for fantasy league and player-catalog payloads.
//!
//! Data flow:
//!   bootstrap      → lookup → player → aggregate
//!   league details → league → join
//!   choices / transactions → auxiliary
//!
//! `dashboard` wires the flows together. Nothing here performs I/O
//! beyond reading a config file.

pub mod aggregate;
pub mod auxiliary;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod join;
pub mod league;
pub mod lookup;
pub mod player;
pub mod table;
pub mod types;
