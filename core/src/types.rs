//! Shared primitive types used across the pipeline.

use serde_json::{Map, Value};

/// Team id as it appears in the bootstrap catalog.
pub type TeamId = i64;

/// Element-type (position) id as it appears in the bootstrap catalog.
pub type ElementTypeId = i64;

/// A join key after canonicalization. Always a string.
pub type EntryKey = String;

/// One table row: column name to cell value, source columns preserved.
pub type Row = Map<String, Value>;
