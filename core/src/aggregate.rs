//! Rankings and category distributions over normalized players.

use crate::{
    lookup::{PositionLookup, TeamLookup},
    player::NormalizedPlayer,
};
use serde::Serialize;
use std::collections::HashMap;

pub const DEFAULT_TOP_N: usize = 10;

/// Count of players per category, in category order.
///
/// Every category handed to `distribution_by` is present, zero or not.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Distribution {
    counts:        Vec<(String, usize)>,
    /// Players whose key matched no category. Zero for a complete key.
    uncategorised: usize,
}

impl Distribution {
    pub fn get(&self, category: &str) -> Option<usize> {
        self.counts
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, count)| *count)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(name, count)| (name.as_str(), *count))
    }

    pub fn len(&self) -> usize { self.counts.len() }
    pub fn is_empty(&self) -> bool { self.counts.is_empty() }
    pub fn uncategorised(&self) -> usize { self.uncategorised }

    /// Sum over all categories.
    pub fn total(&self) -> usize {
        self.counts.iter().map(|(_, count)| count).sum()
    }
}

/// The `n` highest scorers, best first. Equal scores keep input order.
pub fn top_n(players: &[NormalizedPlayer], n: usize) -> Vec<NormalizedPlayer> {
    let mut ranked = players.to_vec();
    // sort_by is stable.
    ranked.sort_by(|a, b| b.total_points.cmp(&a.total_points));
    ranked.truncate(n);
    ranked
}

/// Count players per category. The category set comes from the caller,
/// not from the players, so empty categories still appear.
pub fn distribution_by<F, I, S>(players: &[NormalizedPlayer], key_fn: F, categories: I) -> Distribution
where
    F: Fn(&NormalizedPlayer) -> &str,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut counts: Vec<(String, usize)> = Vec::new();
    let mut slot: HashMap<String, usize> = HashMap::new();
    for category in categories {
        let category = category.as_ref();
        if !slot.contains_key(category) {
            slot.insert(category.to_string(), counts.len());
            counts.push((category.to_string(), 0));
        }
    }

    let mut uncategorised = 0;
    for player in players {
        let key = key_fn(player);
        match slot.get(key) {
            Some(&index) => counts[index].1 += 1,
            None => {
                log::warn!("player {} has category '{key}' outside the category set", player.id);
                uncategorised += 1;
            }
        }
    }

    Distribution { counts, uncategorised }
}

pub fn team_distribution(players: &[NormalizedPlayer], teams: &TeamLookup) -> Distribution {
    distribution_by(players, |p| p.team.as_str(), teams.categories())
}

pub fn position_distribution(players: &[NormalizedPlayer], positions: &PositionLookup) -> Distribution {
    distribution_by(players, |p| p.position.as_str(), positions.categories())
}
