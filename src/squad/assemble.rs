//! Result assembly: solved assignments to ordered output rows.

use super::config::SquadConfig;
use super::types::{Assignment, Line, PlayerRecord, Role};
use crate::error::{Result, SquadError};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;

/// One output record: a selected player in their slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SquadRow {
    pub name: String,
    /// Line of the assigned slot.
    pub line: Line,
    /// The player's full eligibility string.
    pub position: String,
    /// Numeric price; `None` marks a value that could not be parsed.
    #[serde(deserialize_with = "super::export::deserialize_price")]
    pub price: Option<f64>,
    pub expected_avg: f64,
    pub adjusted_avg: f64,
    pub role: Role,
}

impl SquadRow {
    /// Compares two rows under the output ordering: role (on-field first),
    /// line code, then price with missing prices last.
    pub fn output_order(&self, other: &Self) -> Ordering {
        self.role
            .cmp(&other.role)
            .then_with(|| self.line.cmp(&other.line))
            .then_with(|| match (self.price, other.price) {
                (Some(a), Some(b)) => a.total_cmp(&b),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            })
    }
}

/// Sorts rows into the output ordering. Stable for equal keys.
pub fn sort_rows(rows: &mut [SquadRow]) {
    rows.sort_by(SquadRow::output_order);
}

/// The selected squad.
///
/// Holds the player-to-slot assignment and the ordered output rows built
/// from it. Built once by [`assemble`]; not mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct SquadSelection {
    assignments: Vec<Assignment>,
    rows: Vec<SquadRow>,
}

impl SquadSelection {
    /// Player-to-slot assignment, in player order.
    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    /// Output rows in output order.
    pub fn rows(&self) -> &[SquadRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// On-field rows, in output order.
    pub fn on_field(&self) -> impl Iterator<Item = &SquadRow> {
        self.rows.iter().filter(|r| r.role == Role::OnField)
    }

    /// Bench rows, in output order.
    pub fn bench(&self) -> impl Iterator<Item = &SquadRow> {
        self.rows.iter().filter(|r| r.role == Role::Bench)
    }

    /// Rows for one (role, line) group, cheapest first.
    pub fn rows_for(&self, role: Role, line: Line) -> impl Iterator<Item = &SquadRow> {
        self.rows
            .iter()
            .filter(move |r| r.role == role && r.line == line)
    }

    /// Number of rows per line for a role, in [`Line::BENCH`] order.
    pub fn line_counts(&self, role: Role) -> Vec<(Line, usize)> {
        Line::BENCH
            .into_iter()
            .map(|line| (line, self.rows_for(role, line).count()))
            .collect()
    }

    /// Sum of known prices.
    pub fn total_price(&self) -> f64 {
        self.rows.iter().filter_map(|r| r.price).sum()
    }

    /// Sum of adjusted averages (the optimized objective).
    pub fn total_adjusted_avg(&self) -> f64 {
        self.rows.iter().map(|r| r.adjusted_avg).sum()
    }
}

/// Builds the ordered selection from solved assignments.
///
/// Emits one row per assignment, then sorts by (role, line, price).
pub fn assemble(players: &[PlayerRecord], assignments: Vec<Assignment>) -> Result<SquadSelection> {
    let mut rows = Vec::with_capacity(assignments.len());
    for a in &assignments {
        let p = players.get(a.player).ok_or_else(|| {
            SquadError::Invariant(format!("assignment references unknown player {}", a.player))
        })?;
        rows.push(SquadRow {
            name: p.name.clone(),
            line: a.slot.line(),
            position: p.position.clone(),
            price: Some(p.price),
            expected_avg: p.expected_avg,
            adjusted_avg: p.adjusted_avg,
            role: a.slot.role(),
        });
    }
    sort_rows(&mut rows);
    Ok(SquadSelection { assignments, rows })
}

/// Checks a solved assignment against every output invariant.
///
/// Reports the first violation found: squad size, salary cap, a player in
/// two slots, an ineligible non-UTIL slot, an over-priced bench player, or
/// a slot count that differs from the configuration.
pub fn verify(
    players: &[PlayerRecord],
    assignments: &[Assignment],
    config: &SquadConfig,
) -> Result<()> {
    let fail = |msg: String| Err(SquadError::Invariant(msg));

    if assignments.len() != config.squad_size as usize {
        return fail(format!(
            "squad has {} players, expected {}",
            assignments.len(),
            config.squad_size
        ));
    }

    let mut seen = HashSet::with_capacity(assignments.len());
    let mut spend = 0.0;
    for a in assignments {
        let Some(p) = players.get(a.player) else {
            return fail(format!("unknown player index {}", a.player));
        };
        if !seen.insert(a.player) {
            return fail(format!("{} occupies more than one slot", p.name));
        }
        let line = a.slot.line();
        if !p.eligible.admits(line) {
            return fail(format!("{} ({}) placed at {line}", p.name, p.position));
        }
        match a.slot.role() {
            Role::OnField if !line.is_field() => {
                return fail(format!("{} placed on field at {line}", p.name));
            }
            Role::Bench if p.price > config.bench_price_limit => {
                return fail(format!(
                    "{} benched at price {} above limit {}",
                    p.name, p.price, config.bench_price_limit
                ));
            }
            _ => {}
        }
        spend += p.price;
    }

    // Small slack for float accumulation over cents.
    if spend > config.salary_cap + 1e-6 {
        return fail(format!(
            "squad costs {spend}, above cap {}",
            config.salary_cap
        ));
    }

    for line in Line::BENCH {
        for (role, expected) in [
            (Role::OnField, config.on_field.get(line)),
            (Role::Bench, config.bench.get(line)),
        ] {
            let actual = assignments
                .iter()
                .filter(|a| a.slot.role() == role && a.slot.line() == line)
                .count();
            if actual != expected as usize {
                return fail(format!(
                    "{role} {line} has {actual} players, expected {expected}"
                ));
            }
        }
    }

    for (line, bound) in config.eligibility.iter() {
        let count = assignments
            .iter()
            .filter(|a| players[a.player].eligible.contains(line))
            .count() as u32;
        if !bound.admits(count) {
            return fail(format!(
                "{count} selected players eligible for {line}, rule {bound:?}"
            ));
        }
    }

    Ok(())
}
