//! Core squad vocabulary: lines, roles, slots, and prepared players.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Separator used in eligibility strings and bye descriptors.
pub const SEPARATOR: char = '|';

/// Position category of a slot.
///
/// Field lines are DEF, MID, RUC, FWD. The bench additionally has a UTIL
/// slot that accepts any player.
///
/// Lines order by their code (`DEF < FWD < MID < RUC < UTIL`), which is
/// the order used for output rows; [`Line::FIELD`] and [`Line::BENCH`]
/// keep display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Line {
    Def,
    Mid,
    Ruc,
    Fwd,
    Util,
}

impl Line {
    /// Lines with on-field slots, in display order.
    pub const FIELD: [Line; 4] = [Line::Def, Line::Mid, Line::Ruc, Line::Fwd];

    /// Lines with bench slots, in display order.
    pub const BENCH: [Line; 5] = [Line::Def, Line::Mid, Line::Ruc, Line::Fwd, Line::Util];

    /// Short code (`"DEF"`, `"MID"`, ...).
    pub fn code(self) -> &'static str {
        match self {
            Line::Def => "DEF",
            Line::Mid => "MID",
            Line::Ruc => "RUC",
            Line::Fwd => "FWD",
            Line::Util => "UTIL",
        }
    }

    /// Parses a line code. Surrounding whitespace is ignored.
    pub fn from_code(code: &str) -> Option<Line> {
        match code.trim() {
            "DEF" => Some(Line::Def),
            "MID" => Some(Line::Mid),
            "RUC" => Some(Line::Ruc),
            "FWD" => Some(Line::Fwd),
            "UTIL" => Some(Line::Util),
            _ => None,
        }
    }

    /// Whether this line has on-field slots.
    pub fn is_field(self) -> bool {
        self != Line::Util
    }

    /// Position of this line in [`Line::BENCH`].
    pub(crate) fn slot_index(self) -> usize {
        self as usize
    }
}

impl Ord for Line {
    fn cmp(&self, other: &Self) -> Ordering {
        self.code().cmp(other.code())
    }
}

impl PartialOrd for Line {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Set of field lines a player may fill.
///
/// Stored as a bitmask over [`Line::FIELD`]. UTIL is never a member; the
/// UTIL bench slot is open to every player regardless of this set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PositionSet(u8);

impl PositionSet {
    /// The empty set.
    pub fn empty() -> Self {
        Self(0)
    }

    /// Builds a set from field lines. UTIL entries are ignored.
    pub fn of(lines: &[Line]) -> Self {
        lines.iter().fold(Self::empty(), |set, &l| set.with(l))
    }

    /// Parses a `|`-separated eligibility string such as `"DEF|MID"`.
    ///
    /// A string without the separator is a single position. Returns an
    /// error naming the offending token for empty strings, unknown codes,
    /// and `UTIL` (which is a slot, not a position).
    pub fn parse(text: &str) -> Result<Self, String> {
        let mut set = Self::empty();
        for token in text.split(SEPARATOR) {
            let token = token.trim();
            match Line::from_code(token) {
                Some(line) if line.is_field() => set = set.with(line),
                _ => return Err(format!("unknown position {token:?}")),
            }
        }
        Ok(set)
    }

    /// Returns a copy of this set with `line` added.
    pub fn with(self, line: Line) -> Self {
        if line.is_field() {
            Self(self.0 | (1 << line.slot_index()))
        } else {
            self
        }
    }

    /// Whether `line` is in the set.
    pub fn contains(self, line: Line) -> bool {
        line.is_field() && self.0 & (1 << line.slot_index()) != 0
    }

    /// Whether a player with this set may occupy a `line` slot.
    ///
    /// UTIL accepts everyone.
    pub fn admits(self, line: Line) -> bool {
        line == Line::Util || self.contains(line)
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Member lines in display order.
    pub fn iter(self) -> impl Iterator<Item = Line> {
        Line::FIELD.into_iter().filter(move |&l| self.contains(l))
    }
}

impl fmt::Display for PositionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let codes: Vec<&str> = self.iter().map(Line::code).collect();
        f.write_str(&codes.join("|"))
    }
}

/// Whether a slot is a starting slot or a reserve.
///
/// Ordering places `OnField` before `Bench`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "On Field")]
    OnField,
    #[serde(rename = "Bench")]
    Bench,
}

impl Role {
    /// Display label (`"On Field"` or `"Bench"`).
    pub fn label(self) -> &'static str {
        match self {
            Role::OnField => "On Field",
            Role::Bench => "Bench",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single squad slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    OnField(Line),
    Bench(Line),
}

impl Slot {
    pub fn role(self) -> Role {
        match self {
            Slot::OnField(_) => Role::OnField,
            Slot::Bench(_) => Role::Bench,
        }
    }

    pub fn line(self) -> Line {
        match self {
            Slot::OnField(line) | Slot::Bench(line) => line,
        }
    }
}

/// One selected player and the slot they occupy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assignment {
    /// Index of the player in the prepared pool.
    pub player: usize,
    /// Assigned slot.
    pub slot: Slot,
}

/// A player after preparation, with derived attributes filled in.
///
/// Records are built once by [`prepare_pool`](super::prepare_pool) and
/// only read afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerRecord {
    /// Dense index into the prepared pool.
    pub index: usize,
    pub name: String,
    /// Eligibility string as supplied (e.g. `"DEF|MID"`).
    pub position: String,
    pub eligible: PositionSet,
    /// Numeric price, already normalized.
    pub price: f64,
    /// Raw projected average.
    pub expected_avg: f64,
    pub early_bye: bool,
    /// Projected average after the early-bye adjustment.
    pub adjusted_avg: f64,
}
