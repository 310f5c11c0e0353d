//! Squad rules: salary cap, bench price ceiling, eligibility counts, slots.

use super::types::Line;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Default total price ceiling across the whole squad.
pub const SALARY_CAP: f64 = 18_300_000.0;

/// Default maximum price of any single bench player.
pub const BENCH_PRICE_LIMIT: f64 = 400_000.0;

/// Default number of selected players.
pub const SQUAD_SIZE: u32 = 30;

/// Configuration error.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Bound on how many selected players are eligible for a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountBound {
    AtLeast(u32),
    AtMost(u32),
    Exactly(u32),
}

impl CountBound {
    /// Whether `count` satisfies the bound.
    pub fn admits(self, count: u32) -> bool {
        match self {
            CountBound::AtLeast(n) => count >= n,
            CountBound::AtMost(n) => count <= n,
            CountBound::Exactly(n) => count == n,
        }
    }
}

/// Per-line eligibility rules. `None` leaves a line unconstrained.
///
/// Keys are line codes (`DEF`, `MID`, `RUC`, `FWD`); anything else,
/// including `UTIL`, is rejected when parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "UPPERCASE", deny_unknown_fields)]
pub struct EligibilityRules {
    pub def: Option<CountBound>,
    pub mid: Option<CountBound>,
    pub ruc: Option<CountBound>,
    pub fwd: Option<CountBound>,
}

impl EligibilityRules {
    /// Rule for a field line. UTIL never has one.
    pub fn get(&self, line: Line) -> Option<CountBound> {
        match line {
            Line::Def => self.def,
            Line::Mid => self.mid,
            Line::Ruc => self.ruc,
            Line::Fwd => self.fwd,
            Line::Util => None,
        }
    }

    pub fn with(mut self, line: Line, bound: CountBound) -> Self {
        match line {
            Line::Def => self.def = Some(bound),
            Line::Mid => self.mid = Some(bound),
            Line::Ruc => self.ruc = Some(bound),
            Line::Fwd => self.fwd = Some(bound),
            Line::Util => {}
        }
        self
    }

    /// Configured (line, bound) pairs in display order.
    pub fn iter(&self) -> impl Iterator<Item = (Line, CountBound)> + '_ {
        Line::FIELD
            .into_iter()
            .filter_map(|line| self.get(line).map(|bound| (line, bound)))
    }
}

/// Number of slots per line, keyed by line code. Lines omitted from a
/// config table have zero slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "UPPERCASE", deny_unknown_fields)]
pub struct LineCounts {
    pub def: u32,
    pub mid: u32,
    pub ruc: u32,
    pub fwd: u32,
    pub util: u32,
}

impl LineCounts {
    pub fn get(&self, line: Line) -> u32 {
        match line {
            Line::Def => self.def,
            Line::Mid => self.mid,
            Line::Ruc => self.ruc,
            Line::Fwd => self.fwd,
            Line::Util => self.util,
        }
    }

    pub fn with(mut self, line: Line, count: u32) -> Self {
        match line {
            Line::Def => self.def = count,
            Line::Mid => self.mid = count,
            Line::Ruc => self.ruc = count,
            Line::Fwd => self.fwd = count,
            Line::Util => self.util = count,
        }
        self
    }

    /// Total slots across all lines.
    pub fn total(&self) -> u32 {
        self.def + self.mid + self.ruc + self.fwd + self.util
    }
}

/// Rules for one squad selection run.
///
/// Defaults reproduce the standard 30-player format: 22 on-field slots
/// (6 DEF, 8 MID, 2 RUC, 6 FWD) and 8 bench slots (2 DEF, 2 MID, 1 RUC,
/// 2 FWD, 1 UTIL) under an 18.3M cap, with bench players capped at 400k
/// each.
///
/// # Examples
///
/// ```
/// use u_squad::squad::{CountBound, Line, SquadConfig};
///
/// let config = SquadConfig::from_toml_str(r#"
///     salary_cap = 17500000
///
///     [eligibility]
///     RUC = { exactly = 4 }
///     MID = { at_least = 10 }
/// "#).unwrap();
///
/// assert_eq!(config.salary_cap, 17_500_000.0);
/// assert_eq!(config.eligibility.get(Line::Ruc), Some(CountBound::Exactly(4)));
/// assert_eq!(config.eligibility.get(Line::Def), None);
/// assert_eq!(config.on_field.total(), 22);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SquadConfig {
    /// Maximum total price of the squad.
    pub salary_cap: f64,

    /// Maximum price of any individual bench player.
    pub bench_price_limit: f64,

    /// Exact number of selected players.
    pub squad_size: u32,

    /// Minimum/maximum/exact counts of selected players eligible per line.
    pub eligibility: EligibilityRules,

    /// Exact on-field slots per line. UTIL must be zero.
    pub on_field: LineCounts,

    /// Exact bench slots per line.
    pub bench: LineCounts,
}

impl Default for SquadConfig {
    fn default() -> Self {
        Self {
            salary_cap: SALARY_CAP,
            bench_price_limit: BENCH_PRICE_LIMIT,
            squad_size: SQUAD_SIZE,
            eligibility: EligibilityRules::default()
                .with(Line::Def, CountBound::AtLeast(8))
                .with(Line::Mid, CountBound::AtLeast(10))
                .with(Line::Ruc, CountBound::Exactly(3))
                .with(Line::Fwd, CountBound::AtLeast(8)),
            on_field: LineCounts {
                def: 6,
                mid: 8,
                ruc: 2,
                fwd: 6,
                util: 0,
            },
            bench: LineCounts {
                def: 2,
                mid: 2,
                ruc: 1,
                fwd: 2,
                util: 1,
            },
        }
    }
}

impl SquadConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if the file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    ///
    /// Omitted top-level keys keep their defaults; a table that is present
    /// replaces the default table as a whole. Unknown keys are errors, so a
    /// misspelled rule never goes missing silently.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn with_salary_cap(mut self, cap: f64) -> Self {
        self.salary_cap = cap;
        self
    }

    pub fn with_bench_price_limit(mut self, limit: f64) -> Self {
        self.bench_price_limit = limit;
        self
    }

    pub fn with_squad_size(mut self, size: u32) -> Self {
        self.squad_size = size;
        self
    }

    pub fn with_eligibility(mut self, rules: EligibilityRules) -> Self {
        self.eligibility = rules;
        self
    }

    pub fn with_on_field(mut self, counts: LineCounts) -> Self {
        self.on_field = counts;
        self
    }

    pub fn with_bench(mut self, counts: LineCounts) -> Self {
        self.bench = counts;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.salary_cap.is_finite() || self.salary_cap < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "salary_cap must be a non-negative number, got {}",
                self.salary_cap
            )));
        }
        if !self.bench_price_limit.is_finite() || self.bench_price_limit < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "bench_price_limit must be a non-negative number, got {}",
                self.bench_price_limit
            )));
        }
        if self.squad_size == 0 {
            return Err(ConfigError::Invalid("squad_size must be positive".into()));
        }
        if self.on_field.util != 0 {
            return Err(ConfigError::Invalid(
                "UTIL is a bench-only line; on_field.util must be 0".into(),
            ));
        }
        let slots = self.on_field.total() + self.bench.total();
        if slots != self.squad_size {
            return Err(ConfigError::Invalid(format!(
                "on-field and bench slots total {slots}, expected squad_size {}",
                self.squad_size
            )));
        }
        Ok(())
    }
}
