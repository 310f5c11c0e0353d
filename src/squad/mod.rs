//! Fantasy squad selection.
//!
//! Chooses a fixed-size squad from a priced player pool, split into
//! on-field starters and bench reserves by line, maximizing the summed
//! adjusted average under a salary cap, eligibility counts, exact slot
//! counts and a per-player bench price ceiling.
//!
//! # Pipeline
//!
//! 1. **Preparation** ([`prepare_pool`]): eligibility sets, early-bye flag,
//!    adjusted average, price normalization.
//! 2. **Model** ([`SquadModel::build`]): the 0/1 program over the pool.
//! 3. **Solve**: any [`IpSolver`](crate::ip::IpSolver); an infeasible
//!    model yields [`SquadError::Infeasible`](crate::SquadError::Infeasible).
//! 4. **Assembly** ([`assemble`], [`verify`]): ordered [`SquadRow`]s.
//!
//! [`SquadRunner`] chains all four.
//!
//! # Examples
//!
//! ```
//! use u_squad::squad::{RawPlayerRow, SquadConfig, SquadRunner};
//! use u_squad::SquadError;
//!
//! // Two players cannot fill a 30-man squad.
//! let rows = vec![
//!     RawPlayerRow::new("A", "DEF", "$650,000", 85.0, None),
//!     RawPlayerRow::new("B", "RUC", "$300,000", 60.0, Some("12|13")),
//! ];
//! let err = SquadRunner::run(&rows, &SquadConfig::default()).unwrap_err();
//! assert!(matches!(err, SquadError::Infeasible));
//! ```

mod assemble;
mod builder;
mod config;
pub mod export;
mod prepare;
mod runner;
mod types;

pub use assemble::{assemble, sort_rows, verify, SquadRow, SquadSelection};
pub use builder::SquadModel;
pub use config::{
    ConfigError, CountBound, EligibilityRules, LineCounts, SquadConfig, BENCH_PRICE_LIMIT,
    SALARY_CAP, SQUAD_SIZE,
};
pub use prepare::{
    adjusted_average, is_early_bye, normalize_price, prepare_player, prepare_pool,
    PreparedPool, RawPlayerRow, RejectedRow,
};
pub use runner::{SquadResult, SquadRunner};
pub use types::{Assignment, Line, PlayerRecord, PositionSet, Role, Slot, SEPARATOR};
