//! Fantasy squad selection as a 0/1 integer program.
//!
//! - **IP (Integer Programming)**: Domain-agnostic modeling layer for binary
//!   linear programs, with a pluggable exact solver seam and a pure-Rust
//!   `microlp` backend.
//! - **Squad**: Player preparation (eligibility, early-bye adjustment,
//!   price normalization), the squad constraint model, result assembly
//!   with a deterministic output ordering, and CSV export.
//!
//! # Architecture
//!
//! `ip` knows nothing about players or lines; `squad` expresses the roster
//! rules on top of it and never depends on a particular engine. Each run is
//! a pure function of (pool, configuration).

pub mod error;
pub mod ip;
pub mod squad;

pub use error::{Result, SquadError};
