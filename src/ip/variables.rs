//! IP variable types.

use std::fmt;

/// Handle to a variable inside an [`IpModel`](super::IpModel).
///
/// Handles are dense indices into the model's variable arena, assigned in
/// declaration order. They are only meaningful for the model that issued
/// them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VarId(pub(crate) usize);

impl VarId {
    /// Position of the variable in the model's arena.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for VarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// A binary decision variable (takes the value 0 or 1).
#[derive(Debug, Clone)]
pub struct BinaryVar {
    /// Variable name, used in logs and diagnostics.
    pub name: String,
    /// Value the variable is pinned to, if any. Backends substitute fixed
    /// variables as constants instead of searching over them.
    pub fixed: Option<bool>,
}

impl BinaryVar {
    /// Creates a new free binary variable.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fixed: None,
        }
    }

    /// Whether the variable is free to take either value.
    pub fn is_free(&self) -> bool {
        self.fixed.is_none()
    }
}
