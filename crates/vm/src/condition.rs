//! Branch conditions over the `n` and `z` flags.

use crate::machine::Flags;

/// A named branch condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Condition {
    /// Greater than: `!n && !z`.
    Gt,
    /// Greater than or equal: `z || !n`.
    Ge,
    /// Equal: `z`.
    Eq,
    /// Not equal: `!z`.
    Ne,
    /// Less than or equal: `z || n`.
    Le,
    /// Less than: `n && !z`.
    Lt,
}

/// All conditions, in table order.
pub const ALL_CONDITIONS: [Condition; 6] = [
    Condition::Gt,
    Condition::Ge,
    Condition::Eq,
    Condition::Ne,
    Condition::Le,
    Condition::Lt,
];

impl Condition {
    /// Look up a condition by its suffix name.
    pub fn from_name(name: &str) -> Option<Self> {
        ALL_CONDITIONS.iter().find(|c| c.name() == name).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            Condition::Gt => "gt",
            Condition::Ge => "ge",
            Condition::Eq => "eq",
            Condition::Ne => "ne",
            Condition::Le => "le",
            Condition::Lt => "lt",
        }
    }

    /// Evaluate the condition against the current flags.
    pub fn holds(self, flags: Flags) -> bool {
        let Flags { n, z, .. } = flags;
        match self {
            Condition::Gt => !n && !z,
            Condition::Ge => z || !n,
            Condition::Eq => z,
            Condition::Ne => !z,
            Condition::Le => z || n,
            Condition::Lt => n && !z,
        }
    }
}
