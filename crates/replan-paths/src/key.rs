/// Frontier priority: ordered lexicographically, `primary` first.
///
/// For a node `n` the planner uses
/// `(min(g, rhs) + h(start, n) + km, min(g, rhs))`.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Key {
    pub primary: f64,
    pub secondary: f64,
}

impl Key {
    /// Create a key.
    #[inline]
    pub const fn new(primary: f64, secondary: f64) -> Self {
        Self { primary, secondary }
    }
}
