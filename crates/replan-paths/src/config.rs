/// Default tolerance when comparing `g` and `rhs`.
pub const DEFAULT_EPSILON: f64 = 1e-6;

/// Planner configuration, fixed at construction.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct SearchConfig {
    /// Two costs closer than this are equal. Applied to every consistency
    /// check: frontier membership, loop termination and path reconstruction.
    pub epsilon: f64,
    /// Stop a search after this many frontier expansions. The call then returns
    /// an empty path; pending work stays queued for the next replanning call.
    pub max_expansions: Option<usize>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
            max_expansions: None,
        }
    }
}

impl SearchConfig {
    /// Replace the tolerance.
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Cap the number of expansions per call.
    pub fn with_max_expansions(mut self, limit: usize) -> Self {
        self.max_expansions = Some(limit);
        self
    }

    /// Whether `a` and `b` are equal within the tolerance. Equal infinities are
    /// equal.
    #[inline]
    pub fn approx_eq(&self, a: f64, b: f64) -> bool {
        a == b || (a - b).abs() < self.epsilon
    }
}
