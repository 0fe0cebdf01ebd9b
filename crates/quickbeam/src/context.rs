//! Evaluation context configuration

/// Default nesting limit for parsing and evaluation.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Configuration for a Quickbeam session.
///
/// This is passed through parsing and evaluation and controls
/// behavior like nesting limits and commit semantics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvalContext {
    /// Maximum nesting depth (stack overflow protection)
    pub max_depth: usize,

    /// Roll the environment back when any statement of a program fails
    pub atomic: bool,

    /// Whether to trace evaluation (for debugging)
    pub trace: bool,
}

impl Default for EvalContext {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            atomic: false,
            trace: false,
        }
    }
}

impl EvalContext {
    /// Create a new context with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context with a custom nesting limit.
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            max_depth,
            ..Default::default()
        }
    }

    /// Set whether a failing program leaves the environment untouched.
    pub fn atomic(mut self, atomic: bool) -> Self {
        self.atomic = atomic;
        self
    }

    /// Set whether every evaluated node emits a trace event.
    pub fn trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }
}
