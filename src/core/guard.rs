//! Guard predicates for controlling transitions.
//!
//! Guards are boolean functions over the current [`FlowState`] and request
//! parameters. They are registered by name on the flow definition and
//! referenced by name from events and transition rules through a
//! [`GuardRef`], so the transition table itself stays inert data.

use super::ids::StateId;
use super::params::Params;
use super::state::FlowState;
use std::fmt;
use std::sync::Arc;

/// What a guard gets to look at.
#[derive(Clone, Copy, Debug)]
pub struct GuardContext<'a> {
    state: &'a FlowState,
    params: &'a Params,
}

impl<'a> GuardContext<'a> {
    pub fn new(state: &'a FlowState, params: &'a Params) -> Self {
        Self { state, params }
    }

    pub fn state(&self) -> &'a FlowState {
        self.state
    }

    pub fn params(&self) -> &'a Params {
        self.params
    }

    pub fn current_state(&self) -> Option<&'a StateId> {
        self.state.current_state()
    }
}

type Predicate = Arc<dyn Fn(&GuardContext<'_>) -> bool + Send + Sync>;

/// Predicate that determines whether an event or rule is eligible.
///
/// Guards should be pure: they may run several times per request (once
/// while computing permitted events, again when firing).
///
/// # Example
///
/// ```rust
/// use flowstate::core::{FlowState, Guard, GuardContext, Params};
///
/// let finished = Guard::new(|ctx: &GuardContext<'_>| {
///     ctx.state().int("nights").unwrap_or(0) >= 2
/// });
///
/// let params = Params::new();
/// let state = FlowState::new().with("nights", 2);
/// assert!(finished.check(&GuardContext::new(&state, &params)));
/// ```
#[derive(Clone)]
pub struct Guard {
    predicate: Predicate,
}

impl Guard {
    /// Create a guard from a predicate function.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&GuardContext<'_>) -> bool + Send + Sync + 'static,
    {
        Self {
            predicate: Arc::new(predicate),
        }
    }

    /// A guard that passes through to a user field's truthiness.
    ///
    /// # Example
    ///
    /// ```rust
    /// use flowstate::core::{FlowState, Guard, GuardContext, Params};
    ///
    /// let valid = Guard::field("valid");
    /// let params = Params::new();
    ///
    /// let state = FlowState::new();
    /// assert!(!valid.check(&GuardContext::new(&state, &params)));
    ///
    /// let state = state.with("valid", true);
    /// assert!(valid.check(&GuardContext::new(&state, &params)));
    /// ```
    pub fn field(name: impl Into<String>) -> Self {
        let name = name.into();
        Self::new(move |ctx| ctx.state().is_truthy(&name))
    }

    pub fn check(&self, ctx: &GuardContext<'_>) -> bool {
        (self.predicate)(ctx)
    }
}

impl fmt::Debug for Guard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Guard(..)")
    }
}

/// A reference to a registered guard, from an event or transition rule.
///
/// `expected` is `true` for `if`-style references and `false` for
/// `unless`-style ones.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GuardRef {
    pub name: String,
    pub expected: bool,
}

impl GuardRef {
    /// Eligible when the guard returns `true`.
    pub fn when(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            expected: true,
        }
    }

    /// Eligible when the guard returns `false`.
    pub fn unless(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            expected: false,
        }
    }

    pub fn passes(&self, result: bool) -> bool {
        result == self.expected
    }
}

impl fmt::Display for GuardRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.expected {
            write!(f, "if {}", self.name)
        } else {
            write!(f, "unless {}", self.name)
        }
    }
}
