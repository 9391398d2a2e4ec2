//! The state container persisted between requests.
//!
//! A [`FlowState`] holds the current state identifier plus an explicitly
//! keyed bag of user fields. The engine only ever reads and writes the
//! current state identifier; user fields belong to the integrator's hooks,
//! guards and actions.

use super::ids::StateId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single user field value.
///
/// Values are externally tagged so that both self-describing (JSON) and
/// compact (bincode) encodings round-trip.
///
/// # Example
///
/// ```rust
/// use flowstate::core::FieldValue;
///
/// assert!(FieldValue::from(true).is_truthy());
/// assert!(FieldValue::from(0).is_truthy());
/// assert!(!FieldValue::Null.is_truthy());
/// assert_eq!(FieldValue::from("Monday").as_text(), Some("Monday"));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    List(Vec<FieldValue>),
}

impl FieldValue {
    /// Truthiness used by state-field guards: only `Null` and `false` are
    /// falsy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Self::Null | Self::Bool(false))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            Self::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[FieldValue]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl<T: Into<FieldValue>> From<Vec<T>> for FieldValue {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// The unit of persistence for one flow instance.
///
/// `current_state` is `None` only until the first load of a fresh
/// instance; the lifecycle fills it with the flow's initial state.
///
/// # Example
///
/// ```rust
/// use flowstate::core::FlowState;
///
/// let mut state = FlowState::new();
/// assert!(state.current_state().is_none());
///
/// state.set("nights", 1);
/// state.set("clean", true);
/// assert_eq!(state.int("nights"), Some(1));
/// assert!(state.is_truthy("clean"));
/// assert!(!state.is_truthy("tired"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowState {
    current_state: Option<StateId>,
    #[serde(default)]
    fields: BTreeMap<String, FieldValue>,
}

impl FlowState {
    /// Create an empty state with no current state identifier.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a state positioned at `state`.
    pub fn at(state: impl Into<StateId>) -> Self {
        Self {
            current_state: Some(state.into()),
            fields: BTreeMap::new(),
        }
    }

    pub fn current_state(&self) -> Option<&StateId> {
        self.current_state.as_ref()
    }

    pub fn set_current_state(&mut self, state: impl Into<StateId>) {
        self.current_state = Some(state.into());
    }

    /// Builder-style field assignment.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.set(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Set a field, returning the previous value if any.
    pub fn set(
        &mut self,
        name: impl Into<String>,
        value: impl Into<FieldValue>,
    ) -> Option<FieldValue> {
        self.fields.insert(name.into(), value.into())
    }

    pub fn remove(&mut self, name: &str) -> Option<FieldValue> {
        self.fields.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Whether the field exists and is truthy. Missing fields are falsy.
    pub fn is_truthy(&self, name: &str) -> bool {
        self.get(name).is_some_and(FieldValue::is_truthy)
    }

    pub fn int(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(FieldValue::as_int)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(FieldValue::as_text)
    }

    /// Iterate user fields in key order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}
