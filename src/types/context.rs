//! Evaluation context threaded through rules.

use std::{collections::HashMap, fmt};

use serde::{Deserialize, Serialize};

use crate::types::Decision;

/// A single context attribute.
///
/// Values are loosely typed and mirror the JSON data model, so request
/// metadata (token claims, headers, feature flags) can be carried
/// without a schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContextValue {
    /// Absent or null.
    Null,
    /// Boolean.
    Bool(bool),
    /// Signed integer.
    Integer(i64),
    /// Floating point number.
    Float(f64),
    /// UTF-8 string.
    String(String),
    /// Ordered list of values.
    Array(Vec<ContextValue>),
    /// String-keyed map of values.
    Object(HashMap<String, ContextValue>),
}

impl ContextValue {
    /// Returns `true` for [`ContextValue::Null`].
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// The boolean value, if this is a `Bool`.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// The integer value, if this is an `Integer`.
    #[must_use]
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(value) => Some(*value),
            _ => None,
        }
    }

    /// The float value, if this is a `Float`.
    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(value) => Some(*value),
            _ => None,
        }
    }

    /// The string slice, if this is a `String`.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            _ => None,
        }
    }

    /// The elements, if this is an `Array`.
    #[must_use]
    pub fn as_array(&self) -> Option<&[ContextValue]> {
        match self {
            Self::Array(values) => Some(values),
            _ => None,
        }
    }

    /// The entries, if this is an `Object`.
    #[must_use]
    pub fn as_object(&self) -> Option<&HashMap<String, ContextValue>> {
        match self {
            Self::Object(entries) => Some(entries),
            _ => None,
        }
    }
}

impl From<bool> for ContextValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for ContextValue {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<i64> for ContextValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<u32> for ContextValue {
    fn from(value: u32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<f64> for ContextValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for ContextValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for ContextValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl<V: Into<ContextValue>> From<Vec<V>> for ContextValue {
    fn from(values: Vec<V>) -> Self {
        Self::Array(values.into_iter().map(Into::into).collect())
    }
}

impl<V: Into<ContextValue>> From<Option<V>> for ContextValue {
    fn from(value: Option<V>) -> Self {
        match value {
            Some(value) => value.into(),
            None => Self::Null,
        }
    }
}

impl From<serde_json::Value> for ContextValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(value) => Self::Bool(value),
            serde_json::Value::Number(number) => match number.as_i64() {
                Some(value) => Self::Integer(value),
                None => Self::Float(number.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(value) => Self::String(value),
            serde_json::Value::Array(values) => {
                Self::Array(values.into_iter().map(Into::into).collect())
            }
            serde_json::Value::Object(entries) => Self::Object(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, value.into()))
                    .collect(),
            ),
        }
    }
}

impl From<ContextValue> for serde_json::Value {
    fn from(value: ContextValue) -> Self {
        match value {
            ContextValue::Null => Self::Null,
            ContextValue::Bool(value) => Self::Bool(value),
            ContextValue::Integer(value) => Self::from(value),
            ContextValue::Float(value) => {
                serde_json::Number::from_f64(value).map_or(Self::Null, Self::Number)
            }
            ContextValue::String(value) => Self::String(value),
            ContextValue::Array(values) => {
                Self::Array(values.into_iter().map(Into::into).collect())
            }
            ContextValue::Object(entries) => Self::Object(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, value.into()))
                    .collect(),
            ),
        }
    }
}

impl fmt::Display for ContextValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(value) => write!(f, "{value}"),
            Self::Integer(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::String(value) => f.write_str(value),
            Self::Array(values) => {
                f.write_str("[")?;
                for (index, value) in values.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{value}")?;
                }
                f.write_str("]")
            }
            Self::Object(entries) => write!(f, "{{{} entries}}", entries.len()),
        }
    }
}

/// Request-scoped state visible to every rule in a chain.
///
/// A context carries the attributes the caller knows about the request
/// (viewer id, roles, tenant) plus, optionally, a pre-resolved
/// [`Decision`]. Policies return the stored decision without running a
/// single rule, which is how privileged internal calls bypass checks
/// and how a parent operation pins the verdict for the sub-operations
/// it spawns.
///
/// Contexts are derived, not mutated during evaluation: rules receive
/// `&Context` and never write back. Deriving a child context is a
/// clone followed by the builder calls that differ:
///
/// ```
/// use rulegate::{Context, Decision};
///
/// let request = Context::new().with("viewer_id", 7);
/// let pinned = request.clone().with_decision(Decision::allow());
///
/// assert!(request.decision().is_none());
/// assert!(pinned.decision().is_some());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Context {
    attrs: HashMap<String, ContextValue>,
    decision: Option<Decision>,
}

impl Context {
    /// Creates an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an attribute, consuming and returning the context.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ContextValue>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }

    /// Stores a pre-resolved decision.
    ///
    /// Every policy that sees this context resolves to the stored
    /// decision without consulting its rules. Storing a skip has no
    /// effect: skip is not a resolution, so the context is returned
    /// unchanged.
    #[must_use]
    pub fn with_decision(mut self, decision: Decision) -> Self {
        if decision.is_skip() {
            return self;
        }
        self.decision = Some(decision);
        self
    }

    /// The pre-resolved decision, if one is stored.
    #[must_use]
    pub fn decision(&self) -> Option<&Decision> {
        self.decision.as_ref()
    }

    /// Reads an attribute.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ContextValue> {
        self.attrs.get(key)
    }

    /// Returns `true` if the attribute is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.attrs.contains_key(key)
    }

    /// Inserts an attribute in place, returning the value it replaced.
    ///
    /// Intended for assembling a context before evaluation starts.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<ContextValue>,
    ) -> Option<ContextValue> {
        self.attrs.insert(key.into(), value.into())
    }

    /// Number of attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.attrs.len()
    }

    /// Returns `true` when no attributes are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }

    /// Iterates attribute entries in arbitrary order.
    pub fn iter(&self) -> std::collections::hash_map::Iter<'_, String, ContextValue> {
        self.attrs.iter()
    }

    /// Folds every attribute of `other` into `self`, overwriting
    /// duplicate keys. A decision stored in `other` wins over one
    /// stored here.
    pub fn merge(&mut self, other: Context) {
        self.attrs.extend(other.attrs);
        if other.decision.is_some() {
            self.decision = other.decision;
        }
    }
}

impl<K: Into<String>, V: Into<ContextValue>> FromIterator<(K, V)> for Context {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            attrs: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
            decision: None,
        }
    }
}

impl<'a> IntoIterator for &'a Context {
    type Item = (&'a String, &'a ContextValue);
    type IntoIter = std::collections::hash_map::Iter<'a, String, ContextValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.attrs.iter()
    }
}
