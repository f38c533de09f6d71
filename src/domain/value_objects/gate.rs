//! Gates - boolean conditions over facts
//!
//! A gate holds iff every `all` member holds, at least one `any` member holds
//! and the `not` member does not hold. Absent clauses impose nothing.
//!
//! Reading a gate never fails. A clause holding a single member instead of
//! a list is a one-member list, and a gate that is not a clause object at
//! all (a bare string, a list, an expression) is read as an `all` clause.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::fact_state::FactState;

/// Comparison operator of a [`GateExpr`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GateOp {
    #[serde(rename = "==")]
    Eq,
    #[serde(rename = "!=")]
    Ne,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = "<=")]
    Le,
    #[serde(rename = ">=")]
    Ge,
    #[serde(rename = "in")]
    In,
    #[serde(rename = "contains")]
    Contains,
}

/// A single fact comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateExpr {
    pub fact: String,
    pub op: GateOp,
    #[serde(default)]
    pub value: Value,
}

impl GateExpr {
    pub fn new(fact: impl Into<String>, op: GateOp, value: Value) -> Self {
        Self {
            fact: fact.into(),
            op,
            value,
        }
    }

    pub fn evaluate(&self, facts: &FactState) -> bool {
        let actual = facts.get(&self.fact).unwrap_or(&Value::Null);
        match self.op {
            GateOp::Eq => values_equal(actual, &self.value),
            GateOp::Ne => !values_equal(actual, &self.value),
            GateOp::Lt => compare(actual, &self.value).is_some_and(|o| o.is_lt()),
            GateOp::Gt => compare(actual, &self.value).is_some_and(|o| o.is_gt()),
            GateOp::Le => compare(actual, &self.value).is_some_and(|o| o.is_le()),
            GateOp::Ge => compare(actual, &self.value).is_some_and(|o| o.is_ge()),
            GateOp::In => member_of(actual, &self.value),
            GateOp::Contains => member_of(&self.value, actual),
        }
    }
}

/// One member of a gate clause
///
/// A bare string is shorthand for "this fact is truthy". Anything that is
/// neither a string nor a well-formed expression is kept as `Unrecognized`
/// so a sloppy gate never sinks the whole document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GateCondition {
    Reference(String),
    Expression(GateExpr),
    Unrecognized(Value),
}

impl GateCondition {
    pub fn evaluate(&self, facts: &FactState) -> bool {
        match self {
            Self::Reference(fact) => facts.is_true(fact),
            Self::Expression(expr) => expr.evaluate(facts),
            Self::Unrecognized(_) => false,
        }
    }

    /// The fact name this member reads, if it has one
    pub fn fact(&self) -> Option<&str> {
        match self {
            Self::Reference(fact) => Some(fact),
            Self::Expression(expr) => Some(&expr.fact),
            Self::Unrecognized(value) => value.get("fact").and_then(Value::as_str),
        }
    }
}

impl From<&str> for GateCondition {
    fn from(fact: &str) -> Self {
        Self::Reference(fact.to_string())
    }
}

impl From<GateExpr> for GateCondition {
    fn from(expr: GateExpr) -> Self {
        Self::Expression(expr)
    }
}

/// Availability condition attached to an entity or quest stage
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Gate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub all: Option<Vec<GateCondition>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub any: Option<Vec<GateCondition>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub not: Option<GateCondition>,
}

impl Gate {
    pub fn all_of(conditions: impl IntoIterator<Item = GateCondition>) -> Self {
        Self {
            all: Some(conditions.into_iter().collect()),
            ..Self::default()
        }
    }

    pub fn any_of(conditions: impl IntoIterator<Item = GateCondition>) -> Self {
        Self {
            any: Some(conditions.into_iter().collect()),
            ..Self::default()
        }
    }

    pub fn with_not(mut self, condition: GateCondition) -> Self {
        self.not = Some(condition);
        self
    }

    pub fn is_satisfied(&self, facts: &FactState) -> bool {
        let all_hold = self
            .all
            .as_ref()
            .map_or(true, |members| members.iter().all(|m| m.evaluate(facts)));
        let any_holds = self
            .any
            .as_ref()
            .map_or(true, |members| members.iter().any(|m| m.evaluate(facts)));
        let not_clear = self.not.as_ref().map_or(true, |m| !m.evaluate(facts));

        all_hold && any_holds && not_clear
    }

    /// Read any JSON value as a gate
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Null => Self::default(),
            Value::Object(map) if map.is_empty() => Self::default(),
            Value::Object(map) if CLAUSES.iter().any(|key| map.contains_key(*key)) => {
                Self::from_clauses(map)
            }
            other => Self {
                all: Some(clause(other)),
                ..Self::default()
            },
        }
    }

    fn from_clauses(mut map: Map<String, Value>) -> Self {
        let mut take = |key: &str| map.remove(key).filter(|value| !value.is_null());
        Self {
            all: take("all").map(clause),
            any: take("any").map(clause),
            not: take("not").map(condition),
        }
    }

    /// Every member in `all`, then `any`, then `not` order
    pub fn conditions(&self) -> impl Iterator<Item = &GateCondition> {
        self.all
            .iter()
            .flatten()
            .chain(self.any.iter().flatten())
            .chain(self.not.iter())
    }
}

impl<'de> Deserialize<'de> for Gate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Self::from_value(Value::deserialize(deserializer)?))
    }
}

const CLAUSES: [&str; 3] = ["all", "any", "not"];

fn clause(value: Value) -> Vec<GateCondition> {
    match value {
        Value::Array(members) => members.into_iter().map(condition).collect(),
        single => vec![condition(single)],
    }
}

fn condition(value: Value) -> GateCondition {
    serde_json::from_value(value.clone()).unwrap_or(GateCondition::Unrecognized(value))
}

fn values_equal(a: &Value, b: &Value) -> bool {
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x == y,
        _ => a == b,
    }
}

fn compare(a: &Value, b: &Value) -> Option<std::cmp::Ordering> {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64()?.partial_cmp(&y.as_f64()?),
        (Value::String(x), Value::String(y)) => Some(x.cmp(y)),
        _ => None,
    }
}

/// Whether `needle` is an element of the `haystack` array or a substring of it
fn member_of(needle: &Value, haystack: &Value) -> bool {
    match haystack {
        Value::Array(items) => items.iter().any(|item| values_equal(item, needle)),
        Value::String(s) => needle.as_str().is_some_and(|n| s.contains(n)),
        Value::Object(map) => needle.as_str().is_some_and(|key| map.contains_key(key)),
        _ => false,
    }
}
