//! Outcome steps - declarative state mutations
//!
//! A step names one verb. Combining verbs in a single step is not validated;
//! [`OutcomeStep::action`] takes the first verb in declaration order.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::lenient;

/// Outcome lists keyed by branch name (`success`, `failure`, `partial`, ...)
pub type OutcomeMap = IndexMap<String, Vec<OutcomeStep>>;

/// A single declarative state mutation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutcomeStep {
    /// Facts to overwrite
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub set: Option<Map<String, Value>>,
    /// Fact to increment by `by`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inc: Option<String>,
    /// Fact to decrement by `by`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dec: Option<String>,
    /// Amount for `inc`/`dec`, 1 when absent
    #[serde(
        default,
        deserialize_with = "lenient::float",
        skip_serializing_if = "Option::is_none"
    )]
    pub by: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub add_tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remove_tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transfer: Option<Transfer>,
}

/// Move an item id between inventories
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    pub item: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    pub to: String,
}

/// Typed view of an outcome step
#[derive(Debug, Clone, PartialEq)]
pub enum OutcomeAction {
    Set(Map<String, Value>),
    Increment { fact: String, by: f64 },
    Decrement { fact: String, by: f64 },
    AddTag(String),
    RemoveTag(String),
    Transfer(Transfer),
}

impl OutcomeStep {
    pub fn set(fact: impl Into<String>, value: Value) -> Self {
        let mut values = Map::new();
        values.insert(fact.into(), value);
        Self {
            set: Some(values),
            ..Self::default()
        }
    }

    pub fn inc(fact: impl Into<String>, by: f64) -> Self {
        Self {
            inc: Some(fact.into()),
            by: Some(by),
            ..Self::default()
        }
    }

    pub fn add_tag(tag: impl Into<String>) -> Self {
        Self {
            add_tag: Some(tag.into()),
            ..Self::default()
        }
    }

    /// The verb this step performs, if any
    pub fn action(&self) -> Option<OutcomeAction> {
        let by = self.by.unwrap_or(1.0);
        if let Some(values) = &self.set {
            return Some(OutcomeAction::Set(values.clone()));
        }
        if let Some(fact) = &self.inc {
            return Some(OutcomeAction::Increment {
                fact: fact.clone(),
                by,
            });
        }
        if let Some(fact) = &self.dec {
            return Some(OutcomeAction::Decrement {
                fact: fact.clone(),
                by,
            });
        }
        if let Some(tag) = &self.add_tag {
            return Some(OutcomeAction::AddTag(tag.clone()));
        }
        if let Some(tag) = &self.remove_tag {
            return Some(OutcomeAction::RemoveTag(tag.clone()));
        }
        self.transfer.clone().map(OutcomeAction::Transfer)
    }
}

/// The three branches an encounter resolves into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeBranch {
    Success,
    Failure,
    Partial,
}

impl OutcomeBranch {
    pub const ALL: [OutcomeBranch; 3] = [Self::Success, Self::Failure, Self::Partial];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Failure => "failure",
            Self::Partial => "partial",
        }
    }
}

impl std::fmt::Display for OutcomeBranch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_step_uses_camel_case_verbs() {
        let step: OutcomeStep =
            serde_json::from_value(json!({ "removeTag": "cursed" })).expect("deserialize");
        assert_eq!(step.action(), Some(OutcomeAction::RemoveTag("cursed".to_string())));

        let json = serde_json::to_value(OutcomeStep::add_tag("blessed")).expect("serialize");
        assert_eq!(json, json!({ "addTag": "blessed" }));
    }

    #[test]
    fn test_inc_defaults_by_to_one() {
        let step: OutcomeStep = serde_json::from_value(json!({ "inc": "faction.guild.rep" }))
            .expect("deserialize");
        assert_eq!(
            step.action(),
            Some(OutcomeAction::Increment {
                fact: "faction.guild.rep".to_string(),
                by: 1.0
            })
        );
    }

    #[test]
    fn test_by_accepts_text() {
        let step: OutcomeStep =
            serde_json::from_value(json!({ "dec": "party.gold", "by": "25 gp" })).expect("deserialize");
        assert_eq!(
            step.action(),
            Some(OutcomeAction::Decrement {
                fact: "party.gold".to_string(),
                by: 25.0
            })
        );
    }

    #[test]
    fn test_empty_step_has_no_action() {
        assert_eq!(OutcomeStep::default().action(), None);
    }

    #[test]
    fn test_combined_verbs_take_first_declared() {
        let step: OutcomeStep =
            serde_json::from_value(json!({ "addTag": "a", "inc": "x" })).expect("deserialize");
        assert!(matches!(step.action(), Some(OutcomeAction::Increment { .. })));
    }
}
