//! Fact state - the opaque key/value bag gates read and outcomes write
//!
//! Facts are addressed by dotted names such as `quest.step1.done`. A fact is
//! looked up by its exact key first and then as a path into nested maps, so
//! both `{"quest.step1.done": true}` and `{"quest": {"step1": {"done": true}}}`
//! satisfy the same gate.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::outcome::{OutcomeAction, OutcomeStep};

const TAGS_KEY: &str = "tags";
const INVENTORY_SUFFIX: &str = "inventory";

/// Gameplay facts seeded from `initialState` and mutated by outcomes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FactState(Map<String, Value>);

impl FactState {
    pub fn new() -> Self {
        Self(Map::new())
    }

    pub fn from_map(map: Map<String, Value>) -> Self {
        Self(map)
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Resolve a fact by exact key, then by dotted path
    pub fn get(&self, fact: &str) -> Option<&Value> {
        if let Some(value) = self.0.get(fact) {
            return Some(value);
        }

        let mut segments = fact.split('.');
        let first = segments.next()?;
        let mut current = self.0.get(first)?;
        for segment in segments {
            current = current.as_object()?.get(segment)?;
        }
        Some(current)
    }

    /// Whether the fact exists and is truthy
    pub fn is_true(&self, fact: &str) -> bool {
        self.get(fact).is_some_and(is_truthy)
    }

    /// Write a fact under its exact key
    pub fn set(&mut self, fact: impl Into<String>, value: Value) {
        self.0.insert(fact.into(), value);
    }

    pub fn tags(&self) -> Vec<String> {
        string_list(self.0.get(TAGS_KEY))
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags().iter().any(|t| t == tag)
    }

    /// Items held by an owner, stored under `<owner>.inventory`
    pub fn inventory(&self, owner: &str) -> Vec<String> {
        string_list(self.get(&inventory_key(owner)))
    }

    /// Apply outcome steps in order
    pub fn apply(&mut self, steps: &[OutcomeStep]) {
        for step in steps {
            match step.action() {
                Some(action) => self.apply_action(action),
                None => tracing::debug!("Skipping outcome step with no verb"),
            }
        }
    }

    fn apply_action(&mut self, action: OutcomeAction) {
        match action {
            OutcomeAction::Set(values) => {
                for (fact, value) in values {
                    self.set(fact, value);
                }
            }
            OutcomeAction::Increment { fact, by } => self.add_number(&fact, by),
            OutcomeAction::Decrement { fact, by } => self.add_number(&fact, -by),
            OutcomeAction::AddTag(tag) => {
                let mut tags = self.tags();
                if !tags.contains(&tag) {
                    tags.push(tag);
                }
                self.set(TAGS_KEY, to_array(tags));
            }
            OutcomeAction::RemoveTag(tag) => {
                let mut tags = self.tags();
                tags.retain(|t| *t != tag);
                self.set(TAGS_KEY, to_array(tags));
            }
            OutcomeAction::Transfer(transfer) => {
                if let Some(from) = &transfer.from {
                    let mut held = self.inventory(from);
                    held.retain(|item| *item != transfer.item);
                    self.set(inventory_key(from), to_array(held));
                }
                let mut held = self.inventory(&transfer.to);
                held.push(transfer.item);
                self.set(inventory_key(&transfer.to), to_array(held));
            }
        }
    }

    fn add_number(&mut self, fact: &str, delta: f64) {
        let current = self.get(fact).and_then(Value::as_f64).unwrap_or(0.0);
        self.set(fact, number_value(current + delta));
    }
}

impl From<Map<String, Value>> for FactState {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// JSON truthiness: null, false, 0, "" are false; everything else is true
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Keep integral results integral so counters stay `3`, not `3.0`
fn number_value(n: f64) -> Value {
    if n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
        Value::from(n as i64)
    } else {
        Value::from(n)
    }
}

fn inventory_key(owner: &str) -> String {
    format!("{}.{}", owner, INVENTORY_SUFFIX)
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|v| v.as_str().map(String::from))
                .collect()
        })
        .unwrap_or_default()
}

fn to_array(items: Vec<String>) -> Value {
    Value::Array(items.into_iter().map(Value::String).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn state(value: Value) -> FactState {
        match value {
            Value::Object(map) => FactState::from_map(map),
            _ => panic!("fixture must be an object"),
        }
    }

    #[test]
    fn test_lookup_prefers_exact_key_then_path() {
        let facts = state(json!({
            "quest.step1.done": true,
            "npc": { "mayor": { "friendly": false } }
        }));

        assert!(facts.is_true("quest.step1.done"));
        assert_eq!(facts.get("npc.mayor.friendly"), Some(&json!(false)));
        assert!(!facts.is_true("npc.mayor.friendly"));
        assert!(facts.get("npc.mayor.missing").is_none());
    }

    #[test]
    fn test_truthiness() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!("")));
        assert!(is_truthy(&json!("yes")));
        assert!(is_truthy(&json!([])));
    }

    #[test]
    fn test_apply_counters_and_tags() {
        let mut facts = FactState::new();
        let steps: Vec<OutcomeStep> = serde_json::from_value(json!([
            { "inc": "party.renown", "by": 2 },
            { "inc": "party.renown" },
            { "dec": "party.gold", "by": 5 },
            { "addTag": "heroes" },
            { "addTag": "heroes" },
            { "set": { "quest.rescue.done": true } }
        ]))
        .expect("steps should deserialize");

        facts.apply(&steps);

        assert_eq!(facts.get("party.renown"), Some(&json!(3)));
        assert_eq!(facts.get("party.gold"), Some(&json!(-5)));
        assert_eq!(facts.tags(), vec!["heroes".to_string()]);
        assert!(facts.is_true("quest.rescue.done"));

        let remove: Vec<OutcomeStep> =
            serde_json::from_value(json!([{ "removeTag": "heroes" }])).expect("deserialize");
        facts.apply(&remove);
        assert!(!facts.has_tag("heroes"));
    }

    #[test]
    fn test_apply_transfer_moves_item() {
        let mut facts = state(json!({ "npc.smith.inventory": ["item.longsword", "item.hammer"] }));
        let steps: Vec<OutcomeStep> = serde_json::from_value(json!([
            { "transfer": { "item": "item.longsword", "from": "npc.smith", "to": "party" } }
        ]))
        .expect("deserialize");

        facts.apply(&steps);

        assert_eq!(facts.inventory("npc.smith"), vec!["item.hammer".to_string()]);
        assert_eq!(facts.inventory("party"), vec!["item.longsword".to_string()]);
    }
}
