//! Item entity - equipment, treasure and consumables

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::base::EntityBase;
use crate::domain::value_objects::{lenient, open_enum, ItemTag, Measure};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    #[serde(rename = "type", default)]
    pub tag: ItemTag,
    #[serde(flatten)]
    pub base: EntityBase,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_type: Option<ItemType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rarity: Option<Rarity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attunement: Option<Attunement>,
    #[serde(
        default,
        deserialize_with = "lenient::string_list",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub properties: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Measure>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<Measure>,
    /// Keys outside the schema, carried through unchanged
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Item {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            base: EntityBase::new(id).with_name(name),
            ..Self::default()
        }
    }

    pub fn with_item_type(mut self, item_type: ItemType) -> Self {
        self.item_type = Some(item_type);
        self
    }

    pub fn with_rarity(mut self, rarity: Rarity) -> Self {
        self.rarity = Some(rarity);
        self
    }

    pub fn requires_attunement(&self) -> bool {
        match &self.attunement {
            Some(Attunement::Required(required)) => *required,
            Some(Attunement::Restricted(_)) => true,
            None => false,
        }
    }
}

open_enum! {
    pub enum ItemType {
        Weapon => "weapon",
        Armor => "armor",
        Wondrous => "wondrous",
        Consumable => "consumable",
        Treasure => "treasure",
        Tool => "tool",
        Misc => "misc",
    }
}

open_enum! {
    pub enum Rarity {
        Common => "common",
        Uncommon => "uncommon",
        Rare => "rare",
        VeryRare => "very rare",
        Legendary => "legendary",
        Artifact => "artifact",
    }
}

/// `true`/`false`, or a restriction such as `"by a spellcaster"`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Attunement {
    Required(bool),
    Restricted(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_item_fields() {
        let item: Item = serde_json::from_value(json!({
            "id": "item.sunblade",
            "type": "Item",
            "name": "Sun Blade",
            "itemType": "weapon",
            "rarity": "very_rare",
            "attunement": "by a paladin",
            "value": "5000 gp",
            "weight": 3
        }))
        .expect("item should deserialize");

        assert_eq!(item.item_type, Some(ItemType::Weapon));
        assert_eq!(item.rarity, Some(Rarity::VeryRare));
        assert!(item.requires_attunement());
        assert_eq!(item.value.as_ref().and_then(Measure::as_f64), Some(5000.0));

        let json = serde_json::to_value(&item).expect("serialize");
        assert_eq!(json["rarity"], json!("very rare"));
        assert_eq!(json["type"], json!("Item"));
    }

    #[test]
    fn test_unknown_item_type_and_rarity_are_kept() {
        let item: Item = serde_json::from_value(json!({
            "id": "item.elixir",
            "itemType": "potion",
            "rarity": "Very Rare",
            "properties": "fizzy",
            "sourceBook": "DMG p.188"
        }))
        .expect("loose item should deserialize");

        assert_eq!(item.item_type, Some(ItemType::Other("potion".to_string())));
        assert_eq!(item.rarity, Some(Rarity::VeryRare));
        assert_eq!(item.properties, vec!["fizzy"]);

        let json = serde_json::to_value(&item).expect("serialize");
        assert_eq!(json["itemType"], json!("potion"));
        assert_eq!(json["sourceBook"], json!("DMG p.188"));
    }
}
