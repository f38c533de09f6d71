//! Defaults used when CAML data omits a field the campaign tables require
//!
//! Conversion code reads these instead of repeating literals, so the import
//! and export directions agree on what "missing" turns into.

use crate::domain::entities::{Attitude, EncounterDifficulty, EncounterType, ItemType, Rarity};

pub const ADVENTURE_TITLE: &str = "Imported Adventure";
pub const SETTING: &str = "Fantasy";
pub const MIN_LEVEL: u32 = 1;
pub const MAX_LEVEL: u32 = 5;

pub const ENCOUNTER_TYPE: EncounterType = EncounterType::Combat;
pub const ENCOUNTER_DIFFICULTY: EncounterDifficulty = EncounterDifficulty::Medium;
pub const NPC_ATTITUDE: Attitude = Attitude::Neutral;
pub const NPC_LEVEL: u32 = 1;
pub const ITEM_TYPE: ItemType = ItemType::Misc;
pub const ITEM_RARITY: Rarity = Rarity::Common;

/// Version stamped on modules synthesised from campaign rows
pub const EXPORT_VERSION: &str = "1.0.0";
/// Characters of a journey entry compared when inferring locations
pub const LOCATION_DEDUP_PREFIX: usize = 50;

/// `Some` only for strings with visible content
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(Some("Tower")), Some("Tower"));
        assert_eq!(non_blank(Some("   ")), None);
        assert_eq!(non_blank(None), None);
    }
}
