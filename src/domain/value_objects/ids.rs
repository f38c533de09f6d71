//! CAML identifiers
//!
//! CAML ids are plain strings namespaced as `<kind>.<slug>`, e.g.
//! `location.ruined_tower`. There are no numeric surrogate keys inside a
//! CAML document.

use std::sync::atomic::{AtomicI64, Ordering};

use super::EntityKind;

static LAST_GENERATED_MILLIS: AtomicI64 = AtomicI64::new(0);

/// Lowercase a display name and join its words with underscores
pub fn slugify(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("_")
}

/// Build `<kind-prefix>.<slug>`
pub fn namespaced_id(kind: EntityKind, slug: impl std::fmt::Display) -> String {
    format!("{}.{}", kind.id_prefix(), slug)
}

/// Whether a string looks like a namespaced id or fact (`quest.step1.done`)
pub fn is_namespaced(reference: &str) -> bool {
    reference.contains('.')
}

/// Mint `adventure.<unix-millis>` for a module that arrived without an id
///
/// Two calls never return the same id within one process: when the clock has
/// not advanced, the timestamp is bumped past the last one handed out.
pub fn generated_adventure_id() -> String {
    let now = chrono::Utc::now().timestamp_millis();
    let mut last = LAST_GENERATED_MILLIS.load(Ordering::Relaxed);
    loop {
        let next = now.max(last + 1);
        match LAST_GENERATED_MILLIS.compare_exchange_weak(
            last,
            next,
            Ordering::Relaxed,
            Ordering::Relaxed,
        ) {
            Ok(_) => return namespaced_id(EntityKind::AdventureModule, next),
            Err(observed) => last = observed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Captain  Elara Voss"), "captain_elara_voss");
        assert_eq!(slugify(""), "");
    }

    #[test]
    fn test_namespaced_id() {
        assert_eq!(namespaced_id(EntityKind::Npc, "mayor"), "npc.mayor");
        assert_eq!(namespaced_id(EntityKind::Location, 3), "location.3");
        assert!(is_namespaced("quest.step1.done"));
        assert!(!is_namespaced("simpleFlag"));
    }

    #[test]
    fn test_generated_ids_are_distinct() {
        let first = generated_adventure_id();
        let second = generated_adventure_id();
        assert!(first.starts_with("adventure."));
        assert_ne!(first, second);
    }
}
