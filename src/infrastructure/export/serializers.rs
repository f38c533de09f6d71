//! JSON and YAML serializers
//!
//! Field order follows struct declaration order (and insertion order for
//! maps). JSON is pretty-printed with a 2-space indent; YAML uses the
//! emitter's block style with a 2-space indent and never emits anchors.

use serde::Serialize;

use crate::application::services::CamlFormat;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML serialization failed: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub fn export_to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(value)?)
}

pub fn export_to_yaml<T: Serialize + ?Sized>(value: &T) -> Result<String, ExportError> {
    Ok(serde_yaml::to_string(value)?)
}

/// Serialize in the requested format
pub fn export<T: Serialize + ?Sized>(value: &T, format: CamlFormat) -> Result<String, ExportError> {
    match format {
        CamlFormat::Json => export_to_json(value),
        CamlFormat::Yaml => export_to_yaml(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::{parse_caml_json, parse_caml_yaml};
    use crate::domain::aggregates::AdventurePack;
    use crate::domain::entities::{AdventureModule, Location, LocationConnection, Npc};

    fn sample_pack() -> AdventurePack {
        AdventurePack::from_module(
            AdventureModule::new("adventure.keep", "The Keep")
                .with_synopsis("A keep on the border.")
                .with_location(
                    Location::new("location.gate", "Gate")
                        .with_connection(LocationConnection::new("in", "location.hall")),
                )
                .with_location(Location::new("location.hall", "Hall"))
                .with_npc(Npc::new("npc.castellan", "Castellan")),
        )
    }

    #[test]
    fn test_json_is_pretty_with_declared_field_order() {
        let json = export_to_json(&sample_pack().adventure).expect("json export");

        assert!(json.starts_with("{\n  \"type\": \"AdventureModule\",\n  \"id\": \"adventure.keep\""));
        let title = json.find("\"title\"").expect("title");
        let locations = json.find("\"locations\"").expect("locations");
        assert!(title < locations);
    }

    #[test]
    fn test_yaml_is_block_style_with_two_space_indent() {
        let mut module = sample_pack().adventure;
        module.initial_state = serde_json::json!({ "day": 1 }).as_object().cloned();
        let yaml = export_to_yaml(&module).expect("yaml export");
        let lines: Vec<&str> = yaml.lines().collect();

        assert!(lines.contains(&"title: The Keep"));
        let state = lines
            .iter()
            .position(|l| *l == "initialState:")
            .expect("initialState key");
        assert_eq!(lines[state + 1], "  day: 1");

        let gate = lines
            .iter()
            .position(|l| l.trim_start() == "- type: Location")
            .expect("first location item");
        let dash_indent = lines[gate].len() - lines[gate].trim_start().len();
        assert_eq!(
            lines[gate + 1],
            format!("{}id: location.gate", " ".repeat(dash_indent + 2))
        );

        assert!(!yaml.contains('{') && !yaml.contains('['), "no flow collections");
        assert!(lines.iter().all(|l| !l.starts_with('\t')));
    }

    #[test]
    fn test_wrapped_pack_round_trips_through_both_formats() {
        let pack = sample_pack();

        let json = export(&pack, CamlFormat::Json).expect("json export");
        assert_eq!(parse_caml_json(&json).expect("reparse json"), pack);

        let yaml = export(&pack, CamlFormat::Yaml).expect("yaml export");
        assert!(!yaml.contains('&'), "no anchors expected");
        assert_eq!(parse_caml_yaml(&yaml).expect("reparse yaml"), pack);
    }
}
