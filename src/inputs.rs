//! Loading of the JSON documents the scoring engine consumes: per-recording
//! event lists, the label class map and the subject grouping.

use std::path::Path;

use crate::error::ScoringError;
use crate::types::{EventClassMap, EventListMap, GroupingMap};

/// Read a `{recording_id: [event, ...]}` document.
pub fn load_event_lists(path: &Path) -> Result<EventListMap, ScoringError> {
    let data =
        std::fs::read_to_string(path).map_err(|e| ScoringError::io("read event lists", e))?;
    serde_json::from_str(&data).map_err(|e| ScoringError::json("parse event lists", e))
}

/// Read a flat `{label: class_id}` document.
pub fn load_class_map(path: &Path) -> Result<EventClassMap, ScoringError> {
    let data = std::fs::read_to_string(path).map_err(|e| ScoringError::io("read class map", e))?;
    let classes: EventClassMap =
        serde_json::from_str(&data).map_err(|e| ScoringError::json("parse class map", e))?;
    if classes.is_empty() {
        return Err(ScoringError::invalid_input(format!(
            "class map '{}' is empty",
            path.display()
        )));
    }
    Ok(classes)
}

/// Read a `{group_id: [recording_id, ...]}` document.
pub fn load_grouping(path: &Path) -> Result<GroupingMap, ScoringError> {
    let data = std::fs::read_to_string(path).map_err(|e| ScoringError::io("read grouping", e))?;
    serde_json::from_str(&data).map_err(|e| ScoringError::json("parse grouping", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_temp(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(name);
        std::fs::write(&path, contents).expect("write temp file");
        path
    }

    #[test]
    fn load_event_lists_round_trip() {
        let path = write_temp(
            "detscore_inputs_events.json",
            r#"{"rec01": [{"label": "snore", "onset": 0.5, "duration": 2.0}], "rec02": []}"#,
        );
        let lists = load_event_lists(&path).unwrap();
        assert_eq!(lists.len(), 2);
        assert_eq!(lists["rec01"][0].label, "snore");
        assert!(lists["rec02"].is_empty());
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn load_class_map_rejects_empty() {
        let path = write_temp("detscore_inputs_classes_empty.json", "{}");
        assert!(load_class_map(&path).is_err());
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn load_class_map_parses_labels() {
        let path = write_temp(
            "detscore_inputs_classes.json",
            r#"{"snore": 1, "null": 0}"#,
        );
        let classes = load_class_map(&path).unwrap();
        assert_eq!(classes.class_of("snore").unwrap(), 1);
        assert_eq!(classes.null_class(), Some(0));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn missing_file_is_io_error() {
        let result = load_grouping(Path::new("/nonexistent/sub2rec.json"));
        assert!(matches!(result, Err(ScoringError::Io { .. })));
    }
}
