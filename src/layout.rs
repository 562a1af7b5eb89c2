//! Layout documents: a canvas plus a flat list of positioned components.

use egui::Color32;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

use crate::error::{BuildError, LayoutError};
use crate::widget::{ComponentKind, parse_color};

pub const DEFAULT_TITLE: &str = "NVLib Generated GUI";

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct CanvasSpec {
    pub width: f32,
    pub height: f32,
    pub title: String,
}

impl Default for CanvasSpec {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            title: DEFAULT_TITLE.into(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutDocument {
    pub canvas: CanvasSpec,
    pub components: Vec<ComponentSpec>,
}

impl LayoutDocument {
    pub fn from_path(path: &Path) -> Result<Self, LayoutError> {
        let json = std::fs::read_to_string(path).map_err(|source| LayoutError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn from_json_str(json: &str) -> Result<Self, LayoutError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ComponentSpec {
    /// Empty when the entry has no id; such entries are never built
    #[serde(default)]
    pub id: String,
    /// Raw `type` string; unknown or missing names survive parsing and are skipped at build time
    #[serde(rename = "type", default)]
    pub type_name: String,
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
    #[serde(default)]
    pub width: f32,
    #[serde(default)]
    pub height: f32,
    #[serde(default)]
    pub properties: Properties,
}

impl ComponentSpec {
    pub fn kind(&self) -> Option<ComponentKind> {
        ComponentKind::from_name(&self.type_name)
    }

    pub fn is_container(&self) -> bool {
        self.kind().is_some_and(|k| k.is_container())
    }
}

/// Free-form per-component properties.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Properties(Map<String, Value>);

impl Properties {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key).filter(|v| !v.is_null())
    }

    pub fn reader<'a>(&'a self, id: &'a str) -> PropReader<'a> {
        PropReader { id, props: self }
    }
}

impl From<Map<String, Value>> for Properties {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Typed property access for one component.
///
/// Missing keys (and explicit nulls) read as `None`; keys with the wrong JSON
/// type are reported as [`BuildError::MalformedProperty`].
pub struct PropReader<'a> {
    id: &'a str,
    props: &'a Properties,
}

impl PropReader<'_> {
    fn malformed(&self, key: &str, reason: impl Into<String>) -> BuildError {
        BuildError::MalformedProperty {
            id: self.id.to_owned(),
            key: key.to_owned(),
            reason: reason.into(),
        }
    }

    pub fn text(&self, key: &str) -> Result<Option<String>, BuildError> {
        match self.props.get(key) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(Value::Number(n)) => Ok(Some(n.to_string())),
            Some(Value::Bool(b)) => Ok(Some(b.to_string())),
            Some(other) => Err(self.malformed(key, format!("expected text, got {other}"))),
        }
    }

    pub fn number(&self, key: &str) -> Result<Option<f32>, BuildError> {
        match self.props.get(key) {
            None => Ok(None),
            Some(Value::Number(n)) => n
                .as_f64()
                .map(|v| Some(v as f32))
                .ok_or_else(|| self.malformed(key, "number out of range")),
            Some(other) => Err(self.malformed(key, format!("expected number, got {other}"))),
        }
    }

    pub fn integer(&self, key: &str) -> Result<Option<i64>, BuildError> {
        Ok(self.number(key)?.map(|v| v.trunc() as i64))
    }

    pub fn flag(&self, key: &str) -> Result<bool, BuildError> {
        match self.props.get(key) {
            None => Ok(false),
            Some(Value::Bool(b)) => Ok(*b),
            Some(Value::Number(n)) => Ok(n.as_f64().is_some_and(|v| v != 0.0)),
            Some(other) => Err(self.malformed(key, format!("expected boolean, got {other}"))),
        }
    }

    pub fn color(&self, key: &str) -> Result<Option<Color32>, BuildError> {
        match self.text(key)? {
            None => Ok(None),
            Some(s) => parse_color(&s)
                .map(Some)
                .ok_or_else(|| self.malformed(key, format!("unknown color '{s}'"))),
        }
    }

    /// A newline-separated list, e.g. dropdown or radio options.
    pub fn lines(&self, key: &str) -> Result<Vec<String>, BuildError> {
        Ok(self
            .text(key)?
            .unwrap_or_default()
            .split('\n')
            .map(str::to_owned)
            .collect())
    }
}

/// Resolves a relative resource path against the working directory, then
/// against the directory holding the executable.
pub fn resolve_resource(path: &Path) -> PathBuf {
    if path.is_absolute() || path.exists() {
        return path.to_path_buf();
    }
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(path)))
        .filter(|candidate| candidate.exists())
        .unwrap_or_else(|| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn props(value: Value) -> Properties {
        match value {
            Value::Object(map) => map.into(),
            _ => panic!("test properties must be an object"),
        }
    }

    #[test]
    fn test_parse_full_document() {
        let doc = LayoutDocument::from_json_str(
            r#"{
                "canvas": {"width": 400, "height": 300, "title": "Login"},
                "components": [
                    {"id": "ok", "type": "Button", "x": 10, "y": 20, "width": 80, "height": 30,
                     "properties": {"text": "OK"}}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(doc.canvas.width, 400.0);
        assert_eq!(doc.canvas.title, "Login");
        assert_eq!(doc.components.len(), 1);
        let ok = &doc.components[0];
        assert_eq!(ok.kind(), Some(ComponentKind::Button));
        assert_eq!((ok.x, ok.y, ok.width, ok.height), (10.0, 20.0, 80.0, 30.0));
    }

    #[test]
    fn test_canvas_defaults() {
        let doc = LayoutDocument::from_json_str(r#"{"components": []}"#).unwrap();
        assert_eq!(doc.canvas, CanvasSpec::default());
        assert_eq!(doc.canvas.title, DEFAULT_TITLE);
        let doc = LayoutDocument::from_json_str(r#"{"canvas": {"title": "T"}}"#).unwrap();
        assert_eq!(doc.canvas.width, 800.0);
        assert_eq!(doc.canvas.height, 600.0);
    }

    #[test]
    fn test_unknown_type_survives_parsing() {
        let doc = LayoutDocument::from_json_str(
            r#"{"components": [{"id": "c", "type": "Carousel", "x": 1, "y": 2}]}"#,
        )
        .unwrap();
        assert_eq!(doc.components[0].kind(), None);
        assert!(!doc.components[0].is_container());
    }

    #[test]
    fn test_missing_type_or_id_survives_parsing() {
        let doc = LayoutDocument::from_json_str(
            r#"{"components": [
                {"id": "ok", "type": "Button"},
                {"id": "untyped", "x": 5},
                {"type": "Label"}
            ]}"#,
        )
        .unwrap();
        assert_eq!(doc.components.len(), 3);
        assert_eq!(doc.components[1].type_name, "");
        assert_eq!(doc.components[1].kind(), None);
        assert_eq!(doc.components[2].id, "");
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(matches!(
            LayoutDocument::from_json_str("{ not json"),
            Err(LayoutError::Json(_))
        ));
        assert!(LayoutDocument::from_json_str(r#"{"components": 5}"#).is_err());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = LayoutDocument::from_path(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, LayoutError::Io { .. }));
    }

    #[test]
    fn test_reader_defaults_and_types() {
        let p = props(json!({
            "text": "Hi", "fontSize": 14, "bold": true, "checked": 0,
            "textColor": "#000000", "hint": null, "options": "a\nb\nc"
        }));
        let r = p.reader("w");
        assert_eq!(r.text("text").unwrap().as_deref(), Some("Hi"));
        assert_eq!(r.text("hint").unwrap(), None);
        assert_eq!(r.number("fontSize").unwrap(), Some(14.0));
        assert_eq!(r.number("missing").unwrap(), None);
        assert!(r.flag("bold").unwrap());
        assert!(!r.flag("checked").unwrap());
        assert!(!r.flag("missing").unwrap());
        assert_eq!(r.color("textColor").unwrap(), Some(Color32::BLACK));
        assert_eq!(r.lines("options").unwrap(), vec!["a", "b", "c"]);
        assert_eq!(r.lines("missing").unwrap(), vec![""]);
    }

    #[test]
    fn test_reader_reports_malformed_properties() {
        let p = props(json!({"fontSize": "big", "textColor": "not-a-color", "bold": "yes"}));
        let r = p.reader("title");
        match r.number("fontSize") {
            Err(BuildError::MalformedProperty { id, key, .. }) => {
                assert_eq!(id, "title");
                assert_eq!(key, "fontSize");
            }
            other => panic!("expected malformed property, got {other:?}"),
        }
        assert!(r.color("textColor").is_err());
        assert!(r.flag("bold").is_err());
    }

    #[test]
    fn test_resolve_resource_keeps_absolute_paths() {
        let p = Path::new("/tmp/some/layout.json");
        assert_eq!(resolve_resource(p), p.to_path_buf());
    }
}
