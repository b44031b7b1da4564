use serde::{Deserialize, Serialize};

use crate::{ChildPaint, DesignObject, ObjectKind};

/// Partial update of a design object.
///
/// Only fields that are `Some` are written. Variant fields that do not exist on the
/// target (e.g. `width` on a text object) are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ObjectPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale_x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale_y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locked: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    // image / template
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    // text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    // group
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<ChildPaint>>,
}

fn set<T: PartialEq>(slot: &mut T, value: Option<T>) -> bool {
    match value {
        Some(v) if *slot != v => {
            *slot = v;
            true
        }
        _ => false,
    }
}

fn set_opt<T: PartialEq>(slot: &mut Option<T>, value: Option<T>) -> bool {
    match value {
        Some(v) if slot.as_ref() != Some(&v) => {
            *slot = Some(v);
            true
        }
        _ => false,
    }
}

impl ObjectPatch {
    /// Position-only patch
    pub fn position(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Default::default()
        }
    }

    /// Scale-only patch
    pub fn scale(scale_x: f64, scale_y: f64) -> Self {
        Self {
            scale_x: Some(scale_x),
            scale_y: Some(scale_y),
            ..Default::default()
        }
    }

    /// Rotation-only patch
    pub fn rotation(degrees: f64) -> Self {
        Self {
            rotation: Some(degrees),
            ..Default::default()
        }
    }

    /// True when no field is set
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merge set fields into `obj`. Returns true if anything changed.
    pub fn apply_to(&self, obj: &mut DesignObject) -> bool {
        let p = self.clone();
        let mut changed = false;

        changed |= set(&mut obj.placement.x, p.x);
        changed |= set(&mut obj.placement.y, p.y);
        changed |= set_opt(&mut obj.placement.rotation, p.rotation);
        changed |= set_opt(&mut obj.placement.scale_x, p.scale_x);
        changed |= set_opt(&mut obj.placement.scale_y, p.scale_y);
        changed |= set(&mut obj.visible, p.visible);
        changed |= set(&mut obj.locked, p.locked);
        changed |= set_opt(&mut obj.name, p.name);

        match &mut obj.kind {
            ObjectKind::Image { src, width, height } | ObjectKind::Template { src, width, height } => {
                changed |= set(src, p.src);
                changed |= set(width, p.width);
                changed |= set(height, p.height);
            }
            ObjectKind::Text {
                text,
                font_size,
                font_family,
                fill,
            } => {
                changed |= set(text, p.text);
                changed |= set(font_size, p.font_size);
                changed |= set(font_family, p.font_family);
                changed |= set(fill, p.fill);
            }
            ObjectKind::Group { children } => {
                changed |= set(children, p.children);
            }
        }

        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patch_only_touches_set_fields() {
        let mut obj = DesignObject::image("a", "a.png", 1.0, 2.0, 100.0, 100.0).with_name("Logo");
        let before = obj.clone();
        let changed = ObjectPatch {
            x: Some(50.0),
            ..Default::default()
        }
        .apply_to(&mut obj);
        assert!(changed);
        assert_eq!(obj.placement.x, 50.0);
        assert_eq!(obj.placement.y, before.placement.y);
        assert_eq!(obj.name, before.name);
        assert_eq!(obj.kind, before.kind);
        assert_eq!(obj.placement.rotation, None);
    }

    #[test]
    fn test_empty_patch_changes_nothing() {
        let mut obj = DesignObject::text("t", "hello", 0.0, 0.0, 20.0);
        let before = obj.clone();
        assert!(ObjectPatch::default().is_empty());
        assert!(!ObjectPatch::default().apply_to(&mut obj));
        assert_eq!(obj, before);
    }

    #[test]
    fn test_same_value_reports_unchanged() {
        let mut obj = DesignObject::image("a", "a.png", 10.0, 10.0, 50.0, 50.0);
        assert!(!ObjectPatch::position(10.0, 10.0).apply_to(&mut obj));
    }

    #[test]
    fn test_variant_fields_ignored_on_other_kinds() {
        let mut obj = DesignObject::text("t", "hello", 0.0, 0.0, 20.0);
        let before = obj.clone();
        let changed = ObjectPatch {
            width: Some(500.0),
            src: Some("x.png".to_string()),
            ..Default::default()
        }
        .apply_to(&mut obj);
        assert!(!changed);
        assert_eq!(obj, before);
    }

    #[test]
    fn test_text_fields_applied() {
        let mut obj = DesignObject::text("t", "hello", 0.0, 0.0, 20.0);
        ObjectPatch {
            text: Some("bye".to_string()),
            fill: Some("#ff0000".to_string()),
            ..Default::default()
        }
        .apply_to(&mut obj);
        match &obj.kind {
            ObjectKind::Text { text, fill, font_size, .. } => {
                assert_eq!(text, "bye");
                assert_eq!(fill, "#ff0000");
                assert_eq!(*font_size, 20.0);
            }
            other => panic!("Expected text, got {:?}", other),
        }
    }

    #[test]
    fn test_patch_from_partial_json() {
        let patch: ObjectPatch = serde_json::from_str(r#"{"rotation": 45, "scale_x": -1}"#).unwrap();
        assert_eq!(patch.rotation, Some(45.0));
        assert_eq!(patch.scale_x, Some(-1.0));
        assert!(patch.x.is_none());
        let json = serde_json::to_string(&patch).unwrap();
        assert!(!json.contains("\"x\""));
    }
}
