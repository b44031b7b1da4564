//! Display helper functions for design objects

use shared::{DesignObject, ObjectKind};

/// Get display name for an object
pub fn object_display_name(obj: &DesignObject) -> &str {
    match obj.name.as_deref() {
        Some(name) if !name.is_empty() => name,
        _ => "Untitled",
    }
}

/// Get a short label for the object variant
pub fn object_kind_label(kind: &ObjectKind) -> &'static str {
    match kind {
        ObjectKind::Image { .. } => "Image",
        ObjectKind::Text { .. } => "Text",
        ObjectKind::Group { .. } => "Group",
        ObjectKind::Template { .. } => "Template",
    }
}

/// Get shortened ID (first 8 characters)
pub fn short_id(id: &str) -> &str {
    match id.char_indices().nth(8) {
        Some((end, _)) => &id[..end],
        None => id,
    }
}
