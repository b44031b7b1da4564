//! Factory functions for creating test data.
//!
//! Provides helpers to construct `DesignObject`, `ViewRegistry` and related types
//! used in tests and by the scripted command interface.

use shared::*;

// ── Object factories ────────────────────────────────────────────

/// 100x100 image at the origin
pub fn square_image(id: &str) -> DesignObject {
    DesignObject::image(id, &format!("{id}.png"), 0.0, 0.0, 100.0, 100.0)
}

/// Image at a position with a size
pub fn image_at(id: &str, x: f64, y: f64, w: f64, h: f64) -> DesignObject {
    DesignObject::image(id, &format!("{id}.png"), x, y, w, h)
}

/// Template artwork
pub fn template_at(id: &str, x: f64, y: f64, w: f64, h: f64) -> DesignObject {
    DesignObject::template(id, &format!("templates/{id}.svg"), x, y, w, h)
}

/// Text object with a default font
pub fn text_at(id: &str, text: &str, x: f64, y: f64) -> DesignObject {
    DesignObject::text(id, text, x, y, 32.0)
}

/// Group with a caption above a logo
pub fn badge_group(id: &str, x: f64, y: f64) -> DesignObject {
    DesignObject::group(
        id,
        x,
        y,
        vec![
            ChildPaint::Text {
                placement: Placement::at(0.0, 0.0),
                text: "TEAM".to_string(),
                font_size: 28.0,
                font_family: "Impact".to_string(),
                fill: "#ffffff".to_string(),
            },
            ChildPaint::Image {
                placement: Placement::at(0.0, 36.0),
                src: "badge.png".to_string(),
                width: 80.0,
                height: 80.0,
            },
        ],
    )
    .with_name("Badge")
}

/// Object with every optional placement field set
pub fn fully_transformed(id: &str) -> DesignObject {
    let mut obj = image_at(id, 12.0, 34.0, 56.0, 78.0).with_name("Transformed");
    obj.placement.rotation = Some(15.0);
    obj.placement.scale_x = Some(-1.0);
    obj.placement.scale_y = Some(2.0);
    obj
}

// ── Scene factories ─────────────────────────────────────────────

/// Empty front/back registry
pub fn empty_registry() -> ViewRegistry {
    ViewRegistry::default()
}

/// Registry with one object per view
pub fn two_sided_registry() -> ViewRegistry {
    let mut reg = ViewRegistry::default();
    if let Some(front) = reg.view_mut("front") {
        front.objects.push(square_image("logo"));
        front.objects.push(text_at("slogan", "Hello", 50.0, 200.0));
    }
    if let Some(back) = reg.view_mut("back") {
        back.background_color = "#000000".to_string();
        back.objects.push(badge_group("badge", 100.0, 100.0));
    }
    reg
}

/// Registry JSON for scripts and protocol tests
pub fn two_sided_registry_json() -> String {
    serde_json::to_string_pretty(&two_sided_registry()).unwrap_or_default()
}
