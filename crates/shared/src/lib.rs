mod patch;

pub use patch::ObjectPatch;

use serde::{Deserialize, Serialize};

/// Unique identifier of a design object within a view
pub type ObjectId = String;

/// Key of a product view ("front", "back", ...)
pub type ViewKey = String;

/// Smallest width/height an image or template may be committed with
pub const MIN_OBJECT_SIZE: f64 = 5.0;

/// Clamp a committed width/height to [`MIN_OBJECT_SIZE`]
pub fn clamp_min_size(value: f64) -> f64 {
    value.max(MIN_OBJECT_SIZE)
}

// ============================================================================
// Placement
// ============================================================================

/// Stored placement of an object or group child.
///
/// Rotation and scale may be absent; use [`Placement::resolved`] to read them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Placement {
    pub x: f64,
    pub y: f64,
    /// Degrees, not wrapped on write
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    /// Negative value mirrors along X
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale_x: Option<f64>,
    /// Negative value mirrors along Y
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale_y: Option<f64>,
}

impl Placement {
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            ..Default::default()
        }
    }

    /// Placement with every default filled in.
    ///
    /// This is the only place where `rotation -> 0` and `scale -> 1` are decided.
    pub fn resolved(&self) -> Transform2D {
        Transform2D {
            x: self.x,
            y: self.y,
            rotation: self.rotation.unwrap_or(0.0),
            scale_x: self.scale_x.unwrap_or(1.0),
            scale_y: self.scale_y.unwrap_or(1.0),
        }
    }
}

/// Fully resolved 2D transform
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform2D {
    pub x: f64,
    pub y: f64,
    pub rotation: f64,
    pub scale_x: f64,
    pub scale_y: f64,
}

impl Default for Transform2D {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            rotation: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
        }
    }
}

// ============================================================================
// Design objects
// ============================================================================

/// Paint record embedded in a group.
///
/// Children carry no id and are never selected on their own; their placement is
/// relative to the owning group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChildPaint {
    Text {
        #[serde(flatten)]
        placement: Placement,
        text: String,
        font_size: f64,
        font_family: String,
        fill: String,
    },
    Image {
        #[serde(flatten)]
        placement: Placement,
        src: String,
        width: f64,
        height: f64,
    },
}

impl ChildPaint {
    pub fn placement(&self) -> &Placement {
        match self {
            ChildPaint::Text { placement, .. } => placement,
            ChildPaint::Image { placement, .. } => placement,
        }
    }
}

/// Variant payload of a design object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ObjectKind {
    Image {
        src: String,
        width: f64,
        height: f64,
    },
    Text {
        text: String,
        font_size: f64,
        font_family: String,
        fill: String,
    },
    Group {
        #[serde(default)]
        children: Vec<ChildPaint>,
    },
    /// Pre-made artwork; behaves like an image
    Template {
        src: String,
        width: f64,
        height: f64,
    },
}

impl ObjectKind {
    /// Width and height for sized variants (image, template)
    pub fn size(&self) -> Option<(f64, f64)> {
        match self {
            ObjectKind::Image { width, height, .. } | ObjectKind::Template { width, height, .. } => {
                Some((*width, *height))
            }
            ObjectKind::Text { .. } | ObjectKind::Group { .. } => None,
        }
    }

    /// True when transform commits bake scale into width/height
    pub fn is_sized(&self) -> bool {
        self.size().is_some()
    }
}

fn default_true() -> bool {
    true
}

/// A placeable object on a product view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignObject {
    pub id: ObjectId,
    #[serde(flatten)]
    pub placement: Placement,
    #[serde(default = "default_true")]
    pub visible: bool,
    #[serde(default)]
    pub locked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub kind: ObjectKind,
}

impl DesignObject {
    /// Visible, unlocked object at (x, y) with no name
    pub fn new(id: impl Into<ObjectId>, x: f64, y: f64, kind: ObjectKind) -> Self {
        Self {
            id: id.into(),
            placement: Placement::at(x, y),
            visible: true,
            locked: false,
            name: None,
            kind,
        }
    }

    pub fn image(id: impl Into<ObjectId>, src: &str, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(
            id,
            x,
            y,
            ObjectKind::Image {
                src: src.to_string(),
                width,
                height,
            },
        )
    }

    pub fn template(id: impl Into<ObjectId>, src: &str, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(
            id,
            x,
            y,
            ObjectKind::Template {
                src: src.to_string(),
                width,
                height,
            },
        )
    }

    pub fn text(id: impl Into<ObjectId>, text: &str, x: f64, y: f64, font_size: f64) -> Self {
        Self::new(
            id,
            x,
            y,
            ObjectKind::Text {
                text: text.to_string(),
                font_size,
                font_family: "Arial".to_string(),
                fill: "#000000".to_string(),
            },
        )
    }

    pub fn group(id: impl Into<ObjectId>, x: f64, y: f64, children: Vec<ChildPaint>) -> Self {
        Self::new(id, x, y, ObjectKind::Group { children })
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn with_locked(mut self, locked: bool) -> Self {
        self.locked = locked;
        self
    }

    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Resolved transform, defaults applied
    pub fn transform(&self) -> Transform2D {
        self.placement.resolved()
    }
}

// ============================================================================
// Views
// ============================================================================

fn default_background() -> String {
    "#ffffff".to_string()
}

fn default_version() -> u32 {
    1
}

/// One product view: ordered objects (z-order) plus garment color
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct View {
    pub key: ViewKey,
    pub objects: Vec<DesignObject>,
    #[serde(default = "default_background")]
    pub background_color: String,
}

impl View {
    pub fn new(key: impl Into<ViewKey>, background_color: &str) -> Self {
        Self {
            key: key.into(),
            objects: Vec::new(),
            background_color: background_color.to_string(),
        }
    }

    /// Get an object by ID
    pub fn get(&self, id: &str) -> Option<&DesignObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    /// Get mutable object by ID
    pub fn get_mut(&mut self, id: &str) -> Option<&mut DesignObject> {
        self.objects.iter_mut().find(|o| o.id == id)
    }

    /// Sequence index (z-order) of an object
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.objects.iter().position(|o| o.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index_of(id).is_some()
    }
}

/// Every view of the product. The set of views is fixed once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewRegistry {
    /// Format version
    #[serde(default = "default_version")]
    pub version: u32,
    pub views: Vec<View>,
}

impl Default for ViewRegistry {
    fn default() -> Self {
        Self::with_views(&["front", "back"], "#ffffff")
    }
}

impl ViewRegistry {
    /// Registry with the given view keys, all sharing one background color
    pub fn with_views(keys: &[&str], background_color: &str) -> Self {
        Self {
            version: 1,
            views: keys.iter().map(|k| View::new(*k, background_color)).collect(),
        }
    }

    pub fn view(&self, key: &str) -> Option<&View> {
        self.views.iter().find(|v| v.key == key)
    }

    pub fn view_mut(&mut self, key: &str) -> Option<&mut View> {
        self.views.iter_mut().find(|v| v.key == key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.views.iter().map(|v| v.key.as_str())
    }

    /// Total object count across all views
    pub fn object_count(&self) -> usize {
        self.views.iter().map(|v| v.objects.len()).sum()
    }
}
