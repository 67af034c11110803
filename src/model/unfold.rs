//! Unfolded net types: parts, lines and print-space annotations

use super::core::Rect;
use super::material::Texture;

/// Unfold section header
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Unfold {
    /// Scale of the unfolded net relative to the 3D model
    pub scale: f64,
    /// Bounds of the whole net
    pub bounding_box: Rect,
}

/// Role of a printable line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LineKind {
    /// Free boundary, cut with a blade
    #[default]
    Cut,
    /// Fold towards the viewer
    Mountain,
    /// Fold away from the viewer
    Valley,
}

impl LineKind {
    /// Map the raw line type; unknown values are treated as cut lines
    pub fn from_code(code: i32) -> Self {
        match code {
            1 => LineKind::Mountain,
            2 => LineKind::Valley,
            _ => LineKind::Cut,
        }
    }

    /// Whether the line is a fold line
    pub fn is_fold(&self) -> bool {
        !matches!(self, LineKind::Cut)
    }

    /// Lowercase name, used as a style class by renderers
    pub fn name(&self) -> &'static str {
        match self {
            LineKind::Cut => "cut",
            LineKind::Mountain => "mountain",
            LineKind::Valley => "valley",
        }
    }
}

/// A 2D vertex addressed as (face index, 3D vertex id) within one object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct VertexRef {
    /// Index into the object's faces
    pub face: i32,
    /// 3D vertex id looked up in the face's loop
    pub vertex: i32,
}

impl VertexRef {
    /// Create a new reference
    pub fn new(face: i32, vertex: i32) -> Self {
        Self { face, vertex }
    }
}

/// Second endpoint of a line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LineEnd {
    /// Boundary edge: the successor of the start vertex in its face loop
    #[default]
    NextInLoop,
    /// Fold edge: an explicit vertex on another face
    Explicit(VertexRef),
}

/// A printable segment descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Line {
    /// Hidden lines are never drawn
    pub hidden: bool,
    /// Line role
    pub kind: LineKind,
    /// Start vertex
    pub start: VertexRef,
    /// End vertex
    pub end: LineEnd,
}

/// One printable piece of the net
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Part {
    /// Index into `Model::objects`
    pub object_index: i32,
    /// Placement in global print space
    pub bounding_box: Rect,
    /// Part name (empty for version 4 files)
    pub name: String,
    /// Lines of the part
    pub lines: Vec<Line>,
}

/// A text annotation
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextBlock {
    /// Placement in global print space
    pub bounding_box: Rect,
    /// Distance between baselines
    pub line_spacing: f64,
    /// Packed text color
    pub color: i32,
    /// Font size
    pub font_size: i32,
    /// Font family name
    pub font_name: String,
    /// Text lines, top to bottom
    pub lines: Vec<String>,
}

/// An image annotation
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Image {
    /// Placement in global print space
    pub bounding_box: Rect,
    /// Bitmap
    pub texture: Texture,
}
