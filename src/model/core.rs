//! Core PDO types: header, objects and the model root

use super::material::Material;
use super::settings::Settings;
use super::unfold::{Image, Part, TextBlock, Unfold};

/// Format version declared in the file header
///
/// Later fields are gated on the version: designer information, the string
/// shift and per-part names only exist above [`FormatVersion::V4`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum FormatVersion {
    /// Version 4, the oldest supported layout
    #[default]
    V4,
    /// Version 5
    V5,
    /// Version 6, the newest supported layout
    V6,
}

impl FormatVersion {
    /// Map the raw header value to a known version
    pub fn from_raw(value: i32) -> Option<Self> {
        match value {
            4 => Some(FormatVersion::V4),
            5 => Some(FormatVersion::V5),
            6 => Some(FormatVersion::V6),
            _ => None,
        }
    }

    /// The raw header value
    pub fn as_raw(&self) -> i32 {
        match self {
            FormatVersion::V4 => 4,
            FormatVersion::V5 => 5,
            FormatVersion::V6 => 6,
        }
    }

    /// Whether this version is newer than the oldest supported layout
    pub fn is_extended(&self) -> bool {
        *self > FormatVersion::V4
    }
}

/// File header
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Header {
    /// Format version
    pub version: FormatVersion,
    /// Whether strings are stored as 16-bit units
    pub multi_byte_chars: bool,
    /// Designer identifier (extended versions only)
    pub designer_id: String,
    /// Obfuscation shift applied to all strings after the header shift field
    pub string_shift: u8,
    /// Locale string
    pub locale: String,
    /// Codepage string
    pub codepage: String,
    /// Texture lock value
    pub texture_lock: i32,
    /// Key string
    pub key: String,
    /// Startup notes flag byte as stored, non-zero when shown on open
    pub show_startup_notes: u8,
    /// Password flag byte as stored, non-zero when protected
    pub password_flag: u8,
    /// Number of 8-byte lock blocks skipped (version 6 only)
    pub lock_count: u32,
    /// Height of the assembled model
    pub assembled_height: f64,
    /// Origin offset of the 3D model
    pub origin_offset: [f64; 3],
}

/// Axis-aligned rectangle in print space (millimetres)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Left edge
    pub left: f64,
    /// Top edge
    pub top: f64,
    /// Width
    pub width: f64,
    /// Height
    pub height: f64,
}

impl Rect {
    /// Create a new rectangle
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Right edge
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    /// Bottom edge
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Smallest rectangle containing both rectangles
    pub fn union(&self, other: &Rect) -> Rect {
        let left = self.left.min(other.left);
        let top = self.top.min(other.top);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Rect::new(left, top, right - left, bottom - top)
    }
}

/// A vertex in 3D space
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vertex {
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
    /// Z coordinate
    pub z: f64,
}

impl Vertex {
    /// Create a new vertex
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Glue flap attached to the edge that starts at a 2D vertex
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Flap {
    /// Whether a flap is drawn on this edge
    pub enabled: bool,
    /// Flap height
    pub height: f64,
    /// Angle at the edge start
    pub a_angle: f64,
    /// Angle at the edge end
    pub b_angle: f64,
    /// Raw fold information
    pub fold_info: [u8; 24],
}

/// One corner of a face's unfolded footprint
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Face2DVertex {
    /// Index of the matching vertex in the owning object's vertex list
    pub id_vertex: i32,
    /// Print-space X
    pub x: f64,
    /// Print-space Y
    pub y: f64,
    /// Texture U
    pub u: f64,
    /// Texture V
    pub v: f64,
    /// Flap on the edge starting at this vertex
    pub flap: Flap,
}

impl Face2DVertex {
    /// Create a 2D vertex without texture coordinates or flap
    pub fn new(id_vertex: i32, x: f64, y: f64) -> Self {
        Self {
            id_vertex,
            x,
            y,
            ..Default::default()
        }
    }
}

/// A polygonal face of an object
///
/// `vertices` is a closed loop: the successor of entry `i` is entry
/// `(i + 1) % len`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Face {
    /// Index into `Model::materials`, negative when the face has no material
    pub material_index: i32,
    /// Index of the part this face was unfolded into
    pub part_index: i32,
    /// Face normal
    pub normal: [f64; 3],
    /// Plane coordinate
    pub coord: f64,
    /// Unfolded footprint loop
    pub vertices: Vec<Face2DVertex>,
}

impl Face {
    /// Material index if the face references one
    pub fn material(&self) -> Option<usize> {
        usize::try_from(self.material_index).ok()
    }
}

/// Mesh edge record (22 packed bytes in the file)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Edge {
    /// First face
    pub face1_index: i32,
    /// Second face
    pub face2_index: i32,
    /// First 3D vertex
    pub vertex1_index: i32,
    /// Second 3D vertex
    pub vertex2_index: i32,
    /// Whether the edge joins two distinct faces
    pub connects_faces: bool,
    /// Raw "no connected face" marker
    pub no_connected_face: i32,
}

impl Edge {
    /// Whether the edge lies on the mesh boundary
    pub fn is_boundary(&self) -> bool {
        !self.connects_faces
    }
}

/// A 3D mesh object
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Object {
    /// Object name
    pub name: String,
    /// Visibility flag
    pub visible: bool,
    /// 3D vertices
    pub vertices: Vec<Vertex>,
    /// Faces
    pub faces: Vec<Face>,
    /// Edges
    pub edges: Vec<Edge>,
}

/// A parsed PDO file
///
/// Built once by the parser and only read afterwards; share it by reference
/// (or behind an `Arc`) between renderers.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Model {
    /// File header
    pub header: Header,
    /// 3D objects
    pub objects: Vec<Object>,
    /// Materials, each with a non-empty name
    pub materials: Vec<Material>,
    /// Unfold section header, `None` when the file has no unfold data
    pub unfold: Option<Unfold>,
    /// Printable parts
    pub parts: Vec<Part>,
    /// Text annotations
    pub text_blocks: Vec<TextBlock>,
    /// Image annotations (both image lists of the file, in order)
    pub images: Vec<Image>,
    /// Page and line style settings
    pub settings: Settings,
}

impl Model {
    /// Create an empty model
    pub fn new() -> Self {
        Self::default()
    }

    /// The object a part was unfolded from
    pub fn part_object(&self, part: &Part) -> Option<&Object> {
        usize::try_from(part.object_index)
            .ok()
            .and_then(|index| self.objects.get(index))
    }

    /// The material of a face, if it has a valid one
    pub fn face_material(&self, face: &Face) -> Option<&Material> {
        face.material().and_then(|index| self.materials.get(index))
    }
}
