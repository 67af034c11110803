//! Net geometry resolution
//!
//! Lines of a part address their endpoints as (face index, 3D vertex id)
//! pairs. The 2D position is found by scanning the face's unfolded loop for
//! the entry carrying that 3D id. Boundary lines only name their start; the
//! end is the next entry of the same loop.
//!
//! A failed lookup is not an error: the line simply produces no segment.

use crate::model::{Face2DVertex, Line, LineEnd, LineKind, Model, Object, Part, VertexRef};

/// A point in print space
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point2 {
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
}

impl Point2 {
    /// Create a new point
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<&Face2DVertex> for Point2 {
    fn from(v: &Face2DVertex) -> Self {
        Point2::new(v.x, v.y)
    }
}

/// A resolved, visible line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    /// Start point
    pub start: Point2,
    /// End point
    pub end: Point2,
    /// Line role
    pub kind: LineKind,
}

impl Segment {
    /// The segment moved by `(dx, dy)`
    pub fn offset(&self, dx: f64, dy: f64) -> Segment {
        Segment {
            start: Point2::new(self.start.x + dx, self.start.y + dy),
            end: Point2::new(self.end.x + dx, self.end.y + dy),
            kind: self.kind,
        }
    }

    /// Euclidean length
    pub fn length(&self) -> f64 {
        (self.end.x - self.start.x).hypot(self.end.y - self.start.y)
    }
}

fn face_loop(object: &Object, face: i32) -> Option<&[Face2DVertex]> {
    let index = usize::try_from(face).ok()?;
    object.faces.get(index).map(|f| f.vertices.as_slice())
}

fn loop_position(vertices: &[Face2DVertex], vertex_id: i32) -> Option<usize> {
    vertices.iter().position(|v| v.id_vertex == vertex_id)
}

/// Find the 2D vertex of `face` that corresponds to 3D vertex `vertex_id`
///
/// Returns `None` if the face index is out of range or the face's loop has
/// no entry with that id.
pub fn find_2d_vertex(object: &Object, face: i32, vertex_id: i32) -> Option<&Face2DVertex> {
    let vertices = face_loop(object, face)?;
    loop_position(vertices, vertex_id).map(|i| &vertices[i])
}

/// Find the loop successor of the 2D vertex matching `vertex_id`
///
/// The successor of the last entry is the first entry.
pub fn next_2d_vertex(object: &Object, face: i32, vertex_id: i32) -> Option<&Face2DVertex> {
    let vertices = face_loop(object, face)?;
    let i = loop_position(vertices, vertex_id)?;
    Some(&vertices[(i + 1) % vertices.len()])
}

/// Resolve a line to a segment in part-local coordinates
///
/// Hidden lines and lines with an unresolvable endpoint yield `None`.
pub fn resolve_line(object: &Object, line: &Line) -> Option<Segment> {
    if line.hidden {
        tracing::trace!(?line.start, "hidden line skipped");
        return None;
    }

    let VertexRef { face, vertex } = line.start;
    let start = find_2d_vertex(object, face, vertex);
    let end = match line.end {
        LineEnd::NextInLoop => next_2d_vertex(object, face, vertex),
        LineEnd::Explicit(other) => find_2d_vertex(object, other.face, other.vertex),
    };

    match (start, end) {
        (Some(start), Some(end)) => Some(Segment {
            start: start.into(),
            end: end.into(),
            kind: line.kind,
        }),
        _ => {
            tracing::trace!(?line.start, ?line.end, "line endpoint not found");
            None
        }
    }
}

impl Part {
    /// Visible segments of this part in part-local coordinates
    ///
    /// Yields nothing when the part references an object that does not exist.
    pub fn segments<'a>(&'a self, model: &'a Model) -> impl Iterator<Item = Segment> + 'a {
        let object = model.part_object(self);
        self.lines
            .iter()
            .filter_map(move |line| resolve_line(object?, line))
    }

    /// Visible segments translated into global print space
    pub fn global_segments<'a>(&'a self, model: &'a Model) -> impl Iterator<Item = Segment> + 'a {
        let (dx, dy) = (self.bounding_box.left, self.bounding_box.top);
        self.segments(model).map(move |s| s.offset(dx, dy))
    }
}

impl Model {
    /// Visible segments of `parts[part]` in part-local coordinates
    pub fn part_segments(&self, part: usize) -> Vec<Segment> {
        self.parts
            .get(part)
            .map(|p| p.segments(self).collect())
            .unwrap_or_default()
    }
}
