//! 3D object parsing
//!
//! Objects carry their vertices, faces with unfolded 2D loops, and packed
//! edge records.

use crate::error::{Result, Stage};
use crate::model::{Edge, Face, Face2DVertex, Flap, Object, Vertex};
use crate::reader::PdoReader;
use byteorder::{ByteOrder, LittleEndian};
use std::io::Read;

/// Size of a packed edge record
pub const EDGE_RECORD_SIZE: usize = 22;

/// Parse the count-prefixed object list
pub fn parse_objects<R: Read>(reader: &mut PdoReader<R>) -> Result<Vec<Object>> {
    reader.enter(Stage::Objects);
    let count = reader.read_count("object")?;
    let mut objects = Vec::with_capacity(count.min(1024));
    for _ in 0..count {
        objects.push(parse_object(reader)?);
    }
    tracing::debug!(count = objects.len(), "Parsed objects");
    Ok(objects)
}

/// Parse one object
pub fn parse_object<R: Read>(reader: &mut PdoReader<R>) -> Result<Object> {
    let name = reader.read_string()?;
    let visible = reader.read_u8()? != 0;

    let vertex_count = reader.read_count("vertex")?;
    let mut vertices = Vec::with_capacity(vertex_count.min(65536));
    for _ in 0..vertex_count {
        let [x, y, z] = reader.read_f64_array::<3>()?;
        vertices.push(Vertex::new(x, y, z));
    }

    let face_count = reader.read_count("face")?;
    let mut faces = Vec::with_capacity(face_count.min(65536));
    for _ in 0..face_count {
        faces.push(parse_face(reader)?);
    }

    let edge_count = reader.read_count("edge")?;
    let mut edges = Vec::with_capacity(edge_count.min(65536));
    for _ in 0..edge_count {
        let record = reader.read_array::<EDGE_RECORD_SIZE>()?;
        edges.push(decode_edge(&record));
    }

    tracing::trace!(
        name = %name,
        vertices = vertices.len(),
        faces = faces.len(),
        edges = edges.len(),
        "Parsed object"
    );

    Ok(Object {
        name,
        visible,
        vertices,
        faces,
        edges,
    })
}

/// Parse a face and its unfolded 2D loop
pub fn parse_face<R: Read>(reader: &mut PdoReader<R>) -> Result<Face> {
    let material_index = reader.read_i32()?;
    let part_index = reader.read_i32()?;
    let normal = reader.read_f64_array::<3>()?;
    let coord = reader.read_f64()?;

    let count = reader.read_count("face vertex")?;
    let mut vertices = Vec::with_capacity(count.min(256));
    for _ in 0..count {
        vertices.push(parse_face_2d_vertex(reader)?);
    }

    Ok(Face {
        material_index,
        part_index,
        normal,
        coord,
        vertices,
    })
}

/// Parse one 2D loop entry with its flap data
pub fn parse_face_2d_vertex<R: Read>(reader: &mut PdoReader<R>) -> Result<Face2DVertex> {
    let id_vertex = reader.read_i32()?;
    let [x, y, u, v] = reader.read_f64_array::<4>()?;
    let enabled = reader.read_flag()?;
    let [height, a_angle, b_angle] = reader.read_f64_array::<3>()?;
    let fold_info = reader.read_array::<24>()?;

    Ok(Face2DVertex {
        id_vertex,
        x,
        y,
        u,
        v,
        flap: Flap {
            enabled,
            height,
            a_angle,
            b_angle,
            fold_info,
        },
    })
}

/// Decode a packed 22-byte edge record
///
/// Layout: face1, face2, vertex1, vertex2 (`i32`), connects-faces (`i16`),
/// no-connected-face marker (`i32`), with no padding.
pub fn decode_edge(record: &[u8; EDGE_RECORD_SIZE]) -> Edge {
    Edge {
        face1_index: LittleEndian::read_i32(&record[0..4]),
        face2_index: LittleEndian::read_i32(&record[4..8]),
        vertex1_index: LittleEndian::read_i32(&record[8..12]),
        vertex2_index: LittleEndian::read_i32(&record[12..16]),
        connects_faces: LittleEndian::read_i16(&record[16..18]) != 0,
        no_connected_face: LittleEndian::read_i32(&record[18..22]),
    }
}
