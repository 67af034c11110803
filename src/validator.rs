//! Cross-reference validation for parsed models
//!
//! The parser only checks that the byte stream is well formed. This module
//! checks that the indices stored in the model point at things that exist:
//! - every part references an existing object
//! - face material indices are negative (no material) or in range
//! - 2D loop vertices reference 3D vertices of the owning object
//! - 3D vertex ids are unique within one face loop
//! - edge face and vertex indices are in range
//!
//! Dangling line endpoints are not checked; the resolver skips them.

use crate::error::{Error, Result};
use crate::model::{Model, Object};
use std::collections::HashSet;

/// Validate a parsed model
pub fn validate_model(model: &Model) -> Result<()> {
    validate_part_objects(model)?;
    for (object_idx, object) in model.objects.iter().enumerate() {
        validate_faces(model, object_idx, object)?;
        validate_edges(object_idx, object)?;
    }
    Ok(())
}

fn in_range(index: i32, len: usize) -> bool {
    usize::try_from(index).is_ok_and(|i| i < len)
}

fn validate_part_objects(model: &Model) -> Result<()> {
    for (part_idx, part) in model.parts.iter().enumerate() {
        if !in_range(part.object_index, model.objects.len()) {
            return Err(Error::InvalidModel(format!(
                "Part {} ({:?}) references object {}, but the model has {} object(s)",
                part_idx,
                part.name,
                part.object_index,
                model.objects.len()
            )));
        }
    }
    Ok(())
}

fn validate_faces(model: &Model, object_idx: usize, object: &Object) -> Result<()> {
    let num_vertices = object.vertices.len();

    for (face_idx, face) in object.faces.iter().enumerate() {
        if face.material_index >= 0 && !in_range(face.material_index, model.materials.len()) {
            return Err(Error::InvalidModel(format!(
                "Object {}: Face {} references material {}, but the model has {} material(s)",
                object_idx,
                face_idx,
                face.material_index,
                model.materials.len()
            )));
        }

        let mut seen = HashSet::with_capacity(face.vertices.len());
        for vertex in &face.vertices {
            if !in_range(vertex.id_vertex, num_vertices) {
                return Err(Error::InvalidModel(format!(
                    "Object {}: Face {} has a 2D vertex for 3D vertex {}, \
                     but the object has {} vertices",
                    object_idx, face_idx, vertex.id_vertex, num_vertices
                )));
            }
            if !seen.insert(vertex.id_vertex) {
                return Err(Error::InvalidModel(format!(
                    "Object {}: Face {} lists 3D vertex {} more than once",
                    object_idx, face_idx, vertex.id_vertex
                )));
            }
        }
    }
    Ok(())
}

fn validate_edges(object_idx: usize, object: &Object) -> Result<()> {
    let num_faces = object.faces.len();
    let num_vertices = object.vertices.len();

    for (edge_idx, edge) in object.edges.iter().enumerate() {
        let face2_ok = !edge.connects_faces || in_range(edge.face2_index, num_faces);
        if !in_range(edge.face1_index, num_faces) || !face2_ok {
            return Err(Error::InvalidModel(format!(
                "Object {}: Edge {} references faces {} and {}, but the object has {} face(s)",
                object_idx, edge_idx, edge.face1_index, edge.face2_index, num_faces
            )));
        }
        if !in_range(edge.vertex1_index, num_vertices) || !in_range(edge.vertex2_index, num_vertices)
        {
            return Err(Error::InvalidModel(format!(
                "Object {}: Edge {} references vertices {} and {}, but the object has {} vertices",
                object_idx, edge_idx, edge.vertex1_index, edge.vertex2_index, num_vertices
            )));
        }
    }
    Ok(())
}
