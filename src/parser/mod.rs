//! Binary structural parser for PDO files
//!
//! The stream is consumed once, top to bottom, in a fixed stage order:
//! magic, header, objects, materials, the optional unfold section (parts,
//! text blocks, images) and finally the settings block. Any failure aborts
//! the parse; there is no partial model.

mod core;
mod header;
mod material;
mod settings;
mod unfold;

use crate::error::Result;
use crate::model::{Model, ParserConfig};
use crate::reader::PdoReader;
use crate::validator;
use std::io::Read;

pub use core::{
    EDGE_RECORD_SIZE, decode_edge, parse_face, parse_face_2d_vertex, parse_object, parse_objects,
};
pub use header::{parse_header, read_magic};
pub use material::{TEXTURE_WRAPPER_SIZE, parse_material, parse_materials, parse_texture};
pub use settings::parse_settings;
pub use unfold::{
    UnfoldSection, parse_images, parse_line, parse_part, parse_parts, parse_text_blocks,
    parse_unfold,
};

/// Literal every PDO file starts with
pub const MAGIC: &[u8; 10] = b"version 3\n";

/// Parse a PDO file from a reader with default limits
pub fn parse_pdo<R: Read>(reader: R) -> Result<Model> {
    parse_pdo_with_config(reader, ParserConfig::default())
}

/// Parse a PDO file from a reader with custom limits
///
/// When `config.validate()` is set, cross references of the finished model
/// are checked before it is returned.
pub fn parse_pdo_with_config<R: Read>(reader: R, config: ParserConfig) -> Result<Model> {
    let validate = config.validate();
    let mut reader = PdoReader::with_config(reader, config);
    let model = parse_model(&mut reader)?;

    if validate {
        validator::validate_model(&model)?;
    }
    Ok(model)
}

/// Run every parse stage against an existing reader
pub fn parse_model<R: Read>(reader: &mut PdoReader<R>) -> Result<Model> {
    read_magic(reader)?;
    let header = parse_header(reader)?;
    let version = header.version;

    let objects = parse_objects(reader)?;
    let materials = parse_materials(reader)?;
    let section = parse_unfold(reader, version)?;

    let mut model = Model {
        header,
        objects,
        materials,
        ..Default::default()
    };
    if let Some(section) = section {
        model.unfold = Some(section.unfold);
        model.parts = section.parts;
        model.text_blocks = section.text_blocks;
        model.images = section.images;
    }

    model.settings = parse_settings(reader, version, model.parts.len())?;

    tracing::debug!(
        version = version.as_raw(),
        objects = model.objects.len(),
        materials = model.materials.len(),
        parts = model.parts.len(),
        "Parsed PDO model"
    );

    Ok(model)
}
