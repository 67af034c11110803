//! Material and texture block parsing

use crate::error::{Error, Result, Stage};
use crate::model::{Material, MaterialColors, Rgba, Texture};
use crate::reader::PdoReader;
use std::io::Read;

/// Bytes counted in the wrapped texture size that are not payload
/// (two-byte sub-header plus four-byte checksum)
pub const TEXTURE_WRAPPER_SIZE: i32 = 6;

/// Parse the count-prefixed material list
///
/// Materials stored without a name are given `named_material<N>`.
pub fn parse_materials<R: Read>(reader: &mut PdoReader<R>) -> Result<Vec<Material>> {
    reader.enter(Stage::Materials);
    let count = reader.read_count("material")?;
    let mut materials = Vec::with_capacity(count.min(1024));
    for index in 0..count {
        let mut material = parse_material(reader)?;
        if material.name.is_empty() {
            material.name = Material::fallback_name(index);
        }
        materials.push(material);
    }

    tracing::debug!(
        count = materials.len(),
        textured = materials.iter().filter(|m| m.texture.is_some()).count(),
        "Parsed materials"
    );
    Ok(materials)
}

/// Parse one material, including its texture if the flag is set
pub fn parse_material<R: Read>(reader: &mut PdoReader<R>) -> Result<Material> {
    let name = reader.read_string()?;

    let color_3d = MaterialColors {
        material: read_rgba(reader)?,
        material_3d: read_rgba(reader)?,
        light: read_rgba(reader)?,
        diffuse: read_rgba(reader)?,
    };

    // The print color is stored alpha first
    let a = reader.read_f32()?;
    let r = reader.read_f32()?;
    let g = reader.read_f32()?;
    let b = reader.read_f32()?;
    let color_2d = Rgba::new(r, g, b, a);

    let texture = if reader.read_flag()? {
        Some(parse_texture(reader)?)
    } else {
        None
    };

    Ok(Material {
        name,
        color_3d,
        color_2d,
        texture,
    })
}

fn read_rgba<R: Read>(reader: &mut PdoReader<R>) -> Result<Rgba> {
    let r = reader.read_f32()?;
    let g = reader.read_f32()?;
    let b = reader.read_f32()?;
    let a = reader.read_f32()?;
    Ok(Rgba::new(r, g, b, a))
}

/// Parse a texture block
///
/// Layout: width, height, wrapped size (`i32`), sub-header (`u16`),
/// `wrapped size - 6` payload bytes, checksum (`u32`). The payload is kept
/// compressed.
pub fn parse_texture<R: Read>(reader: &mut PdoReader<R>) -> Result<Texture> {
    let stage = reader.stage();

    let raw_width = reader.read_i32()?;
    let raw_height = reader.read_i32()?;
    let (width, height) = match (u32::try_from(raw_width), u32::try_from(raw_height)) {
        (Ok(w), Ok(h)) => (w, h),
        _ => {
            return Err(Error::invalid_format(
                stage,
                format!("texture size {}x{} is negative", raw_width, raw_height),
            ));
        }
    };

    let wrapped_size = reader.read_i32()?;
    if wrapped_size < TEXTURE_WRAPPER_SIZE {
        return Err(Error::invalid_format(
            stage,
            format!(
                "wrapped texture size {} is smaller than the {} byte wrapper",
                wrapped_size, TEXTURE_WRAPPER_SIZE
            ),
        ));
    }
    let data_len = reader.check_count(
        "texture byte",
        wrapped_size - TEXTURE_WRAPPER_SIZE,
        reader.config().max_texture_bytes(),
    )?;

    let data_header = reader.read_u16()?;
    let data = reader.read_bytes(data_len)?;
    let data_hash = reader.read_u32()?;

    tracing::trace!(width, height, payload = data.len(), "Parsed texture block");

    Ok(Texture {
        width,
        height,
        data_header,
        data,
        data_hash,
    })
}
