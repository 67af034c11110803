//! Material and texture types

/// An RGBA color with float channels in `0.0..=1.0`
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rgba {
    /// Red
    pub r: f32,
    /// Green
    pub g: f32,
    /// Blue
    pub b: f32,
    /// Alpha
    pub a: f32,
}

impl Rgba {
    /// Create a new color
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Convert to 8-bit channels, clamping out-of-range values
    pub fn to_u8(&self) -> [u8; 4] {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }
}

/// The four 3D shading color sets of a material, stored R,G,B,A in the file
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MaterialColors {
    /// Base material color
    pub material: Rgba,
    /// 3D material color
    pub material_3d: Rgba,
    /// Light color
    pub light: Rgba,
    /// Diffuse color
    pub diffuse: Rgba,
}

/// Embedded texture bitmap
///
/// The payload is kept compressed; decode it on demand with
/// [`Texture::decode`](crate::texture).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Texture {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Two-byte stream sub-header preceding the payload
    pub data_header: u16,
    /// Raw deflate payload
    pub data: Vec<u8>,
    /// Checksum stored after the payload (not used to gate decoding)
    pub data_hash: u32,
}

/// A material
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Material {
    /// Material name, never empty after parsing
    pub name: String,
    /// 3D shading colors
    pub color_3d: MaterialColors,
    /// 2D print color, stored A,R,G,B in the file
    pub color_2d: Rgba,
    /// Embedded texture
    pub texture: Option<Texture>,
}

impl Material {
    /// Create an untextured material with the given name
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Name given to materials stored without one
    pub fn fallback_name(index: usize) -> String {
        format!("named_material{}", index)
    }
}
