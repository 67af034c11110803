//! Texture payload decoding
//!
//! Texture bitmaps are stored as zlib streams split into their parts: a
//! two-byte sub-header, a raw deflate payload and a four-byte Adler-32
//! trailer. Only the payload is needed to rebuild the pixels; the trailer is
//! kept on the [`Texture`] but never consulted while decoding.
//!
//! Decoding is lazy and pure. [`TextureCache`] can memoize results per model
//! when the same texture is requested repeatedly.

use crate::error::{Error, Result};
use crate::model::{Model, ParserConfig, Texture};
use flate2::read::DeflateDecoder;
use std::collections::HashMap;
use std::io::Read;
use std::sync::{Arc, Mutex};

/// Number of bytes per decoded pixel (R, G, B)
pub const BYTES_PER_PIXEL: usize = 3;

/// A decoded texture: row-major, top row first, interleaved RGB
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedTexture {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// `width * height * 3` bytes
    pub pixels: Vec<u8>,
}

impl DecodedTexture {
    /// RGB value of a pixel, `None` outside the bitmap
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL;
        let p = self.pixels.get(offset..offset + BYTES_PER_PIXEL)?;
        Some([p[0], p[1], p[2]])
    }

    /// Expand to interleaved RGBA with an opaque alpha channel
    pub fn to_rgba(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixels.len() / BYTES_PER_PIXEL * 4);
        for rgb in self.pixels.chunks_exact(BYTES_PER_PIXEL) {
            out.extend_from_slice(rgb);
            out.push(255);
        }
        out
    }
}

/// Inflate a raw deflate payload into a `width * height * 3` RGB buffer
///
/// Fails if the stream is malformed or ends before the buffer is full.
/// Extra decompressed bytes past the expected size are ignored. The buffer
/// grows with the inflated output, so a bogus size costs no allocation.
pub fn decode_rgb(width: u32, height: u32, payload: &[u8]) -> Result<Vec<u8>> {
    let expected = rgb_len(width, height)
        .ok_or_else(|| Error::TextureDecode(format!("{}x{} is too large", width, height)))?;

    let mut pixels = Vec::new();
    DeflateDecoder::new(payload)
        .take(expected as u64)
        .read_to_end(&mut pixels)
        .map_err(|e| {
            Error::TextureDecode(format!(
                "inflate failed for {}x{} texture ({} payload bytes): {}",
                width,
                height,
                payload.len(),
                e
            ))
        })?;

    if pixels.len() != expected {
        return Err(Error::TextureDecode(format!(
            "{}x{} texture inflated to {} of {} bytes",
            width,
            height,
            pixels.len(),
            expected
        )));
    }
    Ok(pixels)
}

fn rgb_len(width: u32, height: u32) -> Option<usize> {
    (width as usize)
        .checked_mul(height as usize)?
        .checked_mul(BYTES_PER_PIXEL)
}

impl Texture {
    /// Number of bytes the decoded RGB buffer will have
    ///
    /// Saturates at `usize::MAX` for dimensions that cannot be addressed.
    pub fn decoded_len(&self) -> usize {
        rgb_len(self.width, self.height).unwrap_or(usize::MAX)
    }

    /// Decode the payload into RGB pixels
    ///
    /// Textures larger than [`ParserConfig::DEFAULT_MAX_TEXTURE_BYTES`] once
    /// decoded are rejected. The stored checksum is not checked; use
    /// [`Texture::checksum_matches`] to inspect it separately.
    pub fn decode(&self) -> Result<DecodedTexture> {
        self.decode_with_limit(ParserConfig::DEFAULT_MAX_TEXTURE_BYTES)
    }

    /// Decode with an upper bound on the decoded size
    pub fn decode_with_limit(&self, max_bytes: usize) -> Result<DecodedTexture> {
        if self.decoded_len() > max_bytes {
            return Err(Error::TextureDecode(format!(
                "{}x{} texture exceeds the {} byte limit",
                self.width, self.height, max_bytes
            )));
        }
        if self.data.is_empty() {
            return Err(Error::TextureDecode("no texture data".to_string()));
        }
        let pixels = decode_rgb(self.width, self.height, &self.data)?;
        Ok(DecodedTexture {
            width: self.width,
            height: self.height,
            pixels,
        })
    }

    /// Whether the stored checksum equals the Adler-32 of the decoded pixels
    ///
    /// The trailer is big-endian in the stream but read little-endian into
    /// `data_hash`, so it is byte-swapped before comparing.
    pub fn checksum_matches(&self, decoded: &DecodedTexture) -> bool {
        let computed = adler::adler32_slice(&decoded.pixels);
        let matches = computed == self.data_hash.swap_bytes();
        if !matches {
            tracing::warn!(
                stored = self.data_hash.swap_bytes(),
                computed,
                "texture checksum mismatch"
            );
        }
        matches
    }
}

/// Identifies a texture within one model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureId {
    /// Texture of `Model::materials[i]`
    Material(usize),
    /// Bitmap of `Model::images[i]`
    Image(usize),
}

impl TextureId {
    /// Look the texture up in a model
    pub fn resolve<'a>(&self, model: &'a Model) -> Option<&'a Texture> {
        match *self {
            TextureId::Material(i) => model.materials.get(i)?.texture.as_ref(),
            TextureId::Image(i) => model.images.get(i).map(|image| &image.texture),
        }
    }
}

/// Thread-safe memo of decoded textures for one model
///
/// Only successful decodes are cached; failures are returned every time.
#[derive(Debug, Default)]
pub struct TextureCache {
    entries: Mutex<HashMap<TextureId, Arc<DecodedTexture>>>,
}

impl TextureCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the decoded texture, decoding it on first use
    pub fn get_or_decode(&self, model: &Model, id: TextureId) -> Result<Arc<DecodedTexture>> {
        if let Some(hit) = self.lock().get(&id) {
            return Ok(Arc::clone(hit));
        }

        let texture = id
            .resolve(model)
            .ok_or_else(|| Error::TextureDecode(format!("{:?} has no texture", id)))?;
        let decoded = Arc::new(texture.decode()?);

        self.lock().insert(id, Arc::clone(&decoded));
        Ok(decoded)
    }

    /// Number of cached textures
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether nothing has been cached yet
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<TextureId, Arc<DecodedTexture>>> {
        // A panic while holding the lock cannot leave a half-inserted entry
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Material;
    use flate2::Compression;
    use flate2::write::DeflateEncoder;
    use std::io::Write;

    const PIXELS: [u8; 12] = [255, 0, 0, 0, 255, 0, 0, 0, 255, 10, 20, 30];

    fn deflate(data: &[u8]) -> Vec<u8> {
        let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(data).unwrap();
        encoder.finish().unwrap()
    }

    fn texture(data: Vec<u8>) -> Texture {
        Texture {
            width: 2,
            height: 2,
            data_header: 0x9C78,
            data,
            data_hash: 0,
        }
    }

    #[test]
    fn test_decode_2x2() {
        let decoded = texture(deflate(&PIXELS)).decode().unwrap();
        assert_eq!(decoded.pixels, PIXELS);
        assert_eq!(decoded.pixel(0, 0), Some([255, 0, 0]));
        assert_eq!(decoded.pixel(1, 1), Some([10, 20, 30]));
        assert_eq!(decoded.pixel(2, 0), None);
    }

    #[test]
    fn test_truncated_stream_is_an_error() {
        let mut data = deflate(&PIXELS);
        data.truncate(3);
        let err = texture(data).decode().unwrap_err();
        assert!(matches!(err, Error::TextureDecode(_)));
    }

    #[test]
    fn test_short_output_is_an_error() {
        let err = texture(deflate(&PIXELS[..6])).decode().unwrap_err();
        assert!(matches!(err, Error::TextureDecode(_)));
    }

    #[test]
    fn test_empty_payload_is_an_error() {
        assert!(texture(Vec::new()).decode().is_err());
    }

    #[test]
    fn test_checksum_does_not_gate_decoding() {
        let mut tex = texture(deflate(&PIXELS));
        tex.data_hash = 0xDEAD_BEEF;
        let decoded = tex.decode().unwrap();
        assert_eq!(decoded.pixels, PIXELS);
        assert!(!tex.checksum_matches(&decoded));
    }

    #[test]
    fn test_checksum_matches_zlib_trailer() {
        let mut tex = texture(deflate(&PIXELS));
        let trailer = adler::adler32_slice(&PIXELS).to_be_bytes();
        tex.data_hash = u32::from_le_bytes(trailer);
        let decoded = tex.decode().unwrap();
        assert!(tex.checksum_matches(&decoded));
    }

    #[test]
    fn test_decode_with_limit() {
        let tex = texture(deflate(&PIXELS));
        assert!(tex.decode_with_limit(11).is_err());
        assert!(tex.decode_with_limit(12).is_ok());
    }

    #[test]
    fn test_huge_dimensions_are_rejected() {
        let mut tex = texture(deflate(&PIXELS));
        tex.width = i32::MAX as u32;
        tex.height = i32::MAX as u32;
        assert!(tex.decoded_len() > ParserConfig::DEFAULT_MAX_TEXTURE_BYTES);
        assert!(matches!(tex.decode(), Err(Error::TextureDecode(_))));
        assert!(matches!(
            tex.decode_with_limit(usize::MAX),
            Err(Error::TextureDecode(_))
        ));
        assert!(matches!(
            decode_rgb(u32::MAX, u32::MAX, &tex.data),
            Err(Error::TextureDecode(_))
        ));
    }

    #[test]
    fn test_to_rgba() {
        let decoded = texture(deflate(&PIXELS)).decode().unwrap();
        let rgba = decoded.to_rgba();
        assert_eq!(rgba.len(), 16);
        assert_eq!(&rgba[..4], &[255, 0, 0, 255]);
    }

    #[test]
    fn test_cache_reuses_decoded_texture() {
        let mut model = Model::new();
        let mut material = Material::named("skin");
        material.texture = Some(texture(deflate(&PIXELS)));
        model.materials.push(material);
        model.materials.push(Material::named("plain"));

        let cache = TextureCache::new();
        let first = cache.get_or_decode(&model, TextureId::Material(0)).unwrap();
        let second = cache.get_or_decode(&model, TextureId::Material(0)).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);

        assert!(cache.get_or_decode(&model, TextureId::Material(1)).is_err());
        assert!(cache.get_or_decode(&model, TextureId::Image(0)).is_err());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_cache_rejects_huge_texture() {
        let mut model = Model::new();
        let mut material = Material::named("huge");
        let mut tex = texture(deflate(&PIXELS));
        tex.width = i32::MAX as u32;
        tex.height = i32::MAX as u32;
        material.texture = Some(tex);
        model.materials.push(material);

        let cache = TextureCache::new();
        let err = cache.get_or_decode(&model, TextureId::Material(0)).unwrap_err();
        assert!(matches!(err, Error::TextureDecode(_)));
        assert!(cache.is_empty());
    }
}
