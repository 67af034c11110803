//! Shared utilities for building synthetic PDO files in tests
//!
//! [`PdoBuilder`] writes the little-endian primitives and obfuscated strings
//! of the format, plus a few canned sections, so tests can assemble complete
//! files without fixture binaries.

#![allow(dead_code)]

use flate2::Compression;
use flate2::write::DeflateEncoder;
use std::io::Write;

/// Byte-level writer for PDO streams
#[derive(Debug, Default)]
pub struct PdoBuilder {
    buf: Vec<u8>,
    shift: u8,
    multi_byte: bool,
}

impl PdoBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn finish(&self) -> Vec<u8> {
        self.buf.clone()
    }

    /// Switch the string shift and unit width used by later strings
    pub fn set_mode(&mut self, shift: u8, multi_byte: bool) -> &mut Self {
        self.shift = shift;
        self.multi_byte = multi_byte;
        self
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn u8(&mut self, v: u8) -> &mut Self {
        self.buf.push(v);
        self
    }

    pub fn u16(&mut self, v: u16) -> &mut Self {
        self.buf.extend_from_slice(&v.to_le_bytes());
        self
    }

    pub fn i32(&mut self, v: i32) -> &mut Self {
        self.buf.extend_from_slice(&v.to_le_bytes());
        self
    }

    pub fn u32(&mut self, v: u32) -> &mut Self {
        self.buf.extend_from_slice(&v.to_le_bytes());
        self
    }

    pub fn f32(&mut self, v: f32) -> &mut Self {
        self.buf.extend_from_slice(&v.to_le_bytes());
        self
    }

    pub fn f64(&mut self, v: f64) -> &mut Self {
        self.buf.extend_from_slice(&v.to_le_bytes());
        self
    }

    pub fn f64s(&mut self, values: &[f64]) -> &mut Self {
        for v in values {
            self.f64(*v);
        }
        self
    }

    pub fn bytes(&mut self, data: &[u8]) -> &mut Self {
        self.buf.extend_from_slice(data);
        self
    }

    pub fn rect(&mut self, left: f64, top: f64, width: f64, height: f64) -> &mut Self {
        self.f64s(&[left, top, width, height])
    }

    /// Single-byte string from raw (already encoded) bytes, with the shift
    pub fn raw_string(&mut self, text: &[u8]) -> &mut Self {
        self.i32(text.len() as i32 + 1);
        let shift = self.shift;
        for b in text {
            self.u8(b.wrapping_add(shift));
        }
        self.u8(shift)
    }

    /// String in the current unit mode, with the shift
    pub fn string(&mut self, text: &str) -> &mut Self {
        self.string_with_shift(text, self.shift)
    }

    pub fn unshifted_string(&mut self, text: &str) -> &mut Self {
        self.string_with_shift(text, 0)
    }

    fn string_with_shift(&mut self, text: &str, shift: u8) -> &mut Self {
        if self.multi_byte {
            let units: Vec<u16> = text.encode_utf16().chain(std::iter::once(0)).collect();
            self.i32(units.len() as i32 * 2);
            for unit in units {
                self.u16(unit.wrapping_add(u16::from(shift)));
            }
            self
        } else {
            self.i32(text.len() as i32 + 1);
            for b in text.bytes().chain(std::iter::once(0)) {
                self.u8(b.wrapping_add(shift));
            }
            self
        }
    }

    pub fn magic(&mut self) -> &mut Self {
        self.bytes(b"version 3\n")
    }

    /// Magic and a header with fixed field values
    ///
    /// Locale "en", codepage "1252", key "key", designer "designer",
    /// assembled height 100, one lock block in version 6.
    pub fn header(&mut self, version: i32, shift: u8, multi_byte: bool) -> &mut Self {
        self.magic();
        self.i32(version);
        self.i32(if multi_byte { 1 } else { 0 });
        self.multi_byte = multi_byte;
        self.i32(0);

        if version > 4 {
            self.unshifted_string("designer");
            self.i32(i32::from(shift));
            self.shift = shift;
        }

        self.string("en").string("1252").i32(0);
        if version == 6 {
            self.u8(1).u8(0);
        }
        self.string("key");
        if version == 6 {
            self.i32(1).bytes(&[0xEE; 8]);
        } else if version > 4 {
            self.u8(1).u8(0);
        }
        self.f64(100.0).f64s(&[1.0, 2.0, 3.0])
    }

    /// Settings block: A4 portrait, margins side 10 / top 15
    pub fn settings(&mut self, version: i32, part_count: usize) -> &mut Self {
        self.settings_with_page(version, part_count, 0, None, 0)
    }

    pub fn settings_with_page(
        &mut self,
        version: i32,
        part_count: usize,
        page_type: i32,
        custom: Option<(f64, f64)>,
        orientation: i32,
    ) -> &mut Self {
        if version == 6 && part_count > 0 {
            self.i32(part_count as i32);
            for i in 0..part_count {
                self.i32(i as i32 + 1);
                for _ in 0..=i {
                    self.i32(-7);
                }
            }
        }

        self.bytes(&[1, 1, 0, 1, 0]);
        self.i32(15);
        self.u8(0);
        self.i32(0).i32(1).i32(2).i32(10);
        self.i32(page_type);
        if let Some((w, h)) = custom {
            self.f64(w).f64(h);
        }
        self.i32(orientation).i32(10).i32(15);
        self.f64s(&[1.0, 0.5, 1.0, 0.5, 0.0, 0.0]);
        self.f64s(&[2.0, 1.0, 2.0, 1.0, 0.0, 0.0]);
        self.u8(0).f64(1.0);
        if version > 4 {
            self.string("author").string("comment");
        }
        self
    }

    /// Texture block wrapping a deflate payload
    pub fn texture(&mut self, width: i32, height: i32, payload: &[u8], hash: u32) -> &mut Self {
        self.i32(width).i32(height);
        self.i32(payload.len() as i32 + 6);
        self.u16(0x9C78);
        self.bytes(payload);
        self.u32(hash)
    }

    /// Material with constant colors and an optional texture block
    pub fn material(&mut self, name: &str, texture: Option<(i32, i32, &[u8])>) -> &mut Self {
        self.string(name);
        for i in 0..16 {
            self.f32(i as f32 / 16.0);
        }
        self.f32(1.0).f32(0.5).f32(0.25).f32(0.0);
        match texture {
            Some((w, h, payload)) => {
                self.u8(1);
                self.texture(w, h, payload, 0)
            }
            None => self.u8(0),
        }
    }

    /// 2D loop vertex with default texture coordinates and no flap
    pub fn face_vertex(&mut self, id: i32, x: f64, y: f64) -> &mut Self {
        self.i32(id).f64s(&[x, y, x / 10.0, y / 10.0]);
        self.u8(0).f64s(&[0.0, 0.0, 0.0]);
        self.bytes(&[0u8; 24])
    }

    /// Edge record in its packed 22-byte form
    pub fn edge(&mut self, face1: i32, face2: i32, v1: i32, v2: i32, connects: bool) -> &mut Self {
        self.i32(face1).i32(face2).i32(v1).i32(v2);
        self.bytes(&(connects as i16).to_le_bytes());
        self.i32(if connects { 0 } else { 1 })
    }

    /// Line record; `end` is the explicit second endpoint of a fold line
    pub fn line(
        &mut self,
        hidden: bool,
        kind: i32,
        start: (i32, i32),
        end: Option<(i32, i32)>,
    ) -> &mut Self {
        self.u8(hidden as u8).i32(kind).u8(0);
        self.i32(start.0).i32(start.1);
        match end {
            Some((face, vertex)) => self.u8(1).i32(face).i32(vertex),
            None => self.u8(0),
        }
    }

    /// Object "square": 4 vertices, two triangles sharing the diagonal
    pub fn square_object(&mut self) -> &mut Self {
        self.string("square").u8(1);
        self.i32(4);
        for [x, y] in [[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 10.0]] {
            self.f64s(&[x, y, 0.0]);
        }

        self.i32(2);
        self.i32(0).i32(0).f64s(&[0.0, 0.0, 1.0, 0.0]).i32(3);
        self.face_vertex(0, 0.0, 0.0)
            .face_vertex(1, 10.0, 0.0)
            .face_vertex(2, 10.0, 10.0);
        self.i32(-1).i32(0).f64s(&[0.0, 0.0, 1.0, 0.0]).i32(3);
        self.face_vertex(0, 0.0, 0.0)
            .face_vertex(2, 10.0, 10.0)
            .face_vertex(3, 0.0, 10.0);

        self.i32(5);
        self.edge(0, -1, 0, 1, false)
            .edge(0, -1, 1, 2, false)
            .edge(0, 1, 2, 0, true)
            .edge(1, -1, 2, 3, false)
            .edge(1, -1, 3, 0, false)
    }

    /// Part of object 0 with the square's four cut lines and one valley fold
    pub fn square_part(&mut self, version: i32, name: &str, left: f64, top: f64) -> &mut Self {
        self.i32(0).rect(left, top, 10.0, 10.0);
        if version > 4 {
            self.string(name);
        }
        self.i32(6);
        self.line(false, 0, (0, 0), None)
            .line(false, 0, (0, 1), None)
            .line(false, 2, (0, 2), Some((1, 0)))
            .line(false, 0, (1, 2), None)
            .line(false, 0, (1, 3), None)
            .line(true, 0, (1, 0), None)
    }
}

/// Deflate `data` without a zlib wrapper
pub fn deflate(data: &[u8]) -> Vec<u8> {
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

/// Smallest valid file: no objects, no materials, no unfold data
pub fn minimal_pdo(version: i32) -> Vec<u8> {
    let mut b = PdoBuilder::new();
    b.header(version, 0, false).i32(0).i32(0).u8(0).settings(version, 0);
    b.finish()
}

/// Raw 2x2 RGB pixels used for textures
pub const PIXELS_2X2: [u8; 12] = [255, 0, 0, 0, 255, 0, 0, 0, 255, 10, 20, 30];

/// A complete file: one square object, a textured and an unnamed material,
/// two parts on different pages, a text block and one image in each image
/// list
pub fn sample_pdo(version: i32, shift: u8, multi_byte: bool) -> Vec<u8> {
    let payload = deflate(&PIXELS_2X2);
    let mut b = PdoBuilder::new();
    b.header(version, shift, multi_byte);

    b.i32(1).square_object();

    b.i32(2)
        .material("paper", Some((2, 2, payload.as_slice())))
        .material("", None);

    b.u8(1).f64(1.5).u8(0).rect(0.0, 0.0, 400.0, 40.0);

    b.i32(2)
        .square_part(version, "front", 20.0, 20.0)
        .square_part(version, "back", 200.0, 20.0);

    b.i32(1);
    b.rect(30.0, 100.0, 80.0, 20.0).f64(6.0).i32(0).i32(4).string("Sans");
    b.i32(2).string("Cut along solid lines").string("Fold along dashes");

    b.i32(1).rect(0.0, 150.0, 2.0, 2.0).texture(2, 2, &payload, 0);
    b.i32(1).rect(5.0, 150.0, 2.0, 2.0).texture(2, 2, &payload, 0);

    b.settings(version, 2);
    b.finish()
}
