//! Forward-only binary decoder for PDO streams
//!
//! [`PdoReader`] wraps any [`Read`] and provides the primitive reads the
//! structural parser needs: little-endian integers and floats, raw byte runs
//! and the obfuscated, length-prefixed strings of the format.
//!
//! The two stream-wide string settings (the obfuscation shift and the
//! single/multi-byte unit mode) are fields of the reader rather than global
//! state, so independent parses never interfere with each other. The reader
//! also tracks the current parse [`Stage`] so that any failed read is
//! reported with the section it happened in.

use crate::error::{Error, Result, Stage};
use crate::model::{ParserConfig, Rect};
use byteorder::{LittleEndian, ReadBytesExt};
use encoding_rs::SHIFT_JIS;
use std::io::{self, Read};

/// Sequential reader over a PDO byte stream
#[derive(Debug)]
pub struct PdoReader<R> {
    inner: R,
    shift: u8,
    multi_byte: bool,
    stage: Stage,
    config: ParserConfig,
}

impl<R: Read> PdoReader<R> {
    /// Create a reader with default limits, shift 0 and single-byte strings
    pub fn new(inner: R) -> Self {
        Self::with_config(inner, ParserConfig::default())
    }

    /// Create a reader with custom limits
    pub fn with_config(inner: R, config: ParserConfig) -> Self {
        Self {
            inner,
            shift: 0,
            multi_byte: false,
            stage: Stage::Magic,
            config,
        }
    }

    /// Builder-style setter for the string shift
    pub fn with_shift(mut self, shift: u8) -> Self {
        self.shift = shift;
        self
    }

    /// Builder-style setter for the string unit mode
    pub fn with_multi_byte(mut self, multi_byte: bool) -> Self {
        self.multi_byte = multi_byte;
        self
    }

    /// Set the shift subtracted from every string unit
    pub fn set_shift(&mut self, shift: u8) {
        self.shift = shift;
    }

    /// Switch between 1-byte and 2-byte string units
    pub fn set_multi_byte(&mut self, multi_byte: bool) {
        self.multi_byte = multi_byte;
    }

    /// Current string shift
    pub fn shift(&self) -> u8 {
        self.shift
    }

    /// Whether strings are read as 16-bit units
    pub fn multi_byte(&self) -> bool {
        self.multi_byte
    }

    /// Stage used to tag read failures
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Limits this reader enforces
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Mark the start of a new parse stage
    pub(crate) fn enter(&mut self, stage: Stage) {
        self.stage = stage;
    }

    /// Consume the reader, returning the wrapped source
    pub fn into_inner(self) -> R {
        self.inner
    }

    fn tag<T>(&self, result: io::Result<T>) -> Result<T> {
        result.map_err(|e| Error::in_stage(e, self.stage))
    }

    /// Read one byte
    pub fn read_u8(&mut self) -> Result<u8> {
        let v = self.inner.read_u8();
        self.tag(v)
    }

    /// Read a one-byte flag; only the value 1 counts as set
    pub fn read_flag(&mut self) -> Result<bool> {
        Ok(self.read_u8()? == 1)
    }

    /// Read a little-endian `i16`
    pub fn read_i16(&mut self) -> Result<i16> {
        let v = self.inner.read_i16::<LittleEndian>();
        self.tag(v)
    }

    /// Read a little-endian `u16`
    pub fn read_u16(&mut self) -> Result<u16> {
        let v = self.inner.read_u16::<LittleEndian>();
        self.tag(v)
    }

    /// Read a little-endian `i32`
    pub fn read_i32(&mut self) -> Result<i32> {
        let v = self.inner.read_i32::<LittleEndian>();
        self.tag(v)
    }

    /// Read a little-endian `u32`
    pub fn read_u32(&mut self) -> Result<u32> {
        let v = self.inner.read_u32::<LittleEndian>();
        self.tag(v)
    }

    /// Read a little-endian `f32`
    pub fn read_f32(&mut self) -> Result<f32> {
        let v = self.inner.read_f32::<LittleEndian>();
        self.tag(v)
    }

    /// Read a little-endian `f64`
    pub fn read_f64(&mut self) -> Result<f64> {
        let v = self.inner.read_f64::<LittleEndian>();
        self.tag(v)
    }

    /// Read `N` consecutive `f64` values
    pub fn read_f64_array<const N: usize>(&mut self) -> Result<[f64; N]> {
        let mut out = [0.0; N];
        for v in out.iter_mut() {
            *v = self.read_f64()?;
        }
        Ok(out)
    }

    /// Read exactly `N` bytes
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut buf = [0u8; N];
        let r = self.inner.read_exact(&mut buf);
        self.tag(r)?;
        Ok(buf)
    }

    /// Read a run of `len` bytes
    ///
    /// The buffer grows with the data actually read, so a corrupt length
    /// cannot force a large allocation up front.
    pub fn read_bytes(&mut self, len: usize) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        let r = (&mut self.inner).take(len as u64).read_to_end(&mut buf);
        self.tag(r)?;
        if buf.len() < len {
            return Err(Error::Truncated { stage: self.stage });
        }
        Ok(buf)
    }

    /// Discard `len` bytes
    pub fn skip(&mut self, len: u64) -> Result<()> {
        let r = io::copy(&mut (&mut self.inner).take(len), &mut io::sink());
        let copied = self.tag(r)?;
        if copied < len {
            return Err(Error::Truncated { stage: self.stage });
        }
        Ok(())
    }

    /// Read an `i32` element count, rejecting negative or oversized values
    pub fn read_count(&mut self, what: &'static str) -> Result<usize> {
        let raw = self.read_i32()?;
        self.check_count(what, raw, self.config.max_element_count())
    }

    /// Validate a raw count against a limit
    pub(crate) fn check_count(&self, what: &'static str, raw: i32, max: usize) -> Result<usize> {
        match usize::try_from(raw) {
            Ok(count) if count <= max => Ok(count),
            _ => Err(Error::InvalidCount {
                stage: self.stage,
                what,
                count: i64::from(raw),
            }),
        }
    }

    /// Read an axis-aligned rectangle (left, top, width, height)
    pub fn read_rect(&mut self) -> Result<Rect> {
        let [left, top, width, height] = self.read_f64_array::<4>()?;
        Ok(Rect::new(left, top, width, height))
    }

    /// Read a string using the stream's shift
    pub fn read_string(&mut self) -> Result<String> {
        self.read_string_with_shift(self.shift)
    }

    /// Read a string without applying any shift
    pub fn read_unshifted_string(&mut self) -> Result<String> {
        self.read_string_with_shift(0)
    }

    /// Read a length-prefixed string, subtracting `shift` from every unit
    ///
    /// The prefix is a byte count that includes the terminator. A
    /// non-positive prefix yields an empty string without consuming data.
    pub fn read_string_with_shift(&mut self, shift: u8) -> Result<String> {
        let len = self.read_i32()?;
        if len <= 0 {
            return Ok(String::new());
        }
        let len = self.check_count("string byte", len, self.config.max_string_bytes())?;

        if self.multi_byte {
            let count = len / 2;
            let bytes = self.read_bytes(count * 2)?;
            let units: Vec<u16> = bytes
                .chunks_exact(2)
                .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
                .collect();
            Ok(decode_multi_byte(&units, shift))
        } else {
            let bytes = self.read_bytes(len)?;
            Ok(decode_single_byte(&bytes, shift))
        }
    }
}

/// Remove the shift from single-byte units and decode them as Shift-JIS
///
/// Decoding stops at the first unit whose shifted value is zero. If the
/// bytes are not valid Shift-JIS, the shifted bytes are returned as a lossy
/// UTF-8 string instead of failing.
pub fn decode_single_byte(units: &[u8], shift: u8) -> String {
    let shifted: Vec<u8> = units
        .iter()
        .map(|b| b.wrapping_sub(shift))
        .take_while(|&b| b != 0)
        .collect();

    match SHIFT_JIS.decode_without_bom_handling_and_without_replacement(&shifted) {
        Some(text) => text.into_owned(),
        None => {
            tracing::warn!(
                len = shifted.len(),
                "string is not valid Shift-JIS, using raw bytes"
            );
            String::from_utf8_lossy(&shifted).into_owned()
        }
    }
}

/// Remove the shift from 16-bit units and decode them as UTF-16
///
/// Decoding stops at the first unit whose shifted value is zero. Unpaired
/// surrogates become U+FFFD.
pub fn decode_multi_byte(units: &[u16], shift: u8) -> String {
    let shifted: Vec<u16> = units
        .iter()
        .map(|w| w.wrapping_sub(u16::from(shift)))
        .take_while(|&w| w != 0)
        .collect();
    String::from_utf16_lossy(&shifted)
}
