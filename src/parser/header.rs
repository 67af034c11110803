//! Magic literal and file header

use crate::error::{Error, Result, Stage};
use crate::model::{FormatVersion, Header};
use crate::reader::PdoReader;
use std::io::Read;

use super::MAGIC;

/// Size of one lock block skipped in version 6 headers
const LOCK_BLOCK_SIZE: u64 = 8;

/// Check the leading magic literal
pub fn read_magic<R: Read>(reader: &mut PdoReader<R>) -> Result<()> {
    reader.enter(Stage::Magic);
    let magic = reader.read_array::<10>()?;
    if &magic != MAGIC {
        return Err(Error::InvalidMagic(
            String::from_utf8_lossy(&magic).into_owned(),
        ));
    }
    Ok(())
}

/// Parse the header and configure the reader's string mode and shift
///
/// Field presence depends on the version:
/// - designer id and string shift only above version 4
/// - the startup-notes and password flags precede the key in version 6 and
///   follow it in version 5
/// - lock blocks only in version 6
pub fn parse_header<R: Read>(reader: &mut PdoReader<R>) -> Result<Header> {
    reader.enter(Stage::Header);

    let raw_version = reader.read_i32()?;
    let version =
        FormatVersion::from_raw(raw_version).ok_or(Error::UnsupportedVersion(raw_version))?;

    let multi_byte_chars = reader.read_i32()? == 1;
    reader.set_multi_byte(multi_byte_chars);
    let _reserved = reader.read_i32()?;

    let mut header = Header {
        version,
        multi_byte_chars,
        ..Default::default()
    };

    if version.is_extended() {
        header.designer_id = reader.read_unshifted_string()?;
        // Only the low byte is used
        header.string_shift = reader.read_i32()? as u8;
        reader.set_shift(header.string_shift);
    }

    header.locale = reader.read_string()?;
    header.codepage = reader.read_string()?;
    header.texture_lock = reader.read_i32()?;

    if version == FormatVersion::V6 {
        header.show_startup_notes = reader.read_u8()?;
        header.password_flag = reader.read_u8()?;
    }

    header.key = reader.read_string()?;

    if version == FormatVersion::V6 {
        // Negative counts mean no lock blocks
        header.lock_count = u32::try_from(reader.read_i32()?).unwrap_or(0);
        reader.skip(u64::from(header.lock_count) * LOCK_BLOCK_SIZE)?;
    } else if version.is_extended() {
        header.show_startup_notes = reader.read_u8()?;
        header.password_flag = reader.read_u8()?;
    }

    header.assembled_height = reader.read_f64()?;
    header.origin_offset = reader.read_f64_array::<3>()?;

    tracing::debug!(
        version = version.as_raw(),
        multi_byte = multi_byte_chars,
        shift = header.string_shift,
        "Parsed PDO header"
    );

    Ok(header)
}
