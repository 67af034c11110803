//! Settings block parsing

use crate::error::{Result, Stage};
use crate::model::{FormatVersion, Orientation, PageSize, Settings};
use crate::reader::PdoReader;
use std::io::Read;

/// Parse the settings block
///
/// Version 6 files with at least one part store a block of per-part
/// integer lists before the settings; it is skipped.
pub fn parse_settings<R: Read>(
    reader: &mut PdoReader<R>,
    version: FormatVersion,
    part_count: usize,
) -> Result<Settings> {
    reader.enter(Stage::Settings);

    if version == FormatVersion::V6 && part_count > 0 {
        skip_part_lists(reader)?;
    }

    let show_flaps = reader.read_u8()?;
    let show_edge_id = reader.read_u8()?;
    let edge_id_placement = reader.read_u8()?;
    let face_material = reader.read_u8()?;
    let hide_almost_flat_fold_lines = reader.read_u8()?;
    let fold_lines_hiding_angle = reader.read_i32()?;
    let draw_white_line_under_dot_line = reader.read_u8()?;
    let mountain_fold_line_style = reader.read_i32()?;
    let valley_fold_line_style = reader.read_i32()?;
    let cut_line_style = reader.read_i32()?;
    let edge_id_font_size = reader.read_i32()?;

    let page_type = reader.read_i32()?;
    let page_size = if page_type == PageSize::CUSTOM_CODE {
        let width = reader.read_f64()?;
        let height = reader.read_f64()?;
        PageSize::Custom { width, height }
    } else {
        PageSize::from_code(page_type)
    };

    let orientation = Orientation::from_code(reader.read_i32()?);
    let margin_side = reader.read_i32()?;
    let margin_top = reader.read_i32()?;
    let mountain_fold_line_pattern = reader.read_f64_array::<6>()?;
    let valley_fold_line_pattern = reader.read_f64_array::<6>()?;
    let add_outline_padding = reader.read_u8()?;
    let scale_factor = reader.read_f64()?;

    let (author_name, comment) = if version.is_extended() {
        (reader.read_string()?, reader.read_string()?)
    } else {
        (String::new(), String::new())
    };

    tracing::debug!(
        page_type,
        ?orientation,
        margin_side,
        margin_top,
        "Parsed settings"
    );

    Ok(Settings {
        show_flaps,
        show_edge_id,
        edge_id_placement,
        face_material,
        hide_almost_flat_fold_lines,
        fold_lines_hiding_angle,
        draw_white_line_under_dot_line,
        mountain_fold_line_style,
        valley_fold_line_style,
        cut_line_style,
        edge_id_font_size,
        page_size,
        orientation,
        margin_side,
        margin_top,
        mountain_fold_line_pattern,
        valley_fold_line_pattern,
        add_outline_padding,
        scale_factor,
        author_name,
        comment,
    })
}

fn skip_part_lists<R: Read>(reader: &mut PdoReader<R>) -> Result<()> {
    let lists = reader.read_count("part list")?;
    for _ in 0..lists {
        let entries = reader.read_count("part list entry")?;
        reader.skip(4 * entries as u64)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn settings_bytes(page_type: i32, custom: Option<(f64, f64)>) -> Vec<u8> {
        let mut data = vec![2, 0, 2, 1, 0];
        data.extend_from_slice(&30i32.to_le_bytes());
        data.push(1);
        for v in [1i32, 2, 0, 8] {
            data.extend_from_slice(&v.to_le_bytes());
        }
        data.extend_from_slice(&page_type.to_le_bytes());
        if let Some((w, h)) = custom {
            data.extend_from_slice(&w.to_le_bytes());
            data.extend_from_slice(&h.to_le_bytes());
        }
        for v in [1i32, 10, 15] {
            data.extend_from_slice(&v.to_le_bytes());
        }
        for i in 0..12 {
            data.extend_from_slice(&(i as f64).to_le_bytes());
        }
        data.push(0);
        data.extend_from_slice(&1.0f64.to_le_bytes());
        data
    }

    #[test]
    fn test_v4_settings() {
        let data = settings_bytes(1, None);
        let mut reader = PdoReader::new(Cursor::new(data));
        let settings = parse_settings(&mut reader, FormatVersion::V4, 3).unwrap();
        // Flag bytes are kept as stored
        assert_eq!(settings.show_flaps, 2);
        assert_eq!(settings.show_edge_id, 0);
        assert_eq!(settings.edge_id_placement, 2);
        assert_eq!(settings.face_material, 1);
        assert_eq!(settings.hide_almost_flat_fold_lines, 0);
        assert_eq!(settings.fold_lines_hiding_angle, 30);
        assert_eq!(settings.draw_white_line_under_dot_line, 1);
        assert_eq!(settings.valley_fold_line_style, 2);
        assert_eq!(settings.edge_id_font_size, 8);
        assert_eq!(settings.page_size, PageSize::A3);
        assert_eq!(settings.orientation, Orientation::Landscape);
        assert_eq!(settings.margin_side, 10);
        assert_eq!(settings.margin_top, 15);
        assert_eq!(settings.mountain_fold_line_pattern[5], 5.0);
        assert_eq!(settings.valley_fold_line_pattern[0], 6.0);
        assert_eq!(settings.add_outline_padding, 0);
        assert_eq!(settings.scale_factor, 1.0);
        assert!(settings.author_name.is_empty());
    }

    #[test]
    fn test_custom_page_size() {
        let data = settings_bytes(PageSize::CUSTOM_CODE, Some((123.0, 45.5)));
        let mut reader = PdoReader::new(Cursor::new(data));
        let settings = parse_settings(&mut reader, FormatVersion::V4, 0).unwrap();
        assert_eq!(
            settings.page_size,
            PageSize::Custom {
                width: 123.0,
                height: 45.5
            }
        );
    }

    #[test]
    fn test_v6_skips_part_lists_and_reads_author() {
        let mut data = Vec::new();
        data.extend_from_slice(&2i32.to_le_bytes());
        data.extend_from_slice(&3i32.to_le_bytes());
        data.extend_from_slice(&[0xAA; 12]);
        data.extend_from_slice(&0i32.to_le_bytes());
        data.extend(settings_bytes(0, None));
        for s in [&b"me"[..], &b"hi"[..]] {
            data.extend_from_slice(&3i32.to_le_bytes());
            data.extend_from_slice(s);
            data.push(0);
        }

        let mut reader = PdoReader::new(Cursor::new(data));
        let settings = parse_settings(&mut reader, FormatVersion::V6, 1).unwrap();
        assert_eq!(settings.show_flaps, 2);
        assert_eq!(settings.page_size, PageSize::A4);
        assert_eq!(settings.author_name, "me");
        assert_eq!(settings.comment, "hi");
    }

    #[test]
    fn test_v6_without_parts_has_no_padding() {
        let mut data = settings_bytes(0, None);
        data.extend_from_slice(&0i32.to_le_bytes());
        data.extend_from_slice(&0i32.to_le_bytes());
        let mut reader = PdoReader::new(Cursor::new(data));
        let settings = parse_settings(&mut reader, FormatVersion::V6, 0).unwrap();
        assert_eq!(settings.fold_lines_hiding_angle, 30);
    }

    #[test]
    fn test_truncated_settings() {
        let mut data = settings_bytes(0, None);
        data.truncate(20);
        let mut reader = PdoReader::new(Cursor::new(data));
        let err = parse_settings(&mut reader, FormatVersion::V4, 0).unwrap_err();
        assert_eq!(err.stage(), Some(Stage::Settings));
    }
}
