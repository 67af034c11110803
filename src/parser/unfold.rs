//! Unfold section: parts, lines, text blocks and images

use crate::error::{Result, Stage};
use crate::model::{
    FormatVersion, Image, Line, LineEnd, LineKind, Part, TextBlock, Unfold, VertexRef,
};
use crate::reader::PdoReader;
use std::io::Read;

use super::material::parse_texture;

/// Everything stored behind the unfold presence flag
#[derive(Debug, Default)]
pub struct UnfoldSection {
    /// Scale and overall bounds
    pub unfold: Unfold,
    /// Printable parts
    pub parts: Vec<Part>,
    /// Text annotations
    pub text_blocks: Vec<TextBlock>,
    /// Both image lists, concatenated
    pub images: Vec<Image>,
}

/// Parse the unfold section, returning `None` when the presence flag is 0
pub fn parse_unfold<R: Read>(
    reader: &mut PdoReader<R>,
    version: FormatVersion,
) -> Result<Option<UnfoldSection>> {
    reader.enter(Stage::Unfold);
    if reader.read_u8()? == 0 {
        tracing::debug!("No unfold data");
        return Ok(None);
    }

    let scale = reader.read_f64()?;
    let _padding = reader.read_u8()?;
    let bounding_box = reader.read_rect()?;

    let parts = parse_parts(reader, version)?;
    let text_blocks = parse_text_blocks(reader)?;
    let images = parse_images(reader)?;

    Ok(Some(UnfoldSection {
        unfold: Unfold {
            scale,
            bounding_box,
        },
        parts,
        text_blocks,
        images,
    }))
}

/// Parse the count-prefixed part list
pub fn parse_parts<R: Read>(
    reader: &mut PdoReader<R>,
    version: FormatVersion,
) -> Result<Vec<Part>> {
    reader.enter(Stage::Parts);
    let count = reader.read_count("part")?;
    let mut parts = Vec::with_capacity(count.min(1024));
    for _ in 0..count {
        parts.push(parse_part(reader, version)?);
    }
    tracing::debug!(
        count = parts.len(),
        lines = parts.iter().map(|p| p.lines.len()).sum::<usize>(),
        "Parsed parts"
    );
    Ok(parts)
}

/// Parse one part; names are only stored above version 4
pub fn parse_part<R: Read>(reader: &mut PdoReader<R>, version: FormatVersion) -> Result<Part> {
    let object_index = reader.read_i32()?;
    let bounding_box = reader.read_rect()?;
    let name = if version.is_extended() {
        reader.read_string()?
    } else {
        String::new()
    };

    let count = reader.read_count("line")?;
    let mut lines = Vec::with_capacity(count.min(4096));
    for _ in 0..count {
        lines.push(parse_line(reader)?);
    }

    Ok(Part {
        object_index,
        bounding_box,
        name,
        lines,
    })
}

/// Parse one line record
///
/// The second endpoint is only stored when the connecting flag is 1.
pub fn parse_line<R: Read>(reader: &mut PdoReader<R>) -> Result<Line> {
    let hidden = reader.read_flag()?;
    let kind = LineKind::from_code(reader.read_i32()?);
    let _unknown = reader.read_u8()?;
    let face = reader.read_i32()?;
    let vertex = reader.read_i32()?;

    let end = if reader.read_flag()? {
        let face2 = reader.read_i32()?;
        let vertex2 = reader.read_i32()?;
        LineEnd::Explicit(VertexRef::new(face2, vertex2))
    } else {
        LineEnd::NextInLoop
    };

    Ok(Line {
        hidden,
        kind,
        start: VertexRef::new(face, vertex),
        end,
    })
}

/// Parse the count-prefixed text block list
pub fn parse_text_blocks<R: Read>(reader: &mut PdoReader<R>) -> Result<Vec<TextBlock>> {
    reader.enter(Stage::TextBlocks);
    let count = reader.read_count("text block")?;
    let mut blocks = Vec::with_capacity(count.min(1024));
    for _ in 0..count {
        let bounding_box = reader.read_rect()?;
        let line_spacing = reader.read_f64()?;
        let color = reader.read_i32()?;
        let font_size = reader.read_i32()?;
        let font_name = reader.read_string()?;

        let line_count = reader.read_count("text line")?;
        let mut lines = Vec::with_capacity(line_count.min(1024));
        for _ in 0..line_count {
            lines.push(reader.read_string()?);
        }

        blocks.push(TextBlock {
            bounding_box,
            line_spacing,
            color,
            font_size,
            font_name,
            lines,
        });
    }
    tracing::debug!(count = blocks.len(), "Parsed text blocks");
    Ok(blocks)
}

/// Parse both image lists into one collection, first list first
pub fn parse_images<R: Read>(reader: &mut PdoReader<R>) -> Result<Vec<Image>> {
    reader.enter(Stage::Images);
    let mut images = Vec::new();
    for _ in 0..2 {
        let count = reader.read_count("image")?;
        images.reserve(count.min(256));
        for _ in 0..count {
            let bounding_box = reader.read_rect()?;
            let texture = parse_texture(reader)?;
            images.push(Image {
                bounding_box,
                texture,
            });
        }
    }
    tracing::debug!(count = images.len(), "Parsed images");
    Ok(images)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::io::Cursor;

    fn line_bytes(hidden: u8, kind: i32, start: (i32, i32), end: Option<(i32, i32)>) -> Vec<u8> {
        let mut data = vec![hidden];
        data.extend_from_slice(&kind.to_le_bytes());
        data.push(0);
        data.extend_from_slice(&start.0.to_le_bytes());
        data.extend_from_slice(&start.1.to_le_bytes());
        match end {
            Some((face, vertex)) => {
                data.push(1);
                data.extend_from_slice(&face.to_le_bytes());
                data.extend_from_slice(&vertex.to_le_bytes());
            }
            None => data.push(0),
        }
        data
    }

    #[test]
    fn test_boundary_line() {
        let data = line_bytes(0, 0, (2, 17), None);
        let line = parse_line(&mut PdoReader::new(Cursor::new(data))).unwrap();
        assert!(!line.hidden);
        assert_eq!(line.kind, LineKind::Cut);
        assert_eq!(line.start, VertexRef::new(2, 17));
        assert_eq!(line.end, LineEnd::NextInLoop);
    }

    #[test]
    fn test_fold_line() {
        let data = line_bytes(1, 2, (0, 1), Some((3, 4)));
        let line = parse_line(&mut PdoReader::new(Cursor::new(data))).unwrap();
        assert!(line.hidden);
        assert_eq!(line.kind, LineKind::Valley);
        assert_eq!(line.end, LineEnd::Explicit(VertexRef::new(3, 4)));
    }

    #[test]
    fn test_v4_part_has_no_name() {
        let mut data = 1i32.to_le_bytes().to_vec();
        for v in [10.0f64, 20.0, 30.0, 40.0] {
            data.extend_from_slice(&v.to_le_bytes());
        }
        data.extend_from_slice(&1i32.to_le_bytes());
        data.extend(line_bytes(0, 1, (0, 0), Some((1, 1))));

        let mut reader = PdoReader::new(Cursor::new(data));
        let part = parse_part(&mut reader, FormatVersion::V4).unwrap();
        assert_eq!(part.object_index, 1);
        assert_eq!(part.bounding_box.left, 10.0);
        assert_eq!(part.bounding_box.height, 40.0);
        assert!(part.name.is_empty());
        assert_eq!(part.lines.len(), 1);
        assert_eq!(part.lines[0].kind, LineKind::Mountain);
    }

    #[test]
    fn test_absent_unfold() {
        let mut reader = PdoReader::new(Cursor::new(vec![0u8]));
        assert!(parse_unfold(&mut reader, FormatVersion::V6).unwrap().is_none());
    }

    #[test]
    fn test_truncated_line_reports_parts_stage() {
        let mut data = 1i32.to_le_bytes().to_vec();
        data.extend_from_slice(&0i32.to_le_bytes());
        data.extend_from_slice(&[0u8; 32]);
        data.extend_from_slice(&1i32.to_le_bytes());
        data.extend_from_slice(&[0, 0, 0]);

        let mut reader = PdoReader::new(Cursor::new(data));
        let err = parse_parts(&mut reader, FormatVersion::V4).unwrap_err();
        assert!(matches!(err, Error::Truncated { stage: Stage::Parts }));
    }
}
