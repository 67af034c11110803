//! SVG output for unfolded nets
//!
//! Coordinates are written in millimetres. Lines carry a `cut`, `mountain`
//! or `valley` class styled by an embedded stylesheet.

use crate::error::{Error, Result};
use crate::layout::{PageCell, PageLayout};
use crate::model::{Model, Rect, TextBlock};
use crate::net::Segment;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use std::io::Write as IoWrite;

use super::sanitize_name;

const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

const STYLESHEET: &str = "
.cut { fill:none; stroke:black; stroke-width:0.1; }
.mountain { fill:none; stroke:blue; stroke-width:0.1; stroke-dasharray:1,1; }
.valley { fill:none; stroke:red; stroke-width:0.1; stroke-dasharray:1,1; }
.text { font-family:sans-serif; fill:black; }
";

fn fmt_mm(value: f64) -> String {
    format!("{:.3}", value)
}

fn emit<W: IoWrite>(writer: &mut Writer<W>, event: Event<'_>, what: &str) -> Result<()> {
    writer
        .write_event(event)
        .map_err(|e| Error::export(format!("Failed to write {}: {}", what, e)))
}

/// Write every part and text block on one continuous canvas
///
/// The view box is the canvas extent from [`PageLayout::canvas_extent`], in
/// global print coordinates.
pub fn write_svg<W: IoWrite>(model: &Model, out: W) -> Result<()> {
    let layout = model.page_layout();
    let extent = layout.canvas_extent(&model.parts);

    let mut writer = Writer::new_with_indent(out, b' ', 2);
    start_document(&mut writer, &extent)?;

    emit(&mut writer, Event::Start(group("parts")), "parts group")?;
    for (index, part) in model.parts.iter().enumerate() {
        let segments = part.global_segments(model);
        write_part(&mut writer, index, &part.name, segments)?;
    }
    emit(&mut writer, Event::End(BytesEnd::new("g")), "parts group")?;

    emit(&mut writer, Event::Start(group("text")), "text group")?;
    for block in &model.text_blocks {
        write_text_block(&mut writer, block, 0.0, 0.0)?;
    }
    emit(&mut writer, Event::End(BytesEnd::new("g")), "text group")?;

    end_document(&mut writer)
}

/// Write one physical page
///
/// Only parts (and text blocks) whose top-left corner falls in `cell` are
/// drawn, translated to page-local coordinates.
pub fn write_svg_page<W: IoWrite>(model: &Model, cell: PageCell, out: W) -> Result<()> {
    let layout = model.page_layout();
    let page = Rect::new(0.0, 0.0, layout.width, layout.height);

    let mut writer = Writer::new_with_indent(out, b' ', 2);
    start_document(&mut writer, &page)?;

    emit(&mut writer, Event::Start(group("parts")), "parts group")?;
    for (index, part) in layout.parts_on_page(&model.parts, cell) {
        let segments = part
            .global_segments(model)
            .map(|s| layout.segment_to_page_local(cell, &s));
        write_part(&mut writer, index, &part.name, segments)?;
    }
    emit(&mut writer, Event::End(BytesEnd::new("g")), "parts group")?;

    let (dx, dy) = layout.page_offset(cell);
    emit(&mut writer, Event::Start(group("text")), "text group")?;
    for block in text_blocks_on_page(&layout, &model.text_blocks, cell) {
        write_text_block(&mut writer, block, dx, dy)?;
    }
    emit(&mut writer, Event::End(BytesEnd::new("g")), "text group")?;

    end_document(&mut writer)
}

fn text_blocks_on_page<'a>(
    layout: &'a PageLayout,
    blocks: &'a [TextBlock],
    cell: PageCell,
) -> impl Iterator<Item = &'a TextBlock> + 'a {
    blocks
        .iter()
        .filter(move |b| layout.cell_of(&b.bounding_box) == cell)
}

fn group(id: &str) -> BytesStart<'_> {
    let mut elem = BytesStart::new("g");
    elem.push_attribute(("id", id));
    elem
}

fn start_document<W: IoWrite>(writer: &mut Writer<W>, view: &Rect) -> Result<()> {
    emit(
        writer,
        Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("no"))),
        "XML declaration",
    )?;

    let mut svg = BytesStart::new("svg");
    svg.push_attribute(("xmlns", SVG_NAMESPACE));
    svg.push_attribute(("version", "1.1"));
    svg.push_attribute(("width", format!("{}mm", fmt_mm(view.width)).as_str()));
    svg.push_attribute(("height", format!("{}mm", fmt_mm(view.height)).as_str()));
    let view_box = format!(
        "{} {} {} {}",
        fmt_mm(view.left),
        fmt_mm(view.top),
        fmt_mm(view.width),
        fmt_mm(view.height)
    );
    svg.push_attribute(("viewBox", view_box.as_str()));
    emit(writer, Event::Start(svg), "svg element")?;

    emit(writer, Event::Start(BytesStart::new("style")), "style element")?;
    emit(writer, Event::Text(BytesText::new(STYLESHEET)), "stylesheet")?;
    emit(writer, Event::End(BytesEnd::new("style")), "style element")
}

fn end_document<W: IoWrite>(writer: &mut Writer<W>) -> Result<()> {
    emit(writer, Event::End(BytesEnd::new("svg")), "svg element")
}

fn write_part<W: IoWrite>(
    writer: &mut Writer<W>,
    index: usize,
    name: &str,
    segments: impl Iterator<Item = Segment>,
) -> Result<()> {
    let id = if name.is_empty() {
        format!("part{}", index)
    } else {
        format!("part{}-{}", index, sanitize_name(name))
    };
    let mut elem = BytesStart::new("g");
    elem.push_attribute(("id", id.as_str()));
    emit(writer, Event::Start(elem), "part group")?;

    for segment in segments {
        let mut line = BytesStart::new("line");
        line.push_attribute(("x1", fmt_mm(segment.start.x).as_str()));
        line.push_attribute(("y1", fmt_mm(segment.start.y).as_str()));
        line.push_attribute(("x2", fmt_mm(segment.end.x).as_str()));
        line.push_attribute(("y2", fmt_mm(segment.end.y).as_str()));
        line.push_attribute(("class", segment.kind.name()));
        emit(writer, Event::Empty(line), "line")?;
    }

    emit(writer, Event::End(BytesEnd::new("g")), "part group")
}

/// Text lines start one font size below the block top and advance by the
/// line spacing
fn write_text_block<W: IoWrite>(
    writer: &mut Writer<W>,
    block: &TextBlock,
    dx: f64,
    dy: f64,
) -> Result<()> {
    let x = block.bounding_box.left - dx;
    let mut y = block.bounding_box.top - dy + f64::from(block.font_size);

    for text in &block.lines {
        let mut elem = BytesStart::new("text");
        elem.push_attribute(("x", fmt_mm(x).as_str()));
        elem.push_attribute(("y", fmt_mm(y).as_str()));
        elem.push_attribute(("class", "text"));
        elem.push_attribute(("font-size", block.font_size.to_string().as_str()));
        emit(writer, Event::Start(elem), "text element")?;
        emit(writer, Event::Text(BytesText::new(text)), "text content")?;
        emit(writer, Event::End(BytesEnd::new("text")), "text element")?;
        y += block.line_spacing;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Face, Face2DVertex, Line, LineEnd, LineKind, Object, Part, VertexRef};

    fn model_with_square() -> Model {
        let face = Face {
            vertices: vec![
                Face2DVertex::new(0, 0.0, 0.0),
                Face2DVertex::new(1, 10.0, 0.0),
                Face2DVertex::new(2, 10.0, 10.0),
            ],
            ..Default::default()
        };
        let mut model = Model::new();
        model.objects.push(Object {
            faces: vec![face],
            ..Default::default()
        });
        model.parts.push(Part {
            object_index: 0,
            bounding_box: Rect::new(200.0, 20.0, 10.0, 10.0),
            name: "lid".to_string(),
            lines: vec![
                Line {
                    start: VertexRef::new(0, 0),
                    ..Default::default()
                },
                Line {
                    kind: LineKind::Mountain,
                    start: VertexRef::new(0, 1),
                    end: LineEnd::Explicit(VertexRef::new(0, 2)),
                    ..Default::default()
                },
            ],
        });
        model.text_blocks.push(TextBlock {
            bounding_box: Rect::new(5.0, 5.0, 50.0, 10.0),
            line_spacing: 6.0,
            font_size: 4,
            lines: vec!["a < b".to_string()],
            ..Default::default()
        });
        model
    }

    #[test]
    fn test_canvas_output() {
        let model = model_with_square();
        let mut out = Vec::new();
        write_svg(&model, &mut out).unwrap();
        let svg = String::from_utf8(out).unwrap();

        assert!(svg.starts_with("<?xml"));
        assert!(svg.contains("id=\"part0-lid\""));
        assert!(svg.contains(
            "<line x1=\"200.000\" y1=\"20.000\" x2=\"210.000\" y2=\"20.000\" class=\"cut\"/>"
        ));
        assert!(svg.contains("class=\"mountain\""));
        assert!(svg.contains("a &lt; b"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_page_output_is_page_local() {
        let model = model_with_square();
        let mut out = Vec::new();
        // A4 with zero margins: clipped width 210, part at x=200 is in column 0
        write_svg_page(&model, PageCell::new(0, 0), &mut out).unwrap();
        let svg = String::from_utf8(out).unwrap();
        assert!(svg.contains("width=\"210.000mm\""));
        assert!(svg.contains("x1=\"200.000\" y1=\"20.000\""));
        assert!(svg.contains("a &lt; b"));

        let mut empty = Vec::new();
        write_svg_page(&model, PageCell::new(3, 0), &mut empty).unwrap();
        let svg = String::from_utf8(empty).unwrap();
        assert!(!svg.contains("<line"));
        assert!(!svg.contains("<text"));
    }
}
