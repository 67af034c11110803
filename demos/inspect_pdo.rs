//! Example: Printing a summary of a PDO file
//!
//! Usage:
//!   cargo run --example inspect_pdo -- <input.pdo> [--validate]

use libpdo::{Model, ParserConfig};
use std::env;
use std::fs::File;
use std::io::BufReader;
use std::process;

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <input.pdo> [--validate]", args[0]);
        process::exit(1);
    }

    let validate = args.iter().any(|a| a == "--validate");
    let config = ParserConfig::new().with_validation(validate);

    let file = match File::open(&args[1]) {
        Ok(f) => BufReader::new(f),
        Err(e) => {
            eprintln!("Cannot open {}: {}", args[1], e);
            process::exit(1);
        }
    };

    let model = match Model::from_reader_with_config(file, config) {
        Ok(model) => model,
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Some(stage) = e.stage() {
                eprintln!("  while reading {}", stage);
            }
            process::exit(1);
        }
    };

    let header = &model.header;
    println!("=== Header ===");
    println!("Version: {}", header.version.as_raw());
    println!("Multi-byte strings: {}", header.multi_byte_chars);
    if header.version.is_extended() {
        println!("Designer: {}", header.designer_id);
        println!("String shift: {}", header.string_shift);
    }
    println!("Locale: {} (codepage {})", header.locale, header.codepage);
    println!("Assembled height: {:.2}", header.assembled_height);

    println!("\n=== Objects ({}) ===", model.objects.len());
    for (i, object) in model.objects.iter().enumerate() {
        println!(
            "[{}] {:?}: {} vertices, {} faces, {} edges{}",
            i,
            object.name,
            object.vertices.len(),
            object.faces.len(),
            object.edges.len(),
            if object.visible { "" } else { " (hidden)" }
        );
    }

    println!("\n=== Materials ({}) ===", model.materials.len());
    for material in &model.materials {
        match &material.texture {
            Some(t) => println!("{}: {}x{} texture", material.name, t.width, t.height),
            None => println!("{}: color only", material.name),
        }
    }

    if let Some(unfold) = &model.unfold {
        println!("\n=== Unfold (scale {:.3}) ===", unfold.scale);
        let layout = model.page_layout();
        for (i, part) in model.parts.iter().enumerate() {
            let cell = layout.part_cell(part);
            println!(
                "Part {} {:?}: {} lines, {} visible segments, page ({}, {})",
                i,
                part.name,
                part.lines.len(),
                model.part_segments(i).len(),
                cell.column,
                cell.row
            );
        }
        println!("Text blocks: {}", model.text_blocks.len());
        println!("Images: {}", model.images.len());
        println!("Pages: {}", layout.pages(&model.parts).len());
    }

    let settings = &model.settings;
    println!("\n=== Settings ===");
    println!("Page: {:?} {:?}", settings.page_size, settings.orientation);
    println!(
        "Margins: side {} mm, top {} mm",
        settings.margin_side, settings.margin_top
    );
    if !settings.author_name.is_empty() {
        println!("Author: {}", settings.author_name);
    }
    if !settings.comment.is_empty() {
        println!("Comment: {}", settings.comment);
    }
}
