//! Example: Rendering the unfolded net of a PDO file as SVG
//!
//! This example demonstrates how to:
//! 1. Parse a PDO file
//! 2. Compute the page layout from its print settings
//! 3. Write either one SVG per printed page or a single continuous canvas
//!
//! Usage:
//!   cargo run --example pdo_to_svg -- <input.pdo> <output-dir> [--canvas]

use libpdo::Model;
use libpdo::export::{write_svg, write_svg_page};
use std::env;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::process;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 3 {
        eprintln!("Usage: {} <input.pdo> <output-dir> [--canvas]", args[0]);
        eprintln!();
        eprintln!("Writes page_<column>_<row>.svg for every printed page,");
        eprintln!("or a single canvas.svg when --canvas is given");
        process::exit(1);
    }

    let input_file = &args[1];
    let output_dir = Path::new(&args[2]);
    let canvas = args.iter().any(|a| a == "--canvas");

    let model = Model::from_file(input_file)?;
    fs::create_dir_all(output_dir)?;

    println!("Parsed {}", input_file);
    println!("  Parts: {}", model.parts.len());
    println!("  Text blocks: {}", model.text_blocks.len());

    if canvas {
        let path = output_dir.join("canvas.svg");
        let mut out = BufWriter::new(File::create(&path)?);
        write_svg(&model, &mut out)?;
        out.flush()?;
        println!("Wrote {}", path.display());
        return Ok(());
    }

    let layout = model.page_layout();
    println!(
        "  Page: {:.0} x {:.0} mm, printable {:.0} x {:.0} mm",
        layout.width, layout.height, layout.clipped_width, layout.clipped_height
    );

    for page in layout.pages(&model.parts) {
        let name = format!("page_{}_{}.svg", page.cell.column, page.cell.row);
        let path = output_dir.join(name);
        let mut out = BufWriter::new(File::create(&path)?);
        write_svg_page(&model, page.cell, &mut out)?;
        out.flush()?;
        println!("Wrote {} ({} part(s))", path.display(), page.parts.len());
    }

    Ok(())
}
