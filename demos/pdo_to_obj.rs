//! Example: Converting a PDO file to OBJ format
//!
//! This example demonstrates how to:
//! 1. Parse a PDO file
//! 2. Export the 3D geometry to OBJ with a matching MTL file
//! 3. Decode embedded textures and save them as PNG images
//!
//! Usage:
//!   cargo run --example pdo_to_obj -- <input.pdo> <output.obj>

use image::RgbImage;
use libpdo::export::{sanitize_name, write_mtl, write_obj};
use libpdo::{Model, TextureCache, TextureId};
use std::env;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::process;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 3 {
        eprintln!("Usage: {} <input.pdo> <output.obj>", args[0]);
        eprintln!();
        eprintln!("Also writes <output>.mtl and one .png per textured material");
        process::exit(1);
    }

    let input_file = &args[1];
    let obj_path = Path::new(&args[2]);
    let mtl_path = obj_path.with_extension("mtl");
    let dir = obj_path.parent().unwrap_or_else(|| Path::new("."));

    let model = Model::from_file(input_file)?;
    println!("Parsed {}", input_file);
    println!("  Objects: {}", model.objects.len());
    println!("  Materials: {}", model.materials.len());

    let mtl_name = mtl_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "model.mtl".to_string());

    let mut obj_out = BufWriter::new(File::create(obj_path)?);
    write_obj(&model, &mut obj_out, Some(&mtl_name))?;
    obj_out.flush()?;

    let cache = TextureCache::new();
    let mut mtl_out = BufWriter::new(File::create(&mtl_path)?);
    write_mtl(&model, &mut mtl_out, |index, material| {
        let decoded = match cache.get_or_decode(&model, TextureId::Material(index)) {
            Ok(decoded) => decoded,
            Err(e) => {
                eprintln!("Skipping texture of {}: {}", material.name, e);
                return None;
            }
        };
        let file_name = format!("{}_tex{}.png", sanitize_name(&material.name), index);
        match save_png(&dir.join(&file_name), decoded.width, decoded.height, &decoded.pixels) {
            Ok(()) => Some(file_name),
            Err(e) => {
                eprintln!("Failed to write {}: {}", file_name, e);
                None
            }
        }
    })?;
    mtl_out.flush()?;

    println!("Wrote {} and {}", obj_path.display(), mtl_path.display());
    println!("  Textures: {}", cache.len());
    Ok(())
}

/// Save interleaved RGB pixels as PNG
fn save_png(
    path: &Path,
    width: u32,
    height: u32,
    rgb: &[u8],
) -> Result<(), Box<dyn std::error::Error>> {
    let img = RgbImage::from_raw(width, height, rgb.to_vec())
        .ok_or("pixel buffer does not match texture size")?;
    img.save(path)?;
    Ok(())
}
