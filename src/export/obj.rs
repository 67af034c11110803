//! Wavefront OBJ/MTL output
//!
//! Each face gets its own normal and one texture coordinate per loop
//! vertex. Vertex indices are global and 1-based, as OBJ requires.

use crate::error::Result;
use crate::model::{Material, Model, Rgba};
use std::io::Write;

use super::sanitize_name;

const GENERATOR: &str = "# Exported by libpdo";

/// Write all objects as OBJ geometry
///
/// `mtl_file` is referenced with `mtllib` when given. Faces with fewer than
/// three loop vertices are skipped.
pub fn write_obj<W: Write>(model: &Model, mut out: W, mtl_file: Option<&str>) -> Result<()> {
    writeln!(out, "{}", GENERATOR)?;
    if let Some(mtl) = mtl_file {
        writeln!(out, "mtllib {}", mtl)?;
    }

    let mut v_offset = 1usize;
    let mut vt_offset = 1usize;
    let mut vn_offset = 1usize;

    for (object_idx, object) in model.objects.iter().enumerate() {
        writeln!(out, "\no {}_{}", sanitize_name(&object.name), object_idx)?;

        for v in &object.vertices {
            writeln!(out, "v {:.6} {:.6} {:.6}", v.x, v.y, v.z)?;
        }

        let mut faces = String::new();
        let mut current_material = None;
        let mut vt_count = 0usize;
        let mut vn_count = 0usize;

        for face in object.faces.iter().filter(|f| f.vertices.len() >= 3) {
            let [nx, ny, nz] = face.normal;
            writeln!(out, "vn {:.6} {:.6} {:.6}", nx, ny, nz)?;
            let vn = vn_offset + vn_count;
            vn_count += 1;

            let first_vt = vt_offset + vt_count;
            for fv in &face.vertices {
                writeln!(out, "vt {:.6} {:.6}", fv.u, fv.v)?;
            }
            vt_count += face.vertices.len();

            let material = model.face_material(face).map(|m| m.name.as_str());
            if material.is_some() && material != current_material {
                if let Some(name) = material {
                    faces.push_str(&format!("usemtl {}\n", sanitize_name(name)));
                }
                current_material = material;
            }

            faces.push('f');
            for (i, fv) in face.vertices.iter().enumerate() {
                let v = v_offset as i64 + i64::from(fv.id_vertex);
                faces.push_str(&format!(" {}/{}/{}", v, first_vt + i, vn));
            }
            faces.push('\n');
        }

        out.write_all(faces.as_bytes())?;

        v_offset += object.vertices.len();
        vt_offset += vt_count;
        vn_offset += vn_count;
    }

    Ok(())
}

/// Write the material library
///
/// `Ka`, `Kd` and `Ks` come from the base, 3D and light colors.
/// `texture_file` is asked for a file name for each textured material and
/// the result becomes its `map_Kd`; return `None` to omit the map.
pub fn write_mtl<W, F>(model: &Model, mut out: W, mut texture_file: F) -> Result<()>
where
    W: Write,
    F: FnMut(usize, &Material) -> Option<String>,
{
    writeln!(out, "{}", GENERATOR)?;

    for (index, material) in model.materials.iter().enumerate() {
        writeln!(out, "\nnewmtl {}", sanitize_name(&material.name))?;
        write_color(&mut out, "Ka", &material.color_3d.material)?;
        write_color(&mut out, "Kd", &material.color_3d.material_3d)?;
        write_color(&mut out, "Ks", &material.color_3d.light)?;

        if material.texture.is_some() {
            if let Some(file) = texture_file(index, material) {
                writeln!(out, "map_Kd {}", file)?;
            }
        }
    }

    Ok(())
}

fn write_color<W: Write>(out: &mut W, key: &str, color: &Rgba) -> Result<()> {
    writeln!(out, "{} {:.6} {:.6} {:.6}", key, color.r, color.g, color.b)?;
    Ok(())
}
