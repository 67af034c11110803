//! Exporters for parsed models
//!
//! The SVG writer draws the resolved net, either on one continuous canvas
//! or one physical page at a time. The OBJ writer dumps the 3D meshes with
//! their unfolded texture coordinates and a matching material library.

mod obj;
mod svg;

pub use obj::{write_mtl, write_obj};
pub use svg::{write_svg, write_svg_page};

/// Replace every character that is not ASCII alphanumeric, `_` or `-`
///
/// OBJ and MTL names cannot contain whitespace, and SVG ids are safer
/// without punctuation.
pub fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_name() {
        assert_eq!(sanitize_name("body part.1"), "body_part_1");
        assert_eq!(sanitize_name("紙"), "_");
        assert_eq!(sanitize_name("ok_name-2"), "ok_name-2");
    }
}
