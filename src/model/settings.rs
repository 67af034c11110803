//! Page and line style settings

/// Page size class stored in the settings block
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PageSize {
    /// ISO A4
    #[default]
    A4,
    /// ISO A3
    A3,
    /// ISO A2
    A2,
    /// ISO A1
    A1,
    /// JIS B5
    B5,
    /// JIS B4
    B4,
    /// JIS B3
    B3,
    /// JIS B2
    B2,
    /// JIS B1
    B1,
    /// US Letter
    Letter,
    /// US Legal
    Legal,
    /// Custom size stored in the file, in millimetres
    Custom {
        /// Page width
        width: f64,
        /// Page height
        height: f64,
    },
}

impl PageSize {
    /// Raw value marking a custom page size
    pub const CUSTOM_CODE: i32 = 11;

    /// Map a raw page type; unknown standard values fall back to A4
    ///
    /// Custom sizes need their dimensions and are built by the parser.
    pub fn from_code(code: i32) -> Self {
        match code {
            1 => PageSize::A3,
            2 => PageSize::A2,
            3 => PageSize::A1,
            4 => PageSize::B5,
            5 => PageSize::B4,
            6 => PageSize::B3,
            7 => PageSize::B2,
            8 => PageSize::B1,
            9 => PageSize::Letter,
            10 => PageSize::Legal,
            _ => PageSize::A4,
        }
    }

    /// Portrait (width, height) in millimetres
    pub fn dimensions(&self) -> (f64, f64) {
        match *self {
            PageSize::A4 => (210.0, 297.0),
            PageSize::A3 => (297.0, 420.0),
            PageSize::A2 => (420.0, 594.0),
            PageSize::A1 => (594.0, 841.0),
            PageSize::B5 => (182.0, 257.0),
            PageSize::B4 => (257.0, 364.0),
            PageSize::B3 => (364.0, 515.0),
            PageSize::B2 => (515.0, 728.0),
            PageSize::B1 => (728.0, 1030.0),
            PageSize::Letter => (215.9, 279.4),
            PageSize::Legal => (215.9, 355.6),
            PageSize::Custom { width, height } => (width, height),
        }
    }
}

/// Page orientation flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    /// Width and height as given by the page size
    #[default]
    Portrait,
    /// Width/height swapped, and side/top margins swapped
    Landscape,
}

impl Orientation {
    /// Any non-zero raw value means landscape
    pub fn from_code(code: i32) -> Self {
        if code != 0 {
            Orientation::Landscape
        } else {
            Orientation::Portrait
        }
    }
}

/// Settings block at the end of the file
///
/// Flag fields hold the stored byte unchanged; non-zero means set.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Settings {
    /// Draw glue flaps
    pub show_flaps: u8,
    /// Draw edge ids
    pub show_edge_id: u8,
    /// Edge id placement
    pub edge_id_placement: u8,
    /// Print face materials
    pub face_material: u8,
    /// Hide fold lines between almost coplanar faces
    pub hide_almost_flat_fold_lines: u8,
    /// Angle below which fold lines are hidden
    pub fold_lines_hiding_angle: i32,
    /// Draw a white line under dotted lines
    pub draw_white_line_under_dot_line: u8,
    /// Mountain fold line style
    pub mountain_fold_line_style: i32,
    /// Valley fold line style
    pub valley_fold_line_style: i32,
    /// Cut line style
    pub cut_line_style: i32,
    /// Edge id font size
    pub edge_id_font_size: i32,
    /// Page size class
    pub page_size: PageSize,
    /// Orientation
    pub orientation: Orientation,
    /// Left/right margin in millimetres
    pub margin_side: i32,
    /// Top/bottom margin in millimetres
    pub margin_top: i32,
    /// Mountain fold dash pattern
    pub mountain_fold_line_pattern: [f64; 6],
    /// Valley fold dash pattern
    pub valley_fold_line_pattern: [f64; 6],
    /// Add padding around part outlines
    pub add_outline_padding: u8,
    /// Print scale factor
    pub scale_factor: f64,
    /// Author name (extended versions only)
    pub author_name: String,
    /// Comment (extended versions only)
    pub comment: String,
}
