//! # libpdo
//!
//! A pure Rust reader for Pepakura Designer `.pdo` papercraft files.
//!
//! A PDO file describes a 3D model together with its unfolded net: the
//! flattened faces grouped into printable parts, fold and cut lines, text
//! and image annotations, and the page settings used to print it.
//!
//! ## Features
//!
//! - Pure Rust implementation with no unsafe code
//! - Parse format versions 4, 5 and 6, including obfuscated Shift-JIS and
//!   UTF-16 strings
//! - Lazy decoding of embedded textures into RGB buffers
//! - Resolution of part lines into 2D segments
//! - Page tiling for printing nets across several sheets
//! - SVG and OBJ/MTL export
//!
//! ## Example
//!
//! ```no_run
//! use libpdo::Model;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let model = Model::from_file("model.pdo")?;
//! let layout = model.page_layout();
//!
//! for page in layout.pages(&model.parts) {
//!     println!(
//!         "page ({}, {}): {} part(s)",
//!         page.cell.column,
//!         page.cell.row,
//!         page.parts.len()
//!     );
//! }
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod export;
pub mod layout;
pub mod model;
pub mod net;
pub mod parser;
pub mod reader;
pub mod texture;
pub mod validator;

pub use error::{Error, Result, Stage};
pub use layout::{Page, PageCell, PageLayout};
pub use model::{
    Edge, Face, Face2DVertex, Flap, FormatVersion, Header, Image, Line, LineEnd, LineKind,
    Material, MaterialColors, Model, Object, Orientation, PageSize, ParserConfig, Part, Rect,
    Rgba, Settings, TextBlock, Texture, Unfold, Vertex, VertexRef,
};
pub use net::{Point2, Segment};
pub use texture::{DecodedTexture, TextureCache, TextureId};

use std::io::{BufReader, Read};
use std::path::Path;

impl Model {
    /// Parse a PDO file from a reader
    ///
    /// The reader is consumed sequentially; wrap unbuffered sources such as
    /// files in a [`BufReader`].
    ///
    /// # Example
    ///
    /// ```no_run
    /// use libpdo::Model;
    /// use std::fs::File;
    /// use std::io::BufReader;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let file = BufReader::new(File::open("model.pdo")?);
    /// let model = Model::from_reader(file)?;
    /// println!("Model contains {} objects", model.objects.len());
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::from_reader_with_config(reader, ParserConfig::default())
    }

    /// Parse a PDO file from a reader with custom limits
    ///
    /// # Example
    ///
    /// ```no_run
    /// use libpdo::{Model, ParserConfig};
    /// use std::fs::File;
    /// use std::io::BufReader;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let file = BufReader::new(File::open("model.pdo")?);
    /// let config = ParserConfig::new()
    ///     .with_max_element_count(100_000)
    ///     .with_validation(true);
    /// let model = Model::from_reader_with_config(file, config)?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_reader_with_config<R: Read>(reader: R, config: ParserConfig) -> Result<Self> {
        parser::parse_pdo_with_config(reader, config)
    }

    /// Open and parse a PDO file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }
}
