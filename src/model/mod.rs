//! Data structures representing PDO models

mod config;
mod core;
mod material;
mod settings;
mod unfold;

pub use config::ParserConfig;

pub use core::{
    Edge, Face, Face2DVertex, Flap, FormatVersion, Header, Model, Object, Rect, Vertex,
};

pub use material::{Material, MaterialColors, Rgba, Texture};

pub use settings::{Orientation, PageSize, Settings};

pub use unfold::{Image, Line, LineEnd, LineKind, Part, TextBlock, Unfold, VertexRef};
