//! Page layout for printing an unfolded net
//!
//! Parts are placed in one global print space. To print on physical sheets
//! that space is tiled by the printable (clipped) area of a page, and each
//! part belongs to the tile containing its top-left corner. Parts that cross
//! a tile boundary are not split.

use crate::model::{Model, Orientation, Part, Rect, Settings};
use crate::net::{Point2, Segment};
use std::collections::BTreeMap;

/// Column and row of a page in the unbounded page grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct PageCell {
    /// Horizontal page index
    pub column: i64,
    /// Vertical page index
    pub row: i64,
}

impl PageCell {
    /// Create a new cell
    pub fn new(column: i64, row: i64) -> Self {
        Self { column, row }
    }
}

/// An occupied page and the parts printed on it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// Grid position
    pub cell: PageCell,
    /// Indices into `Model::parts`, in model order
    pub parts: Vec<usize>,
}

/// Effective page geometry after orientation is applied
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageLayout {
    /// Full page width
    pub width: f64,
    /// Full page height
    pub height: f64,
    /// Left (and right) margin
    pub margin_left: f64,
    /// Top (and bottom) margin
    pub margin_top: f64,
    /// Printable width: `width - 2 * margin_left`
    pub clipped_width: f64,
    /// Printable height: `height - 2 * margin_top`
    pub clipped_height: f64,
}

/// Grid index of `value` for tiles of `size`; degenerate sizes map to 0
fn tile_index(value: f64, size: f64) -> i64 {
    if size > 0.0 && value.is_finite() {
        (value / size).floor() as i64
    } else {
        0
    }
}

impl PageLayout {
    /// Compute the layout from page settings
    ///
    /// Landscape swaps width with height and, independently, the side margin
    /// with the top margin.
    pub fn from_settings(settings: &Settings) -> Self {
        let (mut width, mut height) = settings.page_size.dimensions();
        let mut margin_left = f64::from(settings.margin_side);
        let mut margin_top = f64::from(settings.margin_top);

        if settings.orientation == Orientation::Landscape {
            std::mem::swap(&mut width, &mut height);
            std::mem::swap(&mut margin_left, &mut margin_top);
        }

        Self {
            width,
            height,
            margin_left,
            margin_top,
            clipped_width: width - 2.0 * margin_left,
            clipped_height: height - 2.0 * margin_top,
        }
    }

    /// Page cell owning a placement rectangle (by its top-left corner)
    pub fn cell_of(&self, rect: &Rect) -> PageCell {
        PageCell::new(
            tile_index(rect.left, self.clipped_width),
            tile_index(rect.top, self.clipped_height),
        )
    }

    /// Page cell of a part
    pub fn part_cell(&self, part: &Part) -> PageCell {
        self.cell_of(&part.bounding_box)
    }

    /// Offset subtracted from global coordinates to get page-local ones
    ///
    /// The printable area of every page starts at its own margin origin.
    pub fn page_offset(&self, cell: PageCell) -> (f64, f64) {
        (
            cell.column as f64 * self.clipped_width - self.margin_left,
            cell.row as f64 * self.clipped_height - self.margin_top,
        )
    }

    /// Translate a global point onto the page at `cell`
    pub fn to_page_local(&self, cell: PageCell, point: Point2) -> Point2 {
        let (dx, dy) = self.page_offset(cell);
        Point2::new(point.x - dx, point.y - dy)
    }

    /// Translate a global segment onto the page at `cell`
    pub fn segment_to_page_local(&self, cell: PageCell, segment: &Segment) -> Segment {
        let (dx, dy) = self.page_offset(cell);
        segment.offset(-dx, -dy)
    }

    /// Largest column and row used by any part, `(0, 0)` without parts
    pub fn grid_extent(&self, parts: &[Part]) -> PageCell {
        parts
            .iter()
            .map(|p| self.part_cell(p))
            .fold(PageCell::default(), |acc, c| {
                PageCell::new(acc.column.max(c.column), acc.row.max(c.row))
            })
    }

    /// Parts whose page cell equals `cell`, with their indices
    pub fn parts_on_page<'a>(
        &'a self,
        parts: &'a [Part],
        cell: PageCell,
    ) -> impl Iterator<Item = (usize, &'a Part)> + 'a {
        parts
            .iter()
            .enumerate()
            .filter(move |(_, p)| self.part_cell(p) == cell)
    }

    /// All occupied pages, ordered by row then column
    pub fn pages(&self, parts: &[Part]) -> Vec<Page> {
        let mut cells: BTreeMap<(i64, i64), Vec<usize>> = BTreeMap::new();
        for (i, part) in parts.iter().enumerate() {
            let cell = self.part_cell(part);
            cells.entry((cell.row, cell.column)).or_default().push(i);
        }
        cells
            .into_iter()
            .map(|((row, column), parts)| Page {
                cell: PageCell::new(column, row),
                parts,
            })
            .collect()
    }

    /// Size of a single continuous drawing surface holding every part
    ///
    /// This is the union of all placement rectangles. When at most one page
    /// cell is occupied the result is grown to at least one full page.
    pub fn canvas_extent(&self, parts: &[Part]) -> Rect {
        let Some(first) = parts.first() else {
            return Rect::new(0.0, 0.0, self.width, self.height);
        };

        let mut extent = parts[1..]
            .iter()
            .fold(first.bounding_box, |acc, p| acc.union(&p.bounding_box));

        let first_cell = self.part_cell(first);
        let single_cell = parts.iter().all(|p| self.part_cell(p) == first_cell);
        if single_cell {
            extent.width = extent.width.max(self.width);
            extent.height = extent.height.max(self.height);
        }
        extent
    }
}

impl Model {
    /// Page layout derived from this model's settings
    pub fn page_layout(&self) -> PageLayout {
        PageLayout::from_settings(&self.settings)
    }
}
