//! The material grid the world is made of.
//!
//! A [`MaterialGrid`] is a flat row-major array of [`Material`] values.
//! Only [`Material::Passable`] cells can be walked through; everything else
//! blocks movement. The grid can be edited at any time between ticks.

use std::fmt;

use crate::geom::{Point, Range};
use crate::node::{GridNode, GridShape};

/// The material occupying one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Material {
    /// Undug rock.
    #[default]
    Solid,
    /// Open space.
    Passable,
    /// Minable deposit. Blocks movement until dug out.
    Resource,
    Liquid,
}

impl Material {
    /// Whether an entity can stand in or move through this cell.
    #[inline]
    pub const fn is_passable(self) -> bool {
        matches!(self, Material::Passable)
    }

    /// Map character used by [`MaterialGrid::parse`] and `Display`.
    pub const fn to_char(self) -> char {
        match self {
            Material::Solid => '#',
            Material::Passable => '.',
            Material::Resource => '$',
            Material::Liquid => '~',
        }
    }

    /// Inverse of [`to_char`](Self::to_char).
    pub const fn from_char(ch: char) -> Option<Self> {
        match ch {
            '#' => Some(Material::Solid),
            '.' => Some(Material::Passable),
            '$' => Some(Material::Resource),
            '~' => Some(Material::Liquid),
            _ => None,
        }
    }
}

/// A 2D grid of [`Material`] values.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawGrid"))]
pub struct MaterialGrid {
    shape: GridShape,
    cells: Vec<Material>,
}

/// Unchecked serialised form of a [`MaterialGrid`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawGrid {
    shape: GridShape,
    cells: Vec<Material>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawGrid> for MaterialGrid {
    type Error = MapError;

    fn try_from(raw: RawGrid) -> Result<Self, MapError> {
        if raw.cells.len() != raw.shape.len() {
            return Err(MapError::CellCount {
                expected: raw.shape.len(),
                found: raw.cells.len(),
            });
        }
        Ok(Self {
            shape: raw.shape,
            cells: raw.cells,
        })
    }
}

impl MaterialGrid {
    /// Create a new grid filled with [`Material::Solid`].
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, Material::Solid)
    }

    /// Create a new grid with every cell set to `material`.
    pub fn filled(width: u32, height: u32, material: Material) -> Self {
        let shape = GridShape::new(width, height);
        Self {
            shape,
            cells: vec![material; shape.len()],
        }
    }

    /// Parse a text map. Each line is one row; `#` is solid, `.` passable,
    /// `$` resource and `~` liquid. Leading and trailing whitespace around
    /// the whole map is ignored.
    pub fn parse(s: &str) -> Result<Self, MapError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(MapError::Empty);
        }
        let mut cells = Vec::with_capacity(s.len());
        let mut width: Option<usize> = None;
        let mut height = 0u32;
        for (y, line) in s.lines().enumerate() {
            let line = line.trim_end_matches('\r');
            let mut x = 0usize;
            for ch in line.chars() {
                let m = Material::from_char(ch).ok_or(MapError::InvalidChar {
                    ch,
                    pos: Point::new(x as i32, y as i32),
                })?;
                cells.push(m);
                x += 1;
            }
            match width {
                None => width = Some(x),
                Some(w) if w != x => {
                    return Err(MapError::InconsistentWidth {
                        row: y as u32,
                        expected: w as u32,
                        found: x as u32,
                    });
                }
                Some(_) => {}
            }
            height += 1;
        }
        let width = width.unwrap_or(0) as u32;
        Ok(Self {
            shape: GridShape::new(width, height),
            cells,
        })
    }

    #[inline]
    pub fn shape(&self) -> GridShape {
        self.shape
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.shape.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.shape.height
    }

    /// The material at `node`.
    ///
    /// # Panics
    ///
    /// Panics if `node` lies outside the grid.
    #[inline]
    pub fn at(&self, node: GridNode) -> Material {
        self.cells[node.index()]
    }

    /// The material at `p`, or `None` if out of bounds.
    pub fn at_point(&self, p: Point) -> Option<Material> {
        self.shape.node(p).map(|n| self.at(n))
    }

    /// Set the material at `node`.
    ///
    /// # Panics
    ///
    /// Panics if `node` lies outside the grid.
    #[inline]
    pub fn set(&mut self, node: GridNode, material: Material) {
        self.cells[node.index()] = material;
    }

    /// Set the material at `p`. Does nothing if out of bounds.
    pub fn set_point(&mut self, p: Point, material: Material) {
        if let Some(n) = self.shape.node(p) {
            self.set(n, material);
        }
    }

    /// Whether the cell at `node` can be walked through.
    #[inline]
    pub fn passable(&self, node: GridNode) -> bool {
        self.at(node).is_passable()
    }

    /// Fill the entire grid with `material`.
    pub fn fill(&mut self, material: Material) {
        self.cells.fill(material);
    }

    /// Fill the part of `rng` that overlaps the grid with `material`.
    pub fn fill_range(&mut self, rng: Range, material: Material) {
        for p in self.shape.bounds().intersect(rng) {
            self.set_point(p, material);
        }
    }

    /// Count how many cells hold `material`.
    pub fn count(&self, material: Material) -> usize {
        self.cells.iter().filter(|&&m| m == material).count()
    }

    /// Iterate over `(GridNode, Material)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (GridNode, Material)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, &m)| (GridNode::from_index(i), m))
    }
}

impl fmt::Display for MaterialGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let w = self.shape.width as usize;
        if w == 0 {
            return Ok(());
        }
        for (y, row) in self.cells.chunks(w).enumerate() {
            if y > 0 {
                writeln!(f)?;
            }
            for m in row {
                write!(f, "{}", m.to_char())?;
            }
        }
        Ok(())
    }
}

/// Errors that can occur when loading a map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapError {
    /// The map contains no rows.
    Empty,
    /// A row is not as wide as the first one.
    InconsistentWidth { row: u32, expected: u32, found: u32 },
    /// A character with no material mapping.
    InvalidChar { ch: char, pos: Point },
    /// Stored cells do not cover the grid shape.
    CellCount { expected: usize, found: usize },
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "map: no rows"),
            Self::InconsistentWidth {
                row,
                expected,
                found,
            } => write!(
                f,
                "map: row {row} has width {found}, expected {expected}"
            ),
            Self::InvalidChar { ch, pos } => {
                write!(f, "map: invalid character \u{201c}{ch}\u{201d} at {pos}")
            }
            Self::CellCount { expected, found } => {
                write!(f, "map: {found} cells stored, shape needs {expected}")
            }
        }
    }
}

impl std::error::Error for MapError {}
