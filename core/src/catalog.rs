use std::fmt;

use crate::geom::{Point, Segment};

#[derive(Clone, Copy, Debug)]
pub struct ShapeCatalogEntry {
    pub label: &'static str,
    pub slug: &'static str,
    pub segments: &'static [Segment],
}

const fn seg(ax: f64, ay: f64, bx: f64, by: f64) -> Segment {
    Segment::new(Point::new(ax, ay), Point::new(bx, by))
}

pub const DEFAULT_SHAPE_SLUG: &str = "ell";

const ELL: &[Segment] = &[
    seg(100.0, 100.0, 100.0, 200.0),
    seg(100.0, 200.0, 100.0, 300.0),
    seg(100.0, 300.0, 200.0, 300.0),
    seg(200.0, 300.0, 300.0, 300.0),
];

const SQUARE: &[Segment] = &[
    seg(100.0, 100.0, 200.0, 100.0),
    seg(200.0, 100.0, 200.0, 200.0),
    seg(200.0, 200.0, 100.0, 200.0),
    seg(100.0, 200.0, 100.0, 100.0),
];

const ZIGZAG: &[Segment] = &[
    seg(100.0, 100.0, 200.0, 200.0),
    seg(200.0, 200.0, 300.0, 100.0),
    seg(300.0, 100.0, 300.0, 200.0),
    seg(300.0, 200.0, 200.0, 300.0),
    seg(200.0, 300.0, 100.0, 300.0),
];

pub const SHAPE_CATALOG: &[ShapeCatalogEntry] = &[
    ShapeCatalogEntry {
        label: "Ell",
        slug: DEFAULT_SHAPE_SLUG,
        segments: ELL,
    },
    ShapeCatalogEntry {
        label: "Square",
        slug: "square",
        segments: SQUARE,
    },
    ShapeCatalogEntry {
        label: "Zigzag",
        slug: "zigzag",
        segments: ZIGZAG,
    },
];

pub fn shape_by_slug(slug: &str) -> Option<&'static ShapeCatalogEntry> {
    let trimmed = slug.trim();
    SHAPE_CATALOG
        .iter()
        .find(|entry| entry.slug.eq_ignore_ascii_case(trimmed))
}

pub fn default_shape() -> &'static ShapeCatalogEntry {
    &SHAPE_CATALOG[0]
}

/// Target shape chosen at startup. Immutable for the controller's lifetime.
#[derive(Clone, Debug, PartialEq)]
pub struct TargetShape {
    slug: String,
    label: String,
    segments: Vec<Segment>,
}

impl TargetShape {
    pub fn new(slug: impl Into<String>, label: impl Into<String>, segments: Vec<Segment>) -> Self {
        Self {
            slug: slug.into(),
            label: label.into(),
            segments,
        }
    }

    pub fn from_slug(slug: &str) -> Result<Self, UnknownShape> {
        shape_by_slug(slug)
            .map(Self::from)
            .ok_or_else(|| UnknownShape(slug.trim().to_string()))
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl Default for TargetShape {
    fn default() -> Self {
        Self::from(default_shape())
    }
}

impl From<&ShapeCatalogEntry> for TargetShape {
    fn from(entry: &ShapeCatalogEntry) -> Self {
        Self::new(entry.slug, entry.label, entry.segments.to_vec())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownShape(pub String);

impl fmt::Display for UnknownShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown shape '{}'", self.0)?;
        let slugs: Vec<&str> = SHAPE_CATALOG.iter().map(|entry| entry.slug).collect();
        write!(f, " (available: {})", slugs.join(", "))
    }
}

impl std::error::Error for UnknownShape {}
