//! Pixel regions made of disjoint rectangles.
//!
//! A region is stored as horizontal bands sorted top to bottom. Each band
//! holds sorted, non-touching spans, and vertically adjacent bands never have
//! identical spans, so every set of pixels has exactly one representation.
//! Boolean operations sweep the band edges of both operands.

use crate::geometry::Rect;

/// Half-open horizontal interval `[left, right)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Span {
    left: i32,
    right: i32,
}

/// Rows `[top, bottom)` sharing one set of spans.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Band {
    top: i32,
    bottom: i32,
    spans: Vec<Span>,
}

#[derive(Debug, Clone, Copy)]
enum Op {
    Union,
    Intersect,
    Subtract,
}

impl Op {
    const fn keeps(self, in_lhs: bool, in_rhs: bool) -> bool {
        match self {
            Self::Union => in_lhs || in_rhs,
            Self::Intersect => in_lhs && in_rhs,
            Self::Subtract => in_lhs && !in_rhs,
        }
    }
}

/// A set of pixels represented as disjoint rectangles.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Region {
    bands: Vec<Band>,
}

impl From<Rect> for Region {
    fn from(rect: Rect) -> Self {
        if rect.is_empty() {
            return Self::new();
        }
        Self {
            bands: vec![Band {
                top: rect.y,
                bottom: rect.bottom(),
                spans: vec![Span {
                    left: rect.x,
                    right: rect.right(),
                }],
            }],
        }
    }
}

impl Region {
    /// Create an empty region.
    #[must_use]
    pub const fn new() -> Self {
        Self { bands: Vec::new() }
    }

    /// Check if the region covers no pixels.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.bands.is_empty()
    }

    /// Remove every pixel from the region.
    pub fn clear(&mut self) {
        self.bands.clear();
    }

    /// Number of rectangles in the region.
    #[must_use]
    pub fn complexity(&self) -> usize {
        self.bands.iter().map(|band| band.spans.len()).sum()
    }

    /// Bounding box of the region; the empty rectangle if the region is empty.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        let (Some(first), Some(last)) = (self.bands.first(), self.bands.last()) else {
            return Rect::default();
        };
        let spans = self.bands.iter().flat_map(|band| band.spans.iter());
        let left = spans.clone().map(|span| span.left).min().unwrap_or(0);
        let right = spans.map(|span| span.right).max().unwrap_or(0);
        Rect::from_ltrb(left, first.top, right, last.bottom)
    }

    /// Rectangles of the region, band by band, left to right.
    pub fn rects(&self) -> impl Iterator<Item = Rect> + '_ {
        self.bands.iter().flat_map(|band| {
            band.spans
                .iter()
                .map(move |span| Rect::from_ltrb(span.left, band.top, span.right, band.bottom))
        })
    }

    /// Check if every pixel of `rect` is in the region. An empty rectangle is
    /// always contained.
    #[must_use]
    pub fn contains_rect(&self, rect: Rect) -> bool {
        if rect.is_empty() {
            return true;
        }
        Self::combine(&Self::from(rect), self, Op::Subtract).is_empty()
    }

    /// Check if any pixel of `rect` is in the region.
    #[must_use]
    pub fn intersects_rect(&self, rect: Rect) -> bool {
        !rect.is_empty() && self.rects().any(|covered| covered.intersects(rect))
    }

    /// Add the pixels of `rect`.
    pub fn union_rect(&mut self, rect: Rect) {
        if rect.is_empty() {
            return;
        }
        *self = Self::combine(self, &Self::from(rect), Op::Union);
    }

    /// Keep only the pixels inside `rect`.
    pub fn intersect_rect(&mut self, rect: Rect) {
        *self = Self::combine(self, &Self::from(rect), Op::Intersect);
    }

    /// Keep only the pixels also in another region.
    pub fn intersect(&mut self, other: &Self) {
        *self = Self::combine(self, other, Op::Intersect);
    }

    /// Remove the pixels of `rect`.
    pub fn subtract_rect(&mut self, rect: Rect) {
        if rect.is_empty() || self.is_empty() {
            return;
        }
        *self = Self::combine(self, &Self::from(rect), Op::Subtract);
    }

    /// Remove the pixels of another region.
    pub fn subtract(&mut self, other: &Self) {
        if other.is_empty() || self.is_empty() {
            return;
        }
        *self = Self::combine(self, other, Op::Subtract);
    }

    fn combine(lhs: &Self, rhs: &Self, op: Op) -> Self {
        let mut edges: Vec<i32> = lhs
            .bands
            .iter()
            .chain(&rhs.bands)
            .flat_map(|band| [band.top, band.bottom])
            .collect();
        edges.sort_unstable();
        edges.dedup();

        let mut bands: Vec<Band> = Vec::new();
        let (mut lhs_index, mut rhs_index) = (0, 0);
        for pair in edges.windows(2) {
            let &[top, bottom] = pair else {
                continue;
            };
            let lhs_spans = spans_at(&lhs.bands, &mut lhs_index, top);
            let rhs_spans = spans_at(&rhs.bands, &mut rhs_index, top);
            let spans = combine_spans(lhs_spans, rhs_spans, op);
            if spans.is_empty() {
                continue;
            }
            if let Some(previous) = bands.last_mut()
                && previous.bottom == top
                && previous.spans == spans
            {
                previous.bottom = bottom;
                continue;
            }
            bands.push(Band { top, bottom, spans });
        }
        Self { bands }
    }
}

/// Spans of the band covering row `top`, advancing `cursor` past bands that
/// end at or above it. Rows must be requested in increasing order.
fn spans_at<'bands>(bands: &'bands [Band], cursor: &mut usize, top: i32) -> &'bands [Span] {
    while bands.get(*cursor).is_some_and(|band| band.bottom <= top) {
        *cursor += 1;
    }
    bands
        .get(*cursor)
        .filter(|band| band.top <= top)
        .map(|band| band.spans.as_slice())
        .unwrap_or_default()
}

fn combine_spans(lhs: &[Span], rhs: &[Span], op: Op) -> Vec<Span> {
    let mut edges: Vec<i32> = lhs
        .iter()
        .chain(rhs)
        .flat_map(|span| [span.left, span.right])
        .collect();
    edges.sort_unstable();
    edges.dedup();

    let covers = |spans: &[Span], x: i32| spans.iter().any(|span| span.left <= x && x < span.right);
    let mut spans: Vec<Span> = Vec::new();
    for pair in edges.windows(2) {
        let &[left, right] = pair else {
            continue;
        };
        if !op.keeps(covers(lhs, left), covers(rhs, left)) {
            continue;
        }
        match spans.last_mut() {
            Some(previous) if previous.right == left => previous.right = right,
            _ => spans.push(Span { left, right }),
        }
    }
    spans
}
