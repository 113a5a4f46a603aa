//! Pie layout: where each slice sits on the circle and which corner the
//! detail callout for a selected slice should use.
use crate::core::chart::{Breakdown, ChartSlice};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use std::fmt::Display;

const FULL_TURN: Decimal = Decimal::from_parts(360, 0, 0, false, 0);

/// Screen corner for a slice's detail callout, chosen so it does not cover
/// the wedge itself. Purely a rendering hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Quadrant {
    TopRight,
    BottomRight,
    BottomLeft,
    #[default]
    TopLeft,
}

impl Quadrant {
    /// Quadrant for an angle in degrees, measured from the 0° reference.
    /// Each range includes its lower bound.
    pub fn from_angle(degrees: f64) -> Self {
        let angle = degrees.rem_euclid(360.0);
        if angle < 90.0 {
            Quadrant::TopRight
        } else if angle < 180.0 {
            Quadrant::BottomRight
        } else if angle < 270.0 {
            Quadrant::BottomLeft
        } else {
            Quadrant::TopLeft
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Quadrant::TopRight => "top-right",
            Quadrant::BottomRight => "bottom-right",
            Quadrant::BottomLeft => "bottom-left",
            Quadrant::TopLeft => "top-left",
        }
    }
}

impl Display for Quadrant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Angular extent of one slice, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliceArc {
    pub start: f64,
    pub span: f64,
    /// Midpoint, normalized into `[0, 360)`.
    pub mid: f64,
}

/// Lays the slices out in order from 0°, each starting where the previous ended.
/// Empty when there is nothing to draw.
pub fn slice_arcs(breakdown: &Breakdown) -> Vec<SliceArc> {
    if breakdown.total <= Decimal::ZERO {
        return Vec::new();
    }
    let mut start = Decimal::ZERO;
    breakdown
        .slices
        .iter()
        .map(|slice| {
            let span = slice.value / breakdown.total * FULL_TURN;
            let mid = (start + span / Decimal::TWO) % FULL_TURN;
            let arc = SliceArc {
                start: start.to_f64().unwrap_or_default(),
                span: span.to_f64().unwrap_or_default(),
                mid: mid.to_f64().unwrap_or_default(),
            };
            start += span;
            arc
        })
        .collect()
}

/// Callout corner for the slice at `index`.
///
/// Falls back to [`Quadrant::TopLeft`] when there are no slices, the total
/// is zero, or `index` is out of range.
pub fn label_quadrant(breakdown: &Breakdown, index: usize) -> Quadrant {
    slice_arcs(breakdown)
        .get(index)
        .map(|arc| Quadrant::from_angle(arc.mid))
        .unwrap_or_default()
}

/// Which slice, if any, has its detail callout open.
///
/// Selection state belongs to whoever renders the chart; it is never saved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Focus(Option<usize>);

/// A focused slice together with where to place its callout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FocusedSlice<'a> {
    pub index: usize,
    pub slice: &'a ChartSlice,
    pub quadrant: Quadrant,
}

impl Focus {
    pub fn index(&self) -> Option<usize> {
        self.0
    }

    /// Focuses `index`, or clears focus if `index` is already focused.
    pub fn select(&mut self, index: usize) {
        self.0 = if self.0 == Some(index) {
            None
        } else {
            Some(index)
        };
    }

    /// Resolves the focused slice against the current breakdown. `None` when
    /// nothing is focused or the index no longer points at a slice.
    pub fn resolve<'a>(&self, breakdown: &'a Breakdown) -> Option<FocusedSlice<'a>> {
        let index = self.0?;
        let slice = breakdown.slice(index)?;
        Some(FocusedSlice {
            index,
            slice,
            quadrant: label_quadrant(breakdown, index),
        })
    }
}
