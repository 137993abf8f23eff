//! Stroke geometry and width profile.

use std::str::FromStr;

use crate::color::Color;
use crate::point::Point;

/// Tool a stroke was drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StrokeTool {
    #[default]
    Pen,
    Highlighter,
    Eraser,
}

impl StrokeTool {
    /// Canonical serialized name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pen => "pen",
            Self::Highlighter => "highlighter",
            Self::Eraser => "eraser",
        }
    }
}

impl FromStr for StrokeTool {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pen" => Ok(Self::Pen),
            "highlighter" => Ok(Self::Highlighter),
            "eraser" => Ok(Self::Eraser),
            _ => Err(format!("unknown stroke tool: {s}")),
        }
    }
}

/// A hand-drawn stroke: an ordered point path plus a width profile.
///
/// The width profile is the base `width` and an optional list of
/// per-segment widths for variable-width strokes. The segment list's
/// length is independent of the point count (the widths are
/// interpolation control values, not a per-point mapping) and is
/// preserved exactly through save and load. A stroke with zero points
/// is valid.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Stroke {
    points: Vec<Point>,
    width: f64,
    segment_widths: Vec<f64>,
    pub tool: StrokeTool,
    pub color: Color,
}

impl Stroke {
    /// Create an empty stroke with a zero-width profile.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a point to the path.
    pub fn add_point(&mut self, point: Point) {
        self.points.push(point);
    }

    /// Replace the whole point path.
    pub fn set_points(&mut self, points: Vec<Point>) {
        self.points = points;
    }

    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    #[must_use]
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// Replace the width profile atomically.
    ///
    /// Any prior profile is discarded; there is no state in which the
    /// old base width is visible next to the new segment widths.
    pub fn set_width(&mut self, width: f64, segment_widths: Vec<f64>) {
        self.width = width;
        self.segment_widths = segment_widths;
    }

    /// Base width of the stroke.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Per-segment widths; empty for a constant-width stroke.
    #[must_use]
    pub fn segment_widths(&self) -> &[f64] {
        &self.segment_widths
    }

    /// Whether the stroke carries a variable-width profile.
    #[must_use]
    pub fn has_segment_widths(&self) -> bool {
        !self.segment_widths.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_width_replaces_profile() {
        let mut stroke = Stroke::new();
        stroke.set_width(2.0, vec![1.0, 1.5, 2.0]);
        assert_eq!(stroke.width(), 2.0);
        assert_eq!(stroke.segment_widths(), &[1.0, 1.5, 2.0]);

        stroke.set_width(3.0, vec![]);
        assert_eq!(stroke.width(), 3.0);
        assert!(!stroke.has_segment_widths());
    }

    #[test]
    fn test_segment_widths_independent_of_points() {
        let mut stroke = Stroke::new();
        stroke.add_point(Point::new(0.0, 0.0));
        stroke.set_width(1.0, vec![0.5; 7]);
        assert_eq!(stroke.point_count(), 1);
        assert_eq!(stroke.segment_widths().len(), 7);
    }

    #[test]
    fn test_tool_names() {
        assert_eq!(StrokeTool::Highlighter.as_str(), "highlighter");
        assert_eq!("pen".parse::<StrokeTool>().unwrap(), StrokeTool::Pen);
        assert!("brush".parse::<StrokeTool>().is_err());
    }
}
