use crate::canvas::Canvas;
use crate::foundation::core::{Point, Rgba8};
use crate::foundation::error::IfsResult;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrokeKind {
    /// Filled disc; `width` holds the radius.
    Point,
    Line,
    Bezier,
}

/// One recorded primitive.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Stroke {
    pub kind: StrokeKind,
    pub points: Vec<Point>,
    pub colour: Rgba8,
    pub width: f64,
    pub closed: bool,
}

/// Canvas that records every primitive in call order.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Drawing {
    pub size: f64,
    strokes: Vec<Stroke>,
}

impl Drawing {
    pub fn new(size: f64) -> Self {
        Self {
            size,
            strokes: Vec::new(),
        }
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    pub fn count(&self, kind: StrokeKind) -> usize {
        self.strokes.iter().filter(|s| s.kind == kind).count()
    }

    pub fn to_json(&self) -> IfsResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(text: &str) -> IfsResult<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

impl Canvas for Drawing {
    fn add_point(&mut self, pos: Point, colour: Rgba8, radius: f64) {
        self.strokes.push(Stroke {
            kind: StrokeKind::Point,
            points: vec![pos],
            colour,
            width: radius,
            closed: false,
        });
    }

    fn add_line(&mut self, points: &[Point], colour: Rgba8, width: f64, closed: bool) {
        if points.is_empty() {
            return;
        }
        self.strokes.push(Stroke {
            kind: StrokeKind::Line,
            points: points.to_vec(),
            colour,
            width,
            closed,
        });
    }

    fn add_bezier(&mut self, points: &[Point], colour: Rgba8, width: f64, closed: bool) {
        if points.is_empty() {
            return;
        }
        self.strokes.push(Stroke {
            kind: StrokeKind::Bezier,
            points: points.to_vec(),
            colour,
            width,
            closed,
        });
    }
}

#[cfg(test)]
#[path = "../../tests/unit/canvas/drawing.rs"]
mod tests;
