//! Guidance overlay geometry
//!
//! Corner brackets and the face box are flattened into one composite path
//! and handed to the display surface as a single draw submission. The
//! batching is a pure performance contract; the visual output is identical
//! to drawing each shape separately.

use crate::types::FaceRegion;

/// Line segment in surface pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

/// All guidance geometry for one render tick, flattened into one path.
#[derive(Debug, Clone, Default)]
pub struct OverlayPath {
    pub segments: Vec<Segment>,
}

impl OverlayPath {
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    fn push(&mut self, x0: f32, y0: f32, x1: f32, y1: f32) {
        self.segments.push(Segment { x0, y0, x1, y1 });
    }

    fn push_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.push(x, y, x + width, y);
        self.push(x + width, y, x + width, y + height);
        self.push(x + width, y + height, x, y + height);
        self.push(x, y + height, x, y);
    }
}

/// Screen corner a bracket is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// A guidance shape in surface coordinates.
#[derive(Debug, Clone)]
pub enum GuideShape {
    /// L-shaped bracket inset by `margin` with arms of length `arm`.
    CornerBracket {
        corner: Corner,
        margin: f32,
        arm: f32,
    },
    /// Bounding box around the detected face.
    FaceBox { region: FaceRegion },
}

/// Default bracket inset from the surface edges.
pub const GUIDE_MARGIN: f32 = 24.0;
/// Default bracket arm length.
pub const GUIDE_ARM: f32 = 32.0;

/// The four standard corner brackets.
pub fn corner_brackets(margin: f32, arm: f32) -> Vec<GuideShape> {
    [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomLeft,
        Corner::BottomRight,
    ]
    .into_iter()
    .map(|corner| GuideShape::CornerBracket {
        corner,
        margin,
        arm,
    })
    .collect()
}

/// Display surface boundary.
///
/// The pipeline issues exactly one `draw_path` per executed render tick.
/// An empty path is a valid no-op draw, not an error.
pub trait DrawSurface {
    fn size(&self) -> (u32, u32);
    fn draw_path(&mut self, path: &OverlayPath);
}

/// Flattens guidance shapes into a single composite draw per render.
#[derive(Debug, Clone, Default)]
pub struct OverlayRenderer;

impl OverlayRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Draw all shapes as one composite path. Safe with an empty shape list.
    pub fn render(&self, surface: &mut dyn DrawSurface, shapes: &[GuideShape]) {
        let (width, height) = surface.size();
        let (width, height) = (width as f32, height as f32);

        let mut path = OverlayPath::default();
        for shape in shapes {
            match shape {
                GuideShape::CornerBracket {
                    corner,
                    margin,
                    arm,
                } => {
                    let (ax, ay, dx, dy) = match corner {
                        Corner::TopLeft => (*margin, *margin, 1.0, 1.0),
                        Corner::TopRight => (width - margin, *margin, -1.0, 1.0),
                        Corner::BottomLeft => (*margin, height - margin, 1.0, -1.0),
                        Corner::BottomRight => (width - margin, height - margin, -1.0, -1.0),
                    };
                    path.push(ax, ay, ax + dx * arm, ay);
                    path.push(ax, ay, ax, ay + dy * arm);
                }
                GuideShape::FaceBox { region } => {
                    path.push_rect(region.x, region.y, region.width, region.height);
                }
            }
        }

        surface.draw_path(&path);
    }
}
