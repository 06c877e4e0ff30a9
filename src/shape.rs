//! Outline of one segment background.
//!
//! Coordinates follow the usual screen convention: origin top-left, y grows
//! downwards and angles are measured in degrees from +x towards +y. The shape
//! occupies `[0, width] x [0, max(left_height, right_height)]`; its top edge
//! slants from `left_height` (measured up from the bottom) on the left to
//! `right_height` on the right, and all four corners are rounded with the
//! same radius.

use serde::Serialize;
use std::fmt::Write;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: Point) -> f32 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    /// Point on a circle around `self` at `angle_deg`.
    pub fn polar(&self, radius: f32, angle_deg: f32) -> Point {
        let a = angle_deg.to_radians();
        Point::new(self.x + radius * a.cos(), self.y + radius * a.sin())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum PathElement {
    MoveTo(Point),
    LineTo(Point),
    /// Circular arc with increasing angle from `start_deg` to `end_deg`.
    Arc {
        center: Point,
        radius: f32,
        start_deg: f32,
        end_deg: f32,
    },
    Close,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ShapePath {
    pub elements: Vec<PathElement>,
}

impl ShapePath {
    pub fn move_to(&mut self, p: Point) {
        self.elements.push(PathElement::MoveTo(p));
    }

    pub fn line_to(&mut self, p: Point) {
        self.elements.push(PathElement::LineTo(p));
    }

    pub fn arc(&mut self, center: Point, radius: f32, start_deg: f32, end_deg: f32) {
        self.elements.push(PathElement::Arc {
            center,
            radius,
            start_deg,
            end_deg,
        });
    }

    pub fn close(&mut self) {
        self.elements.push(PathElement::Close);
    }

    /// Translates every element by `(dx, dy)`.
    pub fn translated(&self, dx: f32, dy: f32) -> ShapePath {
        let shift = |p: Point| Point::new(p.x + dx, p.y + dy);
        let elements = self
            .elements
            .iter()
            .map(|e| match *e {
                PathElement::MoveTo(p) => PathElement::MoveTo(shift(p)),
                PathElement::LineTo(p) => PathElement::LineTo(shift(p)),
                PathElement::Arc {
                    center,
                    radius,
                    start_deg,
                    end_deg,
                } => PathElement::Arc {
                    center: shift(center),
                    radius,
                    start_deg,
                    end_deg,
                },
                PathElement::Close => PathElement::Close,
            })
            .collect();
        ShapePath { elements }
    }

    /// SVG path data. Arcs become `L` to their start point followed by `A`.
    pub fn to_svg(&self) -> String {
        let mut d = String::new();
        for e in &self.elements {
            // Writing into a String cannot fail.
            let _ = match *e {
                PathElement::MoveTo(p) => write!(d, "M{:.3} {:.3} ", p.x, p.y),
                PathElement::LineTo(p) => write!(d, "L{:.3} {:.3} ", p.x, p.y),
                PathElement::Arc {
                    center,
                    radius,
                    start_deg,
                    end_deg,
                } => {
                    let from = center.polar(radius, start_deg);
                    let to = center.polar(radius, end_deg);
                    let large = if (end_deg - start_deg).abs() > 180.0 { 1 } else { 0 };
                    let sweep = if end_deg >= start_deg { 1 } else { 0 };
                    write!(
                        d,
                        "L{:.3} {:.3} A{:.3} {:.3} 0 {} {} {:.3} {:.3} ",
                        from.x, from.y, radius, radius, large, sweep, to.x, to.y
                    )
                }
                PathElement::Close => write!(d, "Z"),
            };
        }
        d.trim_end().to_string()
    }

    /// End point of the last drawing element, if any.
    pub fn current_point(&self) -> Option<Point> {
        self.elements.iter().rev().find_map(|e| match *e {
            PathElement::MoveTo(p) | PathElement::LineTo(p) => Some(p),
            PathElement::Arc {
                center,
                radius,
                end_deg,
                ..
            } => Some(center.polar(radius, end_deg)),
            PathElement::Close => None,
        })
    }
}

/// Inputs for one segment outline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlantedTopShape {
    pub corner_radius: f32,
    pub left_height: f32,
    pub right_height: f32,
    pub width: f32,
}

impl SlantedTopShape {
    /// Corner radius is half a step; total width is one step per score.
    pub fn for_segment(step_width: f32, scores: usize, left_height: f32, right_height: f32) -> Self {
        Self {
            corner_radius: step_width / 2.0,
            left_height,
            right_height,
            width: step_width * scores as f32,
        }
    }

    pub fn height(&self) -> f32 {
        self.right_height.max(self.left_height)
    }

    fn radius(&self) -> f32 {
        let r = self.corner_radius.max(0.0);
        r.min(self.width / 2.0)
            .min(self.left_height.min(self.right_height).max(0.0) / 2.0)
            .max(0.0)
    }

    /// Direction (degrees) of the outward normal of the slanted top edge.
    /// In (180, 270] for a rising edge, (270, 360) for a falling one.
    ///
    /// The edge is the common upper tangent of the two top corner circles.
    /// Both have the same radius, so it runs parallel to the line between
    /// their centers and touches each circle at the same angle.
    pub fn top_tangent_angle(&self) -> f32 {
        let (left, right) = self.top_centers();
        let dx = right.x - left.x;
        let dy = right.y - left.y;
        if dx.abs() < f32::EPSILON {
            return 270.0;
        }
        // Normal (dy, -dx) points upwards for a left-to-right edge.
        let angle = (-dx).atan2(dy).to_degrees();
        if angle < 0.0 {
            angle + 360.0
        } else {
            angle
        }
    }

    /// Centers of the top-left and top-right corner circles.
    pub fn top_centers(&self) -> (Point, Point) {
        let r = self.radius();
        let h = self.height();
        (
            Point::new(r, h - self.left_height + r),
            Point::new(self.width - r, h - self.right_height + r),
        )
    }

    pub fn top_tangent_points(&self) -> (Point, Point) {
        let r = self.radius();
        let angle = self.top_tangent_angle();
        let (left, right) = self.top_centers();
        (left.polar(r, angle), right.polar(r, angle))
    }

    pub fn path(&self) -> ShapePath {
        let r = self.radius();
        let w = self.width.max(0.0);
        let h = self.height();
        let mut path = ShapePath::default();

        if w <= 0.0 || h <= 0.0 {
            return path;
        }

        let (top_left, top_right) = self.top_centers();
        let angle = self.top_tangent_angle();
        let (_, right_tangent) = self.top_tangent_points();

        path.move_to(Point::new(r, h));
        path.arc(Point::new(r, h - r), r, 90.0, 180.0);
        path.line_to(Point::new(0.0, top_left.y));
        path.arc(top_left, r, 180.0, angle);
        path.line_to(right_tangent);
        path.arc(top_right, r, angle, 360.0);
        path.line_to(Point::new(w, h - r));
        path.arc(Point::new(w - r, h - r), r, 0.0, 90.0);
        path.close();
        path
    }
}
