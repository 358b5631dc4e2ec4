//! Drawable 3-D elements and their projection into 2-D primitives.
//!
//! Artists hold data-space coordinates. At render time each artist is
//! pushed through the axes' projection matrix and becomes flat
//! primitives whose vertices keep their projected depth, so a renderer
//! can resolve occlusion with a depth buffer.

use nalgebra::{Matrix4, Point3, Vector3, Vector4};

use crate::proj;

/// One of the three data axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub fn name(self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        }
    }
}

/// Place a flat (x, y, plane) triple so the plane value lands on `axis`.
pub fn juggle_axes(x: f64, y: f64, plane: f64, axis: Axis) -> Point3<f64> {
    match axis {
        Axis::X => Point3::new(plane, x, y),
        Axis::Y => Point3::new(x, plane, y),
        Axis::Z => Point3::new(x, y, plane),
    }
}

/// 24-bit color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const WHITE: Color = Color::new(255, 255, 255);
    pub const GREY: Color = Color::new(128, 128, 128);
    pub const RED: Color = Color::new(220, 50, 47);
    pub const GREEN: Color = Color::new(64, 160, 43);
    pub const BLUE: Color = Color::new(38, 109, 211);
    pub const YELLOW: Color = Color::new(181, 137, 0);
    pub const CYAN: Color = Color::new(42, 161, 152);
    pub const MAGENTA: Color = Color::new(211, 54, 130);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Scale towards black by `intensity` in [0, 1].
    pub fn dim(self, intensity: f64) -> Self {
        let k = intensity.clamp(0.0, 1.0);
        Color::new(
            (self.r as f64 * k).round() as u8,
            (self.g as f64 * k).round() as u8,
            (self.b as f64 * k).round() as u8,
        )
    }
}

/// Connected polyline in data space.
#[derive(Debug, Clone)]
pub struct Line3d {
    pub points: Vec<Point3<f64>>,
    pub color: Color,
}

/// A bundle of polylines sharing one style (wireframes, quiver arrows,
/// contour segments).
#[derive(Debug, Clone)]
pub struct LineCollection3d {
    pub lines: Vec<Vec<Point3<f64>>>,
    pub color: Color,
}

/// Filled polygons with optional edges and flat shading.
#[derive(Debug, Clone)]
pub struct PolyCollection3d {
    pub polygons: Vec<Vec<Point3<f64>>>,
    pub facecolor: Color,
    pub edgecolor: Option<Color>,
    pub shade: bool,
}

/// Symbol markers at independent points.
#[derive(Debug, Clone)]
pub struct Markers3d {
    pub points: Vec<Point3<f64>>,
    pub color: Color,
    pub symbol: char,
}

/// A label anchored at a 3-D point.
#[derive(Debug, Clone)]
pub struct Text3d {
    pub position: Point3<f64>,
    pub text: String,
    pub direction: Option<Axis>,
    pub color: Color,
}

/// Any drawable element owned by an axes.
#[derive(Debug, Clone)]
pub enum Artist {
    Line(Line3d),
    Lines(LineCollection3d),
    Polys(PolyCollection3d),
    Markers(Markers3d),
    Text(Text3d),
}

/// A projected vertex: position in the drawing plane plus eye depth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
    pub depth: f64,
}

/// Flat primitive produced by projecting an artist.
#[derive(Debug, Clone)]
pub enum Prim2d {
    Polyline {
        points: Vec<ScreenPoint>,
        color: Color,
    },
    Polygon {
        points: Vec<ScreenPoint>,
        facecolor: Color,
        edgecolor: Option<Color>,
        /// Flat-shading intensity in [0, 1].
        brightness: f64,
    },
    Marker {
        point: ScreenPoint,
        color: Color,
        symbol: char,
    },
    Label {
        anchor: ScreenPoint,
        text: String,
        color: Color,
        /// Baseline angle in radians, 0 for unrotated text. Kept in
        /// (-pi/2, pi/2] so labels never render upside-down.
        angle: f64,
    },
}

/// One rendered frame: every primitive of every artist.
#[derive(Debug, Clone, Default)]
pub struct Scene2d {
    pub prims: Vec<Prim2d>,
}

fn project_point(p: &Point3<f64>, m: &Matrix4<f64>) -> ScreenPoint {
    let (x, y, depth) = proj::proj_transform_vec(Vector4::new(p.x, p.y, p.z, 1.0), m);
    ScreenPoint { x, y, depth }
}

fn polygon_normal(points: &[Point3<f64>]) -> Vector3<f64> {
    if points.len() < 3 {
        return Vector3::new(0.0, 0.0, 1.0);
    }
    let n = (points[1] - points[0]).cross(&(points[2] - points[0]));
    if n.norm() < 1e-12 {
        Vector3::new(0.0, 0.0, 1.0)
    } else {
        n.normalize()
    }
}

/// Flat-shading intensity for a face normal against a fixed light.
fn shade(normal: &Vector3<f64>) -> f64 {
    let light = Vector3::new(0.4, -0.5, 0.76).normalize();
    let diffuse = normal.dot(&light).abs();
    0.35 + 0.65 * diffuse
}

impl Artist {
    /// Project this artist through `m` into flat primitives.
    pub fn project(&self, m: &Matrix4<f64>) -> Vec<Prim2d> {
        match self {
            Artist::Line(line) => vec![Prim2d::Polyline {
                points: line.points.iter().map(|p| project_point(p, m)).collect(),
                color: line.color,
            }],
            Artist::Lines(lines) => lines
                .lines
                .iter()
                .map(|line| Prim2d::Polyline {
                    points: line.iter().map(|p| project_point(p, m)).collect(),
                    color: lines.color,
                })
                .collect(),
            Artist::Polys(polys) => polys
                .polygons
                .iter()
                .map(|ring| Prim2d::Polygon {
                    points: ring.iter().map(|p| project_point(p, m)).collect(),
                    facecolor: polys.facecolor,
                    edgecolor: polys.edgecolor,
                    brightness: if polys.shade {
                        shade(&polygon_normal(ring))
                    } else {
                        1.0
                    },
                })
                .collect(),
            Artist::Markers(markers) => markers
                .points
                .iter()
                .map(|p| Prim2d::Marker {
                    point: project_point(p, m),
                    color: markers.color,
                    symbol: markers.symbol,
                })
                .collect(),
            Artist::Text(text) => {
                let anchor = project_point(&text.position, m);
                let angle = match text.direction {
                    None => 0.0,
                    Some(axis) => {
                        let step = match axis {
                            Axis::X => Vector3::x(),
                            Axis::Y => Vector3::y(),
                            Axis::Z => Vector3::z(),
                        };
                        let ahead = project_point(&(text.position + step), m);
                        baseline_angle(ahead.x - anchor.x, ahead.y - anchor.y)
                    }
                };
                vec![Prim2d::Label {
                    anchor,
                    text: text.text.clone(),
                    color: text.color,
                    angle,
                }]
            }
        }
    }
}

impl Scene2d {
    pub fn is_empty(&self) -> bool {
        self.prims.is_empty()
    }

    pub fn len(&self) -> usize {
        self.prims.len()
    }

    /// Bounding box (xmin, xmax, ymin, ymax) over every vertex.
    pub fn bounds(&self) -> Option<(f64, f64, f64, f64)> {
        let mut bounds: Option<(f64, f64, f64, f64)> = None;
        let mut grow = |p: &ScreenPoint| {
            if !p.x.is_finite() || !p.y.is_finite() {
                return;
            }
            bounds = Some(match bounds {
                None => (p.x, p.x, p.y, p.y),
                Some((x0, x1, y0, y1)) => (x0.min(p.x), x1.max(p.x), y0.min(p.y), y1.max(p.y)),
            });
        };
        for prim in &self.prims {
            match prim {
                Prim2d::Polyline { points, .. } | Prim2d::Polygon { points, .. } => {
                    points.iter().for_each(&mut grow)
                }
                Prim2d::Marker { point, .. } => grow(point),
                Prim2d::Label { anchor, .. } => grow(anchor),
            }
        }
        bounds
    }

    /// Index of the primitive nearest to (x, y), if within `tol`.
    pub fn pick(&self, x: f64, y: f64, tol: f64) -> Option<usize> {
        let target = (x, y);
        let mut best: Option<(usize, f64)> = None;
        for (i, prim) in self.prims.iter().enumerate() {
            let d = match prim {
                Prim2d::Polyline { points, .. } => polyline_dist(points, target, false),
                Prim2d::Polygon { points, .. } => polyline_dist(points, target, true),
                Prim2d::Marker { point, .. } | Prim2d::Label { anchor: point, .. } => {
                    let p = (point.x, point.y);
                    // Degenerate segment: plain point distance.
                    proj::line2d_seg_dist(p, p, target)
                }
            };
            if let Some(d) = within_tol(d, tol) {
                if best.map_or(true, |(_, bd)| d < bd) {
                    best = Some((i, d));
                }
            }
        }
        best.map(|(i, _)| i)
    }
}

/// Fold the direction (dx, dy) into a text baseline angle in
/// (-pi/2, pi/2] so rotated labels stay readable.
fn baseline_angle(dx: f64, dy: f64) -> f64 {
    use std::f64::consts::{FRAC_PI_2, PI};
    let mut angle = dy.atan2(dx);
    if angle > FRAC_PI_2 {
        angle -= PI;
    } else if angle <= -FRAC_PI_2 {
        angle += PI;
    }
    angle
}

fn within_tol(d: f64, tol: f64) -> Option<f64> {
    (d.is_finite() && d <= tol).then_some(d)
}

fn polyline_dist(points: &[ScreenPoint], target: (f64, f64), closed: bool) -> f64 {
    if points.is_empty() {
        return f64::INFINITY;
    }
    if points.len() == 1 {
        let p = (points[0].x, points[0].y);
        return proj::line2d_seg_dist(p, p, target);
    }
    let mut best = f64::INFINITY;
    for pair in points.windows(2) {
        let d = proj::line2d_seg_dist(
            (pair[0].x, pair[0].y),
            (pair[1].x, pair[1].y),
            target,
        );
        best = best.min(d);
    }
    if closed {
        let first = points.first().unwrap();
        let last = points.last().unwrap();
        best = best.min(proj::line2d_seg_dist(
            (last.x, last.y),
            (first.x, first.y),
            target,
        ));
    }
    best
}
