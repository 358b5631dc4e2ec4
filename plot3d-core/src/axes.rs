//! 3-D axes: data limits, view state and the draw entry points.

use std::f64::consts::FRAC_PI_2;

use log::debug;
use nalgebra::{Matrix4, Point3, Vector3};

use crate::artist::{
    juggle_axes, Artist, Axis, Color, Line3d, LineCollection3d, Markers3d, PolyCollection3d,
    Scene2d, Text3d,
};
use crate::contour::contour_lines;
use crate::error::PlotError;
use crate::grid::Grid;
use crate::proj;

/// Quad patch styling for [`Axes3d::plot_surface`].
#[derive(Debug, Clone, Copy)]
pub struct SurfaceStyle {
    /// Row step between patch boundaries. Must be at least 1.
    pub rstride: usize,
    /// Column step between patch boundaries. Must be at least 1.
    pub cstride: usize,
    pub color: Color,
    pub edgecolor: Option<Color>,
    pub shade: bool,
}

impl Default for SurfaceStyle {
    fn default() -> Self {
        Self {
            rstride: 10,
            cstride: 10,
            color: Color::BLUE,
            edgecolor: None,
            shade: true,
        }
    }
}

/// Which point of an arrow sits on its anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pivot {
    Tail,
    Middle,
    Tip,
}

/// Arrow styling for [`Axes3d::quiver`].
#[derive(Debug, Clone, Copy)]
pub struct QuiverStyle {
    /// Shaft length multiplier applied after optional normalization.
    pub length: f64,
    /// Head length as a fraction of the shaft.
    pub arrow_length_ratio: f64,
    pub pivot: Pivot,
    /// Scale every direction to unit length before applying `length`.
    pub normalize: bool,
}

impl Default for QuiverStyle {
    fn default() -> Self {
        Self {
            length: 1.0,
            arrow_length_ratio: 0.3,
            pivot: Pivot::Tail,
            normalize: false,
        }
    }
}

/// A 3-D plot: owns data limits, the camera state and every artist
/// added by the draw entry points, and projects them into a flat scene.
pub struct Axes3d {
    xlim: (f64, f64),
    ylim: (f64, f64),
    zlim: (f64, f64),
    /// Camera elevation above the xy-plane, degrees.
    elev: f64,
    /// Camera azimuth around the z axis, degrees.
    azim: f64,
    /// Eye distance from the normalized box center.
    dist: f64,
    xlabel: Option<String>,
    ylabel: Option<String>,
    zlabel: Option<String>,
    artists: Vec<Artist>,
    seen_data: bool,
}

impl Default for Axes3d {
    fn default() -> Self {
        Self::new()
    }
}

impl Axes3d {
    pub fn new() -> Self {
        Self {
            xlim: (0.0, 1.0),
            ylim: (0.0, 1.0),
            zlim: (0.0, 1.0),
            elev: 30.0,
            azim: -60.0,
            dist: 10.0,
            xlabel: None,
            ylabel: None,
            zlabel: None,
            artists: Vec::new(),
            seen_data: false,
        }
    }

    /// Point the camera: elevation and azimuth in degrees.
    pub fn view_init(&mut self, elev: f64, azim: f64) {
        self.elev = elev;
        self.azim = azim;
    }

    pub fn elev(&self) -> f64 {
        self.elev
    }

    pub fn azim(&self) -> f64 {
        self.azim
    }

    pub fn dist(&self) -> f64 {
        self.dist
    }

    /// Set the eye distance from the box center.
    pub fn set_dist(&mut self, dist: f64) -> Result<(), PlotError> {
        if !(dist > 0.0) {
            return Err(PlotError::InvalidArgument(format!(
                "eye distance must be positive, got {}",
                dist
            )));
        }
        self.dist = dist;
        Ok(())
    }

    pub fn set_xlim3d(&mut self, min: f64, max: f64) {
        self.xlim = (min, max);
    }

    pub fn set_ylim3d(&mut self, min: f64, max: f64) {
        self.ylim = (min, max);
    }

    pub fn set_zlim3d(&mut self, min: f64, max: f64) {
        self.zlim = (min, max);
    }

    pub fn xlim(&self) -> (f64, f64) {
        self.xlim
    }

    pub fn ylim(&self) -> (f64, f64) {
        self.ylim
    }

    pub fn zlim(&self) -> (f64, f64) {
        self.zlim
    }

    pub fn set_xlabel(&mut self, label: &str) {
        self.xlabel = Some(label.to_string());
    }

    pub fn set_ylabel(&mut self, label: &str) {
        self.ylabel = Some(label.to_string());
    }

    pub fn set_zlabel(&mut self, label: &str) {
        self.zlabel = Some(label.to_string());
    }

    pub fn artists(&self) -> &[Artist] {
        &self.artists
    }

    /// Drop every artist and reset limits and labels. View state stays.
    pub fn clear(&mut self) {
        self.artists.clear();
        self.xlim = (0.0, 1.0);
        self.ylim = (0.0, 1.0);
        self.zlim = (0.0, 1.0);
        self.xlabel = None;
        self.ylabel = None;
        self.zlabel = None;
        self.seen_data = false;
    }

    /// Compose the full data-to-drawing-plane matrix:
    /// perspective x view x world normalization.
    pub fn get_proj(&self) -> Result<Matrix4<f64>, PlotError> {
        let relev = self.elev.to_radians();
        let razim = self.azim.to_radians();

        let world = proj::world_transformation(
            self.xlim.0, self.xlim.1, self.ylim.0, self.ylim.1, self.zlim.0, self.zlim.1,
        )?;

        let center = Point3::new(0.5, 0.5, 0.5);
        let eye = Point3::new(
            center.x + razim.cos() * relev.cos() * self.dist,
            center.y + razim.sin() * relev.cos() * self.dist,
            center.z + relev.sin() * self.dist,
        );
        // Looking from below flips which way is up.
        let up = if relev.abs() > FRAC_PI_2 {
            Vector3::new(0.0, 0.0, -1.0)
        } else {
            Vector3::new(0.0, 0.0, 1.0)
        };

        let view = proj::view_transformation(eye, center, up);
        let persp = proj::persp_transformation(-self.dist, self.dist);
        Ok(persp * view * world)
    }

    /// Add a 3-D polyline.
    pub fn plot(
        &mut self,
        xs: &[f64],
        ys: &[f64],
        zs: &[f64],
        color: Color,
    ) -> Result<(), PlotError> {
        check_same_len(&[("xs", xs.len()), ("ys", ys.len()), ("zs", zs.len())])?;
        debug!("plot: polyline with {} vertices", xs.len());
        self.auto_scale(xs, ys, zs);
        self.artists.push(Artist::Line(Line3d {
            points: points3(xs, ys, zs),
            color,
        }));
        Ok(())
    }

    /// Add symbol markers at independent points.
    pub fn scatter(
        &mut self,
        xs: &[f64],
        ys: &[f64],
        zs: &[f64],
        color: Color,
        symbol: char,
    ) -> Result<(), PlotError> {
        check_same_len(&[("xs", xs.len()), ("ys", ys.len()), ("zs", zs.len())])?;
        debug!("scatter: {} markers", xs.len());
        self.auto_scale(xs, ys, zs);
        self.artists.push(Artist::Markers(Markers3d {
            points: points3(xs, ys, zs),
            color,
            symbol,
        }));
        Ok(())
    }

    /// Anchor a label at a 3-D point, optionally aligned with an axis.
    pub fn text(
        &mut self,
        x: f64,
        y: f64,
        z: f64,
        s: &str,
        direction: Option<Axis>,
        color: Color,
    ) {
        self.auto_scale(&[x], &[y], &[z]);
        self.artists.push(Artist::Text(Text3d {
            position: Point3::new(x, y, z),
            text: s.to_string(),
            direction,
            color,
        }));
    }

    /// Add a quad-patch surface over matching coordinate grids.
    ///
    /// Heights must form a real 2-D field: at least two rows and two
    /// columns. Patches touching a non-finite sample are dropped.
    pub fn plot_surface(
        &mut self,
        x: &Grid,
        y: &Grid,
        z: &Grid,
        style: SurfaceStyle,
    ) -> Result<(), PlotError> {
        check_grid_shapes(x, y, z)?;
        check_surface_grid(z)?;
        if style.rstride == 0 || style.cstride == 0 {
            return Err(PlotError::InvalidArgument(
                "surface strides must be at least 1".to_string(),
            ));
        }
        let (rows, cols) = z.shape();
        debug!(
            "plot_surface: {}x{} grid, strides ({}, {})",
            rows, cols, style.rstride, style.cstride
        );
        self.auto_scale(x.values(), y.values(), z.values());

        let corner = |r: usize, c: usize| Point3::new(x.get(r, c), y.get(r, c), z.get(r, c));
        let mut polygons = Vec::new();
        for r0 in (0..rows - 1).step_by(style.rstride) {
            let r1 = (r0 + style.rstride).min(rows - 1);
            for c0 in (0..cols - 1).step_by(style.cstride) {
                let c1 = (c0 + style.cstride).min(cols - 1);
                let ring = vec![
                    corner(r0, c0),
                    corner(r0, c1),
                    corner(r1, c1),
                    corner(r1, c0),
                ];
                if ring.iter().all(|p| p.coords.iter().all(|v| v.is_finite())) {
                    polygons.push(ring);
                }
            }
        }
        self.artists.push(Artist::Polys(PolyCollection3d {
            polygons,
            facecolor: style.color,
            edgecolor: style.edgecolor,
            shade: style.shade,
        }));
        Ok(())
    }

    /// Add grid lines over matching coordinate grids.
    ///
    /// Lines run along every `rstride`-th row and `cstride`-th column at
    /// full resolution; the final row and column are always included. A
    /// stride of 0 suppresses that family of lines, but at least one
    /// stride must be non-zero.
    pub fn plot_wireframe(
        &mut self,
        x: &Grid,
        y: &Grid,
        z: &Grid,
        rstride: usize,
        cstride: usize,
        color: Color,
    ) -> Result<(), PlotError> {
        check_grid_shapes(x, y, z)?;
        check_surface_grid(z)?;
        if rstride == 0 && cstride == 0 {
            return Err(PlotError::InvalidArgument(
                "either rstride or cstride must be non-zero".to_string(),
            ));
        }
        let (rows, cols) = z.shape();
        debug!(
            "plot_wireframe: {}x{} grid, strides ({}, {})",
            rows, cols, rstride, cstride
        );
        self.auto_scale(x.values(), y.values(), z.values());

        let point = |r: usize, c: usize| Point3::new(x.get(r, c), y.get(r, c), z.get(r, c));
        let mut lines = Vec::new();
        for r in stride_indices(rows, rstride) {
            lines.push((0..cols).map(|c| point(r, c)).collect());
        }
        for c in stride_indices(cols, cstride) {
            lines.push((0..rows).map(|r| point(r, c)).collect());
        }
        self.artists
            .push(Artist::Lines(LineCollection3d { lines, color }));
        Ok(())
    }

    /// Add one cuboid per element, anchored at (x, y, z) with footprint
    /// `dx` x `dy` and height `dz`. Bars with non-finite values are
    /// dropped.
    pub fn bar3d(
        &mut self,
        xs: &[f64],
        ys: &[f64],
        zs: &[f64],
        dx: f64,
        dy: f64,
        dz: &[f64],
        color: Color,
    ) -> Result<(), PlotError> {
        check_same_len(&[
            ("xs", xs.len()),
            ("ys", ys.len()),
            ("zs", zs.len()),
            ("dz", dz.len()),
        ])?;
        debug!("bar3d: {} bars", xs.len());

        let mut polygons = Vec::new();
        for i in 0..xs.len() {
            let vals = [xs[i], ys[i], zs[i], dz[i]];
            if !vals.iter().all(|v| v.is_finite()) {
                continue;
            }
            polygons.extend(cuboid_faces(xs[i], ys[i], zs[i], dx, dy, dz[i]));
        }
        let points: Vec<Point3<f64>> = polygons.iter().flatten().copied().collect();
        self.auto_scale_points(&points);
        self.artists.push(Artist::Polys(PolyCollection3d {
            polygons,
            facecolor: color,
            edgecolor: Some(Color::BLACK),
            shade: true,
        }));
        Ok(())
    }

    /// Add flat bars of the given heights, laid onto the `plane` value
    /// of the chosen axis.
    pub fn bar(
        &mut self,
        xs: &[f64],
        heights: &[f64],
        plane: f64,
        axis: Axis,
        width: f64,
        color: Color,
    ) -> Result<(), PlotError> {
        check_same_len(&[("xs", xs.len()), ("heights", heights.len())])?;
        if !(width > 0.0) {
            return Err(PlotError::InvalidArgument(format!(
                "bar width must be positive, got {}",
                width
            )));
        }
        debug!("bar: {} bars on the {} plane", xs.len(), axis.name());

        let mut polygons = Vec::new();
        for (&x, &h) in xs.iter().zip(heights) {
            if !x.is_finite() || !h.is_finite() {
                continue;
            }
            let (x0, x1) = (x - width / 2.0, x + width / 2.0);
            polygons.push(vec![
                juggle_axes(x0, 0.0, plane, axis),
                juggle_axes(x1, 0.0, plane, axis),
                juggle_axes(x1, h, plane, axis),
                juggle_axes(x0, h, plane, axis),
            ]);
        }
        let points: Vec<Point3<f64>> = polygons.iter().flatten().copied().collect();
        self.auto_scale_points(&points);
        self.artists.push(Artist::Polys(PolyCollection3d {
            polygons,
            facecolor: color,
            edgecolor: Some(Color::BLACK),
            shade: false,
        }));
        Ok(())
    }

    /// Add an arrow field. Arrows with any non-finite component or a
    /// zero-length direction are dropped; an empty input adds nothing.
    pub fn quiver(
        &mut self,
        xs: &[f64],
        ys: &[f64],
        zs: &[f64],
        us: &[f64],
        vs: &[f64],
        ws: &[f64],
        style: QuiverStyle,
        color: Color,
    ) -> Result<(), PlotError> {
        check_same_len(&[
            ("xs", xs.len()),
            ("ys", ys.len()),
            ("zs", zs.len()),
            ("us", us.len()),
            ("vs", vs.len()),
            ("ws", ws.len()),
        ])?;

        let mut lines: Vec<Vec<Point3<f64>>> = Vec::new();
        for i in 0..xs.len() {
            let vals = [xs[i], ys[i], zs[i], us[i], vs[i], ws[i]];
            if !vals.iter().all(|v| v.is_finite()) {
                continue;
            }
            let mut d = Vector3::new(us[i], vs[i], ws[i]);
            let norm = d.norm();
            if norm == 0.0 {
                continue;
            }
            if style.normalize {
                d /= norm;
            }
            d *= style.length;

            let p = Point3::new(xs[i], ys[i], zs[i]);
            let (tail, tip) = match style.pivot {
                Pivot::Tail => (p, p + d),
                Pivot::Middle => (p - d / 2.0, p + d / 2.0),
                Pivot::Tip => (p - d, p),
            };
            lines.push(vec![tail, tip]);

            let shaft = tip - tail;
            let len = shaft.norm();
            if len > 0.0 && style.arrow_length_ratio > 0.0 {
                let back = shaft / len * (style.arrow_length_ratio * len);
                let spread = perpendicular(&shaft) * back.norm() * (15f64).to_radians().tan();
                lines.push(vec![tip - back + spread, tip, tip - back - spread]);
            }
        }
        debug!("quiver: {} polylines from {} anchors", lines.len(), xs.len());
        if lines.is_empty() {
            return Ok(());
        }
        let points: Vec<Point3<f64>> = lines.iter().flatten().copied().collect();
        self.auto_scale_points(&points);
        self.artists
            .push(Artist::Lines(LineCollection3d { lines, color }));
        Ok(())
    }

    /// Add iso-lines of `z` at the given levels, flattened onto the
    /// chosen axis at `offset` (or at each level value when `offset` is
    /// None).
    pub fn contour(
        &mut self,
        x: &Grid,
        y: &Grid,
        z: &Grid,
        levels: &[f64],
        axis: Axis,
        offset: Option<f64>,
        color: Color,
    ) -> Result<(), PlotError> {
        check_grid_shapes(x, y, z)?;
        check_surface_grid(z)?;

        let mut lines = Vec::new();
        for &level in levels {
            let plane = offset.unwrap_or(level);
            for [a, b] in contour_lines(x, y, z, level) {
                lines.push(vec![
                    juggle_axes(a.0, a.1, plane, axis),
                    juggle_axes(b.0, b.1, plane, axis),
                ]);
            }
        }
        debug!(
            "contour: {} segments over {} levels on the {} axis",
            lines.len(),
            levels.len(),
            axis.name()
        );
        if lines.is_empty() {
            return Ok(());
        }
        let points: Vec<Point3<f64>> = lines.iter().flatten().copied().collect();
        self.auto_scale_points(&points);
        self.artists
            .push(Artist::Lines(LineCollection3d { lines, color }));
        Ok(())
    }

    /// Project every artist into a flat scene, appending the box-edge
    /// axis lines and any axis labels.
    pub fn render(&self) -> Result<Scene2d, PlotError> {
        let m = self.get_proj()?;
        let mut scene = Scene2d::default();
        for artist in &self.artists {
            scene.prims.extend(artist.project(&m));
        }
        for artist in self.decorations() {
            scene.prims.extend(artist.project(&m));
        }
        debug!("render: {} primitives", scene.len());
        Ok(scene)
    }

    /// Axis lines along the three box edges meeting at the minimum
    /// corner, plus any labels at their midpoints.
    fn decorations(&self) -> Vec<Artist> {
        let o = Point3::new(self.xlim.0, self.ylim.0, self.zlim.0);
        let ex = Point3::new(self.xlim.1, self.ylim.0, self.zlim.0);
        let ey = Point3::new(self.xlim.0, self.ylim.1, self.zlim.0);
        let ez = Point3::new(self.xlim.0, self.ylim.0, self.zlim.1);

        let mut deco = vec![Artist::Lines(LineCollection3d {
            lines: vec![vec![o, ex], vec![o, ey], vec![o, ez]],
            color: Color::GREY,
        })];
        let labels = [
            (&self.xlabel, ex, Axis::X),
            (&self.ylabel, ey, Axis::Y),
            (&self.zlabel, ez, Axis::Z),
        ];
        for (label, end, axis) in labels {
            if let Some(text) = label {
                deco.push(Artist::Text(Text3d {
                    position: Point3::from((o.coords + end.coords) / 2.0),
                    text: text.clone(),
                    direction: Some(axis),
                    color: Color::GREY,
                }));
            }
        }
        deco
    }

    fn auto_scale(&mut self, xs: &[f64], ys: &[f64], zs: &[f64]) {
        let fresh = !self.seen_data;
        let mut any = false;
        if let Some((lo, hi)) = finite_bounds(xs) {
            self.xlim = merge_axis(self.xlim, lo, hi, fresh);
            any = true;
        }
        if let Some((lo, hi)) = finite_bounds(ys) {
            self.ylim = merge_axis(self.ylim, lo, hi, fresh);
            any = true;
        }
        if let Some((lo, hi)) = finite_bounds(zs) {
            self.zlim = merge_axis(self.zlim, lo, hi, fresh);
            any = true;
        }
        if any {
            self.seen_data = true;
        }
    }

    fn auto_scale_points(&mut self, points: &[Point3<f64>]) {
        let xs: Vec<f64> = points.iter().map(|p| p.x).collect();
        let ys: Vec<f64> = points.iter().map(|p| p.y).collect();
        let zs: Vec<f64> = points.iter().map(|p| p.z).collect();
        self.auto_scale(&xs, &ys, &zs);
    }
}

fn points3(xs: &[f64], ys: &[f64], zs: &[f64]) -> Vec<Point3<f64>> {
    xs.iter()
        .zip(ys)
        .zip(zs)
        .map(|((&x, &y), &z)| Point3::new(x, y, z))
        .collect()
}

fn check_same_len(slices: &[(&str, usize)]) -> Result<(), PlotError> {
    let n = slices[0].1;
    for (name, len) in slices {
        if *len != n {
            return Err(PlotError::InvalidArgument(format!(
                "{} has length {}, expected {}",
                name, len, n
            )));
        }
    }
    Ok(())
}

fn check_grid_shapes(x: &Grid, y: &Grid, z: &Grid) -> Result<(), PlotError> {
    for g in [x, y] {
        if g.shape() != z.shape() {
            return Err(PlotError::ShapeMismatch {
                expected: z.shape(),
                found: g.shape(),
            });
        }
    }
    Ok(())
}

/// Heights must form a real 2-D field, not a flat sample row.
fn check_surface_grid(z: &Grid) -> Result<(), PlotError> {
    if z.rows() < 2 || z.cols() < 2 {
        return Err(PlotError::InvalidArgument(format!(
            "a {}x{} grid is not a two-dimensional field of heights",
            z.rows(),
            z.cols()
        )));
    }
    Ok(())
}

/// Indices 0, stride, 2*stride, ... with the final index always kept.
/// A stride of 0 selects nothing.
fn stride_indices(count: usize, stride: usize) -> Vec<usize> {
    if stride == 0 || count == 0 {
        return Vec::new();
    }
    let mut indices: Vec<usize> = (0..count).step_by(stride).collect();
    if *indices.last().unwrap() != count - 1 {
        indices.push(count - 1);
    }
    indices
}

/// Any unit vector perpendicular to `v`.
fn perpendicular(v: &Vector3<f64>) -> Vector3<f64> {
    let axis = if v.x.abs() < v.z.abs() || v.y.abs() < v.z.abs() {
        Vector3::x()
    } else {
        Vector3::z()
    };
    let p = v.cross(&axis);
    if p.norm() < 1e-12 {
        // v is parallel to the fallback axis as well; use y.
        v.cross(&Vector3::y()).normalize()
    } else {
        p.normalize()
    }
}

/// One cuboid as six quad rings.
fn cuboid_faces(x: f64, y: f64, z: f64, dx: f64, dy: f64, dz: f64) -> Vec<Vec<Point3<f64>>> {
    let (x0, x1) = (x, x + dx);
    let (y0, y1) = (y, y + dy);
    let (z0, z1) = (z, z + dz);
    let p = |x, y, z| Point3::new(x, y, z);
    vec![
        vec![p(x0, y0, z0), p(x1, y0, z0), p(x1, y1, z0), p(x0, y1, z0)], // bottom
        vec![p(x0, y0, z1), p(x1, y0, z1), p(x1, y1, z1), p(x0, y1, z1)], // top
        vec![p(x0, y0, z0), p(x1, y0, z0), p(x1, y0, z1), p(x0, y0, z1)],
        vec![p(x1, y0, z0), p(x1, y1, z0), p(x1, y1, z1), p(x1, y0, z1)],
        vec![p(x1, y1, z0), p(x0, y1, z0), p(x0, y1, z1), p(x1, y1, z1)],
        vec![p(x0, y1, z0), p(x0, y0, z0), p(x0, y0, z1), p(x0, y1, z1)],
    ]
}

fn finite_bounds(values: &[f64]) -> Option<(f64, f64)> {
    let mut bounds: Option<(f64, f64)> = None;
    for &v in values {
        if !v.is_finite() {
            continue;
        }
        bounds = Some(match bounds {
            None => (v, v),
            Some((lo, hi)) => (lo.min(v), hi.max(v)),
        });
    }
    bounds
}

/// Grow `lim` to cover [lo, hi]. The first data replaces the default
/// limits outright, padding zero-extent ranges so they stay projectable.
fn merge_axis(lim: (f64, f64), lo: f64, hi: f64, fresh: bool) -> (f64, f64) {
    if fresh {
        if lo == hi {
            (lo - 0.5, hi + 0.5)
        } else {
            (lo, hi)
        }
    } else {
        (lim.0.min(lo), lim.1.max(hi))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artist::Prim2d;
    use crate::grid::{linspace, meshgrid};
    use approx::assert_relative_eq;
    use nalgebra::Vector4;

    fn unit_grids() -> (Grid, Grid, Grid) {
        let ticks = linspace(0.0, 1.0, 5);
        let (x, y) = meshgrid(&ticks, &ticks);
        let z = Grid::from_fn(5, 5, |r, c| (x.get(r, c) + y.get(r, c)) / 2.0);
        (x, y, z)
    }

    #[test]
    fn test_default_view() {
        let ax = Axes3d::new();
        assert_relative_eq!(ax.elev(), 30.0);
        assert_relative_eq!(ax.azim(), -60.0);
        assert_relative_eq!(ax.dist(), 10.0);
    }

    #[test]
    fn test_get_proj_round_trips_center() {
        let mut ax = Axes3d::new();
        ax.set_xlim3d(-4.0, 4.0);
        ax.set_ylim3d(0.0, 10.0);
        ax.set_zlim3d(-1.0, 1.0);
        let m = ax.get_proj().unwrap();
        let (txs, tys, tzs) = proj::proj_transform(&[0.0], &[5.0], &[0.0], &m);
        let (ixs, iys, izs) = proj::inv_transform(&txs, &tys, &tzs, &m).unwrap();
        assert_relative_eq!(ixs[0], 0.0, epsilon = 1e-9);
        assert_relative_eq!(iys[0], 5.0, epsilon = 1e-9);
        assert_relative_eq!(izs[0], 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_get_proj_degenerate_limits() {
        let mut ax = Axes3d::new();
        ax.set_ylim3d(2.0, 2.0);
        assert_eq!(ax.get_proj(), Err(PlotError::DegenerateRange(Axis::Y)));
    }

    #[test]
    fn test_auto_scale_pads_single_point() {
        let mut ax = Axes3d::new();
        ax.scatter(&[3.0], &[4.0], &[5.0], Color::RED, 'o').unwrap();
        assert_eq!(ax.xlim(), (2.5, 3.5));
        assert_eq!(ax.ylim(), (3.5, 4.5));
        assert_eq!(ax.zlim(), (4.5, 5.5));
        // A later plot unions instead of replacing.
        ax.scatter(&[0.0], &[0.0], &[9.0], Color::RED, 'o').unwrap();
        assert_eq!(ax.xlim(), (0.0, 3.5));
        assert_eq!(ax.zlim(), (4.5, 9.0));
    }

    #[test]
    fn test_plot_length_mismatch() {
        let mut ax = Axes3d::new();
        let err = ax.plot(&[0.0, 1.0], &[0.0], &[0.0, 1.0], Color::RED);
        assert!(matches!(err, Err(PlotError::InvalidArgument(_))));
    }

    #[test]
    fn test_wireframe_zero_both_strides_rejected() {
        let (x, y, z) = unit_grids();
        let mut ax = Axes3d::new();
        let err = ax.plot_wireframe(&x, &y, &z, 0, 0, Color::BLUE);
        assert!(matches!(err, Err(PlotError::InvalidArgument(_))));
        assert!(ax.artists().is_empty());
    }

    #[test]
    fn test_wireframe_zero_cstride_draws_rows_only() {
        let (x, y, z) = unit_grids();
        let mut ax = Axes3d::new();
        ax.plot_wireframe(&x, &y, &z, 2, 0, Color::BLUE).unwrap();
        match &ax.artists()[0] {
            Artist::Lines(lines) => {
                // Rows 0, 2, 4 of a 5-row grid; no column lines.
                assert_eq!(lines.lines.len(), 3);
                assert!(lines.lines.iter().all(|l| l.len() == 5));
            }
            other => panic!("expected line collection, got {:?}", other),
        }
    }

    #[test]
    fn test_wireframe_keeps_final_row() {
        let ticks = linspace(0.0, 1.0, 6);
        let (x, y) = meshgrid(&ticks, &[0.0, 0.25, 0.5, 0.75, 1.0]);
        let z = Grid::from_fn(5, 6, |_, _| 0.0);
        let mut ax = Axes3d::new();
        ax.plot_wireframe(&x, &y, &z, 3, 0, Color::BLUE).unwrap();
        match &ax.artists()[0] {
            // Rows 0 and 3, plus the forced final row 4.
            Artist::Lines(lines) => assert_eq!(lines.lines.len(), 3),
            other => panic!("expected line collection, got {:?}", other),
        }
    }

    #[test]
    fn test_surface_rejects_flat_grid() {
        let mut ax = Axes3d::new();
        let x = Grid::from_vec(vec![0.0; 4], 1, 4).unwrap();
        let err = ax.plot_surface(&x, &x, &x, SurfaceStyle::default());
        assert!(matches!(err, Err(PlotError::InvalidArgument(_))));
    }

    #[test]
    fn test_surface_rejects_shape_mismatch() {
        let (x, y, _) = unit_grids();
        let z = Grid::from_fn(4, 5, |_, _| 0.0);
        let mut ax = Axes3d::new();
        let err = ax.plot_surface(&x, &y, &z, SurfaceStyle::default());
        assert!(matches!(err, Err(PlotError::ShapeMismatch { .. })));
    }

    #[test]
    fn test_surface_rejects_zero_stride() {
        let (x, y, z) = unit_grids();
        let mut ax = Axes3d::new();
        let style = SurfaceStyle {
            rstride: 0,
            ..SurfaceStyle::default()
        };
        let err = ax.plot_surface(&x, &y, &z, style);
        assert!(matches!(err, Err(PlotError::InvalidArgument(_))));
    }

    #[test]
    fn test_surface_patch_counts() {
        let (x, y, z) = unit_grids();
        let mut ax = Axes3d::new();
        let fine = SurfaceStyle {
            rstride: 1,
            cstride: 1,
            ..SurfaceStyle::default()
        };
        ax.plot_surface(&x, &y, &z, fine).unwrap();
        // Default strides exceed the grid, clamping to one patch.
        ax.plot_surface(&x, &y, &z, SurfaceStyle::default()).unwrap();
        match (&ax.artists()[0], &ax.artists()[1]) {
            (Artist::Polys(fine), Artist::Polys(coarse)) => {
                assert_eq!(fine.polygons.len(), 16);
                assert_eq!(coarse.polygons.len(), 1);
            }
            other => panic!("expected polygon collections, got {:?}", other),
        }
    }

    #[test]
    fn test_surface_skips_non_finite_patches() {
        let ticks = linspace(0.0, 1.0, 3);
        let (x, y) = meshgrid(&ticks, &ticks);
        let mut z = vec![0.0; 9];
        z[4] = f64::NAN; // center sample touches all four patches
        let z = Grid::from_vec(z, 3, 3).unwrap();
        let mut ax = Axes3d::new();
        let style = SurfaceStyle {
            rstride: 1,
            cstride: 1,
            ..SurfaceStyle::default()
        };
        ax.plot_surface(&x, &y, &z, style).unwrap();
        match &ax.artists()[0] {
            Artist::Polys(polys) => assert!(polys.polygons.is_empty()),
            other => panic!("expected polygon collection, got {:?}", other),
        }
    }

    #[test]
    fn test_bar3d_six_faces_per_bar() {
        let mut ax = Axes3d::new();
        ax.bar3d(&[0.0, 2.0], &[0.0, 0.0], &[0.0, 0.0], 1.0, 1.0, &[3.0, 5.0], Color::GREEN)
            .unwrap();
        match &ax.artists()[0] {
            Artist::Polys(polys) => assert_eq!(polys.polygons.len(), 12),
            other => panic!("expected polygon collection, got {:?}", other),
        }
        assert_eq!(ax.zlim(), (0.0, 5.0));
        assert_eq!(ax.xlim(), (0.0, 3.0));
    }

    #[test]
    fn test_flat_bars_land_on_plane() {
        let mut ax = Axes3d::new();
        ax.bar(&[0.0, 1.0], &[2.0, 4.0], 7.0, Axis::Y, 0.8, Color::RED)
            .unwrap();
        match &ax.artists()[0] {
            Artist::Polys(polys) => {
                assert_eq!(polys.polygons.len(), 2);
                assert!(polys
                    .polygons
                    .iter()
                    .flatten()
                    .all(|p| p.y == 7.0));
            }
            other => panic!("expected polygon collection, got {:?}", other),
        }
    }

    #[test]
    fn test_quiver_empty_input_is_noop() {
        let mut ax = Axes3d::new();
        ax.quiver(&[], &[], &[], &[], &[], &[], QuiverStyle::default(), Color::BLACK)
            .unwrap();
        assert!(ax.artists().is_empty());
    }

    #[test]
    fn test_quiver_masks_non_finite_arrows() {
        let mut ax = Axes3d::new();
        ax.quiver(
            &[0.0, 1.0],
            &[0.0, 1.0],
            &[0.0, 1.0],
            &[1.0, f64::NAN],
            &[0.0, 1.0],
            &[0.0, 1.0],
            QuiverStyle::default(),
            Color::BLACK,
        )
        .unwrap();
        match &ax.artists()[0] {
            // One arrow survives: shaft plus head barbs.
            Artist::Lines(lines) => assert_eq!(lines.lines.len(), 2),
            other => panic!("expected line collection, got {:?}", other),
        }
    }

    #[test]
    fn test_quiver_pivot_geometry() {
        let mut ax = Axes3d::new();
        let style = QuiverStyle {
            length: 2.0,
            normalize: true,
            pivot: Pivot::Tip,
            arrow_length_ratio: 0.0,
        };
        ax.quiver(&[5.0], &[0.0], &[0.0], &[3.0], &[0.0], &[0.0], style, Color::BLACK)
            .unwrap();
        match &ax.artists()[0] {
            Artist::Lines(lines) => {
                assert_eq!(lines.lines.len(), 1);
                let shaft = &lines.lines[0];
                // Tip pivots on the anchor; the normalized direction
                // scaled by 2 puts the tail at x = 3.
                assert_relative_eq!(shaft[1].x, 5.0);
                assert_relative_eq!(shaft[0].x, 3.0);
            }
            other => panic!("expected line collection, got {:?}", other),
        }
    }

    #[test]
    fn test_contour_lines_on_offset_plane() {
        let (x, y, z) = unit_grids();
        let mut ax = Axes3d::new();
        ax.contour(&x, &y, &z, &[0.5], Axis::Z, Some(-1.0), Color::CYAN)
            .unwrap();
        match &ax.artists()[0] {
            Artist::Lines(lines) => {
                assert!(!lines.lines.is_empty());
                assert!(lines.lines.iter().flatten().all(|p| p.z == -1.0));
            }
            other => panic!("expected line collection, got {:?}", other),
        }
    }

    #[test]
    fn test_contour_defaults_plane_to_level() {
        let (x, y, z) = unit_grids();
        let mut ax = Axes3d::new();
        ax.contour(&x, &y, &z, &[0.25], Axis::Z, None, Color::CYAN)
            .unwrap();
        match &ax.artists()[0] {
            Artist::Lines(lines) => {
                assert!(lines.lines.iter().flatten().all(|p| p.z == 0.25));
            }
            other => panic!("expected line collection, got {:?}", other),
        }
    }

    #[test]
    fn test_render_empty_axes_has_axis_lines() {
        let ax = Axes3d::new();
        let scene = ax.render().unwrap();
        // Three box edges, no data primitives.
        assert_eq!(scene.len(), 3);
    }

    #[test]
    fn test_render_includes_labels() {
        let mut ax = Axes3d::new();
        ax.set_xlabel("X axis");
        ax.set_zlabel("Z axis");
        let scene = ax.render().unwrap();
        let labels = scene
            .prims
            .iter()
            .filter(|p| matches!(p, Prim2d::Label { .. }))
            .count();
        assert_eq!(labels, 2);
    }

    #[test]
    fn test_clear_resets_data_but_not_view() {
        let mut ax = Axes3d::new();
        ax.view_init(45.0, 120.0);
        ax.scatter(&[9.0], &[9.0], &[9.0], Color::RED, 'o').unwrap();
        ax.clear();
        assert!(ax.artists().is_empty());
        assert_eq!(ax.xlim(), (0.0, 1.0));
        assert_relative_eq!(ax.azim(), 120.0);
    }

    #[test]
    fn test_projection_depth_orders_near_over_far() {
        // Two points on the view ray through the box center: the one
        // nearer the eye must project to a smaller depth.
        let ax = Axes3d::new();
        let m = ax.get_proj().unwrap();
        let eye_dir = {
            let relev = ax.elev().to_radians();
            let razim = ax.azim().to_radians();
            Vector3::new(
                razim.cos() * relev.cos(),
                razim.sin() * relev.cos(),
                relev.sin(),
            )
        };
        let near = Vector3::new(0.5, 0.5, 0.5) + eye_dir * 0.3;
        let far = Vector3::new(0.5, 0.5, 0.5) - eye_dir * 0.3;
        let near_t = proj::proj_transform_vec(Vector4::new(near.x, near.y, near.z, 1.0), &m);
        let far_t = proj::proj_transform_vec(Vector4::new(far.x, far.y, far.z, 1.0), &m);
        assert!(near_t.2 < far_t.2);
    }
}
