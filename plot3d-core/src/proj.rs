//! World, view and perspective transforms mapping 3-D data into the
//! 2-D drawing plane, plus the inverse mapping used for picking.
//!
//! All functions are pure and operate on `f64` homogeneous coordinates.

use nalgebra::{Matrix4, Point3, Vector3, Vector4};

use crate::artist::Axis;
use crate::error::PlotError;

/// Build the view matrix for an eye looking at `target`.
///
/// The basis is derived by orthogonalizing the view direction against
/// `up`; an `up` parallel to the view direction is undefined and must be
/// avoided by the caller.
pub fn view_transformation(
    eye: Point3<f64>,
    target: Point3<f64>,
    up: Vector3<f64>,
) -> Matrix4<f64> {
    let n = (eye - target).normalize();
    let u = up.cross(&n).normalize();
    let v = n.cross(&u);

    #[rustfmt::skip]
    let rotation = Matrix4::new(
        u.x, u.y, u.z, 0.0,
        v.x, v.y, v.z, 0.0,
        n.x, n.y, n.z, 0.0,
        0.0, 0.0, 0.0, 1.0,
    );
    let translation = Matrix4::new_translation(&-eye.coords);
    rotation * translation
}

/// Build the perspective matrix for signed eye-space depth bounds.
///
/// `zfront` and `zback` are taken as-is; the axes pass `(-dist, dist)`.
/// Equal bounds divide by zero and are undefined.
pub fn persp_transformation(zfront: f64, zback: f64) -> Matrix4<f64> {
    let a = (zfront + zback) / (zfront - zback);
    let b = -2.0 * zfront * zback / (zfront - zback);

    #[rustfmt::skip]
    let m = Matrix4::new(
        1.0, 0.0,  0.0, 0.0,
        0.0, 1.0,  0.0, 0.0,
        0.0, 0.0,  a,   b,
        0.0, 0.0, -1.0, 0.0,
    );
    m
}

/// Build the matrix mapping an axis-aligned box to the unit cube.
///
/// Each axis is scaled by `1 / (max - min)` and translated so that the
/// minimum lands at zero. A zero-extent axis cannot be normalized.
pub fn world_transformation(
    xmin: f64,
    xmax: f64,
    ymin: f64,
    ymax: f64,
    zmin: f64,
    zmax: f64,
) -> Result<Matrix4<f64>, PlotError> {
    let dx = xmax - xmin;
    let dy = ymax - ymin;
    let dz = zmax - zmin;
    for (d, axis) in [(dx, Axis::X), (dy, Axis::Y), (dz, Axis::Z)] {
        if d == 0.0 {
            return Err(PlotError::DegenerateRange(axis));
        }
    }

    #[rustfmt::skip]
    let m = Matrix4::new(
        1.0 / dx, 0.0,      0.0,      -xmin / dx,
        0.0,      1.0 / dy, 0.0,      -ymin / dy,
        0.0,      0.0,      1.0 / dz, -zmin / dz,
        0.0,      0.0,      0.0,      1.0,
    );
    Ok(m)
}

/// Project a single homogeneous point and apply the perspective divide.
pub fn proj_transform_vec(v: Vector4<f64>, m: &Matrix4<f64>) -> (f64, f64, f64) {
    let t = m * v;
    (t.x / t.w, t.y / t.w, t.z / t.w)
}

/// Project equal-length coordinate slices through `m` elementwise.
pub fn proj_transform(
    xs: &[f64],
    ys: &[f64],
    zs: &[f64],
    m: &Matrix4<f64>,
) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
    assert_eq!(xs.len(), ys.len(), "coordinate slices must match");
    assert_eq!(xs.len(), zs.len(), "coordinate slices must match");

    let mut txs = Vec::with_capacity(xs.len());
    let mut tys = Vec::with_capacity(xs.len());
    let mut tzs = Vec::with_capacity(xs.len());
    for i in 0..xs.len() {
        let (tx, ty, tz) = proj_transform_vec(Vector4::new(xs[i], ys[i], zs[i], 1.0), m);
        txs.push(tx);
        tys.push(ty);
        tzs.push(tz);
    }
    (txs, tys, tzs)
}

/// Map projected points back to data coordinates through `m`'s inverse.
pub fn inv_transform(
    txs: &[f64],
    tys: &[f64],
    tzs: &[f64],
    m: &Matrix4<f64>,
) -> Result<(Vec<f64>, Vec<f64>, Vec<f64>), PlotError> {
    let inv = m.try_inverse().ok_or(PlotError::SingularTransform)?;
    Ok(proj_transform(txs, tys, tzs, &inv))
}

/// Rotate a homogeneous 4-vector about the x axis by `angle` radians.
pub fn rot_x(v: Vector4<f64>, angle: f64) -> Vector4<f64> {
    let (sin_a, cos_a) = angle.sin_cos();

    #[rustfmt::skip]
    let m = Matrix4::new(
        1.0, 0.0,    0.0,   0.0,
        0.0, cos_a, -sin_a, 0.0,
        0.0, sin_a,  cos_a, 0.0,
        0.0, 0.0,    0.0,   1.0,
    );
    m * v
}

/// Euclidean distance from `target` to the segment `[p0, p1]`.
///
/// The projection parameter is clamped to the segment, so points past an
/// endpoint measure to that endpoint. A zero-length segment reduces to
/// the point-to-point distance.
pub fn line2d_seg_dist(p0: (f64, f64), p1: (f64, f64), target: (f64, f64)) -> f64 {
    let dx = p1.0 - p0.0;
    let dy = p1.1 - p0.1;
    let len2 = dx * dx + dy * dy;
    if len2 == 0.0 {
        return (target.0 - p0.0).hypot(target.1 - p0.1);
    }
    let u = ((target.0 - p0.0) * dx + (target.1 - p0.1) * dy) / len2;
    let u = u.clamp(0.0, 1.0);
    (target.0 - p0.0 - u * dx).hypot(target.1 - p0.1 - u * dy)
}

/// Distances from a batch of targets to the segment `[p0, p1]`.
pub fn line2d_seg_dists(p0: (f64, f64), p1: (f64, f64), targets: &[(f64, f64)]) -> Vec<f64> {
    targets
        .iter()
        .map(|&t| line2d_seg_dist(p0, p1, t))
        .collect()
}
