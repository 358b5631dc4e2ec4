//! Iso-line extraction over sampled grids (marching squares).

use crate::grid::Grid;

/// Interpolated crossing of `level` on the edge between two samples.
fn crossing(pa: (f64, f64), za: f64, pb: (f64, f64), zb: f64, level: f64) -> (f64, f64) {
    let t = if za == zb { 0.0 } else { (level - za) / (zb - za) };
    (pa.0 + t * (pb.0 - pa.0), pa.1 + t * (pb.1 - pa.1))
}

/// Extract the iso-lines of `z` at `level` as independent 2-D segments.
///
/// `x`, `y` and `z` must share a shape. Samples are classified as inside
/// when `z >= level`; saddle cells are split by the cell-center mean.
/// Cells touching a non-finite sample are skipped.
pub fn contour_lines(x: &Grid, y: &Grid, z: &Grid, level: f64) -> Vec<[(f64, f64); 2]> {
    debug_assert_eq!(x.shape(), z.shape());
    debug_assert_eq!(y.shape(), z.shape());

    let mut segments = Vec::new();
    if z.rows() < 2 || z.cols() < 2 {
        return segments;
    }

    for r in 0..z.rows() - 1 {
        for c in 0..z.cols() - 1 {
            // Corner layout: 00 top-left, 01 top-right, 11 bottom-right,
            // 10 bottom-left, walked clockwise from 00.
            let z00 = z.get(r, c);
            let z01 = z.get(r, c + 1);
            let z11 = z.get(r + 1, c + 1);
            let z10 = z.get(r + 1, c);
            if ![z00, z01, z11, z10].iter().all(|v| v.is_finite()) {
                continue;
            }

            let p00 = (x.get(r, c), y.get(r, c));
            let p01 = (x.get(r, c + 1), y.get(r, c + 1));
            let p11 = (x.get(r + 1, c + 1), y.get(r + 1, c + 1));
            let p10 = (x.get(r + 1, c), y.get(r + 1, c));

            let mut case = 0u8;
            if z00 >= level {
                case |= 1;
            }
            if z01 >= level {
                case |= 2;
            }
            if z11 >= level {
                case |= 4;
            }
            if z10 >= level {
                case |= 8;
            }

            let top = || crossing(p00, z00, p01, z01, level);
            let right = || crossing(p01, z01, p11, z11, level);
            let bottom = || crossing(p10, z10, p11, z11, level);
            let left = || crossing(p00, z00, p10, z10, level);

            match case {
                0 | 15 => {}
                1 | 14 => segments.push([left(), top()]),
                2 | 13 => segments.push([top(), right()]),
                4 | 11 => segments.push([right(), bottom()]),
                8 | 7 => segments.push([bottom(), left()]),
                3 | 12 => segments.push([left(), right()]),
                6 | 9 => segments.push([top(), bottom()]),
                5 => {
                    let center = (z00 + z01 + z11 + z10) / 4.0;
                    if center >= level {
                        segments.push([top(), right()]);
                        segments.push([bottom(), left()]);
                    } else {
                        segments.push([left(), top()]);
                        segments.push([right(), bottom()]);
                    }
                }
                10 => {
                    let center = (z00 + z01 + z11 + z10) / 4.0;
                    if center >= level {
                        segments.push([left(), top()]);
                        segments.push([right(), bottom()]);
                    } else {
                        segments.push([top(), right()]);
                        segments.push([bottom(), left()]);
                    }
                }
                _ => unreachable!(),
            }
        }
    }
    segments
}

/// `n` evenly spaced interior levels between `lo` and `hi`.
pub fn pick_levels(lo: f64, hi: f64, n: usize) -> Vec<f64> {
    let step = (hi - lo) / (n + 1) as f64;
    (1..=n).map(|i| lo + step * i as f64).collect()
}
