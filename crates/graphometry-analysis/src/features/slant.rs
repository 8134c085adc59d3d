// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Stroke slant from ellipses fitted to component boundaries.
//
// The ellipse is the second-moment (covariance) ellipse of the boundary
// points. Its major axis direction gives the lean; image rows grow downward,
// so a stroke whose top sits to the right of its bottom has negative x/y
// covariance.

use imageproc::point::Point;

const ISOTROPIC_EPS: f64 = 1e-9;

/// Lean of the fitted ellipse's major axis from vertical, in degrees.
///
/// Positive means the top of the shape leans right. The result lies in
/// (-90, 90]; a horizontal major axis reads 90. Shapes without a dominant
/// axis (discs, squares) read 0. Returns `None` with fewer than five points,
/// the minimum needed to determine an ellipse.
pub fn ellipse_slant(points: &[Point<u32>]) -> Option<f64> {
    if points.len() < 5 {
        return None;
    }

    let n = points.len() as f64;
    let (sum_x, sum_y) = points
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x as f64, sy + p.y as f64));
    let (mean_x, mean_y) = (sum_x / n, sum_y / n);

    let (mut mu20, mut mu02, mut mu11) = (0.0f64, 0.0f64, 0.0f64);
    for p in points {
        let dx = p.x as f64 - mean_x;
        let dy = p.y as f64 - mean_y;
        mu20 += dx * dx;
        mu02 += dy * dy;
        mu11 += dx * dy;
    }
    mu20 /= n;
    mu02 /= n;
    mu11 /= n;

    let anisotropy = mu20 - mu02;
    if anisotropy.abs() < ISOTROPIC_EPS && mu11.abs() < ISOTROPIC_EPS {
        return Some(0.0);
    }

    // Major axis angle from the +x axis, in [-90, 90].
    let axis = 0.5 * (2.0 * mu11).atan2(anisotropy).to_degrees();
    Some(normalize_lean(axis + 90.0))
}

/// Fold an angle in [0, 180] into (-90, 90].
fn normalize_lean(angle: f64) -> f64 {
    if angle > 90.0 { angle - 180.0 } else { angle }
}
