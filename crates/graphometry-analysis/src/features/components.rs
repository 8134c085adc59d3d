// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Connected ink components, described by their outer boundary contour.

use graphometry_core::types::BoundingBox;
use imageproc::contours::{BorderType, find_contours};
use imageproc::geometry::arc_length;
use imageproc::point::Point;
use tracing::debug;

use crate::preprocess::BinaryMask;

/// One connected ink region (outermost border only; holes are ignored).
#[derive(Debug, Clone)]
pub struct Component {
    /// Boundary pixels in tracing order.
    pub contour: Vec<Point<u32>>,
    pub bbox: BoundingBox,
    /// Polygon area enclosed by the contour (px²).
    pub area: f64,
}

impl Component {
    fn from_contour(contour: Vec<Point<u32>>) -> Option<Self> {
        let bbox = bounding_box(&contour)?;
        let area = polygon_area(&contour);
        Some(Self {
            contour,
            bbox,
            area,
        })
    }

    /// Closed boundary length (px).
    pub fn perimeter(&self) -> f64 {
        arc_length(&self.contour, true)
    }

    /// perimeter² / (4π·area): 1 for a disc, large for ragged or thin shapes.
    /// `None` for a zero-area contour.
    pub fn compactness(&self) -> Option<f64> {
        if self.area <= 0.0 {
            return None;
        }
        let perimeter = self.perimeter();
        Some(perimeter * perimeter / (4.0 * std::f64::consts::PI * self.area))
    }
}

/// Outer components of `mask` whose area is at least `min_area`.
pub fn find_components(mask: &BinaryMask, min_area: f64) -> Vec<Component> {
    let contours = find_contours::<u32>(mask.as_gray());
    let total = contours.len();

    let components: Vec<Component> = contours
        .into_iter()
        .filter(|c| c.border_type == BorderType::Outer && c.parent.is_none())
        .filter_map(|c| Component::from_contour(c.points))
        .filter(|c| c.area >= min_area)
        .collect();

    debug!(
        contours = total,
        components = components.len(),
        min_area,
        "Components extracted"
    );
    components
}

fn bounding_box(points: &[Point<u32>]) -> Option<BoundingBox> {
    let first = points.first()?;
    let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
    for p in points {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }
    Some(BoundingBox {
        x: min_x,
        y: min_y,
        width: max_x - min_x + 1,
        height: max_y - min_y + 1,
    })
}

/// Shoelace area of the closed polygon through `points`.
fn polygon_area(points: &[Point<u32>]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut twice_area = 0.0f64;
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        twice_area += a.x as f64 * b.y as f64 - b.x as f64 * a.y as f64;
    }
    twice_area.abs() / 2.0
}
