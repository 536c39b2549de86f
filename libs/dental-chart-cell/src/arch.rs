//! Anatomical 2D arch layout: both arches are parabolas on a fixed canvas,
//! upper opening down (smile), lower mirroring it upward.

use serde::Serialize;

/// Chart canvas dimensions (viewBox units).
pub const CHART_WIDTH: f64 = 420.0;
pub const CHART_HEIGHT: f64 = 200.0;
/// Vertical margin above the upper arch.
pub const UPPER_ARCH_TOP: f64 = 12.0;
/// Vertical margin below the lower arch.
pub const LOWER_ARCH_BOTTOM: f64 = 12.0;
/// Parabola amplitude (arch curve depth).
pub const ARCH_AMPLITUDE: f64 = 28.0;

/// Tooth crown size (canvas units).
const TOOTH_W: f64 = 18.0;
const TOOTH_H: f64 = 10.0;
/// Occlusal (arch-facing) edge width relative to the outward edge.
const NARROW_RATIO: f64 = 0.65;

const TEETH_PER_ARCH: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchSide {
    Upper,
    Lower,
}

/// Center of a tooth on the arch curve plus the vertical component of its
/// outward normal. `normal_y < 0` points up in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ToothPosition {
    pub x: f64,
    pub y: f64,
    pub normal_y: f64,
}

fn upper_arch_y(x: f64) -> f64 {
    let t = 2.0 * x / CHART_WIDTH - 1.0; // -1..1
    UPPER_ARCH_TOP + ARCH_AMPLITUDE * (1.0 - t * t)
}

fn lower_arch_y(x: f64) -> f64 {
    let t = 2.0 * x / CHART_WIDTH - 1.0;
    CHART_HEIGHT - LOWER_ARCH_BOTTOM - ARCH_AMPLITUDE * (1.0 - t * t)
}

fn arch_y(x: f64, side: ArchSide) -> f64 {
    match side {
        ArchSide::Upper => upper_arch_y(x),
        ArchSide::Lower => lower_arch_y(x),
    }
}

/// Position and outward normal for the tooth at `index` (0..16) on an arch.
/// Index 0 is the patient's rightmost tooth (18 upper, 48 lower).
///
/// The normal is a finite-difference approximation sampled a small step
/// ahead on the curve, not an analytic derivative; the crown orientation
/// tolerances were designed around this sampling.
pub fn tooth_position(index: usize, side: ArchSide) -> ToothPosition {
    let x = (index as f64 + 0.5) / TEETH_PER_ARCH as f64 * CHART_WIDTH;
    let y = arch_y(x, side);
    let dx = 0.01;
    let dy = arch_y(x + dx, side) - y;
    // The two curves mirror, so negating the sampled dy on both sides gives
    // normals of opposite sign at every x: upper toward the top edge, lower
    // toward the bottom edge.
    let normal_y = -dy;
    ToothPosition { x, y, normal_y }
}

/// SVG path for a trapezoidal tooth crown centered at (`cx`, `cy`): narrow
/// edge toward the arch curve, wide edge outward. `normal_y < 0` means the
/// narrow edge sits on top (upper arch).
pub fn tooth_crown_path(cx: f64, cy: f64, normal_y: f64) -> String {
    let narrow_toward_arch = normal_y < 0.0;
    let half_w = TOOTH_W / 2.0;
    let half_h = TOOTH_H / 2.0;
    let top_w = half_w * NARROW_RATIO;
    let bottom_w = half_w;

    let (y1, y2) = if narrow_toward_arch {
        (cy - half_h, cy + half_h)
    } else {
        (cy + half_h, cy - half_h)
    };
    let x1 = cx - top_w;
    let x2 = cx + top_w;
    let x3 = cx + bottom_w;
    let x4 = cx - bottom_w;
    format!("M {x1} {y1} L {x2} {y1} L {x3} {y2} L {x4} {y2} Z")
}

/// Piecewise-linear guide path tracing an arch, sampled at fixed pixel
/// steps. An approximation of the parabola, not an exact analytic path.
pub fn arch_guide_path(side: ArchSide) -> String {
    let step = CHART_WIDTH / 64.0;
    let mut path = format!("M 0 {}", arch_y(0.0, side));
    let mut x = step;
    while x <= CHART_WIDTH {
        path.push_str(&format!(" L {} {}", x, arch_y(x, side)));
        x += step;
    }
    path
}
