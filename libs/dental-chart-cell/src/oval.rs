//! Oval dental chart layout: teeth along an ellipse in continuous FDI path
//! order, tooth 48 pinned at the top, proceeding clockwise.

use std::f64::consts::PI;

use serde::Serialize;

/// Ellipse radius ratios relative to the padded viewport. Larger values
/// spread teeth further apart along the oval.
const RADIUS_X_RATIO: f64 = 0.52;
const RADIUS_Y_RATIO: f64 = 0.44;

/// The tooth pinned to the top of the ellipse (posterior-right lower).
const TOP_TOOTH: u8 = 48;

#[derive(Debug, Clone, Copy)]
pub struct OvalOptions {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OvalToothPosition {
    pub fdi: u8,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConnectorSegment {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

/// Place each tooth of `order` at equal angular increments around an
/// ellipse centered in the viewport. Tooth 48 sits at angle π/2 (the top);
/// the rest follow clockwise. When the order has no tooth 48 (deciduous),
/// its first entry takes the top position. An empty order yields no
/// positions; the math never fails on finite inputs.
pub fn oval_positions(order: &[u8], options: OvalOptions) -> Vec<OvalToothPosition> {
    let OvalOptions {
        width,
        height,
        padding,
    } = options;
    let cx = width / 2.0;
    let cy = height / 2.0;
    let rx = ((width - 2.0 * padding) * RADIUS_X_RATIO).max(0.0);
    let ry = ((height - 2.0 * padding) * RADIUS_Y_RATIO).max(0.0);
    let n = order.len();

    let top_index = order.iter().position(|&fdi| fdi == TOP_TOOTH).unwrap_or(0);

    order
        .iter()
        .enumerate()
        .map(|(i, &fdi)| {
            let steps = i as f64 - top_index as f64;
            let angle = PI / 2.0 - steps * (2.0 * PI / n as f64);
            // Screen Y grows downward, so sin is subtracted.
            OvalToothPosition {
                fdi,
                x: cx + rx * angle.cos(),
                y: cy - ry * angle.sin(),
            }
        })
        .collect()
}

/// Line segments joining consecutive teeth, closing the loop back to the
/// first.
pub fn connector_segments(positions: &[OvalToothPosition]) -> Vec<ConnectorSegment> {
    (0..positions.len())
        .map(|i| {
            let a = positions[i];
            let b = positions[(i + 1) % positions.len()];
            ConnectorSegment {
                x1: a.x,
                y1: a.y,
                x2: b.x,
                y2: b.y,
            }
        })
        .collect()
}
