//! Rasterization and overlay drawing for the inspection pipeline.

use image::{GrayImage, Rgb, RgbImage};
use imageproc::drawing::{draw_hollow_rect_mut, draw_polygon_mut};
use imageproc::point::Point;
use imageproc::rect::Rect;

use crate::types::BoxCoord;

const BOX_COLOR: Rgb<u8> = Rgb([0, 255, 0]);
const BOX_THICKNESS: i32 = 2;

/// Fill a polygon given in absolute pixel coordinates into a {0, 255} byte
/// mask of the given dimensions.
///
/// Fewer than three vertices cannot enclose an area and yield an all-zero
/// mask.
pub fn rasterize_contour(points: &[(f64, f64)], width: u32, height: u32) -> GrayImage {
    let mut mask = GrayImage::new(width, height);

    let mut polygon: Vec<Point<i32>> = points
        .iter()
        .map(|&(x, y)| Point::new(x.round() as i32, y.round() as i32))
        .collect();

    // Drop a closing vertex that repeats the first; the fill treats the
    // polygon as implicitly closed and rejects an explicit duplicate.
    while polygon.len() > 1 && polygon.first() == polygon.last() {
        polygon.pop();
    }

    if polygon.len() < 3 {
        return mask;
    }

    draw_polygon_mut(&mut mask, &polygon, image::Luma([255u8]));
    mask
}

/// Draw the bounding box onto a copy of the image.
pub fn draw_box_overlay(image: &RgbImage, box_coord: &BoxCoord) -> RgbImage {
    let mut overlay = image.clone();

    let left = box_coord.left.round() as i32;
    let top = box_coord.top.round() as i32;
    let width = box_coord.width().round().max(1.0) as u32;
    let height = box_coord.height().round().max(1.0) as u32;

    for inset in 0..BOX_THICKNESS {
        let w = width.saturating_sub(2 * inset as u32);
        let h = height.saturating_sub(2 * inset as u32);
        if w == 0 || h == 0 {
            break;
        }
        draw_hollow_rect_mut(
            &mut overlay,
            Rect::at(left + inset, top + inset).of_size(w, h),
            BOX_COLOR,
        );
    }

    overlay
}

/// Keep the pixels covered by the mask, black out everything else.
pub fn apply_mask(image: &RgbImage, mask: &GrayImage) -> RgbImage {
    let mut segmented = RgbImage::new(image.width(), image.height());

    for (x, y, pixel) in image.enumerate_pixels() {
        if mask.get_pixel(x, y).0[0] != 0 {
            segmented.put_pixel(x, y, *pixel);
        }
    }

    segmented
}
