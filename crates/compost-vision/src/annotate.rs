//! Box overlays for saved predictions.

use image::{Rgb, RgbImage};

use crate::detector::Detection;

const LINE_WIDTH: u32 = 2;

const PALETTE: &[[u8; 3]] = &[
    [255, 56, 56],
    [255, 157, 151],
    [255, 112, 31],
    [255, 178, 29],
    [207, 210, 49],
    [72, 249, 10],
    [26, 147, 52],
    [0, 212, 187],
    [44, 153, 168],
    [0, 194, 255],
    [52, 69, 147],
    [100, 115, 255],
    [132, 56, 255],
    [203, 56, 255],
    [255, 149, 200],
];

/// Outline color for a class.
pub fn class_color(class_id: usize) -> Rgb<u8> {
    Rgb(PALETTE[class_id % PALETTE.len()])
}

/// Draw each detection's box outline onto `img`.
pub fn draw_detections(img: &mut RgbImage, detections: &[Detection]) {
    for detection in detections {
        draw_box(img, detection, class_color(detection.class_id));
    }
}

fn draw_box(img: &mut RgbImage, detection: &Detection, color: Rgb<u8>) {
    let (width, height) = img.dimensions();
    if width == 0 || height == 0 {
        return;
    }

    let x1 = (detection.bbox.x1.max(0.0) as u32).min(width - 1);
    let y1 = (detection.bbox.y1.max(0.0) as u32).min(height - 1);
    let x2 = (detection.bbox.x2.max(0.0) as u32).min(width - 1);
    let y2 = (detection.bbox.y2.max(0.0) as u32).min(height - 1);
    if x2 < x1 || y2 < y1 {
        return;
    }

    for t in 0..LINE_WIDTH {
        for x in x1..=x2 {
            img.put_pixel(x, (y1 + t).min(y2), color);
            img.put_pixel(x, y2.saturating_sub(t).max(y1), color);
        }
        for y in y1..=y2 {
            img.put_pixel((x1 + t).min(x2), y, color);
            img.put_pixel(x2.saturating_sub(t).max(x1), y, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detector::BoundingBox;

    fn detection(class_id: usize, bbox: BoundingBox) -> Detection {
        Detection {
            class_id,
            label: format!("class{}", class_id),
            confidence: 0.9,
            bbox,
        }
    }

    #[test]
    fn test_draws_outline_only() {
        let mut img = RgbImage::new(20, 20);
        let det = detection(
            0,
            BoundingBox {
                x1: 2.0,
                y1: 2.0,
                x2: 12.0,
                y2: 12.0,
            },
        );
        draw_detections(&mut img, &[det]);

        let color = class_color(0);
        assert_eq!(*img.get_pixel(2, 2), color);
        assert_eq!(*img.get_pixel(12, 7), color);
        assert_eq!(*img.get_pixel(7, 3), color);
        // Interior and exterior untouched
        assert_eq!(*img.get_pixel(7, 7), Rgb([0, 0, 0]));
        assert_eq!(*img.get_pixel(15, 15), Rgb([0, 0, 0]));
    }

    #[test]
    fn test_box_on_edge_is_clamped() {
        let mut img = RgbImage::new(10, 10);
        let det = detection(
            3,
            BoundingBox {
                x1: 5.0,
                y1: 5.0,
                x2: 10.0,
                y2: 10.0,
            },
        );
        draw_detections(&mut img, &[det]);
        assert_eq!(*img.get_pixel(9, 9), class_color(3));
    }

    #[test]
    fn test_palette_wraps() {
        assert_eq!(class_color(0), class_color(PALETTE.len()));
    }
}
