//! Rasterization of a decoded quadtree.

use crate::constants::MAX_SAMPLE_VALUE;
use crate::error::QtcError;
use crate::image::GrayImage;
use crate::qtc::quadtree::Quadtree;

/// Paints the tree back into pixels.
///
/// Walks down to the leaves; children of a uniform parent all carry the
/// parent's mean, so leaf-based traversal and early stopping paint the
/// same raster.
pub fn render_image(tree: &Quadtree) -> Result<GrayImage, QtcError> {
    let width = tree.width();
    let mut image = GrayImage::new(width, width, MAX_SAMPLE_VALUE)?;
    paint_block(tree, &mut image, 0, 0, 0, width);
    Ok(image)
}

fn paint_block(tree: &Quadtree, image: &mut GrayImage, index: usize, x: usize, y: usize, size: usize) {
    if tree.is_leaf(index) {
        image.pixels[y * image.width + x] = tree.node(index).mean;
        return;
    }
    let child_size = size / 2;
    paint_block(tree, image, 4 * index + 1, x, y, child_size);
    paint_block(tree, image, 4 * index + 2, x + child_size, y, child_size);
    paint_block(tree, image, 4 * index + 3, x + child_size, y + child_size, child_size);
    paint_block(tree, image, 4 * index + 4, x, y + child_size, child_size);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::qtc::builder::build_quadtree;

    fn round_trip_pixels(width: usize, pixels: Vec<u8>) -> Vec<u8> {
        let image = GrayImage::from_pixels(width, width, 255, pixels).unwrap();
        let tree = build_quadtree(&image).unwrap();
        render_image(&tree).unwrap().pixels
    }

    #[test]
    fn painting_inverts_building() {
        let pixels: Vec<u8> = (0..64).map(|i| (i * 5 % 256) as u8).collect();
        assert_eq!(round_trip_pixels(8, pixels.clone()), pixels);
    }

    #[test]
    fn single_pixel_is_painted() {
        assert_eq!(round_trip_pixels(1, vec![128]), vec![128]);
    }

    #[test]
    fn quadrants_land_in_clockwise_order() {
        assert_eq!(round_trip_pixels(2, vec![1, 2, 3, 4]), vec![1, 2, 3, 4]);
    }
}
