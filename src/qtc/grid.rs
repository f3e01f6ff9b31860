//! Segmentation grid: outlines of the uniform blocks found in a tree.

use crate::constants::{GRID_BACKGROUND_VALUE, GRID_BORDER_VALUE};
use crate::error::QtcError;
use crate::image::GrayImage;
use crate::qtc::quadtree::Quadtree;

/// Renders the decomposition of a tree onto a white canvas.
///
/// Every maximal uniform block gets a one-pixel gray border in the row
/// above its top edge and the column left of its left edge; traversal
/// stops there, so fully split regions stay blank.
pub fn render_grid(tree: &Quadtree) -> Result<GrayImage, QtcError> {
    let width = tree.width();
    let mut image = GrayImage::filled(width, width, GRID_BACKGROUND_VALUE, GRID_BACKGROUND_VALUE)?;
    outline_block(tree, &mut image, width, 0, 0, 0);
    Ok(image)
}

fn outline_block(tree: &Quadtree, image: &mut GrayImage, size: usize, index: usize, x: usize, y: usize) {
    if tree.node(index).uniform {
        draw_borders(image, x, y, size);
        return;
    }
    let child_size = size / 2;
    outline_block(tree, image, child_size, 4 * index + 1, x, y);
    outline_block(tree, image, child_size, 4 * index + 2, x + child_size, y);
    outline_block(tree, image, child_size, 4 * index + 3, x + child_size, y + child_size);
    outline_block(tree, image, child_size, 4 * index + 4, x, y + child_size);
}

fn draw_borders(image: &mut GrayImage, x: usize, y: usize, size: usize) {
    if y > 0 {
        for i in 0..size {
            if x + i < image.width {
                image.pixels[(y - 1) * image.width + x + i] = GRID_BORDER_VALUE;
            }
        }
    }
    if x > 0 {
        for i in 0..size {
            if y + i < image.height {
                image.pixels[(y + i) * image.width + x - 1] = GRID_BORDER_VALUE;
            }
        }
    }
}
