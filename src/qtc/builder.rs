//! Quadtree construction from a raster.

use crate::constants::MAXIMUM_LEVELS;
use crate::error::QtcError;
use crate::image::GrayImage;
use crate::qtc::quadtree::Quadtree;

/// Builds the complete quadtree of a square power-of-two raster.
///
/// Aggregates postorder: every internal node gets the floored mean of its
/// four children, the remainder `epsilon` of that sum modulo 4, a
/// uniformity flag, and a variance. The tree-wide `mean_variance` /
/// `max_variance` scalars feed the lossy filter.
pub fn build_quadtree(image: &GrayImage) -> Result<Quadtree, QtcError> {
    let width = image.width;
    if width == 0 || width != image.height || !width.is_power_of_two() {
        return Err(QtcError::InvalidDimensions);
    }
    let levels = width.trailing_zeros() as usize;
    if levels > MAXIMUM_LEVELS {
        return Err(QtcError::InvalidDimensions);
    }
    if image.pixels.iter().any(|&p| p > image.max_val) {
        return Err(QtcError::InvalidPixel);
    }

    let mut tree = Quadtree::new(levels)?;
    build_block(&mut tree, image, width, 0, 0, 0);

    let internal_nodes = tree.total_nodes() - tree.leaf_count();
    if internal_nodes > 0 {
        tree.mean_variance /= internal_nodes as f64;
    }
    tracing::debug!(
        levels,
        mean_variance = tree.mean_variance,
        max_variance = tree.max_variance,
        "quadtree built"
    );
    Ok(tree)
}

fn build_block(tree: &mut Quadtree, image: &GrayImage, size: usize, index: usize, x: usize, y: usize) {
    if size == 1 {
        let node = tree.node_mut(index);
        node.mean = image.pixels[y * image.width + x];
        node.epsilon = 0;
        node.uniform = true;
        node.variance = 0.0;
        return;
    }

    let child_size = size / 2;
    build_block(tree, image, child_size, 4 * index + 1, x, y);
    build_block(tree, image, child_size, 4 * index + 2, x + child_size, y);
    build_block(tree, image, child_size, 4 * index + 3, x + child_size, y + child_size);
    build_block(tree, image, child_size, 4 * index + 4, x, y + child_size);

    let children: [_; 4] = std::array::from_fn(|k| *tree.node(4 * index + k + 1));
    let sum: u32 = children.iter().map(|c| c.mean as u32).sum();
    let mean = (sum / 4) as u8;
    let epsilon = (sum % 4) as u8;

    let squares: f64 = children
        .iter()
        .map(|c| {
            let diff = mean as f64 - c.mean as f64;
            c.variance * c.variance + diff * diff
        })
        .sum();
    let variance = squares.sqrt() / 4.0;

    let uniform = children.iter().all(|c| c.uniform) && children.iter().all(|c| c.mean == mean);

    tree.mean_variance += variance;
    if variance > tree.max_variance {
        tree.max_variance = variance;
    }

    let node = tree.node_mut(index);
    node.mean = mean;
    node.epsilon = epsilon;
    node.uniform = uniform;
    node.variance = variance;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(width: usize, pixels: Vec<u8>) -> GrayImage {
        GrayImage::from_pixels(width, width, 255, pixels).unwrap()
    }

    #[test]
    fn single_pixel_becomes_a_leaf_root() {
        let tree = build_quadtree(&image(1, vec![128])).unwrap();
        assert_eq!(tree.total_nodes(), 1);
        let root = tree.node(0);
        assert_eq!(root.mean, 128);
        assert_eq!(root.epsilon, 0);
        assert!(root.uniform);
        assert_eq!(tree.mean_variance, 0.0);
    }

    #[test]
    fn uniform_raster_collapses_to_a_uniform_root() {
        let tree = build_quadtree(&image(2, vec![10; 4])).unwrap();
        let root = tree.node(0);
        assert_eq!(root.mean, 10);
        assert_eq!(root.epsilon, 0);
        assert!(root.uniform);
        assert_eq!(tree.max_variance, 0.0);
    }

    #[test]
    fn mean_and_epsilon_recover_the_child_sum() {
        // Clockwise children: TL=10, TR=20, BR=40, BL=30; sum 100.
        let tree = build_quadtree(&image(2, vec![10, 20, 30, 40])).unwrap();
        let root = tree.node(0);
        assert_eq!(root.mean, 25);
        assert_eq!(root.epsilon, 0);
        assert!(!root.uniform);
        assert_eq!(tree.node(1).mean, 10);
        assert_eq!(tree.node(2).mean, 20);
        assert_eq!(tree.node(3).mean, 40);
        assert_eq!(tree.node(4).mean, 30);
    }

    #[test]
    fn epsilon_carries_the_rounding_remainder() {
        let tree = build_quadtree(&image(2, vec![1, 1, 1, 2])).unwrap();
        let root = tree.node(0);
        assert_eq!(root.mean, 1);
        assert_eq!(root.epsilon, 1);
        assert_eq!(4 * root.mean as u32 + root.epsilon as u32, 5);
    }

    #[test]
    fn child_sum_invariant_holds_at_every_internal_node() {
        let pixels: Vec<u8> = (0..64).map(|i| (i * 3 % 251) as u8).collect();
        let tree = build_quadtree(&image(8, pixels)).unwrap();
        for index in 0..tree.total_nodes() {
            if tree.is_leaf(index) {
                continue;
            }
            let sum: u32 = (1..=4).map(|k| tree.node(tree.child(index, k)).mean as u32).sum();
            let node = tree.node(index);
            assert_eq!(4 * node.mean as u32 + node.epsilon as u32, sum);
            if node.uniform {
                assert_eq!(node.epsilon, 0);
            }
        }
    }

    #[test]
    fn uniform_flag_tracks_equal_pixels_only() {
        // Left half 10, right half 20: the root must not be uniform but
        // both vertical halves produce uniform child quadrants.
        let tree = build_quadtree(&image(4, vec![
            10, 10, 20, 20,
            10, 10, 20, 20,
            10, 10, 20, 20,
            10, 10, 20, 20,
        ])).unwrap();
        assert!(!tree.node(0).uniform);
        assert!(tree.node(1).uniform); // TL
        assert!(tree.node(2).uniform); // TR
        assert!(tree.node(3).uniform); // BR
        assert!(tree.node(4).uniform); // BL
        assert_eq!(tree.node(1).mean, 10);
        assert_eq!(tree.node(2).mean, 20);
    }

    #[test]
    fn same_mean_but_mixed_subtrees_are_not_uniform() {
        // Each 2x2 quadrant averages 10 but only the TL one is flat.
        let tree = build_quadtree(&image(4, vec![
            10, 10, 8, 12,
            10, 10, 12, 8,
            8, 12, 8, 12,
            12, 8, 12, 8,
        ])).unwrap();
        assert!(tree.node(1).uniform);
        assert!(!tree.node(2).uniform);
        assert_eq!(tree.node(1).mean, tree.node(2).mean);
        assert!(!tree.node(0).uniform);
    }

    #[test]
    fn variance_follows_the_aggregation_formula() {
        let tree = build_quadtree(&image(2, vec![10, 20, 30, 40])).unwrap();
        // Leaves have zero variance, so only the mean differences count.
        let expected = ((15.0f64 * 15.0) + (5.0 * 5.0) + (5.0 * 5.0) + (15.0 * 15.0)).sqrt() / 4.0;
        assert!((tree.node(0).variance - expected).abs() < 1e-12);
        assert_eq!(tree.max_variance, tree.node(0).variance);
        assert_eq!(tree.mean_variance, tree.node(0).variance);
    }

    #[test]
    fn non_power_of_two_side_is_rejected() {
        let err = build_quadtree(&image(3, vec![0; 9])).unwrap_err();
        assert_eq!(err, QtcError::InvalidDimensions);
    }

    #[test]
    fn non_square_raster_is_rejected() {
        let image = GrayImage::from_pixels(4, 2, 255, vec![0; 8]).unwrap();
        assert_eq!(build_quadtree(&image), Err(QtcError::InvalidDimensions));
    }

    #[test]
    fn pixel_above_declared_max_is_rejected() {
        let image = GrayImage::from_pixels(2, 2, 100, vec![10, 20, 101, 40]).unwrap();
        assert_eq!(build_quadtree(&image), Err(QtcError::InvalidPixel));
    }
}
