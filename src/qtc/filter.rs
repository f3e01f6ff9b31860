//! Variance-driven lossy pruning.

use crate::error::QtcError;
use crate::qtc::quadtree::Quadtree;

/// Collapses low-variance subtrees in place.
///
/// The threshold starts at `mean_variance / max_variance` at the root and
/// is multiplied by `alpha` at every descent. A node becomes uniform when
/// all four children ended up uniform and its own variance does not exceed
/// the threshold; only `uniform` and `epsilon` change, the stored means
/// are untouched (the encoder simply skips the collapsed subtree).
pub fn filter_quadtree(tree: &mut Quadtree, alpha: f64) -> Result<(), QtcError> {
    if !(alpha > 0.0) {
        return Err(QtcError::InvalidAlpha);
    }
    // A tree without variance is already maximally uniform.
    let sigma = if tree.max_variance > 0.0 {
        tree.mean_variance / tree.max_variance
    } else {
        0.0
    };
    filter_node(tree, 0, sigma, alpha);
    tracing::debug!(alpha, sigma, "lossy filter applied");
    Ok(())
}

fn filter_node(tree: &mut Quadtree, index: usize, sigma: f64, alpha: f64) -> bool {
    // Leaves are uniform after build, so recursion stops at them too.
    if tree.node(index).uniform {
        return true;
    }
    let mut uniform_children = 0;
    for k in 1..=4 {
        let child = tree.child(index, k);
        if filter_node(tree, child, sigma * alpha, alpha) {
            uniform_children += 1;
        }
    }
    if uniform_children < 4 || tree.node(index).variance > sigma {
        return false;
    }
    let node = tree.node_mut(index);
    node.epsilon = 0;
    node.uniform = true;
    true
}
