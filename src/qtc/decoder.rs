//! Preorder deserialization of a quadtree from a bit stream.

use crate::bit_stream::BitStream;
use crate::constants::MAXIMUM_LEVELS;
use crate::error::QtcError;
use crate::qtc::quadtree::{Node, Quadtree};

// Smallest possible body: one full root, mean + epsilon + uniform bit.
const MINIMUM_BODY_BITS: usize = 11;

/// Rebuilds a quadtree from an encoded bit stream.
///
/// Nodes must be visited in index order: the meaning of each bit depends
/// on the parent's uniformity and the node's position modulo 4. Children
/// of a uniform parent inherit its mean without consuming bits, and a
/// fourth child's mean comes from the parent sum minus its siblings.
pub fn decode(stream: &mut BitStream) -> Result<Quadtree, QtcError> {
    let levels = stream.pull(8)? as usize;
    if levels > MAXIMUM_LEVELS || stream.remaining_bits() < MINIMUM_BODY_BITS {
        return Err(QtcError::MalformedHeader);
    }
    let mut tree = Quadtree::new(levels)?;

    for index in 0..tree.total_nodes() {
        if index == 0 {
            *tree.node_mut(0) = read_node(stream)?;
            continue;
        }

        let parent = *tree.node(tree.parent(index));
        if parent.uniform {
            *tree.node_mut(index) = Node {
                mean: parent.mean,
                epsilon: 0,
                uniform: true,
                variance: 0.0,
            };
            continue;
        }

        let node = if index % 4 == 0 {
            read_fourth_child(stream, &tree, &parent, index)?
        } else if tree.is_leaf(index) {
            read_leaf(stream)?
        } else {
            read_node(stream)?
        };
        *tree.node_mut(index) = node;
    }

    Ok(tree)
}

fn read_node(stream: &mut BitStream) -> Result<Node, QtcError> {
    let mean = stream.pull(8)?;
    let (epsilon, uniform) = read_epsilon_and_flag(stream)?;
    Ok(Node {
        mean,
        epsilon,
        uniform,
        variance: 0.0,
    })
}

fn read_leaf(stream: &mut BitStream) -> Result<Node, QtcError> {
    Ok(Node {
        mean: stream.pull(8)?,
        epsilon: 0,
        uniform: true,
        variance: 0.0,
    })
}

// The uniform bit is only present when epsilon is zero.
fn read_epsilon_and_flag(stream: &mut BitStream) -> Result<(u8, bool), QtcError> {
    let epsilon = stream.pull(2)?;
    let uniform = if epsilon == 0 {
        stream.pull(1)? == 1
    } else {
        false
    };
    Ok((epsilon, uniform))
}

fn read_fourth_child(
    stream: &mut BitStream,
    tree: &Quadtree,
    parent: &Node,
    index: usize,
) -> Result<Node, QtcError> {
    // Exact by construction; intermediates can go negative on corrupt
    // input, hence the signed arithmetic.
    let mean = 4 * parent.mean as i32 + parent.epsilon as i32
        - tree.node(index - 1).mean as i32
        - tree.node(index - 2).mean as i32
        - tree.node(index - 3).mean as i32;
    let mean = mean as u8;

    if tree.is_leaf(index) {
        return Ok(Node {
            mean,
            epsilon: 0,
            uniform: true,
            variance: 0.0,
        });
    }
    let (epsilon, uniform) = read_epsilon_and_flag(stream)?;
    Ok(Node {
        mean,
        epsilon,
        uniform,
        variance: 0.0,
    })
}
