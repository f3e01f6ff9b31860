//! Preorder serialization of a quadtree into a bit stream.

use crate::bit_stream::BitStream;
use crate::qtc::quadtree::{Node, Quadtree};

/// Serializes a (possibly filtered) quadtree.
///
/// The stream opens with one byte of `levels` and then visits indices in
/// heap order. What a node emits depends on its parent: children of a
/// uniform parent are omitted entirely, and a fourth child omits its mean
/// because the decoder reconstructs it from the parent sum.
pub fn encode(tree: &Quadtree) -> BitStream {
    // At most 11 bits per node plus the header byte.
    let mut stream = BitStream::with_capacity(tree.total_nodes() * 2);
    stream.push(tree.levels() as u8, 8);

    for index in 0..tree.total_nodes() {
        // The root has no parent context and is always written in full.
        if index == 0 {
            write_node(&mut stream, tree.node(0), 0);
            continue;
        }
        if tree.node(tree.parent(index)).uniform {
            continue;
        }
        if tree.is_leaf(index) {
            write_leaf(&mut stream, tree.node(index), index);
        } else {
            write_node(&mut stream, tree.node(index), index);
        }
    }

    stream.finish();
    tracing::debug!(bits = stream.bit_len(), "quadtree encoded");
    stream
}

fn write_node(stream: &mut BitStream, node: &Node, index: usize) {
    // A fourth child's mean is interpolated at decode time.
    if index % 4 != 0 || index == 0 {
        stream.push(node.mean, 8);
    }
    stream.push(node.epsilon, 2);
    if node.epsilon == 0 {
        stream.push(node.uniform as u8, 1);
    }
}

fn write_leaf(stream: &mut BitStream, node: &Node, index: usize) {
    // Leaves have epsilon = 0 and uniform = 1 by definition.
    if index % 4 != 0 {
        stream.push(node.mean, 8);
    }
}
