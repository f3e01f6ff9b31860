//! QTC codec: quadtree decomposition, lossy filtering, bit-level
//! serialization, and the derived renderings.
//!
//! Pipeline: a square power-of-two raster goes through [`build_quadtree`],
//! optionally [`filter_quadtree`], then [`encode`]; the inverse path is
//! [`decode`] followed by [`render_image`]. [`render_grid`] visualizes the
//! decomposition either side produced.

pub mod builder;
pub mod decoder;
pub mod encoder;
pub mod filter;
pub mod grid;
pub mod painter;
pub mod quadtree;

pub use builder::build_quadtree;
pub use decoder::decode;
pub use encoder::encode;
pub use filter::filter_quadtree;
pub use grid::render_grid;
pub use painter::render_image;
pub use quadtree::{Node, Quadtree};
