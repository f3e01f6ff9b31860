/*!
# qtc-rs

`qtc-rs` is a pure Rust codec for grayscale images based on a complete
quadtree decomposition. Square power-of-two images compress losslessly, or
lossily through a variance-driven pruning filter controlled by a single
`alpha` parameter.

## Encoding

```rust
use qtc_rs::pgm;
use qtc_rs::qtc::{build_quadtree, encode, filter_quadtree};
use qtc_rs::qtc_stream_writer::write_container;
// let image = pgm::decode(&bytes)?;
// let mut tree = build_quadtree(&image)?;
// filter_quadtree(&mut tree, 1.5)?;           // optional, lossy
// let container = write_container(encode(&tree).as_bytes(), tree.levels());
```

## Decoding

```rust
use qtc_rs::bit_stream::BitStream;
use qtc_rs::qtc::{decode, render_image};
use qtc_rs::qtc_stream_reader::read_container;
// let payload = read_container(&bytes)?;
// let tree = decode(&mut BitStream::from_bytes(payload))?;
// let image = render_image(&tree)?;
```

## Safety

The crate is written in safe Rust; all codec stages are in-memory
transformations with no I/O, which stays in the `qtc` binary.
*/

pub mod bit_stream;
pub mod constants;
pub mod error;
pub mod image;
pub mod pgm;
pub mod qtc;
pub mod qtc_stream_reader;
pub mod qtc_stream_writer;

pub use error::QtcError;
pub use image::GrayImage;
