/// Largest grayscale sample value representable in the wire format.
pub const MAX_SAMPLE_VALUE: u8 = 255;

/// Gray level used for the borders of uniform blocks in the segmentation grid.
pub const GRID_BORDER_VALUE: u8 = 190;

/// Background of the segmentation grid.
pub const GRID_BACKGROUND_VALUE: u8 = 255;

// Deeper trees are possible in principle but 2^12 covers any practical image
// while keeping recursion depth and node counts small.
pub const MAXIMUM_LEVELS: usize = 12;

/// Magic of the current container revision.
pub const QTC_MAGIC: &[u8; 2] = b"Q1";
