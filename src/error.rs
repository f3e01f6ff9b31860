use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum QtcError {
    #[error("Not enough memory")]
    NotEnoughMemory,
    #[error("Image side must be a positive power of two")]
    InvalidDimensions,
    #[error("Pixel value exceeds the declared maximum")]
    InvalidPixel,
    #[error("Alpha must be strictly positive")]
    InvalidAlpha,
    #[error("Bit stream exhausted")]
    Underflow,
    #[error("Declared quadtree depth is inconsistent with the payload")]
    MalformedHeader,
    #[error("Unsupported file format")]
    UnsupportedFormat,
    #[error("Malformed PGM header")]
    MalformedPgmHeader,
    #[error("Malformed QTC container")]
    MalformedContainer,
}
