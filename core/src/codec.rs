//! Image decoding seam.
//!
//! The core never links a codec. Callers plug one in through this trait and
//! [`crate::ExecutedRequest::image`] feeds it the response stream.

use std::fmt;
use std::io::Read;

/// Decodes raw response bytes into an image.
pub trait ImageDecoder {
    type Image;
    type Error: fmt::Display;

    /// Read the stream and produce an image, or a failure for content the
    /// codec does not recognize.
    fn decode(&self, reader: &mut dyn Read) -> Result<Self::Image, Self::Error>;
}
