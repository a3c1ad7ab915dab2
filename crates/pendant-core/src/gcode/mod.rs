//! G-code line decoding.
//!
//! Only the relative-move subset `G91G0<axis><value>` is consumed; every
//! other line is reported as unrecognized and dropped.

pub mod decoder;

pub use decoder::{decode, DecodeError};
