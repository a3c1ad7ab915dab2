//! Pure domain types for pendant motion translation.
//!
//! No OS, I/O, or async dependencies live here.

pub mod motion;
