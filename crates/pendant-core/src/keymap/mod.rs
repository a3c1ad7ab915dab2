//! Key code translation for directional intents.
//!
//! The target platform is the Windows virtual-key space; the table lives
//! in [`windows_vk`]. The mapping is process-wide constant configuration:
//! it is a total `match` over [`DirectionalIntent`](crate::DirectionalIntent),
//! so it needs no initialization, no synchronization, and cannot miss.

pub mod windows_vk;

pub use windows_vk::{intent_to_vk, VK_CONTROL};
