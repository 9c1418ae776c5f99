//! Constrained generation and mutation of 30-key keyboard layouts.
//!
//! A [`config::Config`] partitions the 3x10 key block into pinned keys and
//! independent mutable areas; a [`manager::Manager`] then creates random
//! [`layout::Layout`]s that honour the partition and perturbs them one swap
//! at a time. Scoring and search live elsewhere.

pub mod area;
pub mod config;
pub mod consts;
pub mod core_types;
pub mod error;
pub mod layout;
pub mod layouts;
pub mod manager;
pub mod prng;
pub mod sampler;
pub mod util;

pub use area::Area;
pub use config::Config;
pub use error::{ConfigError, KeymorphError, KmResult, LayoutError};
pub use layout::Layout;
pub use manager::Manager;
pub use prng::Prng;
