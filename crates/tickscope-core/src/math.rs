//! Vector types used for composite panel values.
//!
//! Re-exports the [`glam`] types tickscope binds to composite fields. They
//! compare structurally, which is what change detection relies on.
//!
//! ```
//! use tickscope_core::math::Vec3;
//!
//! let a = Vec3::new(1.0, 2.0, 3.0);
//! assert_eq!(a, Vec3::new(1.0, 2.0, 3.0));
//! ```
//!
//! [`glam`]: https://docs.rs/glam

pub use glam::{IVec2, IVec3, Vec2, Vec3, Vec4};

/// Conversions for interop with other math libraries.
pub use mint;
