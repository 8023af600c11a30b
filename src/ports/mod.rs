//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the generation loops and an
//! external capability. Implementations live in `src/adapters/`.

pub mod id_source;

pub use id_source::IdSource;
