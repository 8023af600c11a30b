//! Live adapters backed by the operating system.

pub mod id_source;
