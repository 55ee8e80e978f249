//! Ports Layer
//!
//! Trait contracts at the crate's seams. The filter core never touches
//! physical bit storage directly; it talks to the [`BitStore`] driven port,
//! for which [`crate::adapters`] supplies the default implementation.

pub mod outbound;

pub use outbound::BitStore;
