//! CLI Commands

pub mod sweep;

pub use sweep::run as sweep;
