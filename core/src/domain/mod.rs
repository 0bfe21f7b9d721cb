//! Domain layer containing token entities.

pub mod entities;
