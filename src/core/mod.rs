//! Core processing building blocks: object location, transparency flattening,
//! smart scaling, letterbox padding and save helpers. These are internal
//! primitives consumed by the high-level `api` module.
pub mod params;
pub mod processing;
