//! Side-scrolling platformer: pure simulation plus the session state machine.
//!
//! Rendering and the terminal event loop live in the binary; everything in
//! this library is deterministic given a seeded RNG.

pub mod audio;
pub mod compute;
pub mod config;
pub mod entities;
pub mod input;
pub mod level;
pub mod physics;
pub mod session;
