//! WebAssembly bindings for the sim6502 emulator.
//!
//! This module provides a JavaScript-callable `Emulator` that assembles
//! source, runs it, and exposes the 32x32 display as RGBA pixels.

pub mod api;

pub use api::Emulator;
