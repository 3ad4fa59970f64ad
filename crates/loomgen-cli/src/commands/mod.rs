//! Command implementations for the `loomgen` binary.

pub mod generate;
pub mod json_output;
pub mod palettes;
pub mod verify;
