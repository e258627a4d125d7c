//! Command line access to mandate hashing and Tribunal auction pricing.

pub mod cli;
pub mod config;
mod run;

pub use run::{run, start};
