//! Core types and definitions for the BASTION lane-defense simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, unit templates, commands, snapshots, events, errors and
//! constants. It has no dependency on the ECS or any runtime framework.

pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod state;
pub mod templates;
pub mod types;

#[cfg(test)]
mod tests;
