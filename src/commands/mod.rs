//! Subcommand handlers

pub mod config;
pub mod consolidate;
pub mod excerpt;
pub mod fragments;
