//! Wardrobe Cutlist Library
//!
//! Structural decomposition and cut-list engine for parametric wardrobes:
//! splits a carcass into columns and modules, enumerates the addressable
//! compartments, generates a priced panel cut list, and reconciles stored
//! per-compartment configuration after structural edits.
//!
//! The engine lives in [`services`] and operates on the plain data in
//! [`models`]. [`parser`] and [`config`] handle files; [`cli`] backs the
//! `wardrobe-cutlist` binary.

// Module declarations
pub mod cli;
pub mod config;
pub mod constants;
pub mod models;
pub mod parser;
pub mod services;
