//! muz-workshop library
//!
//! Front-end plumbing for the MUZ Z-80 workshop: register snapshots of a
//! stepped engine, and a tree data provider for outline views.

pub mod bridge;
pub mod config;
pub mod tree;
