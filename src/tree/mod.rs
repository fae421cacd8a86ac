//! Hierarchical data for outline views.
//!
//! `TreeProvider` answers the queries an outline widget makes (child count,
//! child at index, expandability, label) over a forest of `TreeNode`s. Nodes
//! are a sum type, so the provider never has to probe what it is holding.
//!
//! # Example
//!
//! ```ignore
//! use muz_workshop::tree::TreeProvider;
//!
//! let tree = TreeProvider::from_mapping(vec![
//!     ("Animals", vec!["Cat", "Dog", "Horse"]),
//!     ("Birds", vec!["Eagle", "Hawk"]),
//! ]);
//! let animals = tree.child(None, 0)?;
//! assert_eq!(tree.child_count(Some(animals)), 3);
//! ```

mod node;
mod provider;
mod source;

pub use node::{Label, TreeNode};
pub use provider::{TreeError, TreeProvider, Walk};
pub use source::{source_tree, SourceFile, MAX_INCLUDE_DEPTH};
