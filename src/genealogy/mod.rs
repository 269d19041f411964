//! Genealogy trees
//!
//! Follows `mother_id` / `father_id` links on birth records to build a
//! bounded-depth ancestor diagram for animal detail views.

pub mod tree;

pub use tree::{build_genealogy_tree, BirthInfo, GenealogyNode, Iter, DEFAULT_MAX_LEVEL};
