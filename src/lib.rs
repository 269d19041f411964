//! Boi na Nuvem - herd records core
//!
//! Domain logic behind the farm dashboard: animal and birth records, the
//! breed purity classifier that stamps new births, and the genealogy tree
//! builder used by animal detail views.
//!
//! ## Quick Start
//!
//! ```rust
//! use boi_na_nuvem::models::Breed;
//! use boi_na_nuvem::purity::{calculate_purity, PurityGrade};
//!
//! // No parent birth records: founder grade
//! let grade = calculate_purity(None, None, Some(Breed::Nelore), Some(Breed::Angus));
//! assert_eq!(grade, PurityGrade::PO);
//! ```

// Core error handling
pub mod error;

pub mod config;
pub mod models;

// Purity classification and genealogy
pub mod genealogy;
pub mod purity;

// Record stores and workflows
pub mod repository;
pub mod seed;
pub mod services;

// REST API (when enabled)
pub mod api;

pub use config::HerdConfig;
pub use error::{HerdError, Result};
pub use genealogy::{build_genealogy_tree, GenealogyNode};
pub use purity::{calculate_purity, PurityClassifier, PurityDecision, PurityGrade, PurityTable};
pub use repository::{AnimalLookup, BirthLookup, InMemoryHerdStore};
