//! Breed purity classification
//!
//! New birth records are stamped with a [`PurityGrade`] derived from the
//! parents' grades and breeds. The derivation is an ordered decision table
//! (see [`rules`]); [`PurityClassifier`] evaluates it and reports which rule
//! fired.

pub mod classifier;
pub mod grade;
pub mod rules;

pub use classifier::{calculate_purity, PurityClassifier, PurityDecision};
pub use grade::PurityGrade;
pub use rules::{PurityRule, PurityTable};
