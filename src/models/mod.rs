//! Herd record models

pub mod acquisition;
pub mod animal;
pub mod birth;
pub mod breed;

pub use acquisition::AcquisitionRecord;
pub use animal::{Animal, AnimalStatus, Sex};
pub use birth::BirthRecord;
pub use breed::Breed;
