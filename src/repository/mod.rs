//! Record stores
//!
//! The classifier callers and the genealogy builder never reach for global
//! collections; they are handed a store implementing these traits.
//! [`InMemoryHerdStore`] is the only backend.

pub mod memory;

use uuid::Uuid;

use crate::error::Result;
use crate::models::{AcquisitionRecord, Animal, BirthRecord};

pub use memory::InMemoryHerdStore;

/// Read-only animal lookup consumed by the genealogy builder
pub trait AnimalLookup {
    fn get_animal_by_id(&self, id: Uuid) -> Option<Animal>;
}

/// Read-only birth lookup consumed by the genealogy builder and classifier callers
pub trait BirthLookup {
    fn get_birth_by_animal_id(&self, animal_id: Uuid) -> Option<BirthRecord>;
}

pub trait AnimalRepository: AnimalLookup {
    fn find_animal_by_code(&self, code: &str) -> Option<Animal>;
    fn list_animals(&self) -> Vec<Animal>;
    fn insert_animal(&mut self, animal: Animal) -> Result<Animal>;
    fn delete_animal(&mut self, id: Uuid) -> Result<Animal>;
}

pub trait BirthRepository: BirthLookup {
    fn get_birth(&self, id: Uuid) -> Option<BirthRecord>;
    fn list_births(&self) -> Vec<BirthRecord>;
    fn insert_birth(&mut self, birth: BirthRecord) -> Result<BirthRecord>;
    /// Replaces the stored record wholesale. Purity is not recomputed.
    fn update_birth(&mut self, birth: BirthRecord) -> Result<BirthRecord>;
    fn delete_birth(&mut self, id: Uuid) -> Result<BirthRecord>;
}

pub trait AcquisitionRepository {
    fn get_acquisition(&self, id: Uuid) -> Option<AcquisitionRecord>;
    fn list_acquisitions(&self) -> Vec<AcquisitionRecord>;
    fn insert_acquisition(&mut self, acquisition: AcquisitionRecord) -> Result<AcquisitionRecord>;
    fn delete_acquisition(&mut self, id: Uuid) -> Result<AcquisitionRecord>;
}

/// Everything the registration flows need
pub trait HerdStore: AnimalRepository + BirthRepository + AcquisitionRepository {}

impl<T> HerdStore for T where T: AnimalRepository + BirthRepository + AcquisitionRepository {}
