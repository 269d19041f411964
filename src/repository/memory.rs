//! In-memory herd store

use std::collections::{BTreeMap, HashMap};

use chrono::Utc;
use uuid::Uuid;

use super::{
    AcquisitionRepository, AnimalLookup, AnimalRepository, BirthLookup, BirthRepository,
};
use crate::error::{HerdError, Result};
use crate::models::{AcquisitionRecord, Animal, BirthRecord};

#[derive(Debug, Clone, Default)]
pub struct InMemoryHerdStore {
    animals: BTreeMap<Uuid, Animal>,
    births: BTreeMap<Uuid, BirthRecord>,
    births_by_animal: HashMap<Uuid, Uuid>,
    acquisitions: BTreeMap<Uuid, AcquisitionRecord>,
}

impl InMemoryHerdStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn animal_count(&self) -> usize {
        self.animals.len()
    }

    pub fn birth_count(&self) -> usize {
        self.births.len()
    }

    /// Resolve an animal by id or herd code
    pub fn resolve_animal(&self, key: &str) -> Option<Animal> {
        match key.parse::<Uuid>() {
            Ok(id) => self.get_animal_by_id(id),
            Err(_) => self.find_animal_by_code(key),
        }
    }
}

impl AnimalLookup for InMemoryHerdStore {
    fn get_animal_by_id(&self, id: Uuid) -> Option<Animal> {
        self.animals.get(&id).cloned()
    }
}

impl AnimalRepository for InMemoryHerdStore {
    fn find_animal_by_code(&self, code: &str) -> Option<Animal> {
        self.animals
            .values()
            .find(|a| a.code.eq_ignore_ascii_case(code))
            .cloned()
    }

    fn list_animals(&self) -> Vec<Animal> {
        let mut animals: Vec<Animal> = self.animals.values().cloned().collect();
        animals.sort_by(|a, b| a.code.cmp(&b.code));
        animals
    }

    fn insert_animal(&mut self, animal: Animal) -> Result<Animal> {
        if self.animals.contains_key(&animal.id) {
            return Err(HerdError::duplicate("Animal", animal.id));
        }
        if self.find_animal_by_code(&animal.code).is_some() {
            return Err(HerdError::duplicate("Animal code", &animal.code));
        }
        self.animals.insert(animal.id, animal.clone());
        Ok(animal)
    }

    fn delete_animal(&mut self, id: Uuid) -> Result<Animal> {
        self.animals
            .remove(&id)
            .ok_or_else(|| HerdError::not_found("Animal", id))
    }
}

impl BirthLookup for InMemoryHerdStore {
    fn get_birth_by_animal_id(&self, animal_id: Uuid) -> Option<BirthRecord> {
        self.births_by_animal
            .get(&animal_id)
            .and_then(|id| self.births.get(id))
            .cloned()
    }
}

impl BirthRepository for InMemoryHerdStore {
    fn get_birth(&self, id: Uuid) -> Option<BirthRecord> {
        self.births.get(&id).cloned()
    }

    fn list_births(&self) -> Vec<BirthRecord> {
        let mut births: Vec<BirthRecord> = self.births.values().cloned().collect();
        births.sort_by(|a, b| a.birth_date.cmp(&b.birth_date).then(a.id.cmp(&b.id)));
        births
    }

    fn insert_birth(&mut self, birth: BirthRecord) -> Result<BirthRecord> {
        if self.births.contains_key(&birth.id) {
            return Err(HerdError::duplicate("Birth record", birth.id));
        }
        if self.births_by_animal.contains_key(&birth.animal_id) {
            return Err(HerdError::duplicate(
                "Birth record for animal",
                birth.animal_id,
            ));
        }
        self.births_by_animal.insert(birth.animal_id, birth.id);
        self.births.insert(birth.id, birth.clone());
        Ok(birth)
    }

    fn update_birth(&mut self, mut birth: BirthRecord) -> Result<BirthRecord> {
        let existing = self
            .births
            .get(&birth.id)
            .ok_or_else(|| HerdError::not_found("Birth record", birth.id))?;
        if existing.animal_id != birth.animal_id {
            return Err(HerdError::Validation(format!(
                "birth record {} cannot move from animal {} to {}",
                birth.id, existing.animal_id, birth.animal_id
            )));
        }
        birth.updated_at = Utc::now();
        self.births.insert(birth.id, birth.clone());
        Ok(birth)
    }

    fn delete_birth(&mut self, id: Uuid) -> Result<BirthRecord> {
        let birth = self
            .births
            .remove(&id)
            .ok_or_else(|| HerdError::not_found("Birth record", id))?;
        self.births_by_animal.remove(&birth.animal_id);
        Ok(birth)
    }
}

impl AcquisitionRepository for InMemoryHerdStore {
    fn get_acquisition(&self, id: Uuid) -> Option<AcquisitionRecord> {
        self.acquisitions.get(&id).cloned()
    }

    fn list_acquisitions(&self) -> Vec<AcquisitionRecord> {
        let mut acquisitions: Vec<AcquisitionRecord> =
            self.acquisitions.values().cloned().collect();
        acquisitions.sort_by(|a, b| a.acquired_on.cmp(&b.acquired_on).then(a.id.cmp(&b.id)));
        acquisitions
    }

    fn insert_acquisition(&mut self, acquisition: AcquisitionRecord) -> Result<AcquisitionRecord> {
        if self.acquisitions.contains_key(&acquisition.id) {
            return Err(HerdError::duplicate("Acquisition", acquisition.id));
        }
        self.acquisitions.insert(acquisition.id, acquisition.clone());
        Ok(acquisition)
    }

    fn delete_acquisition(&mut self, id: Uuid) -> Result<AcquisitionRecord> {
        self.acquisitions
            .remove(&id)
            .ok_or_else(|| HerdError::not_found("Acquisition", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Breed, Sex};
    use crate::purity::PurityGrade;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2021, 9, 1).unwrap()
    }

    #[test]
    fn test_insert_and_lookup_animal() {
        let mut store = InMemoryHerdStore::new();
        let animal = Animal::new("BNN-0001", Sex::Female, Breed::Nelore, date());
        let id = animal.id;
        store.insert_animal(animal).unwrap();

        assert_eq!(store.get_animal_by_id(id).unwrap().code, "BNN-0001");
        assert_eq!(store.find_animal_by_code("bnn-0001").unwrap().id, id);
        assert_eq!(store.resolve_animal(&id.to_string()).unwrap().id, id);
    }

    #[test]
    fn test_duplicate_code_rejected() {
        let mut store = InMemoryHerdStore::new();
        store
            .insert_animal(Animal::new("BNN-0001", Sex::Female, Breed::Nelore, date()))
            .unwrap();
        let err = store
            .insert_animal(Animal::new("BNN-0001", Sex::Male, Breed::Angus, date()))
            .unwrap_err();
        assert!(matches!(err, HerdError::Duplicate { .. }));
    }

    #[test]
    fn test_one_birth_per_animal() {
        let mut store = InMemoryHerdStore::new();
        let animal_id = Uuid::new_v4();
        store
            .insert_birth(BirthRecord::new(animal_id, Breed::Gir, PurityGrade::PO, date()))
            .unwrap();
        let err = store
            .insert_birth(BirthRecord::new(animal_id, Breed::Gir, PurityGrade::F1, date()))
            .unwrap_err();
        assert!(matches!(err, HerdError::Duplicate { .. }));
    }

    #[test]
    fn test_delete_birth_clears_index() {
        let mut store = InMemoryHerdStore::new();
        let animal_id = Uuid::new_v4();
        let birth = store
            .insert_birth(BirthRecord::new(animal_id, Breed::Gir, PurityGrade::PO, date()))
            .unwrap();
        store.delete_birth(birth.id).unwrap();
        assert!(store.get_birth_by_animal_id(animal_id).is_none());
        assert!(matches!(
            store.delete_birth(birth.id),
            Err(HerdError::NotFound { .. })
        ));
    }

    #[test]
    fn test_update_keeps_animal_link() {
        let mut store = InMemoryHerdStore::new();
        let birth = store
            .insert_birth(BirthRecord::new(
                Uuid::new_v4(),
                Breed::Gir,
                PurityGrade::PO,
                date(),
            ))
            .unwrap();

        let mut moved = birth.clone();
        moved.animal_id = Uuid::new_v4();
        assert!(matches!(
            store.update_birth(moved),
            Err(HerdError::Validation(_))
        ));

        let mut edited = birth;
        edited.observation = Some("calved unassisted".into());
        let stored = store.update_birth(edited).unwrap();
        assert_eq!(stored.observation.as_deref(), Some("calved unassisted"));
    }

    #[test]
    fn test_acquisition_lifecycle() {
        let mut store = InMemoryHerdStore::new();
        let acquisition = AcquisitionRecord {
            id: Uuid::new_v4(),
            animal_id: Uuid::new_v4(),
            seller: "Fazenda Rio Claro".to_string(),
            acquired_on: date(),
            price: Decimal::new(950000, 2),
            observation: None,
        };
        store.insert_acquisition(acquisition.clone()).unwrap();
        assert!(matches!(
            store.insert_acquisition(acquisition.clone()),
            Err(HerdError::Duplicate { .. })
        ));
        assert_eq!(store.get_acquisition(acquisition.id), Some(acquisition.clone()));

        let removed = store.delete_acquisition(acquisition.id).unwrap();
        assert_eq!(removed.seller, "Fazenda Rio Claro");
        assert!(store.get_acquisition(acquisition.id).is_none());
        assert!(matches!(
            store.delete_acquisition(acquisition.id),
            Err(HerdError::NotFound { .. })
        ));
    }
}
