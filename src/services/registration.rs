//! Birth and acquisition registration
//!
//! Both flows create an animal plus its birth record, stamping the record
//! with a purity grade computed from the parents at registration time.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{HerdError, Result};
use crate::models::{AcquisitionRecord, Animal, AnimalStatus, BirthRecord, Breed, Sex};
use crate::purity::{PurityClassifier, PurityDecision};
use crate::repository::HerdStore;

/// Animal fields shared by births and acquisitions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAnimal {
    /// Caller-chosen id; generated when absent
    #[serde(default)]
    pub id: Option<Uuid>,
    pub code: String,
    #[serde(default)]
    pub registration_number: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    pub sex: Sex,
    pub breed: Breed,
    pub birth_date: NaiveDate,
    #[serde(default)]
    pub property_id: Option<Uuid>,
    #[serde(default)]
    pub mother_id: Option<Uuid>,
    #[serde(default)]
    pub father_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBirth {
    #[serde(flatten)]
    pub animal: NewAnimal,
    #[serde(default)]
    pub birth_weight_kg: Option<Decimal>,
    #[serde(default)]
    pub observation: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAcquisition {
    #[serde(flatten)]
    pub animal: NewAnimal,
    pub seller: String,
    pub acquired_on: NaiveDate,
    pub price: Decimal,
    #[serde(default)]
    pub observation: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    pub animal: Animal,
    pub birth: BirthRecord,
    pub purity: PurityDecision,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acquisition: Option<AcquisitionRecord>,
}

struct Parent {
    animal: Animal,
    birth: Option<BirthRecord>,
}

pub struct RegistrationService<'a, S: HerdStore + ?Sized> {
    store: &'a mut S,
    classifier: PurityClassifier,
}

impl<'a, S: HerdStore + ?Sized> RegistrationService<'a, S> {
    pub fn new(store: &'a mut S, classifier: PurityClassifier) -> Self {
        Self { store, classifier }
    }

    pub fn store(&self) -> &S {
        self.store
    }

    pub fn register_birth(&mut self, request: NewBirth) -> Result<Registration> {
        let (animal, mut birth, purity) = self.prepare(&request.animal)?;
        birth.birth_weight_kg = request.birth_weight_kg;
        birth.observation = request.observation;

        let (animal, birth) = self.persist(animal, birth)?;
        tracing::info!(
            animal = %animal.code,
            purity = %birth.purity,
            rule = purity.rule_id,
            "registered birth"
        );

        Ok(Registration {
            animal,
            birth,
            purity,
            acquisition: None,
        })
    }

    pub fn register_acquisition(&mut self, request: NewAcquisition) -> Result<Registration> {
        if request.seller.trim().is_empty() {
            return Err(reject("seller is required"));
        }
        if request.price.is_sign_negative() {
            return Err(reject(format!("price {} is negative", request.price)));
        }
        if request.acquired_on < request.animal.birth_date {
            return Err(reject(format!(
                "acquired on {} before birth on {}",
                request.acquired_on, request.animal.birth_date
            )));
        }

        let (animal, birth, purity) = self.prepare(&request.animal)?;
        let (animal, birth) = self.persist(animal, birth)?;

        let acquisition = AcquisitionRecord {
            id: Uuid::new_v4(),
            animal_id: animal.id,
            seller: request.seller.trim().to_string(),
            acquired_on: request.acquired_on,
            price: request.price,
            observation: request.observation,
        };
        let acquisition = match self.store.insert_acquisition(acquisition) {
            Ok(acquisition) => acquisition,
            Err(e) => {
                self.rollback(&animal, Some(&birth));
                return Err(e);
            }
        };

        tracing::info!(
            animal = %animal.code,
            seller = %acquisition.seller,
            purity = %birth.purity,
            "registered acquisition"
        );

        Ok(Registration {
            animal,
            birth,
            purity,
            acquisition: Some(acquisition),
        })
    }

    /// Soft edit of a birth record. The purity grade is left as stamped.
    pub fn update_birth_notes(
        &mut self,
        animal_id: Uuid,
        observation: Option<String>,
        attachments: Vec<String>,
    ) -> Result<BirthRecord> {
        let mut birth = self
            .store
            .get_birth_by_animal_id(animal_id)
            .ok_or_else(|| HerdError::not_found("Birth record for animal", animal_id))?;
        birth.observation = observation;
        birth.attachments = attachments;
        self.store.update_birth(birth)
    }

    fn prepare(&self, request: &NewAnimal) -> Result<(Animal, BirthRecord, PurityDecision)> {
        let code = request.code.trim();
        if code.is_empty() {
            return Err(reject("animal code is required"));
        }

        let id = request.id.unwrap_or_else(Uuid::new_v4);
        if request.mother_id == Some(id) || request.father_id == Some(id) {
            return Err(reject(format!("animal {} cannot be its own parent", code)));
        }

        let mother = self.parent(request.mother_id, Sex::Female, "mother", request)?;
        let father = self.parent(request.father_id, Sex::Male, "father", request)?;

        let purity = self.classifier.classify_births(
            mother.as_ref().and_then(|p| p.birth.as_ref()),
            father.as_ref().and_then(|p| p.birth.as_ref()),
            mother.as_ref().map(|p| p.animal.breed),
            father.as_ref().map(|p| p.animal.breed),
        );

        let mut animal =
            Animal::new(code, request.sex, request.breed, request.birth_date).with_id(id);
        animal.registration_number = request.registration_number.clone();
        animal.name = request.name.clone();
        animal.property_id = request.property_id;

        let birth = BirthRecord::new(id, request.breed, purity.grade, request.birth_date)
            .with_parents(request.mother_id, request.father_id);

        Ok((animal, birth, purity))
    }

    fn parent(
        &self,
        id: Option<Uuid>,
        sex: Sex,
        role: &str,
        request: &NewAnimal,
    ) -> Result<Option<Parent>> {
        let Some(id) = id else {
            return Ok(None);
        };

        let animal = self
            .store
            .get_animal_by_id(id)
            .ok_or_else(|| reject(format!("{} {} not found", role, id)))?;

        if animal.sex != sex {
            return Err(reject(format!(
                "{} {} is {:?}, expected {:?}",
                role, animal.code, animal.sex, sex
            )));
        }
        if animal.birth_date >= request.birth_date {
            return Err(reject(format!(
                "{} {} was born on {}, not before {}",
                role, animal.code, animal.birth_date, request.birth_date
            )));
        }
        if animal.status == AnimalStatus::Sold {
            tracing::debug!(role, parent = %animal.code, "parent has since been sold");
        }

        let birth = self.store.get_birth_by_animal_id(id);
        Ok(Some(Parent { animal, birth }))
    }

    fn persist(&mut self, animal: Animal, birth: BirthRecord) -> Result<(Animal, BirthRecord)> {
        let animal = self.store.insert_animal(animal)?;
        match self.store.insert_birth(birth) {
            Ok(birth) => Ok((animal, birth)),
            Err(e) => {
                // no animal without its birth record
                self.rollback(&animal, None);
                Err(e)
            }
        }
    }

    fn rollback(&mut self, animal: &Animal, birth: Option<&BirthRecord>) {
        if let Some(birth) = birth {
            if let Err(e) = self.store.delete_birth(birth.id) {
                tracing::error!(
                    animal = %animal.code,
                    error = %e,
                    "failed to roll back birth record"
                );
            }
        }
        if let Err(e) = self.store.delete_animal(animal.id) {
            tracing::error!(animal = %animal.code, error = %e, "failed to roll back animal");
        }
    }
}

fn reject(message: impl Into<String>) -> HerdError {
    let message = message.into();
    tracing::warn!(reason = %message, "registration rejected");
    HerdError::Validation(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::purity::{PurityGrade, PurityTable};
    use crate::repository::{
        AcquisitionRepository, AnimalLookup, AnimalRepository, BirthLookup, BirthRepository,
        InMemoryHerdStore,
    };

    /// Store whose acquisition table rejects every insert
    struct ReadOnlyAcquisitions(InMemoryHerdStore);

    impl AnimalLookup for ReadOnlyAcquisitions {
        fn get_animal_by_id(&self, id: Uuid) -> Option<Animal> {
            self.0.get_animal_by_id(id)
        }
    }

    impl AnimalRepository for ReadOnlyAcquisitions {
        fn find_animal_by_code(&self, code: &str) -> Option<Animal> {
            self.0.find_animal_by_code(code)
        }
        fn list_animals(&self) -> Vec<Animal> {
            self.0.list_animals()
        }
        fn insert_animal(&mut self, animal: Animal) -> Result<Animal> {
            self.0.insert_animal(animal)
        }
        fn delete_animal(&mut self, id: Uuid) -> Result<Animal> {
            self.0.delete_animal(id)
        }
    }

    impl BirthLookup for ReadOnlyAcquisitions {
        fn get_birth_by_animal_id(&self, animal_id: Uuid) -> Option<BirthRecord> {
            self.0.get_birth_by_animal_id(animal_id)
        }
    }

    impl BirthRepository for ReadOnlyAcquisitions {
        fn get_birth(&self, id: Uuid) -> Option<BirthRecord> {
            self.0.get_birth(id)
        }
        fn list_births(&self) -> Vec<BirthRecord> {
            self.0.list_births()
        }
        fn insert_birth(&mut self, birth: BirthRecord) -> Result<BirthRecord> {
            self.0.insert_birth(birth)
        }
        fn update_birth(&mut self, birth: BirthRecord) -> Result<BirthRecord> {
            self.0.update_birth(birth)
        }
        fn delete_birth(&mut self, id: Uuid) -> Result<BirthRecord> {
            self.0.delete_birth(id)
        }
    }

    impl AcquisitionRepository for ReadOnlyAcquisitions {
        fn get_acquisition(&self, id: Uuid) -> Option<AcquisitionRecord> {
            self.0.get_acquisition(id)
        }
        fn list_acquisitions(&self) -> Vec<AcquisitionRecord> {
            self.0.list_acquisitions()
        }
        fn insert_acquisition(&mut self, _: AcquisitionRecord) -> Result<AcquisitionRecord> {
            Err(HerdError::Validation("acquisitions are read-only".to_string()))
        }
        fn delete_acquisition(&mut self, id: Uuid) -> Result<AcquisitionRecord> {
            self.0.delete_acquisition(id)
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn new_animal(code: &str, sex: Sex, breed: Breed, born: NaiveDate) -> NewAnimal {
        NewAnimal {
            id: None,
            code: code.to_string(),
            registration_number: None,
            name: None,
            sex,
            breed,
            birth_date: born,
            property_id: None,
            mother_id: None,
            father_id: None,
        }
    }

    fn birth_of(animal: NewAnimal) -> NewBirth {
        NewBirth {
            animal,
            birth_weight_kg: None,
            observation: None,
        }
    }

    #[test]
    fn test_founder_registration_is_po() {
        let mut store = InMemoryHerdStore::new();
        let mut service = RegistrationService::new(&mut store, PurityClassifier::default());
        let reg = service
            .register_birth(birth_of(new_animal(
                "BNN-0001",
                Sex::Female,
                Breed::Nelore,
                date(2018, 1, 10),
            )))
            .unwrap();

        assert_eq!(reg.birth.purity, PurityGrade::PO);
        assert_eq!(reg.purity.rule_id, "R1");
        assert!(store.get_animal_by_id(reg.animal.id).is_some());
        assert!(store.get_birth_by_animal_id(reg.animal.id).is_some());
    }

    #[test]
    fn test_cross_breed_calf_is_f1() {
        let mut store = InMemoryHerdStore::new();
        let mut service =
            RegistrationService::new(&mut store, PurityClassifier::new(PurityTable::Canonical));
        let dam = service
            .register_birth(birth_of(new_animal(
                "DAM",
                Sex::Female,
                Breed::Nelore,
                date(2015, 1, 1),
            )))
            .unwrap();
        let sire = service
            .register_birth(birth_of(new_animal(
                "SIRE",
                Sex::Male,
                Breed::Angus,
                date(2014, 1, 1),
            )))
            .unwrap();

        let mut calf = new_animal("CALF", Sex::Female, Breed::Nelore, date(2019, 6, 1));
        calf.mother_id = Some(dam.animal.id);
        calf.father_id = Some(sire.animal.id);
        let reg = service.register_birth(birth_of(calf)).unwrap();

        assert_eq!(reg.birth.purity, PurityGrade::F1);
        assert_eq!(reg.birth.mother_id, Some(dam.animal.id));
    }

    #[test]
    fn test_male_mother_rejected() {
        let mut store = InMemoryHerdStore::new();
        let mut service = RegistrationService::new(&mut store, PurityClassifier::default());
        let bull = service
            .register_birth(birth_of(new_animal(
                "BULL",
                Sex::Male,
                Breed::Gir,
                date(2015, 1, 1),
            )))
            .unwrap();

        let mut calf = new_animal("CALF", Sex::Male, Breed::Gir, date(2019, 1, 1));
        calf.mother_id = Some(bull.animal.id);
        let err = service.register_birth(birth_of(calf)).unwrap_err();
        assert!(matches!(err, HerdError::Validation(_)));
        assert_eq!(store.animal_count(), 1);
    }

    #[test]
    fn test_parent_born_after_offspring_rejected() {
        let mut store = InMemoryHerdStore::new();
        let mut service = RegistrationService::new(&mut store, PurityClassifier::default());
        let dam = service
            .register_birth(birth_of(new_animal(
                "DAM",
                Sex::Female,
                Breed::Gir,
                date(2020, 1, 1),
            )))
            .unwrap();
        let mut calf = new_animal("CALF", Sex::Male, Breed::Gir, date(2019, 1, 1));
        calf.mother_id = Some(dam.animal.id);
        assert!(service.register_birth(birth_of(calf)).is_err());
    }

    #[test]
    fn test_acquisition_creates_three_records() {
        let mut store = InMemoryHerdStore::new();
        let mut service = RegistrationService::new(&mut store, PurityClassifier::default());
        let reg = service
            .register_acquisition(NewAcquisition {
                animal: new_animal("BNN-0100", Sex::Male, Breed::Senepol, date(2020, 2, 2)),
                seller: "Fazenda Santa Rita".to_string(),
                acquired_on: date(2021, 5, 5),
                price: Decimal::new(1250000, 2),
                observation: None,
            })
            .unwrap();

        assert_eq!(reg.birth.purity, PurityGrade::PO);
        let acquisition = reg.acquisition.unwrap();
        assert_eq!(acquisition.animal_id, reg.animal.id);
        assert_eq!(store.list_acquisitions().len(), 1);
    }

    #[test]
    fn test_acquisition_requires_seller() {
        let mut store = InMemoryHerdStore::new();
        let mut service = RegistrationService::new(&mut store, PurityClassifier::default());
        let err = service
            .register_acquisition(NewAcquisition {
                animal: new_animal("BNN-0100", Sex::Male, Breed::Senepol, date(2020, 2, 2)),
                seller: "  ".to_string(),
                acquired_on: date(2021, 5, 5),
                price: Decimal::ZERO,
                observation: None,
            })
            .unwrap_err();
        assert!(err.is_client_error());
    }

    #[test]
    fn test_notes_update_preserves_purity() {
        let mut store = InMemoryHerdStore::new();
        let mut service = RegistrationService::new(&mut store, PurityClassifier::default());
        let reg = service
            .register_birth(birth_of(new_animal(
                "BNN-0001",
                Sex::Female,
                Breed::Nelore,
                date(2018, 1, 10),
            )))
            .unwrap();

        let updated = service
            .update_birth_notes(
                reg.animal.id,
                Some("weaned early".to_string()),
                vec!["exam.pdf".to_string()],
            )
            .unwrap();
        assert_eq!(updated.purity, reg.birth.purity);
        assert_eq!(updated.attachments, vec!["exam.pdf".to_string()]);
    }

    #[test]
    fn test_failed_birth_insert_rolls_back_animal() {
        let mut store = InMemoryHerdStore::new();
        let id = Uuid::new_v4();
        // stray record already claims the id
        store
            .insert_birth(BirthRecord::new(id, Breed::Gir, PurityGrade::F2, date(2018, 1, 1)))
            .unwrap();

        let mut service = RegistrationService::new(&mut store, PurityClassifier::default());
        let mut request = new_animal("BNN-0300", Sex::Female, Breed::Gir, date(2018, 1, 1));
        request.id = Some(id);
        let err = service.register_birth(birth_of(request)).unwrap_err();

        assert!(matches!(err, HerdError::Duplicate { .. }));
        assert!(store.get_animal_by_id(id).is_none());
        assert_eq!(store.animal_count(), 0);
        assert_eq!(store.birth_count(), 1);
    }

    #[test]
    fn test_failed_acquisition_insert_rolls_back_records() {
        let mut store = ReadOnlyAcquisitions(InMemoryHerdStore::new());
        let mut service = RegistrationService::new(&mut store, PurityClassifier::default());
        let err = service
            .register_acquisition(NewAcquisition {
                animal: new_animal("BNN-0101", Sex::Female, Breed::Angus, date(2020, 2, 2)),
                seller: "Fazenda Santa Rita".to_string(),
                acquired_on: date(2021, 5, 5),
                price: Decimal::new(1000000, 2),
                observation: None,
            })
            .unwrap_err();

        assert!(matches!(err, HerdError::Validation(_)));
        assert_eq!(store.0.animal_count(), 0);
        assert_eq!(store.0.birth_count(), 0);
        assert!(store.find_animal_by_code("BNN-0101").is_none());
    }
}
