//! Deterministic demo herd
//!
//! Fabricates founders and several generations of offspring from a seeded
//! RNG. Every calf goes through [`RegistrationService`], so its purity comes
//! from the configured rule table rather than a separate inline calculation.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::config::SeedConfig;
use crate::error::{HerdError, Result};
use crate::models::{Animal, Breed, Sex};
use crate::purity::{PurityClassifier, PurityGrade, PurityTable};
use crate::repository::{AnimalRepository, BirthRepository, InMemoryHerdStore};
use crate::services::{NewAnimal, NewBirth, RegistrationService};

const FOUNDER_BREEDS: [Breed; 6] = [
    Breed::Nelore,
    Breed::Nelore,
    Breed::Angus,
    Breed::Brahman,
    Breed::Gir,
    Breed::Senepol,
];

/// Chance that a calf is registered without a known sire
const UNKNOWN_SIRE_RATE: f64 = 0.1;

/// Years between generations
const GENERATION_INTERVAL: i32 = 3;

pub fn generate_herd(config: &SeedConfig, table: PurityTable) -> Result<InMemoryHerdStore> {
    if config.founders < 2 {
        return Err(HerdError::Config(
            "seed.founders must be at least 2".to_string(),
        ));
    }

    generation_year(config.start_year, 0)?;
    generation_year(config.start_year, config.generations)?;

    let mut rng = StdRng::seed_from_u64(config.rng_seed);
    let mut store = InMemoryHerdStore::new();
    let mut service = RegistrationService::new(&mut store, PurityClassifier::new(table));
    let mut next_code = 1usize;

    for i in 0..config.founders {
        // First two founders are a breeding pair
        let sex = match i {
            0 => Sex::Female,
            1 => Sex::Male,
            _ => random_sex(&mut rng),
        };
        let breed = *FOUNDER_BREEDS.choose(&mut rng).unwrap_or(&Breed::Nelore);
        let mut animal = new_animal(&mut rng, next_code, sex, breed, config.start_year);
        animal.registration_number = Some(format!("RGD-{:05}", rng.gen_range(10000..100000)));
        next_code += 1;

        service.register_birth(NewBirth {
            animal,
            birth_weight_kg: Some(birth_weight(&mut rng)),
            observation: None,
        })?;
    }

    for generation in 1..=config.generations {
        let pool = service.store().list_animals();
        let dams: Vec<&Animal> = pool.iter().filter(|a| a.sex == Sex::Female).collect();
        let sires: Vec<&Animal> = pool.iter().filter(|a| a.sex == Sex::Male).collect();
        let year = generation_year(config.start_year, generation)?;

        for _ in 0..config.offspring_per_generation {
            let (Some(dam), Some(sire)) = (dams.choose(&mut rng), sires.choose(&mut rng)) else {
                break;
            };
            let breed = if rng.gen_bool(0.5) { dam.breed } else { sire.breed };
            let sex = random_sex(&mut rng);
            let mut animal = new_animal(&mut rng, next_code, sex, breed, year);
            animal.mother_id = Some(dam.id);
            if !rng.gen_bool(UNKNOWN_SIRE_RATE) {
                animal.father_id = Some(sire.id);
            }
            next_code += 1;

            service.register_birth(NewBirth {
                animal,
                birth_weight_kg: Some(birth_weight(&mut rng)),
                observation: None,
            })?;
        }
    }

    let summary = HerdSummary::of(&store);
    tracing::info!(
        seed = config.rng_seed,
        table = %table,
        animals = summary.animals,
        purity = ?summary.purity,
        "generated demo herd"
    );
    Ok(store)
}

/// Birth year of a generation; generation 0 is the founder cohort
pub fn generation_year(start_year: i32, generation: usize) -> Result<i32> {
    i32::try_from(generation)
        .ok()
        .and_then(|g| g.checked_mul(GENERATION_INTERVAL))
        .and_then(|offset| start_year.checked_add(offset))
        .filter(|year| NaiveDate::from_ymd_opt(*year, 12, 31).is_some())
        .ok_or_else(|| {
            HerdError::Config(format!(
                "generation {} from seed.start_year {} is out of range",
                generation, start_year
            ))
        })
}

fn random_sex(rng: &mut StdRng) -> Sex {
    if rng.gen_bool(0.5) {
        Sex::Female
    } else {
        Sex::Male
    }
}

fn new_animal(rng: &mut StdRng, n: usize, sex: Sex, breed: Breed, year: i32) -> NewAnimal {
    let id = uuid::Builder::from_random_bytes(rng.gen()).into_uuid();
    NewAnimal {
        id: Some(id),
        code: format!("BNN-{:04}", n),
        registration_number: None,
        name: None,
        sex,
        breed,
        birth_date: day_in_year(rng, year),
        property_id: None,
        mother_id: None,
        father_id: None,
    }
}

fn day_in_year(rng: &mut StdRng, year: i32) -> NaiveDate {
    let start = NaiveDate::from_ymd_opt(year, 1, 1).unwrap_or(NaiveDate::MIN);
    start + Duration::days(rng.gen_range(0..365))
}

fn birth_weight(rng: &mut StdRng) -> Decimal {
    Decimal::new(rng.gen_range(280..=420), 1)
}

/// Counts for display after seeding
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HerdSummary {
    pub animals: usize,
    pub females: usize,
    pub males: usize,
    pub purity: BTreeMap<PurityGrade, usize>,
}

impl HerdSummary {
    pub fn of(store: &InMemoryHerdStore) -> Self {
        let animals = store.list_animals();
        let females = animals.iter().filter(|a| a.is_female()).count();
        let mut purity = BTreeMap::new();
        for birth in store.list_births() {
            *purity.entry(birth.purity).or_insert(0) += 1;
        }
        Self {
            animals: animals.len(),
            females,
            males: animals.len() - females,
            purity,
        }
    }
}

/// Id for a herd code
pub fn animal_id_by_code(store: &InMemoryHerdStore, code: &str) -> Option<Uuid> {
    store.find_animal_by_code(code).map(|a| a.id)
}
