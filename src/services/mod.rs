//! Record workflows built on the stores and the purity classifier

pub mod registration;

pub use registration::{NewAcquisition, NewAnimal, NewBirth, Registration, RegistrationService};
