//! Breed enumeration

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::HerdError;

/// Cattle breeds tracked by the herd registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Breed {
    Nelore,
    Angus,
    Brahman,
    Gir,
    Girolando,
    Guzera,
    Tabapua,
    Senepol,
    Hereford,
    Brangus,
    Holandes,
    Jersey,
    Simental,
    Canchim,
}

impl Breed {
    pub const ALL: [Breed; 14] = [
        Breed::Nelore,
        Breed::Angus,
        Breed::Brahman,
        Breed::Gir,
        Breed::Girolando,
        Breed::Guzera,
        Breed::Tabapua,
        Breed::Senepol,
        Breed::Hereford,
        Breed::Brangus,
        Breed::Holandes,
        Breed::Jersey,
        Breed::Simental,
        Breed::Canchim,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Breed::Nelore => "Nelore",
            Breed::Angus => "Angus",
            Breed::Brahman => "Brahman",
            Breed::Gir => "Gir",
            Breed::Girolando => "Girolando",
            Breed::Guzera => "Guzera",
            Breed::Tabapua => "Tabapua",
            Breed::Senepol => "Senepol",
            Breed::Hereford => "Hereford",
            Breed::Brangus => "Brangus",
            Breed::Holandes => "Holandes",
            Breed::Jersey => "Jersey",
            Breed::Simental => "Simental",
            Breed::Canchim => "Canchim",
        }
    }
}

impl fmt::Display for Breed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Breed {
    type Err = HerdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Registry exports carry the Portuguese spellings
        let normalized = s
            .trim()
            .to_lowercase()
            .replace('á', "a")
            .replace('ã', "a")
            .replace('ê', "e");

        Breed::ALL
            .iter()
            .copied()
            .find(|b| b.as_str().to_lowercase() == normalized)
            .ok_or_else(|| HerdError::InvalidBreed(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("nelore".parse::<Breed>().unwrap(), Breed::Nelore);
        assert_eq!(" ANGUS ".parse::<Breed>().unwrap(), Breed::Angus);
    }

    #[test]
    fn test_parse_accented_names() {
        assert_eq!("Guzerá".parse::<Breed>().unwrap(), Breed::Guzera);
        assert_eq!("Tabapuã".parse::<Breed>().unwrap(), Breed::Tabapua);
        assert_eq!("Holandês".parse::<Breed>().unwrap(), Breed::Holandes);
    }

    #[test]
    fn test_parse_unknown() {
        assert!(matches!(
            "Wagyu".parse::<Breed>(),
            Err(HerdError::InvalidBreed(_))
        ));
    }
}
