use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Male => f.pad("Male"),
            Gender::Female => f.pad("Female"),
        }
    }
}

impl FromStr for Gender {
    type Err = String;

    /// Accepts the variant name in any case, or its ordinal (`0` = Male, `1` = Female)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "male" | "0" => Ok(Gender::Male),
            "female" | "1" => Ok(Gender::Female),
            _ => Err(format!("invalid gender '{}'", s)),
        }
    }
}

impl<'de> Deserialize<'de> for Gender {
    /// Accepts anything `FromStr` does, plus the bare ordinals `0` and `1`
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Name(String),
            Ordinal(u64),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Name(name) => name.parse().map_err(de::Error::custom),
            Repr::Ordinal(0) => Ok(Gender::Male),
            Repr::Ordinal(1) => Ok(Gender::Female),
            Repr::Ordinal(n) => Err(de::Error::custom(format!("invalid gender ordinal {}", n))),
        }
    }
}

/// A client record as held by the store
#[derive(Debug, Clone, PartialEq)]
pub struct Client {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub gender: Gender,
    pub phone: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub enabled: bool,
}

impl Client {
    /// Build a fresh record stamped with the current time; `enabled` starts false
    pub fn new(id: i32, name: String, email: String, gender: Gender, phone: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            name,
            email,
            gender,
            phone,
            created_at: now,
            updated_at: now,
            enabled: false,
        }
    }
}
