//! Body and profile attributes of a user.

use std::{fmt, str::FromStr};

use crate::domain::DomainError;

pub const NICKNAME_MAX_LEN: usize = 50;
pub const WEIGHT_MAX_KG: u32 = 500;
pub const HEIGHT_MAX_CM: u32 = 300;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nickname(String);

impl Nickname {
    pub fn new(raw: &str) -> Result<Self, DomainError> {
        let nickname = raw.trim();
        if nickname.is_empty() {
            return Err(DomainError::NicknameRequired);
        }
        if nickname.chars().count() > NICKNAME_MAX_LEN {
            return Err(DomainError::NicknameTooLong {
                max: NICKNAME_MAX_LEN,
            });
        }
        Ok(Self(nickname.to_owned()))
    }

    pub fn reconstruct(raw: String) -> Self {
        Self(raw)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Body weight in kilograms, `0 < kg <= 500`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weight(f64);

impl Weight {
    pub fn new(kg: f64) -> Result<Self, DomainError> {
        // NaN fails the first comparison.
        if !(kg > 0.0) {
            return Err(DomainError::WeightMustBePositive);
        }
        if kg > f64::from(WEIGHT_MAX_KG) {
            return Err(DomainError::WeightTooHeavy { max: WEIGHT_MAX_KG });
        }
        Ok(Self(kg))
    }

    pub fn reconstruct(kg: f64) -> Self {
        Self(kg)
    }

    pub fn kg(&self) -> f64 {
        self.0
    }
}

/// Body height in centimetres, `0 < cm <= 300`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Height(f64);

impl Height {
    pub fn new(cm: f64) -> Result<Self, DomainError> {
        if !(cm > 0.0) {
            return Err(DomainError::HeightMustBePositive);
        }
        if cm > f64::from(HEIGHT_MAX_CM) {
            return Err(DomainError::HeightTooTall { max: HEIGHT_MAX_CM });
        }
        Ok(Self(cm))
    }

    pub fn reconstruct(cm: f64) -> Self {
        Self(cm)
    }

    pub fn cm(&self) -> f64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Other => "other",
        }
    }
}

impl FromStr for Gender {
    type Err = DomainError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "male" => Ok(Self::Male),
            "female" => Ok(Self::Female),
            "other" => Ok(Self::Other),
            _ => Err(DomainError::InvalidGender),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Habitual activity, mapped to a TDEE multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityLevel {
    Sedentary,
    Light,
    Moderate,
    Active,
    VeryActive,
}

impl ActivityLevel {
    pub fn multiplier(&self) -> f64 {
        match self {
            Self::Sedentary => 1.2,
            Self::Light => 1.375,
            Self::Moderate => 1.55,
            Self::Active => 1.725,
            Self::VeryActive => 1.9,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sedentary => "sedentary",
            Self::Light => "light",
            Self::Moderate => "moderate",
            Self::Active => "active",
            Self::VeryActive => "very_active",
        }
    }
}

impl FromStr for ActivityLevel {
    type Err = DomainError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "sedentary" => Ok(Self::Sedentary),
            "light" => Ok(Self::Light),
            "moderate" => Ok(Self::Moderate),
            "active" => Ok(Self::Active),
            "very_active" => Ok(Self::VeryActive),
            _ => Err(DomainError::InvalidActivityLevel),
        }
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
