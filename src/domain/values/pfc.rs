use crate::domain::{error::Nutrient, DomainError};

/// Protein / fat / carbohydrate grams.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pfc {
    protein: f64,
    fat: f64,
    carbs: f64,
}

impl Pfc {
    /// Each macro must be a finite, non-negative number of grams.
    pub fn new(protein: f64, fat: f64, carbs: f64) -> Result<Self, DomainError> {
        Ok(Self {
            protein: grams(Nutrient::Protein, protein)?,
            fat: grams(Nutrient::Fat, fat)?,
            carbs: grams(Nutrient::Carbs, carbs)?,
        })
    }

    pub fn reconstruct(protein: f64, fat: f64, carbs: f64) -> Self {
        Self {
            protein,
            fat,
            carbs,
        }
    }

    pub fn protein(&self) -> f64 {
        self.protein
    }

    pub fn fat(&self) -> f64 {
        self.fat
    }

    pub fn carbs(&self) -> f64 {
        self.carbs
    }

    pub fn add(self, other: Self) -> Self {
        Self {
            protein: self.protein + other.protein,
            fat: self.fat + other.fat,
            carbs: self.carbs + other.carbs,
        }
    }
}

fn grams(nutrient: Nutrient, value: f64) -> Result<f64, DomainError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(DomainError::PfcMustBeNonNegative(nutrient))
    }
}
