//! Calorie and macronutrient targets (Mifflin–St Jeor).

use time::Date;

use super::{Calories, Gender, Pfc, User};

pub const PROTEIN_KCAL_PER_GRAM: f64 = 4.0;
pub const FAT_KCAL_PER_GRAM: f64 = 9.0;
pub const CARBS_KCAL_PER_GRAM: f64 = 4.0;

/// Share of target calories given to each macro.
pub const PROTEIN_RATIO: f64 = 0.20;
pub const FAT_RATIO: f64 = 0.25;
pub const CARBS_RATIO: f64 = 0.55;

const MALE_OFFSET: f64 = 5.0;
const FEMALE_OFFSET: f64 = -161.0;

/// Basal metabolic rate in kcal/day.
///
/// `other` is the mean of the male and female equations.
pub fn basal_metabolic_rate(weight_kg: f64, height_cm: f64, age: u32, gender: Gender) -> f64 {
    let base = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * f64::from(age);
    match gender {
        Gender::Male => base + MALE_OFFSET,
        Gender::Female => base + FEMALE_OFFSET,
        Gender::Other => base + (MALE_OFFSET + FEMALE_OFFSET) / 2.0,
    }
}

/// BMR of `user` with their age as of `today`.
pub fn user_bmr(user: &User, today: Date) -> f64 {
    basal_metabolic_rate(
        user.weight().kg(),
        user.height().cm(),
        user.birth_date().age_on(today),
        user.gender(),
    )
}

/// `floor(BMR × activity multiplier)`, clamped at zero.
pub fn target_calories(user: &User, today: Date) -> Calories {
    let tdee = (user_bmr(user, today) * user.activity_level().multiplier()).floor();
    Calories::reconstruct(tdee.max(0.0) as u32)
}

/// Grams of each macro that fill its fixed share of `target`.
pub fn target_pfc(target: Calories) -> Pfc {
    let kcal = f64::from(target.kcal());
    Pfc::reconstruct(
        kcal * PROTEIN_RATIO / PROTEIN_KCAL_PER_GRAM,
        kcal * FAT_RATIO / FAT_KCAL_PER_GRAM,
        kcal * CARBS_RATIO / CARBS_KCAL_PER_GRAM,
    )
}
