use async_trait::async_trait;
use time::Date;

use crate::domain::{Calories, Nutrient, Pfc};

/// One local day of intake next to the user's targets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyIntake {
    pub date: Date,
    pub calories: Calories,
    pub target: Calories,
    /// Sum over the day's records that carry a PFC breakdown.
    pub pfc: Pfc,
    pub target_pfc: Pfc,
}

/// Turns a day's intake into a short piece of advice.
#[async_trait]
pub trait AdviceGenerator: Send + Sync {
    async fn advise(&self, intake: &DailyIntake) -> anyhow::Result<String>;
}

/// Below this share of a macro target the advisor suggests eating more.
const MACRO_LOW_RATIO: f64 = 0.8;
/// Above this share it suggests cutting back.
const MACRO_HIGH_RATIO: f64 = 1.2;

/// Deterministic advisor built from the calorie and macro targets.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleBasedAdvisor;

impl RuleBasedAdvisor {
    fn calorie_line(intake: &DailyIntake) -> String {
        let eaten = intake.calories.kcal();
        let target = intake.target.kcal();
        if eaten == 0 {
            return format!(
                "No meals logged for {}. Aim for about {target} kcal.",
                intake.date
            );
        }
        if intake.calories.is_achieved(intake.target) {
            format!("Well done: {eaten} of {target} kcal keeps you on target.")
        } else if intake.calories.is_over(intake.target) {
            format!(
                "You are {} kcal over your {target} kcal target. Go lighter on the next meal.",
                eaten - target
            )
        } else {
            format!(
                "You are {} kcal short of your {target} kcal target.",
                target.saturating_sub(eaten)
            )
        }
    }

    fn macro_lines(intake: &DailyIntake) -> Vec<String> {
        let pairs = [
            (Nutrient::Protein, intake.pfc.protein(), intake.target_pfc.protein()),
            (Nutrient::Fat, intake.pfc.fat(), intake.target_pfc.fat()),
            (Nutrient::Carbs, intake.pfc.carbs(), intake.target_pfc.carbs()),
        ];
        if pairs.iter().all(|(_, eaten, _)| *eaten == 0.0) {
            return Vec::new();
        }

        pairs
            .into_iter()
            .filter(|(_, _, target)| *target > 0.0)
            .filter_map(|(nutrient, eaten, target)| {
                if eaten < target * MACRO_LOW_RATIO {
                    Some(format!("Add about {:.0} g of {nutrient}.", target - eaten))
                } else if eaten > target * MACRO_HIGH_RATIO {
                    Some(format!("Cut about {:.0} g of {nutrient}.", eaten - target))
                } else {
                    None
                }
            })
            .collect()
    }
}

#[async_trait]
impl AdviceGenerator for RuleBasedAdvisor {
    async fn advise(&self, intake: &DailyIntake) -> anyhow::Result<String> {
        let mut lines = vec![Self::calorie_line(intake)];
        lines.extend(Self::macro_lines(intake));
        Ok(lines.join(" "))
    }
}
