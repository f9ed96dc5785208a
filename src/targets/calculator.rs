use serde::{Deserialize, Serialize};
use time::Date;

/// Biological sex as used by the Mifflin-St Jeor formula. The profile UI
/// also offers `other`; the formula is binary, so `other` is defined to use
/// the male constant.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "sex", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
    Other,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "activity_level", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Sedentary,
    Light,
    #[default]
    Moderate,
    Active,
    VeryActive,
}

impl ActivityLevel {
    pub fn multiplier(self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::Active => 1.725,
            ActivityLevel::VeryActive => 1.9,
        }
    }
}

/// Daily macro targets plus the hydration goal. Stored on the profile and
/// recomputed whenever biometrics change, not on every read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Targets {
    pub kcal: i32,
    pub protein: i32,
    pub carbs: i32,
    pub fat: i32,
    pub water_ml: i32,
}

/// Fallback when a user has no profile row.
pub const DEFAULT_TARGETS: Targets = Targets {
    kcal: 2000,
    protein: 150,
    carbs: 200,
    fat: 65,
    water_ml: 2000,
};

/// Mifflin-St Jeor resting energy expenditure, kcal/day.
pub fn bmr(sex: Sex, weight_kg: f64, height_cm: f64, age_years: i32) -> f64 {
    let base = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * f64::from(age_years);
    match sex {
        Sex::Female => base - 161.0,
        Sex::Male | Sex::Other => base + 5.0,
    }
}

pub fn tdee(sex: Sex, weight_kg: f64, height_cm: f64, age_years: i32, activity: ActivityLevel) -> f64 {
    (bmr(sex, weight_kg, height_cm, age_years) * activity.multiplier()).round()
}

/// 35 ml per kg of body weight.
pub fn water_goal_ml(weight_kg: f64) -> i32 {
    (weight_kg * 35.0).round() as i32
}

/// Exact calendar age: one less than the year difference until the
/// birthday has passed.
pub fn age_on(birth_date: Date, today: Date) -> i32 {
    let mut age = today.year() - birth_date.year();
    if (today.month() as u8, today.day()) < (birth_date.month() as u8, birth_date.day()) {
        age -= 1;
    }
    age
}

/// Full target computation: TDEE split 30/40/30 across protein, carbs and
/// fat at 4/4/9 kcal per gram.
pub fn compute_targets(
    sex: Sex,
    weight_kg: f64,
    height_cm: f64,
    birth_date: Date,
    activity: ActivityLevel,
    today: Date,
) -> Targets {
    let age = age_on(birth_date, today);
    let tdee = tdee(sex, weight_kg, height_cm, age, activity);
    Targets {
        kcal: tdee as i32,
        protein: (tdee * 0.30 / 4.0).round() as i32,
        carbs: (tdee * 0.40 / 4.0).round() as i32,
        fat: (tdee * 0.30 / 9.0).round() as i32,
        water_ml: water_goal_ml(weight_kg),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn male_bmr_matches_formula() {
        // 10*80 + 6.25*180 - 5*30 + 5
        assert_eq!(bmr(Sex::Male, 80.0, 180.0, 30), 1780.0);
        assert_eq!(bmr(Sex::Male, 80.0, 182.0, 30), 1792.5);
    }

    #[test]
    fn reference_male_example() {
        // 80 kg, 182 cm, 30 y, active: BMR 1792.5, TDEE round(1792.5 * 1.725).
        let t = compute_targets(
            Sex::Male,
            80.0,
            182.0,
            date!(1996 - 03 - 15),
            ActivityLevel::Active,
            date!(2026 - 03 - 16),
        );
        assert_eq!(t.kcal, 3092);
        assert_eq!(t.protein, 232); // round(3092 * 0.3 / 4)
        assert_eq!(t.carbs, 309); // round(3092 * 0.4 / 4)
        assert_eq!(t.fat, 103); // round(3092 * 0.3 / 9)
        assert_eq!(t.water_ml, 2800);
    }

    #[test]
    fn female_constant() {
        assert_eq!(bmr(Sex::Female, 60.0, 165.0, 25), 1345.25);
    }

    #[test]
    fn other_uses_male_constant() {
        assert_eq!(
            bmr(Sex::Other, 70.0, 175.0, 40),
            bmr(Sex::Male, 70.0, 175.0, 40)
        );
    }

    #[test]
    fn age_decrements_before_birthday() {
        let birth = date!(1990 - 06 - 15);
        assert_eq!(age_on(birth, date!(2026 - 06 - 14)), 35);
        assert_eq!(age_on(birth, date!(2026 - 06 - 15)), 36);
        assert_eq!(age_on(birth, date!(2026 - 06 - 16)), 36);
    }

    #[test]
    fn missing_activity_defaults_to_moderate() {
        assert_eq!(ActivityLevel::default().multiplier(), 1.55);
    }
}
