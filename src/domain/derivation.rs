//! Pure derivations over a student's stored attributes.
//!
//! Every function here is deterministic and side-effect free. Missing or
//! unusable inputs degrade to `None` instead of failing: a record with no
//! birth date simply has no age, no age class and no weight category.

use chrono::{Datelike, NaiveDate};

/// Competition age classes, CBJ-style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgeClass {
    Infantil,
    Juvenil,
    Junior,
    Senior,
    Veterano,
}

impl AgeClass {
    pub fn label(&self) -> &'static str {
        match self {
            AgeClass::Infantil => "Infantil",
            AgeClass::Juvenil => "Juvenil",
            AgeClass::Junior => "Júnior",
            AgeClass::Senior => "Sênior",
            AgeClass::Veterano => "Veterano",
        }
    }
}

/// Completed years between `birth_date` and `today`.
///
/// Subtracts one year when today's (month, day) precedes the birthday's,
/// so the age ticks over exactly on the birthday.
pub fn age_on(birth_date: Option<NaiveDate>, today: NaiveDate) -> Option<i32> {
    let birth = birth_date?;
    let mut age = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    Some(age)
}

/// Heights below 3 are already meters; anything else is centimeters.
pub fn height_in_meters(height: f64) -> f64 {
    if height < 3.0 {
        height
    } else {
        height / 100.0
    }
}

/// Body mass index from weight (kg) and height (cm or m), rounded to two
/// decimal places. Absent or zero inputs yield `None`.
pub fn bmi(weight_kg: Option<f64>, height: Option<f64>) -> Option<f64> {
    let weight = weight_kg.filter(|w| *w != 0.0)?;
    let height_m = height_in_meters(height.filter(|h| *h != 0.0)?);
    let value = weight / (height_m * height_m);
    if !value.is_finite() {
        return None;
    }
    Some((value * 100.0).round() / 100.0)
}

pub fn age_class(age: Option<i32>) -> Option<AgeClass> {
    let age = age?;
    Some(match age {
        a if a < 13 => AgeClass::Infantil,
        a if a < 16 => AgeClass::Juvenil,
        a if a < 20 => AgeClass::Junior,
        a if a < 30 => AgeClass::Senior,
        _ => AgeClass::Veterano,
    })
}

// Ascending weight thresholds per age class. Each entry is an upper bound
// paired with its label; weights past the last bound use the class's
// "Acima de ..." label. The tables are genderless.
const INFANTIL_TIERS: [(f64, &str); 7] = [
    (30.0, "Até 30kg"),
    (34.0, "Até 34kg"),
    (38.0, "Até 38kg"),
    (42.0, "Até 42kg"),
    (46.0, "Até 46kg"),
    (50.0, "Até 50kg"),
    (55.0, "Até 55kg"),
];

const JUVENIL_TIERS: [(f64, &str); 7] = [
    (40.0, "Até 40kg"),
    (44.0, "Até 44kg"),
    (48.0, "Até 48kg"),
    (52.0, "Até 52kg"),
    (57.0, "Até 57kg"),
    (63.0, "Até 63kg"),
    (70.0, "Até 70kg"),
];

const JUNIOR_TIERS: [(f64, &str); 8] = [
    (50.0, "Até 50kg"),
    (55.0, "Até 55kg"),
    (60.0, "Até 60kg"),
    (66.0, "Até 66kg"),
    (73.0, "Até 73kg"),
    (81.0, "Até 81kg"),
    (90.0, "Até 90kg"),
    (100.0, "Até 100kg"),
];

const SENIOR_TIERS: [(f64, &str); 6] = [
    (60.0, "Até 60kg"),
    (66.0, "Até 66kg"),
    (73.0, "Até 73kg"),
    (81.0, "Até 81kg"),
    (90.0, "Até 90kg"),
    (100.0, "Até 100kg"),
];

fn tier_label(tiers: &[(f64, &'static str)], above: &'static str, weight: f64) -> &'static str {
    for (bound, label) in tiers {
        if weight < *bound {
            return label;
        }
    }
    above
}

/// Competition weight category from age and weight (kg). Requires both;
/// otherwise undefined.
pub fn weight_category(age: Option<i32>, weight_kg: Option<f64>) -> Option<&'static str> {
    let class = age_class(age)?;
    let weight = weight_kg?;
    Some(match class {
        AgeClass::Infantil => tier_label(&INFANTIL_TIERS, "Acima de 55kg", weight),
        AgeClass::Juvenil => tier_label(&JUVENIL_TIERS, "Acima de 70kg", weight),
        AgeClass::Junior => tier_label(&JUNIOR_TIERS, "Acima de 100kg", weight),
        AgeClass::Senior | AgeClass::Veterano => {
            tier_label(&SENIOR_TIERS, "Acima de 100kg", weight)
        }
    })
}

/// Mean of the sub-scores that are present, rounded to two decimals.
pub fn score_average(scores: &[Option<f64>]) -> Option<f64> {
    let present: Vec<f64> = scores.iter().filter_map(|s| *s).collect();
    if present.is_empty() {
        return None;
    }
    let mean = present.iter().sum::<f64>() / present.len() as f64;
    Some((mean * 100.0).round() / 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_age_ticks_on_birthday() {
        let birth = Some(date(2010, 3, 15));
        assert_eq!(age_on(birth, date(2024, 3, 14)), Some(13));
        assert_eq!(age_on(birth, date(2024, 3, 15)), Some(14));
        assert_eq!(age_on(birth, date(2024, 3, 16)), Some(14));
    }

    #[test]
    fn test_age_absent_birth_date() {
        assert_eq!(age_on(None, date(2024, 1, 1)), None);
    }

    #[test]
    fn test_bmi_meters_and_centimeters_agree() {
        assert_eq!(bmi(Some(70.0), Some(1.75)), Some(22.86));
        assert_eq!(bmi(Some(70.0), Some(175.0)), Some(22.86));
    }

    #[test]
    fn test_bmi_degrades_on_missing_or_zero() {
        assert_eq!(bmi(None, Some(175.0)), None);
        assert_eq!(bmi(Some(70.0), None), None);
        assert_eq!(bmi(Some(0.0), Some(175.0)), None);
        assert_eq!(bmi(Some(70.0), Some(0.0)), None);
    }

    #[test]
    fn test_age_class_brackets() {
        assert_eq!(age_class(Some(12)), Some(AgeClass::Infantil));
        assert_eq!(age_class(Some(13)), Some(AgeClass::Juvenil));
        assert_eq!(age_class(Some(16)), Some(AgeClass::Junior));
        assert_eq!(age_class(Some(20)), Some(AgeClass::Senior));
        assert_eq!(age_class(Some(30)), Some(AgeClass::Veterano));
        assert_eq!(age_class(None), None);
    }

    #[test]
    fn test_weight_category_tables() {
        assert_eq!(weight_category(Some(12), Some(32.0)), Some("Até 34kg"));
        assert_eq!(weight_category(Some(25), Some(95.0)), Some("Até 100kg"));
        assert_eq!(weight_category(Some(12), Some(60.0)), Some("Acima de 55kg"));
        assert_eq!(weight_category(Some(14), Some(39.0)), Some("Até 40kg"));
        assert_eq!(weight_category(Some(17), Some(105.0)), Some("Acima de 100kg"));
        assert_eq!(weight_category(Some(45), Some(59.9)), Some("Até 60kg"));
    }

    #[test]
    fn test_weight_category_requires_both_inputs() {
        assert_eq!(weight_category(None, Some(50.0)), None);
        assert_eq!(weight_category(Some(25), None), None);
    }

    #[test]
    fn test_score_average() {
        assert_eq!(
            score_average(&[Some(8.0), Some(9.0), None, Some(10.0)]),
            Some(9.0)
        );
        assert_eq!(score_average(&[Some(7.0), Some(8.0)]), Some(7.5));
        assert_eq!(score_average(&[None, None, None, None]), None);
    }
}
