use chrono::NaiveDate;
use pretty_assertions::assert_eq;

use dojo_admin::domain::belts::next_rank;
use dojo_admin::domain::derivation::{age_class, age_on, bmi, weight_category, AgeClass};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn age_boundary_on_month_day_equality() {
    let birth = Some(date(2010, 3, 15));

    // The day before the birthday the year has not completed yet
    assert_eq!(age_on(birth, date(2024, 3, 14)), Some(13));
    assert_eq!(age_on(birth, date(2024, 3, 15)), Some(14));
}

#[test]
fn age_degrades_without_birth_date() {
    assert_eq!(age_on(None, date(2024, 3, 15)), None);
}

#[test]
fn bmi_normalizes_centimeters_transparently() {
    assert_eq!(bmi(Some(70.0), Some(1.75)), Some(22.86));
    assert_eq!(bmi(Some(70.0), Some(175.0)), Some(22.86));
}

#[test]
fn bmi_undefined_without_weight() {
    assert_eq!(bmi(None, Some(175.0)), None);
}

#[test]
fn bmi_undefined_for_zero_inputs() {
    assert_eq!(bmi(Some(0.0), Some(175.0)), None);
    assert_eq!(bmi(Some(70.0), Some(0.0)), None);
}

#[test]
fn age_class_step_function() {
    assert_eq!(age_class(Some(5)), Some(AgeClass::Infantil));
    assert_eq!(age_class(Some(12)), Some(AgeClass::Infantil));
    assert_eq!(age_class(Some(13)), Some(AgeClass::Juvenil));
    assert_eq!(age_class(Some(15)), Some(AgeClass::Juvenil));
    assert_eq!(age_class(Some(16)), Some(AgeClass::Junior));
    assert_eq!(age_class(Some(19)), Some(AgeClass::Junior));
    assert_eq!(age_class(Some(20)), Some(AgeClass::Senior));
    assert_eq!(age_class(Some(29)), Some(AgeClass::Senior));
    assert_eq!(age_class(Some(30)), Some(AgeClass::Veterano));
    assert_eq!(age_class(None), None);
}

#[test]
fn weight_category_child_class() {
    assert_eq!(weight_category(Some(12), Some(32.0)), Some("Até 34kg"));
    assert_eq!(weight_category(Some(12), Some(29.0)), Some("Até 30kg"));
    assert_eq!(weight_category(Some(12), Some(56.0)), Some("Acima de 55kg"));
}

#[test]
fn weight_category_senior_class() {
    assert_eq!(weight_category(Some(25), Some(95.0)), Some("Até 100kg"));
    assert_eq!(weight_category(Some(25), Some(101.0)), Some("Acima de 100kg"));
    // Veterans share the senior table
    assert_eq!(weight_category(Some(42), Some(95.0)), Some("Até 100kg"));
}

#[test]
fn weight_category_requires_age_and_weight() {
    assert_eq!(weight_category(None, Some(70.0)), None);
    assert_eq!(weight_category(Some(25), None), None);
}

#[test]
fn next_rank_follows_the_chain() {
    assert_eq!(next_rank("Branca"), Some("Cinza"));
    assert_eq!(next_rank("Cinza"), Some("Azul"));
    assert_eq!(next_rank("Azul"), Some("Amarela"));
    assert_eq!(next_rank("Amarela"), Some("Laranja"));
    assert_eq!(next_rank("Laranja"), Some("Verde"));
    assert_eq!(next_rank("Verde"), Some("Roxa"));
    assert_eq!(next_rank("Roxa"), Some("Marrom"));
    assert_eq!(next_rank("Marrom"), Some("Preta"));
}

#[test]
fn top_rank_has_no_successor() {
    assert_eq!(next_rank("Preta"), None);
}

#[test]
fn unknown_rank_falls_back_to_second() {
    assert_eq!(next_rank("Unknown-rank"), Some("Cinza"));
}
