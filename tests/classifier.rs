#![forbid(unsafe_code)]
use chrono::NaiveDate;
use permanence::{DutyCalendar, DutyType, Holiday, HolidayCalendar};

fn d(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn holiday(date: &str) -> Holiday {
    Holiday {
        name: "Fête".to_string(),
        date: d(date),
        kind: "custom".to_string(),
        country: "Israel".to_string(),
    }
}

#[test]
fn weekday_rules_follow_day_of_week() {
    let cal = DutyCalendar::default();
    // septembre 2025 : lundi 1, jeudi 4, samedi 6, dimanche 7
    assert_eq!(cal.classify(d("2025-09-01")), DutyType::Weekday);
    assert_eq!(cal.classify(d("2025-09-02")), DutyType::Weekday);
    assert_eq!(cal.classify(d("2025-09-04")), DutyType::Thursday);
    assert_eq!(cal.classify(d("2025-09-05")), DutyType::Weekday);
    assert_eq!(cal.classify(d("2025-09-06")), DutyType::Weekend);
    assert_eq!(cal.classify(d("2025-09-07")), DutyType::Weekend);
}

#[test]
fn holiday_takes_priority_over_day_of_week() {
    let cal = DutyCalendar::new(
        HolidayCalendar::from_list(vec![holiday("2025-09-04"), holiday("2025-09-06")]),
        [],
    );
    assert_eq!(cal.classify(d("2025-09-04")), DutyType::Holiday);
    assert_eq!(cal.classify(d("2025-09-06")), DutyType::Holiday);
}

#[test]
fn company_day_classifies_as_weekend() {
    let cal = DutyCalendar::new(HolidayCalendar::default(), [d("2025-09-08")]);
    // lundi désigné long week-end entreprise
    assert_eq!(cal.classify(d("2025-09-08")), DutyType::Weekend);
}

#[test]
fn holiday_takes_priority_over_company_day() {
    let cal = DutyCalendar::new(
        HolidayCalendar::from_list(vec![holiday("2025-09-08")]),
        [d("2025-09-08")],
    );
    assert_eq!(cal.classify(d("2025-09-08")), DutyType::Holiday);
}
