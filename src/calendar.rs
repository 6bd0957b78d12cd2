//! Calendrier métier : itération de mois, jours fériés, classification.
//!
//! La règle de classification est unique dans la crate : les phases gloutonne
//! et d'équilibrage passent toutes deux par le même [`DutyCalendar`].

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::model::DutyType;

/// Itère les dates du mois dans l'ordre croissant.
///
/// Un couple (année, mois) invalide produit un itérateur vide.
pub fn iter_month(year: i32, month: u32) -> impl Iterator<Item = NaiveDate> {
    let first = NaiveDate::from_ymd_opt(year, month, 1);
    std::iter::successors(first, move |d| {
        d.succ_opt().filter(|n| n.month() == month)
    })
}

fn default_kind() -> String {
    "custom".to_string()
}

/// Jour férié tel que décrit dans `holidays.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    pub name: String,
    pub date: NaiveDate,
    #[serde(rename = "type", default = "default_kind")]
    pub kind: String,
    #[serde(default)]
    pub country: String,
}

/// Table de correspondance date -> jour férié.
#[derive(Debug, Clone, Default)]
pub struct HolidayCalendar {
    holidays: BTreeMap<NaiveDate, Holiday>,
}

impl HolidayCalendar {
    pub fn from_list(list: Vec<Holiday>) -> Self {
        let mut holidays = BTreeMap::new();
        for h in list {
            holidays.insert(h.date, h);
        }
        Self { holidays }
    }

    pub fn holiday_on(&self, date: NaiveDate) -> Option<&Holiday> {
        self.holidays.get(&date)
    }

    /// Ajoute un férié ; refuse un doublon de date.
    pub fn add(&mut self, holiday: Holiday) -> bool {
        if self.holidays.contains_key(&holiday.date) {
            return false;
        }
        self.holidays.insert(holiday.date, holiday);
        true
    }

    pub fn remove(&mut self, date: NaiveDate) -> Option<Holiday> {
        self.holidays.remove(&date)
    }

    pub fn to_list(&self) -> Vec<Holiday> {
        self.holidays.values().cloned().collect()
    }
}

/// Calendrier de classification : fériés + journées entreprise désignées.
///
/// Les journées entreprise (longs week-ends) sont classées `Weekend`.
#[derive(Debug, Clone, Default)]
pub struct DutyCalendar {
    holidays: HolidayCalendar,
    company_days: BTreeSet<NaiveDate>,
}

impl DutyCalendar {
    pub fn new<I>(holidays: HolidayCalendar, company_days: I) -> Self
    where
        I: IntoIterator<Item = NaiveDate>,
    {
        Self {
            holidays,
            company_days: company_days.into_iter().collect(),
        }
    }

    pub fn holidays(&self) -> &HolidayCalendar {
        &self.holidays
    }

    /// Classifie une date, par priorité fixe et totale :
    /// férié > journée entreprise > jeudi > samedi/dimanche > semaine.
    pub fn classify(&self, d: NaiveDate) -> DutyType {
        if self.holidays.holiday_on(d).is_some() {
            return DutyType::Holiday;
        }
        if self.company_days.contains(&d) {
            return DutyType::Weekend;
        }
        match d.weekday() {
            Weekday::Thu => DutyType::Thursday,
            Weekday::Sat | Weekday::Sun => DutyType::Weekend,
            _ => DutyType::Weekday,
        }
    }
}
