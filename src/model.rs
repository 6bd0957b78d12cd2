use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::availability;

/// Type de permanence, avec son poids fixe en points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DutyType {
    #[serde(rename = "WD")]
    Weekday,
    #[serde(rename = "Th")]
    Thursday,
    #[serde(rename = "WE")]
    Weekend,
    #[serde(rename = "B")]
    Backup,
    #[serde(rename = "HO")]
    Holiday,
}

impl DutyType {
    pub const ALL: [DutyType; 5] = [
        DutyType::Weekday,
        DutyType::Thursday,
        DutyType::Weekend,
        DutyType::Backup,
        DutyType::Holiday,
    ];

    /// Poids de charge (table constante, commune à tout le processus).
    pub fn weight(self) -> f64 {
        match self {
            DutyType::Weekday => 1.0,
            DutyType::Thursday => 1.5,
            DutyType::Weekend => 2.0,
            DutyType::Backup => 0.5,
            DutyType::Holiday => 3.0,
        }
    }

    /// Code court utilisé dans les fichiers (JSON/CSV).
    pub fn code(self) -> &'static str {
        match self {
            DutyType::Weekday => "WD",
            DutyType::Thursday => "Th",
            DutyType::Weekend => "WE",
            DutyType::Backup => "B",
            DutyType::Holiday => "HO",
        }
    }
}

impl fmt::Display for DutyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for DutyType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "WD" => Ok(DutyType::Weekday),
            "Th" => Ok(DutyType::Thursday),
            "WE" => Ok(DutyType::Weekend),
            "B" => Ok(DutyType::Backup),
            "HO" => Ok(DutyType::Holiday),
            other => Err(format!("unknown duty code: {other}")),
        }
    }
}

/// Plage de jours bloqués, bornes incluses, telle que saisie.
///
/// Les bornes restent des chaînes brutes : une saisie invalide est ignorée à
/// la résolution, jamais fatale, et une plage inversée est remise à l'endroit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockedRange {
    pub start: String,
    pub end: String,
}

impl BlockedRange {
    pub fn new<S: Into<String>, E: Into<String>>(start: S, end: E) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }
}

fn default_country() -> String {
    "Israel".to_string()
}

fn default_position() -> u16 {
    100
}

/// Employé du roster de permanence.
///
/// Seuls les champs de contraintes brutes sont persistés ; `blocked` est
/// re-dérivé à chaque mois cible et l'état d'exécution (`assignments`,
/// `points`, `counts`) vit le temps d'une période.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    pub name: String,
    pub email: String,
    #[serde(default = "default_country")]
    pub country: String,
    #[serde(default)]
    pub observes_sabbath: bool,
    #[serde(default = "default_position")]
    pub position_percentage: u16,
    #[serde(default)]
    pub blocked_days: Vec<String>,
    #[serde(default)]
    pub blocked_ranges: Vec<BlockedRange>,

    /// Jours bloqués résolus pour le mois cible courant.
    #[serde(skip)]
    pub blocked: BTreeSet<NaiveDate>,

    /// Affectations de la période : au plus une permanence par date.
    #[serde(skip)]
    pub assignments: BTreeMap<NaiveDate, DutyType>,
    /// Score de charge pondéré, cumulé sur la période.
    #[serde(skip)]
    pub points: f64,
    /// Compteur d'affectations par type de permanence.
    #[serde(skip)]
    pub counts: BTreeMap<DutyType, u32>,
}

impl Employee {
    pub fn new<N: Into<String>, E: Into<String>>(name: N, email: E) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            country: default_country(),
            observes_sabbath: false,
            position_percentage: default_position(),
            blocked_days: Vec::new(),
            blocked_ranges: Vec::new(),
            blocked: BTreeSet::new(),
            assignments: BTreeMap::new(),
            points: 0.0,
            counts: BTreeMap::new(),
        }
    }

    /// Remet à zéro l'état d'exécution (début de période).
    pub fn reset_runtime(&mut self) {
        self.assignments.clear();
        self.points = 0.0;
        self.counts.clear();
    }

    /// Recalcule le jeu de jours bloqués pour `(year, month)`.
    ///
    /// Idempotent : le résultat ne dépend que des contraintes brutes et du
    /// mois cible.
    pub fn prepare_for_month(&mut self, year: i32, month: u32) {
        self.blocked = availability::resolve_blocked_days(
            &self.blocked_days,
            &self.blocked_ranges,
            self.observes_sabbath,
            year,
            month,
        );
    }

    /// Éligible pour `d` : ni bloqué, ni déjà affecté ce jour-là.
    pub fn is_available(&self, d: NaiveDate) -> bool {
        !self.blocked.contains(&d) && !self.assignments.contains_key(&d)
    }

    /// Enregistre une affectation : date, compteur, points.
    pub fn add_assignment(&mut self, d: NaiveDate, duty: DutyType) {
        self.assignments.insert(d, duty);
        *self.counts.entry(duty).or_insert(0) += 1;
        self.points += duty.weight();
    }

    /// Retire l'affectation de `d` en décomptant compteur et points.
    pub fn remove_assignment(&mut self, d: NaiveDate) -> Option<DutyType> {
        let duty = self.assignments.remove(&d)?;
        if let Some(c) = self.counts.get_mut(&duty) {
            *c = c.saturating_sub(1);
        }
        self.points -= duty.weight();
        Some(duty)
    }

    pub fn count(&self, duty: DutyType) -> u32 {
        self.counts.get(&duty).copied().unwrap_or(0)
    }
}

/// Planning d'un mois : date -> { type de permanence -> nom d'employé }.
///
/// L'absence d'un type pour une date signifie « non affecté », un résultat
/// valide (aucun candidat éligible ce jour-là).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schedule {
    pub days: BTreeMap<NaiveDate, BTreeMap<DutyType, String>>,
}

impl Schedule {
    /// Crée l'entrée du jour si absente (un jour sans candidat reste visible).
    pub fn ensure_day(&mut self, d: NaiveDate) {
        self.days.entry(d).or_default();
    }

    pub fn assign(&mut self, d: NaiveDate, duty: DutyType, name: String) {
        self.days.entry(d).or_default().insert(duty, name);
    }

    pub fn assignee(&self, d: NaiveDate, duty: DutyType) -> Option<&str> {
        self.days.get(&d)?.get(&duty).map(String::as_str)
    }

    /// Le nom apparaît-il déjà sous un type quelconque ce jour-là ?
    pub fn is_booked(&self, d: NaiveDate, name: &str) -> bool {
        self.days
            .get(&d)
            .map(|rec| rec.values().any(|n| n == name))
            .unwrap_or(false)
    }

    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, &BTreeMap<DutyType, String>)> {
        self.days.iter().map(|(d, rec)| (*d, rec))
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}
