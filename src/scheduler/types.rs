use crate::model::DutyType;
use chrono::NaiveDate;
use thiserror::Error;

/// Options d'assignation et d'équilibrage
#[derive(Debug, Clone, Copy)]
pub struct AssignOptions {
    /// Écart de points en deçà duquel deux charges sont « équivalentes ».
    pub balance_tolerance: f64,
    /// Plafond d'itérations de la recherche locale (garantie de terminaison).
    pub max_balance_iterations: u32,
    /// Seuil de compensation : ratio de disponibilité sous `floor × moyenne`.
    pub availability_floor: f64,
}

impl Default for AssignOptions {
    fn default() -> Self {
        Self {
            balance_tolerance: 0.1,
            max_balance_iterations: 50,
            availability_floor: 0.8,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictKind {
    /// Même nom sous deux types de permanence le même jour.
    DoubleBooking,
    /// Affectation sur un jour bloqué de l'employé.
    BlockedDay,
    /// Nom présent dans le planning mais absent du roster.
    UnknownAssignee,
}

/// Violation d'invariant détectée dans un planning.
#[derive(Debug, Clone)]
pub struct Conflict {
    pub name: String,
    pub date: NaiveDate,
    pub duty: DutyType,
    pub kind: ConflictKind,
}

#[derive(Error, Debug)]
pub enum SchedError {
    #[error("unknown employee: {0}")]
    UnknownEmployee(String),
    #[error("no {duty} assignment on {date}")]
    SlotEmpty { date: NaiveDate, duty: DutyType },
    #[error("swap invalid: {0}")]
    SwapInvalid(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
