#![forbid(unsafe_code)]
//! Permanence — moteur d'affectation de permanences avec équilibrage de charge.
//!
//! - Stockage fichiers (JSON/CSV), sans base de données.
//! - Affectation gloutonne pondérée + recherche locale de ré-équilibrage.
//! - Contraintes d'indisponibilité (jours, plages, Shabbat) par mois cible.
//! - État de charge continu sur une période multi-mois.

pub mod availability;
pub mod calendar;
pub mod io;
pub mod model;
pub mod scheduler;
pub mod storage;
pub mod summary;

pub use calendar::{iter_month, DutyCalendar, Holiday, HolidayCalendar};
pub use model::{BlockedRange, DutyType, Employee, Schedule};
pub use scheduler::{AssignOptions, Conflict, ConflictKind, SchedError, Scheduler};
pub use storage::{JsonStore, Store};
pub use summary::{summarize, SummaryRenderer, SummaryRow, TextSummary};
