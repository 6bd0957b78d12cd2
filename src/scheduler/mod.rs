mod assignment;
mod balance;
mod conflicts;
mod mutate;
mod types;
mod util;

pub use types::{AssignOptions, Conflict, ConflictKind, SchedError};

use crate::calendar::{iter_month, DutyCalendar};
use crate::model::{DutyType, Employee, Schedule};
use chrono::NaiveDate;
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Scheduler : encapsule le roster et son état de charge pour une période.
///
/// Une période enchaîne plusieurs mois sur le même état : les points
/// s'accumulent de mois en mois et ne sont remis à zéro qu'en début de
/// période. Le calcul est strictement séquentiel, un seul fil de mutation.
#[derive(Debug, Default)]
pub struct Scheduler {
    employees: Vec<Employee>,
    calendar: DutyCalendar,
    opts: AssignOptions,
}

impl Scheduler {
    pub fn new(calendar: DutyCalendar, opts: AssignOptions) -> Self {
        Self {
            employees: Vec::new(),
            calendar,
            opts,
        }
    }

    pub fn add_employees(&mut self, employees: Vec<Employee>) {
        self.employees.extend(employees);
    }

    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub fn employees_mut(&mut self) -> &mut [Employee] {
        &mut self.employees
    }

    pub fn calendar(&self) -> &DutyCalendar {
        &self.calendar
    }

    pub fn options(&self) -> AssignOptions {
        self.opts
    }

    pub(crate) fn employee_index(&self, name: &str) -> Option<usize> {
        self.employees.iter().position(|e| e.name == name)
    }

    /// Remet l'état d'exécution de tout le roster à zéro (début de période).
    pub fn reset_runtime(&mut self) {
        for e in &mut self.employees {
            e.reset_runtime();
        }
    }

    /// Re-dérive les jours bloqués de tout le roster pour `(year, month)`.
    pub fn prepare_month(&mut self, year: i32, month: u32) {
        for e in &mut self.employees {
            e.prepare_for_month(year, month);
        }
    }

    /// Phase gloutonne sur un mois.
    ///
    /// Re-dérive d'abord les jours bloqués du mois ; les points accumulés ne
    /// sont pas remis à zéro. Un roster vide produit un planning vide.
    pub fn assign_month(&mut self, year: i32, month: u32) -> Schedule {
        self.prepare_month(year, month);
        assignment::assign_month(self, year, month)
    }

    /// Phase d'équilibrage sur le résultat glouton du même mois.
    pub fn optimize(&mut self, schedule: &mut Schedule, year: i32, month: u32) {
        balance::optimize(self, schedule, year, month);
    }

    /// Orchestration de période : remise à zéro, compensation de
    /// disponibilité, puis glouton + équilibrage mois après mois sur un état
    /// de charge continu. Clés de sortie au format `YYYY-MM`.
    pub fn assign_period(&mut self, year: i32, months: &[u32]) -> BTreeMap<String, Schedule> {
        self.reset_runtime();
        self.apply_availability_credit(year, months);

        let mut out = BTreeMap::new();
        for &month in months {
            let mut schedule = self.assign_month(year, month);
            self.optimize(&mut schedule, year, month);
            info!(year, month, days = schedule.days.len(), "month assigned");
            out.insert(format!("{year}-{month:02}"), schedule);
        }
        out
    }

    /// Échange manuel des titulaires de deux créneaux `(date, type)`.
    pub fn swap(
        &mut self,
        schedule: &mut Schedule,
        a: (NaiveDate, DutyType),
        b: (NaiveDate, DutyType),
    ) -> Result<(), SchedError> {
        mutate::swap(self, schedule, a, b)
    }

    /// Contrôle des invariants d'un planning.
    pub fn detect_conflicts(&self, schedule: &Schedule) -> Vec<Conflict> {
        conflicts::detect_conflicts(self, schedule)
    }

    /// Reconstruit l'état d'exécution depuis un planning persisté (les noms
    /// hors roster sont ignorés). Nécessaire avant un échange manuel sur un
    /// planning rechargé.
    pub fn replay(&mut self, schedule: &Schedule) {
        for (date, record) in schedule.iter() {
            for (&duty, name) in record {
                if let Some(idx) = self.employee_index(name) {
                    self.employees[idx].add_assignment(date, duty);
                }
            }
        }
    }

    /// Compensation unique de début de période : un employé dont le ratio de
    /// disponibilité (jours libres ÷ jours de la période) tombe sous
    /// `availability_floor × moyenne` démarre avec un crédit de points égal à
    /// sa part estimée de permanences manquées,
    /// `(moyenne − ratio) × jours ÷ effectif`.
    fn apply_availability_credit(&mut self, year: i32, months: &[u32]) {
        let n = self.employees.len();
        if n == 0 {
            return;
        }

        let mut total_days = 0usize;
        let mut free = vec![0usize; n];
        for &month in months {
            self.prepare_month(year, month);
            for d in iter_month(year, month) {
                total_days += 1;
                for (i, e) in self.employees.iter().enumerate() {
                    if !e.blocked.contains(&d) {
                        free[i] += 1;
                    }
                }
            }
        }
        if total_days == 0 {
            return;
        }

        let ratios: Vec<f64> = free
            .iter()
            .map(|&f| f as f64 / total_days as f64)
            .collect();
        let mean = ratios.iter().sum::<f64>() / n as f64;
        let floor = mean * self.opts.availability_floor;

        for (i, &ratio) in ratios.iter().enumerate() {
            if ratio < floor {
                let credit = (mean - ratio) * total_days as f64 / n as f64;
                debug!(
                    name = %self.employees[i].name,
                    ratio,
                    mean,
                    credit,
                    "availability credit applied"
                );
                self.employees[i].points -= credit;
            }
        }
    }
}
