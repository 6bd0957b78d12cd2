use super::{util, Scheduler};
use crate::calendar::iter_month;
use crate::model::{DutyType, Schedule};
use chrono::NaiveDate;
use tracing::debug;

/// Phase gloutonne : parcourt les dates du mois dans l'ordre et affecte la
/// permanence du jour (plus un renfort le week-end) au candidat éligible le
/// moins chargé. Un jour sans candidat reste non affecté, pas une erreur.
pub(super) fn assign_month(scheduler: &mut Scheduler, year: i32, month: u32) -> Schedule {
    let mut out = Schedule::default();
    if scheduler.employees.is_empty() {
        return out;
    }

    for d in iter_month(year, month) {
        out.ensure_day(d);

        let duty = scheduler.calendar.classify(d);
        let Some(primary) = pick(scheduler, d, duty.weight()) else {
            debug!(date = %d, %duty, "no eligible employee, slot left unassigned");
            continue;
        };
        record(scheduler, &mut out, d, duty, primary);

        // renfort uniquement les jours classés week-end ; le titulaire vient
        // d'être affecté sur `d`, il n'est donc plus éligible
        if duty == DutyType::Weekend {
            if let Some(backup) = pick(scheduler, d, DutyType::Backup.weight()) {
                record(scheduler, &mut out, d, DutyType::Backup, backup);
            }
        }
    }

    out
}

fn pick(scheduler: &Scheduler, d: NaiveDate, weight: f64) -> Option<usize> {
    let candidates: Vec<usize> = scheduler
        .employees
        .iter()
        .enumerate()
        .filter(|(_, e)| e.is_available(d))
        .map(|(i, _)| i)
        .collect();
    util::select_candidate(
        &scheduler.employees,
        &candidates,
        weight,
        scheduler.opts.balance_tolerance,
    )
}

fn record(scheduler: &mut Scheduler, out: &mut Schedule, d: NaiveDate, duty: DutyType, idx: usize) {
    let name = scheduler.employees[idx].name.clone();
    scheduler.employees[idx].add_assignment(d, duty);
    out.assign(d, duty, name);
}
