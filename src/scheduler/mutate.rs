use super::{SchedError, Scheduler};
use crate::model::{DutyType, Schedule};
use chrono::NaiveDate;

/// Échange les titulaires de deux créneaux `(date, type)` d'un planning.
///
/// Refusé si l'un des créneaux est vide, si l'échange ferait apparaître un
/// employé deux fois le même jour, ou si la date d'arrivée est bloquée pour
/// l'employé déplacé. L'état d'exécution (points, compteurs) est ajusté ; il
/// doit être cohérent avec le planning avant l'appel (voir
/// [`Scheduler::replay`](super::Scheduler::replay)).
pub(super) fn swap(
    scheduler: &mut Scheduler,
    schedule: &mut Schedule,
    a: (NaiveDate, DutyType),
    b: (NaiveDate, DutyType),
) -> Result<(), SchedError> {
    let (date_a, duty_a) = a;
    let (date_b, duty_b) = b;
    if (date_a, duty_a) == (date_b, duty_b) {
        return Err(SchedError::SwapInvalid("identical slots".to_string()));
    }

    let name_a = schedule
        .assignee(date_a, duty_a)
        .ok_or(SchedError::SlotEmpty {
            date: date_a,
            duty: duty_a,
        })?
        .to_string();
    let name_b = schedule
        .assignee(date_b, duty_b)
        .ok_or(SchedError::SlotEmpty {
            date: date_b,
            duty: duty_b,
        })?
        .to_string();

    if name_a == name_b {
        return Err(SchedError::SwapInvalid(format!(
            "both slots are held by {name_a}"
        )));
    }

    let idx_a = scheduler
        .employee_index(&name_a)
        .ok_or_else(|| SchedError::UnknownEmployee(name_a.clone()))?;
    let idx_b = scheduler
        .employee_index(&name_b)
        .ok_or_else(|| SchedError::UnknownEmployee(name_b.clone()))?;

    // échange intra-journée : les deux restent affectés une seule fois ce
    // jour-là, les contrôles croisés ne s'appliquent pas
    if date_a != date_b {
        if schedule.is_booked(date_a, &name_b) {
            return Err(SchedError::SwapInvalid(format!(
                "{name_b} already assigned on {date_a}"
            )));
        }
        if schedule.is_booked(date_b, &name_a) {
            return Err(SchedError::SwapInvalid(format!(
                "{name_a} already assigned on {date_b}"
            )));
        }
        if scheduler.employees[idx_b].blocked.contains(&date_a) {
            return Err(SchedError::SwapInvalid(format!(
                "{name_b} is blocked on {date_a}"
            )));
        }
        if scheduler.employees[idx_a].blocked.contains(&date_b) {
            return Err(SchedError::SwapInvalid(format!(
                "{name_a} is blocked on {date_b}"
            )));
        }
    }

    scheduler.employees[idx_a].remove_assignment(date_a);
    scheduler.employees[idx_b].remove_assignment(date_b);
    scheduler.employees[idx_a].add_assignment(date_b, duty_b);
    scheduler.employees[idx_b].add_assignment(date_a, duty_a);

    schedule.assign(date_a, duty_a, name_b);
    schedule.assign(date_b, duty_b, name_a);
    Ok(())
}
