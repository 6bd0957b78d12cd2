use super::{Conflict, ConflictKind, Scheduler};
use crate::model::Schedule;

/// Vérifie les invariants d'un planning : pas de double affectation le même
/// jour, pas d'affectation sur un jour bloqué, pas de nom hors roster.
///
/// Le contrôle des jours bloqués s'appuie sur le jeu dérivé courant de chaque
/// employé ; préparer le mois du planning avant l'appel.
pub(super) fn detect_conflicts(scheduler: &Scheduler, schedule: &Schedule) -> Vec<Conflict> {
    let mut out = Vec::new();

    for (date, record) in schedule.iter() {
        for (&duty, name) in record {
            let dupes = record.values().filter(|n| *n == name).count();
            if dupes > 1 {
                out.push(Conflict {
                    name: name.clone(),
                    date,
                    duty,
                    kind: ConflictKind::DoubleBooking,
                });
            }

            match scheduler.employee_index(name) {
                None => out.push(Conflict {
                    name: name.clone(),
                    date,
                    duty,
                    kind: ConflictKind::UnknownAssignee,
                }),
                Some(idx) => {
                    if scheduler.employees[idx].blocked.contains(&date) {
                        out.push(Conflict {
                            name: name.clone(),
                            date,
                            duty,
                            kind: ConflictKind::BlockedDay,
                        });
                    }
                }
            }
        }
    }

    out
}
