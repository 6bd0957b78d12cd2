use super::{util, Scheduler};
use crate::model::{DutyType, Employee, Schedule};
use chrono::{Datelike, NaiveDate};
use tracing::debug;

/// Phase d'équilibrage : recherche locale bornée sur le résultat glouton.
///
/// Raisonne sur la charge locale au mois (somme des poids des permanences du
/// mois cible, indépendamment du report des mois précédents) et déplace une
/// permanence à la fois d'un employé surchargé vers un sous-chargé tant que
/// la SSE décroît strictement. La variance locale ne croît jamais ; le
/// plafond d'itérations borne la terminaison.
pub(super) fn optimize(scheduler: &mut Scheduler, schedule: &mut Schedule, year: i32, month: u32) {
    if scheduler.employees.len() < 2 {
        return;
    }

    for _ in 0..scheduler.opts.max_balance_iterations {
        let local: Vec<f64> = scheduler
            .employees
            .iter()
            .map(|e| month_load(e, year, month))
            .collect();

        let Some((over, under)) = split_loads(scheduler, &local) else {
            break; // optimum local atteint
        };

        let current = util::sse(&local);
        let best = best_move(scheduler, &local, &over, &under, year, month);
        match best {
            Some(mv) if mv.sse < current => apply_move(scheduler, schedule, mv),
            _ => break,
        }
    }
}

/// Charge du mois cible : somme des poids des permanences tenues ce mois-ci.
fn month_load(e: &Employee, year: i32, month: u32) -> f64 {
    e.assignments
        .iter()
        .filter(|(d, _)| d.year() == year && d.month() == month)
        .map(|(_, t)| t.weight())
        .sum()
}

struct Move {
    from: usize,
    to: usize,
    date: NaiveDate,
    duty: DutyType,
    sse: f64,
}

/// Classe les employés en surchargés / sous-chargés autour de la moyenne
/// locale. Si un des deux camps est vide, retente avec tolérance ÷ 3.
fn split_loads(scheduler: &Scheduler, local: &[f64]) -> Option<(Vec<usize>, Vec<usize>)> {
    let mean = local.iter().sum::<f64>() / local.len() as f64;
    let tol = scheduler.opts.balance_tolerance;

    for tolerance in [tol, tol / 3.0] {
        let mut over: Vec<usize> = (0..local.len())
            .filter(|&i| local[i] > mean + tolerance)
            .collect();
        let mut under: Vec<usize> = (0..local.len())
            .filter(|&i| local[i] < mean - tolerance)
            .collect();
        if over.is_empty() || under.is_empty() {
            continue;
        }
        // du plus surchargé au moins surchargé, et inversement ; nom croissant
        // à égalité pour rester déterministe
        over.sort_by(|&a, &b| {
            local[b]
                .total_cmp(&local[a])
                .then_with(|| scheduler.employees[a].name.cmp(&scheduler.employees[b].name))
        });
        under.sort_by(|&a, &b| {
            local[a]
                .total_cmp(&local[b])
                .then_with(|| scheduler.employees[a].name.cmp(&scheduler.employees[b].name))
        });
        return Some((over, under));
    }
    None
}

/// Meilleur déplacement faisable d'une permanence du mois, au sens de la SSE
/// simulée. Les permanences les plus lourdes sont examinées d'abord.
fn best_move(
    scheduler: &Scheduler,
    local: &[f64],
    over: &[usize],
    under: &[usize],
    year: i32,
    month: u32,
) -> Option<Move> {
    let mut best: Option<Move> = None;

    for &from in over {
        let mut holdings: Vec<(NaiveDate, DutyType)> = scheduler.employees[from]
            .assignments
            .iter()
            .filter(|(d, _)| d.year() == year && d.month() == month)
            .map(|(&d, &t)| (d, t))
            .collect();
        holdings.sort_by(|a, b| b.1.weight().total_cmp(&a.1.weight()).then(a.0.cmp(&b.0)));

        for (date, duty) in holdings {
            for &to in under {
                if !scheduler.employees[to].is_available(date) {
                    continue;
                }
                let sse = util::simulated_move_sse(local, from, to, duty.weight());
                if best.as_ref().map_or(true, |b| sse < b.sse) {
                    best = Some(Move {
                        from,
                        to,
                        date,
                        duty,
                        sse,
                    });
                }
            }
        }
    }

    best
}

fn apply_move(scheduler: &mut Scheduler, schedule: &mut Schedule, mv: Move) {
    let target = scheduler.employees[mv.to].name.clone();
    debug!(
        date = %mv.date,
        duty = %mv.duty,
        from = %scheduler.employees[mv.from].name,
        to = %target,
        "rebalancing move"
    );
    scheduler.employees[mv.from].remove_assignment(mv.date);
    scheduler.employees[mv.to].add_assignment(mv.date, mv.duty);
    schedule.assign(mv.date, mv.duty, target);
}
