use crate::model::Employee;

/// Somme des carrés des écarts à la moyenne (l'objectif minimisé).
pub(super) fn sse(loads: &[f64]) -> f64 {
    if loads.is_empty() {
        return 0.0;
    }
    let mean = loads.iter().sum::<f64>() / loads.len() as f64;
    loads.iter().map(|p| (p - mean) * (p - mean)).sum()
}

/// SSE simulée si la charge de `candidate` augmente de `delta`.
pub(super) fn simulated_sse(loads: &[f64], candidate: usize, delta: f64) -> f64 {
    let mut tmp = loads.to_vec();
    tmp[candidate] += delta;
    sse(&tmp)
}

/// SSE simulée si une permanence de poids `weight` passe de `from` à `to`.
pub(super) fn simulated_move_sse(loads: &[f64], from: usize, to: usize, weight: f64) -> f64 {
    let mut tmp = loads.to_vec();
    tmp[from] -= weight;
    tmp[to] += weight;
    sse(&tmp)
}

/// Sélectionne parmi `candidates` (indices dans `employees`) le moins chargé.
///
/// Les candidats à `tolerance` près du minimum forment l'ensemble
/// quasi-minimal ; s'ils sont plusieurs, celui dont l'affectation simulée
/// minimise la SSE de la population l'emporte, à nom croissant en cas
/// d'égalité stricte.
pub(super) fn select_candidate(
    employees: &[Employee],
    candidates: &[usize],
    weight: f64,
    tolerance: f64,
) -> Option<usize> {
    let min = candidates
        .iter()
        .map(|&i| employees[i].points)
        .fold(f64::INFINITY, f64::min);
    if !min.is_finite() {
        return None;
    }

    let near: Vec<usize> = candidates
        .iter()
        .copied()
        .filter(|&i| employees[i].points - min <= tolerance)
        .collect();
    if near.len() == 1 {
        return Some(near[0]);
    }

    let loads: Vec<f64> = employees.iter().map(|e| e.points).collect();
    near.into_iter().min_by(|&a, &b| {
        simulated_sse(&loads, a, weight)
            .total_cmp(&simulated_sse(&loads, b, weight))
            .then_with(|| employees[a].name.cmp(&employees[b].name))
    })
}
