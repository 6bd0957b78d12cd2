#![forbid(unsafe_code)]
use chrono::NaiveDate;
use permanence::{
    AssignOptions, BlockedRange, DutyCalendar, DutyType, Employee, Holiday, HolidayCalendar,
    Schedule, Scheduler,
};

fn d(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

/// SSE des points, recomputée de l'extérieur.
fn sse(scheduler: &Scheduler) -> f64 {
    let loads: Vec<f64> = scheduler.employees().iter().map(|e| e.points).collect();
    let mean = loads.iter().sum::<f64>() / loads.len() as f64;
    loads.iter().map(|p| (p - mean) * (p - mean)).sum()
}

/// Roster de trois employés dont un indisponible vingt jours : le glouton
/// produit un déséquilibre que la phase d'équilibrage doit résorber.
fn skewed_scheduler() -> Scheduler {
    let mut s = Scheduler::new(DutyCalendar::default(), AssignOptions::default());
    let mut amir = Employee::new("Amir", "amir@example.com");
    amir.blocked_ranges = vec![BlockedRange::new("2025-09-01", "2025-09-20")];
    s.add_employees(vec![
        amir,
        Employee::new("Bea", "bea@example.com"),
        Employee::new("Carl", "carl@example.com"),
    ]);
    s
}

#[test]
fn variance_never_increases() {
    let mut s = skewed_scheduler();
    let mut schedule = s.assign_month(2025, 9);
    let before = sse(&s);
    s.optimize(&mut schedule, 2025, 9);
    let after = sse(&s);
    assert!(after <= before + 1e-9, "before={before} after={after}");
}

#[test]
fn invariants_hold_after_balancing() {
    let mut s = skewed_scheduler();
    let mut schedule = s.assign_month(2025, 9);
    s.optimize(&mut schedule, 2025, 9);

    assert!(s.detect_conflicts(&schedule).is_empty());

    // conservation des poids : points == somme des poids affectés
    for e in s.employees() {
        let expected: f64 = e.assignments.values().map(|t| t.weight()).sum();
        assert!((e.points - expected).abs() < 1e-9, "{}", e.name);
    }
}

#[test]
fn both_phases_classify_dates_identically() {
    let holidays = HolidayCalendar::from_list(vec![Holiday {
        name: "Rosh Hashana".to_string(),
        date: d("2025-09-23"),
        kind: "religious".to_string(),
        country: "Israel".to_string(),
    }]);
    let mut s = Scheduler::new(
        DutyCalendar::new(holidays, []),
        AssignOptions::default(),
    );
    let mut amir = Employee::new("Amir", "amir@example.com");
    amir.blocked_ranges = vec![BlockedRange::new("2025-09-01", "2025-09-15")];
    s.add_employees(vec![
        amir,
        Employee::new("Bea", "bea@example.com"),
        Employee::new("Carl", "carl@example.com"),
    ]);

    let mut schedule = s.assign_month(2025, 9);
    s.optimize(&mut schedule, 2025, 9);

    // après les deux phases, chaque créneau porte toujours le type que la
    // règle de classification donne pour sa date ; le renfort n'existe que
    // les jours classés week-end
    for (date, record) in schedule.iter() {
        let expected = s.calendar().classify(date);
        for (&duty, _) in record {
            if duty == DutyType::Backup {
                assert_eq!(expected, DutyType::Weekend, "{date}");
            } else {
                assert_eq!(duty, expected, "{date}");
            }
        }
    }
    assert!(schedule.assignee(d("2025-09-23"), DutyType::Holiday).is_some());
}

#[test]
fn balancing_moves_load_toward_the_underloaded() {
    // Frank est libre en première quinzaine seulement : le glouton le laisse
    // loin derrière, l'équilibrage doit lui re-céder des permanences tenues
    // par les autres sur des jours où il reste éligible.
    let mut s = Scheduler::new(DutyCalendar::default(), AssignOptions::default());
    let mut frank = Employee::new("Frank", "frank@example.com");
    frank.blocked_ranges = vec![BlockedRange::new("2025-09-15", "2025-09-30")];
    s.add_employees(vec![
        Employee::new("Bea", "bea@example.com"),
        Employee::new("Carl", "carl@example.com"),
        frank,
    ]);

    let mut schedule = s.assign_month(2025, 9);
    let before_sse = sse(&s);
    let frank_before = s
        .employees()
        .iter()
        .find(|e| e.name == "Frank")
        .unwrap()
        .points;

    s.optimize(&mut schedule, 2025, 9);

    let frank_after = s
        .employees()
        .iter()
        .find(|e| e.name == "Frank")
        .unwrap()
        .points;
    assert!(frank_after > frank_before, "{frank_before} -> {frank_after}");
    assert!(sse(&s) < before_sse);
    assert!(s.detect_conflicts(&schedule).is_empty());
}

#[test]
fn balancing_is_a_noop_for_tiny_rosters() {
    let mut s = Scheduler::new(DutyCalendar::default(), AssignOptions::default());
    s.add_employees(vec![Employee::new("Eve", "eve@example.com")]);
    let mut schedule = s.assign_month(2025, 9);
    let before = schedule.clone();
    s.optimize(&mut schedule, 2025, 9);
    assert_eq!(schedule, before);
}

#[test]
fn balancing_an_empty_schedule_terminates() {
    let mut s = skewed_scheduler();
    let mut schedule = Schedule::default();
    s.prepare_month(2025, 9);
    s.optimize(&mut schedule, 2025, 9);
    assert!(schedule.is_empty());
}
