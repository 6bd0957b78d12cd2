//! Synthèse de période : compteurs et points par employé, rendu au choix.

use serde::Serialize;

use crate::model::{DutyType, Employee};

/// Ligne de synthèse d'un employé sur la période écoulée.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryRow {
    pub name: String,
    pub weekday: u32,
    pub thursday: u32,
    pub weekend: u32,
    pub backup: u32,
    pub holiday: u32,
    pub points: f64,
}

impl SummaryRow {
    fn from_employee(e: &Employee) -> Self {
        Self {
            name: e.name.clone(),
            weekday: e.count(DutyType::Weekday),
            thursday: e.count(DutyType::Thursday),
            weekend: e.count(DutyType::Weekend),
            backup: e.count(DutyType::Backup),
            holiday: e.count(DutyType::Holiday),
            points: e.points,
        }
    }
}

/// Construit la synthèse, du plus chargé au moins chargé (nom croissant à
/// points égaux). L'état des employés n'est jamais modifié ici.
pub fn summarize(employees: &[Employee]) -> Vec<SummaryRow> {
    let mut rows: Vec<SummaryRow> = employees.iter().map(SummaryRow::from_employee).collect();
    rows.sort_by(|a, b| b.points.total_cmp(&a.points).then_with(|| a.name.cmp(&b.name)));
    rows
}

/// Permet de customiser le rendu de la synthèse (texte, mail, etc.).
pub trait SummaryRenderer {
    fn render(&self, rows: &[SummaryRow]) -> String;
}

/// Rendu texte tabulé, destiné à la sortie console.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextSummary;

impl SummaryRenderer for TextSummary {
    fn render(&self, rows: &[SummaryRow]) -> String {
        let mut out = String::from("name\tWD\tTh\tWE\tB\tHO\tpoints\n");
        for r in rows {
            out.push_str(&format!(
                "{}\t{}\t{}\t{}\t{}\t{}\t{:.1}\n",
                r.name, r.weekday, r.thursday, r.weekend, r.backup, r.holiday, r.points
            ));
        }
        out
    }
}
