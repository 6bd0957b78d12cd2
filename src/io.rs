use crate::model::{BlockedRange, Employee, Schedule};
use crate::summary::SummaryRow;
use anyhow::{bail, Context};
use csv::{ReaderBuilder, WriterBuilder};
use std::path::Path;

/// Import d'employés depuis CSV : header
/// `name,email[,country][,observes_sabbath][,position_percentage][,blocked_days][,blocked_ranges]`.
///
/// `blocked_days` est une liste `;` de dates ISO, `blocked_ranges` une liste
/// `;` de `start..end`. Les dates restent brutes : leur validation relève de
/// la résolution mensuelle, qui ignore les entrées invalides.
pub fn import_employees_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<Employee>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let name = rec.get(0).context("missing name")?.trim();
        let email = rec.get(1).context("missing email")?.trim();
        if name.is_empty() || email.is_empty() {
            bail!("invalid employee row (empty)");
        }
        let mut employee = Employee::new(name, email);
        if let Some(country) = rec.get(2) {
            let country = country.trim();
            if !country.is_empty() {
                employee.country = country.to_string();
            }
        }
        if let Some(flag) = rec.get(3) {
            let flag = flag.trim();
            if !flag.is_empty() {
                employee.observes_sabbath = parse_bool(flag)
                    .with_context(|| format!("invalid observes_sabbath value for {name}"))?;
            }
        }
        if let Some(pct) = rec.get(4) {
            let pct = pct.trim();
            if !pct.is_empty() {
                employee.position_percentage = pct
                    .parse()
                    .with_context(|| format!("invalid position_percentage for {name}"))?;
            }
        }
        if let Some(days) = rec.get(5) {
            employee.blocked_days = split_list(days).map(str::to_string).collect();
        }
        if let Some(ranges) = rec.get(6) {
            employee.blocked_ranges = split_list(ranges).map(parse_range_chunk).collect();
        }
        out.push(employee);
    }
    Ok(out)
}

fn parse_bool(s: &str) -> anyhow::Result<bool> {
    match s.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "y" | "oui" => Ok(true),
        "false" | "0" | "no" | "n" | "non" => Ok(false),
        _ => bail!("expected boolean"),
    }
}

fn split_list(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(';').map(str::trim).filter(|c| !c.is_empty())
}

fn parse_range_chunk(chunk: &str) -> BlockedRange {
    if let Some((start, end)) = chunk.split_once("..") {
        BlockedRange::new(start.trim(), end.trim())
    } else {
        // un jour isolé vaut plage d'un jour
        BlockedRange::new(chunk, chunk)
    }
}

/// Export CSV d'un planning : header `date,duty,employee`, une ligne par
/// créneau affecté.
pub fn export_schedule_csv<P: AsRef<Path>>(path: P, schedule: &Schedule) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record(["date", "duty", "employee"])?;
    for (date, record) in schedule.iter() {
        let date = date.to_string();
        for (duty, name) in record {
            w.write_record([date.as_str(), duty.code(), name.as_str()])?;
        }
    }
    w.flush()?;
    Ok(())
}

/// Export CSV de la synthèse de période.
pub fn export_summary_csv<P: AsRef<Path>>(path: P, rows: &[SummaryRow]) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record(["name", "WD", "Th", "WE", "B", "HO", "points"])?;
    for r in rows {
        w.write_record([
            r.name.as_str(),
            &r.weekday.to_string(),
            &r.thursday.to_string(),
            &r.weekend.to_string(),
            &r.backup.to_string(),
            &r.holiday.to_string(),
            &format!("{:.1}", r.points),
        ])?;
    }
    w.flush()?;
    Ok(())
}
