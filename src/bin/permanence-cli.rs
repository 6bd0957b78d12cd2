#![forbid(unsafe_code)]
use anyhow::{bail, Result};
use chrono::{Datelike, NaiveDate};
use clap::{Parser, Subcommand};
use permanence::{
    io,
    model::{BlockedRange, DutyType},
    scheduler::{AssignOptions, ConflictKind, Scheduler},
    storage::{JsonStore, Store},
    summary::{summarize, SummaryRenderer, TextSummary},
    DutyCalendar, Holiday,
};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI de planification de permanences (sans base de données)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Répertoire de données (employees.json, holidays.json, plannings)
    #[arg(long, global = true, default_value = "data")]
    data_dir: String,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Affecter une période : glouton + équilibrage, mois après mois
    Assign {
        #[arg(long)]
        year: i32,
        /// Liste de mois, ex. `--months 7 8 9`
        #[arg(long, num_args = 1.., required = true)]
        months: Vec<u32>,
        /// Export CSV de la synthèse (optionnel)
        #[arg(long)]
        summary_csv: Option<String>,
        #[arg(long, default_value_t = 0.1)]
        tolerance: f64,
        #[arg(long, default_value_t = 50)]
        max_iterations: u32,
    },

    /// Importer des employés depuis un CSV
    ImportEmployees {
        #[arg(long)]
        csv: String,
    },

    /// Lister les employés et leurs contraintes brutes
    ListEmployees,

    /// Exporter un planning mensuel sauvegardé en CSV
    ExportSchedule {
        #[arg(long)]
        year: i32,
        #[arg(long)]
        month: u32,
        #[arg(long)]
        csv: String,
    },

    /// Échanger les titulaires de deux créneaux d'un planning sauvegardé
    Swap {
        #[arg(long)]
        year: i32,
        #[arg(long)]
        month: u32,
        /// Date du premier créneau (YYYY-MM-DD)
        #[arg(long)]
        date_a: String,
        /// Type du premier créneau (WD, Th, WE, B, HO)
        #[arg(long)]
        duty_a: String,
        #[arg(long)]
        date_b: String,
        #[arg(long)]
        duty_b: String,
    },

    /// Vérifier les invariants d'un planning sauvegardé
    Check {
        #[arg(long)]
        year: i32,
        #[arg(long)]
        month: u32,
    },

    /// Ajouter un jour bloqué ou une plage bloquée à un employé
    Block {
        #[arg(long)]
        employee: String,
        /// Jour isolé (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,
        /// Début de plage, bornes incluses
        #[arg(long, requires = "end")]
        start: Option<String>,
        #[arg(long, requires = "start")]
        end: Option<String>,
    },

    /// Ajouter un jour férié
    AddHoliday {
        #[arg(long)]
        name: String,
        #[arg(long)]
        date: String,
        #[arg(long, default_value = "custom")]
        kind: String,
        #[arg(long, default_value = "Israel")]
        country: String,
    },

    /// Retirer un jour férié
    RemoveHoliday {
        #[arg(long)]
        date: String,
    },

    /// Lister les jours fériés, optionnellement filtrés par année
    ListHolidays {
        #[arg(long)]
        year: Option<i32>,
    },
}

fn build_scheduler(store: &JsonStore, opts: AssignOptions) -> Result<Scheduler> {
    let employees = store.load_employees()?;
    let holidays = store.load_holidays()?;
    let company_days = store.load_company_days()?;
    let mut scheduler = Scheduler::new(DutyCalendar::new(holidays, company_days), opts);
    scheduler.add_employees(employees);
    Ok(scheduler)
}

fn parse_date(raw: &str) -> Result<NaiveDate> {
    raw.parse::<NaiveDate>()
        .map_err(|_| anyhow::anyhow!("invalid date: {raw}"))
}

fn parse_duty(raw: &str) -> Result<DutyType> {
    raw.parse::<DutyType>().map_err(anyhow::Error::msg)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let store = JsonStore::open(&cli.data_dir);

    let code = match cli.cmd {
        Commands::Assign {
            year,
            months,
            summary_csv,
            tolerance,
            max_iterations,
        } => {
            let opts = AssignOptions {
                balance_tolerance: tolerance,
                max_balance_iterations: max_iterations,
                ..AssignOptions::default()
            };
            let mut scheduler = build_scheduler(&store, opts)?;
            if scheduler.employees().is_empty() {
                bail!("no employees loaded from {}", cli.data_dir);
            }
            let schedules = scheduler.assign_period(year, &months);
            for &month in &months {
                let Some(schedule) = schedules.get(&format!("{year}-{month:02}")) else {
                    continue;
                };
                let path = store.save_schedule(year, month, schedule)?;
                println!("Saved {}", path.display());
            }
            let rows = summarize(scheduler.employees());
            println!("\n--- SUMMARY (period) ---");
            print!("{}", TextSummary.render(&rows));
            if let Some(path) = summary_csv {
                io::export_summary_csv(path, &rows)?;
            }
            0
        }
        Commands::ImportEmployees { csv } => {
            let employees = io::import_employees_csv(csv)?;
            println!("Imported {} employee(s)", employees.len());
            store.save_employees(&employees)?;
            0
        }
        Commands::ListEmployees => {
            let employees = store.load_employees()?;
            for e in &employees {
                println!(
                    "{} | {} | sabbath={} | {} blocked day(s), {} range(s)",
                    e.name,
                    e.email,
                    e.observes_sabbath,
                    e.blocked_days.len(),
                    e.blocked_ranges.len()
                );
            }
            0
        }
        Commands::ExportSchedule { year, month, csv } => {
            let schedule = store.load_schedule(year, month)?;
            io::export_schedule_csv(csv, &schedule)?;
            0
        }
        Commands::Swap {
            year,
            month,
            date_a,
            duty_a,
            date_b,
            duty_b,
        } => {
            let a = (parse_date(&date_a)?, parse_duty(&duty_a)?);
            let b = (parse_date(&date_b)?, parse_duty(&duty_b)?);
            let mut scheduler = build_scheduler(&store, AssignOptions::default())?;
            let mut schedule = store.load_schedule(year, month)?;
            scheduler.prepare_month(year, month);
            scheduler.replay(&schedule);
            scheduler.swap(&mut schedule, a, b)?;
            store.save_schedule(year, month, &schedule)?;
            println!("Swapped {} {} with {} {}", date_a, duty_a, date_b, duty_b);
            0
        }
        Commands::Check { year, month } => {
            let mut scheduler = build_scheduler(&store, AssignOptions::default())?;
            let schedule = store.load_schedule(year, month)?;
            scheduler.prepare_month(year, month);
            let conflicts = scheduler.detect_conflicts(&schedule);
            if conflicts.is_empty() {
                println!("OK: no conflicts");
                0
            } else {
                for c in &conflicts {
                    eprintln!(
                        "{} | {} | {} | {}",
                        c.date,
                        c.duty,
                        c.name,
                        match c.kind {
                            ConflictKind::DoubleBooking => "double booking",
                            ConflictKind::BlockedDay => "blocked day",
                            ConflictKind::UnknownAssignee => "unknown assignee",
                        }
                    );
                }
                // Code 2 = WARNING/INCOMPLETE
                2
            }
        }
        Commands::Block {
            employee,
            date,
            start,
            end,
        } => {
            let mut employees = store.load_employees()?;
            let Some(target) = employees.iter_mut().find(|e| e.name == employee) else {
                bail!("unknown employee: {employee}");
            };
            match (date, start, end) {
                (Some(d), None, None) => {
                    parse_date(&d)?;
                    if !target.blocked_days.contains(&d) {
                        target.blocked_days.push(d);
                        target.blocked_days.sort();
                    }
                }
                (None, Some(s), Some(e)) => {
                    parse_date(&s)?;
                    parse_date(&e)?;
                    target.blocked_ranges.push(BlockedRange::new(s, e));
                }
                _ => bail!("provide either --date or --start/--end"),
            }
            store.save_employees(&employees)?;
            0
        }
        Commands::AddHoliday {
            name,
            date,
            kind,
            country,
        } => {
            let date = parse_date(&date)?;
            let mut holidays = store.load_holidays()?;
            if !holidays.add(Holiday {
                name: name.clone(),
                date,
                kind,
                country,
            }) {
                bail!("a holiday already exists on {date}");
            }
            store.save_holidays(&holidays)?;
            println!("Added holiday: {name} on {date}");
            0
        }
        Commands::RemoveHoliday { date } => {
            let date = parse_date(&date)?;
            let mut holidays = store.load_holidays()?;
            match holidays.remove(date) {
                Some(h) => {
                    store.save_holidays(&holidays)?;
                    println!("Removed holiday {} on {date}", h.name);
                    0
                }
                None => {
                    eprintln!("No holiday found on {date}");
                    2
                }
            }
        }
        Commands::ListHolidays { year } => {
            let holidays = store.load_holidays()?;
            for h in holidays.to_list() {
                if year.map_or(true, |y| h.date.year() == y) {
                    println!("{} | {} ({})", h.date, h.name, h.kind);
                }
            }
            0
        }
    };

    std::process::exit(code);
}
