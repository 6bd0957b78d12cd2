use crate::calendar::{Holiday, HolidayCalendar};
use crate::model::{Employee, Schedule};
use anyhow::Context;
use chrono::NaiveDate;
use std::collections::BTreeSet;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub trait Store {
    /// Charge le roster ; un fichier absent vaut roster vide.
    fn load_employees(&self) -> anyhow::Result<Vec<Employee>>;
    /// Réécrit le roster (gestion des jours bloqués côté CLI).
    fn save_employees(&self, employees: &[Employee]) -> anyhow::Result<()>;
    /// Charge les jours fériés ; un fichier absent vaut calendrier vide.
    fn load_holidays(&self) -> anyhow::Result<HolidayCalendar>;
    fn save_holidays(&self, holidays: &HolidayCalendar) -> anyhow::Result<()>;
    /// Journées entreprise désignées (optionnel).
    fn load_company_days(&self) -> anyhow::Result<BTreeSet<NaiveDate>>;
    /// Sauvegarde atomique d'un planning mensuel ; renvoie le chemin écrit.
    fn save_schedule(&self, year: i32, month: u32, schedule: &Schedule)
        -> anyhow::Result<PathBuf>;
    fn load_schedule(&self, year: i32, month: u32) -> anyhow::Result<Schedule>;
}

/// Stockage JSON sous un répertoire de données, sans base de données.
pub struct JsonStore {
    data_dir: PathBuf,
}

impl JsonStore {
    pub fn open<P: AsRef<Path>>(data_dir: P) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
        }
    }

    fn employees_path(&self) -> PathBuf {
        self.data_dir.join("employees.json")
    }

    fn holidays_path(&self) -> PathBuf {
        self.data_dir.join("holidays.json")
    }

    fn company_days_path(&self) -> PathBuf {
        self.data_dir.join("company_days.json")
    }

    fn schedule_path(&self, year: i32, month: u32) -> PathBuf {
        self.data_dir.join(format!("schedule_{year}-{month:02}.json"))
    }

    fn write_atomic(&self, path: &Path, json: &[u8]) -> anyhow::Result<()> {
        fs::create_dir_all(&self.data_dir)
            .with_context(|| format!("creating {}", self.data_dir.display()))?;
        let mut tmp = NamedTempFile::new_in(&self.data_dir).with_context(|| "creating temp file")?;
        tmp.write_all(json)?;
        tmp.flush()?;
        tmp.as_file().sync_all()?;
        tmp.persist(path).with_context(|| "atomic rename")?;
        Ok(())
    }
}

impl Store for JsonStore {
    fn load_employees(&self) -> anyhow::Result<Vec<Employee>> {
        let path = self.employees_path();
        if !path.exists() {
            return Ok(Vec::new());
        }
        let data = fs::read(&path).with_context(|| format!("reading {}", path.display()))?;
        let employees: Vec<Employee> =
            serde_json::from_slice(&data).with_context(|| "parsing employees.json")?;
        Ok(employees)
    }

    fn save_employees(&self, employees: &[Employee]) -> anyhow::Result<()> {
        let json = serde_json::to_vec_pretty(employees)?;
        self.write_atomic(&self.employees_path(), &json)
    }

    fn load_holidays(&self) -> anyhow::Result<HolidayCalendar> {
        let path = self.holidays_path();
        if !path.exists() {
            return Ok(HolidayCalendar::default());
        }
        let data = fs::read(&path).with_context(|| format!("reading {}", path.display()))?;
        let list: Vec<Holiday> =
            serde_json::from_slice(&data).with_context(|| "parsing holidays.json")?;
        Ok(HolidayCalendar::from_list(list))
    }

    fn save_holidays(&self, holidays: &HolidayCalendar) -> anyhow::Result<()> {
        let json = serde_json::to_vec_pretty(&holidays.to_list())?;
        self.write_atomic(&self.holidays_path(), &json)
    }

    fn load_company_days(&self) -> anyhow::Result<BTreeSet<NaiveDate>> {
        let path = self.company_days_path();
        if !path.exists() {
            return Ok(BTreeSet::new());
        }
        let data = fs::read(&path).with_context(|| format!("reading {}", path.display()))?;
        let days: BTreeSet<NaiveDate> =
            serde_json::from_slice(&data).with_context(|| "parsing company_days.json")?;
        Ok(days)
    }

    fn save_schedule(
        &self,
        year: i32,
        month: u32,
        schedule: &Schedule,
    ) -> anyhow::Result<PathBuf> {
        let path = self.schedule_path(year, month);
        let json = serde_json::to_vec_pretty(schedule)?;
        self.write_atomic(&path, &json)?;
        Ok(path)
    }

    fn load_schedule(&self, year: i32, month: u32) -> anyhow::Result<Schedule> {
        let path = self.schedule_path(year, month);
        let data = fs::read(&path).with_context(|| format!("reading {}", path.display()))?;
        let schedule: Schedule =
            serde_json::from_slice(&data).with_context(|| "parsing schedule json")?;
        Ok(schedule)
    }
}
