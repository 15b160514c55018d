//! CSV-based table loader
//!
//! Loads the investment-linked projection tables from CSV files in
//! data/tables/. Premium rate tables are built in.

use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;
use std::str::FromStr;

use crate::error::TableError;

/// Default path to the tables directory
pub const DEFAULT_TABLES_PATH: &str = "data/tables";

/// Read every record of `file_name` under `dir`
fn read_records(dir: &Path, file_name: &str) -> Result<Vec<csv::StringRecord>, TableError> {
    let file = File::open(dir.join(file_name)).map_err(|source| TableError::Io {
        file: file_name.to_string(),
        source,
    })?;
    let mut reader = csv::Reader::from_reader(file);

    let records = reader
        .records()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|source| TableError::Csv {
            file: file_name.to_string(),
            source,
        })?;

    if records.is_empty() {
        return Err(TableError::Empty(file_name.to_string()));
    }
    Ok(records)
}

/// Parse column `idx` of a record; `line` is 1-based and counts the header
fn field<T: FromStr>(file_name: &str, line: usize, record: &csv::StringRecord, idx: usize) -> Result<T, TableError>
where
    T::Err: std::fmt::Display,
{
    let parse_err = |message: String| TableError::Parse {
        file: file_name.to_string(),
        line,
        message,
    };
    let raw = record
        .get(idx)
        .ok_or_else(|| parse_err(format!("missing column {idx}")))?;
    raw.trim()
        .parse()
        .map_err(|e: T::Err| parse_err(format!("column {idx} '{raw}': {e}")))
}

/// Load cost-of-insurance rates
/// Returns Vec<(female, male)> indexed by age
pub fn load_coi_rates(path: &Path) -> Result<Vec<(f64, f64)>, TableError> {
    const FILE: &str = "coi_rates.csv";
    let mut rates = Vec::new();

    for (i, record) in read_records(path, FILE)?.iter().enumerate() {
        let line = i + 2;
        let age: usize = field(FILE, line, record, 0)?;
        let female: f64 = field(FILE, line, record, 1)?;
        let male: f64 = field(FILE, line, record, 2)?;

        if age >= rates.len() {
            rates.resize(age + 1, (0.0, 0.0));
        }
        rates[age] = (female, male);
    }

    Ok(rates)
}

/// Load guaranteed interest rates
/// Returns Vec<f64> indexed by policy year (1-indexed in file)
pub fn load_guaranteed_rates(path: &Path) -> Result<Vec<f64>, TableError> {
    const FILE: &str = "guaranteed_rates.csv";
    let mut rates = Vec::new();

    for (i, record) in read_records(path, FILE)?.iter().enumerate() {
        let line = i + 2;
        let year: usize = field(FILE, line, record, 0)?;
        let rate: f64 = field(FILE, line, record, 1)?;

        if year == 0 {
            return Err(TableError::Parse {
                file: FILE.to_string(),
                line,
                message: "policy years start at 1".to_string(),
            });
        }
        if year > rates.len() {
            rates.resize(year, rate);
        }
        rates[year - 1] = rate;
    }

    Ok(rates)
}

/// Load initial fee rates
/// Returns Vec<(base, extra)> indexed by policy year (1-indexed in file)
pub fn load_initial_fees(path: &Path) -> Result<Vec<(f64, f64)>, TableError> {
    const FILE: &str = "initial_fees.csv";
    let mut rows = Vec::new();

    for (i, record) in read_records(path, FILE)?.iter().enumerate() {
        let line = i + 2;
        let year: usize = field(FILE, line, record, 0)?;
        let base: f64 = field(FILE, line, record, 1)?;
        let extra: f64 = field(FILE, line, record, 2)?;

        if year == 0 {
            return Err(TableError::Parse {
                file: FILE.to_string(),
                line,
                message: "policy years start at 1".to_string(),
            });
        }
        if year > rows.len() {
            rows.resize(year, (base, extra));
        }
        rows[year - 1] = (base, extra);
    }

    Ok(rows)
}

/// Load monthly admin fees
/// Returns (fee by calendar year, default fee). The `default` row is required.
pub fn load_admin_fees(path: &Path) -> Result<(BTreeMap<i32, f64>, f64), TableError> {
    const FILE: &str = "admin_fees.csv";
    let mut fees = BTreeMap::new();
    let mut default_fee = None;

    for (i, record) in read_records(path, FILE)?.iter().enumerate() {
        let line = i + 2;
        let fee: f64 = field(FILE, line, record, 1)?;
        if record.get(0).map(str::trim) == Some("default") {
            default_fee = Some(fee);
        } else {
            let year: i32 = field(FILE, line, record, 0)?;
            fees.insert(year, fee);
        }
    }

    let default_fee = default_fee.ok_or_else(|| TableError::Parse {
        file: FILE.to_string(),
        line: 0,
        message: "no 'default' row".to_string(),
    })?;
    Ok((fees, default_fee))
}

/// Load persistency bonus rates
/// Returns (periodic `(from, to, rate)` rows, milestone `(year, rate)` rows)
pub fn load_persistency_bonus(path: &Path) -> Result<(Vec<(u32, u32, f64)>, Vec<(u32, f64)>), TableError> {
    const FILE: &str = "persistency_bonus.csv";
    let mut periodic = Vec::new();
    let mut milestones = Vec::new();

    for (i, record) in read_records(path, FILE)?.iter().enumerate() {
        let line = i + 2;
        let kind: String = field(FILE, line, record, 0)?;
        let from: u32 = field(FILE, line, record, 1)?;
        let to: u32 = field(FILE, line, record, 2)?;
        let rate: f64 = field(FILE, line, record, 3)?;

        match kind.as_str() {
            "periodic" => periodic.push((from, to, rate)),
            "milestone" => milestones.push((from, rate)),
            other => {
                return Err(TableError::Parse {
                    file: FILE.to_string(),
                    line,
                    message: format!("unknown bonus kind '{other}'"),
                })
            }
        }
    }

    Ok((periodic, milestones))
}

/// All tables loaded from a directory
pub struct LoadedTables {
    pub coi_rates: Vec<(f64, f64)>,
    pub guaranteed_rates: Vec<f64>,
    pub initial_fees: Vec<(f64, f64)>,
    pub admin_fees: BTreeMap<i32, f64>,
    pub admin_fee_default: f64,
    pub bonus_periodic: Vec<(u32, u32, f64)>,
    pub bonus_milestones: Vec<(u32, f64)>,
}

impl LoadedTables {
    /// Load all tables from the default path
    pub fn load_default() -> Result<Self, TableError> {
        Self::load_from(Path::new(DEFAULT_TABLES_PATH))
    }

    /// Load all tables from a specific path
    pub fn load_from(path: &Path) -> Result<Self, TableError> {
        let (admin_fees, admin_fee_default) = load_admin_fees(path)?;
        let (bonus_periodic, bonus_milestones) = load_persistency_bonus(path)?;

        Ok(Self {
            coi_rates: load_coi_rates(path)?,
            guaranteed_rates: load_guaranteed_rates(path)?,
            initial_fees: load_initial_fees(path)?,
            admin_fees,
            admin_fee_default,
            bonus_periodic,
            bonus_milestones,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_default_tables() {
        let result = LoadedTables::load_default();
        assert!(result.is_ok(), "Failed to load tables: {:?}", result.err());

        let tables = result.unwrap();

        assert_eq!(tables.coi_rates.len(), 100);
        assert!(tables.coi_rates[30].1 > tables.coi_rates[30].0);

        assert_eq!(tables.guaranteed_rates.len(), 21);
        assert_eq!(tables.guaranteed_rates[0], 0.04);

        assert_eq!(tables.initial_fees[0], (0.65, 0.02));
        assert_eq!(tables.admin_fees.get(&2025), Some(&43_000.0));
        assert_eq!(tables.admin_fee_default, 50_000.0);

        assert_eq!(tables.bonus_periodic.len(), 3);
        assert_eq!(tables.bonus_milestones, vec![(10, 0.30), (20, 0.40), (30, 0.50)]);
    }

    #[test]
    fn test_missing_directory_is_io_error() {
        let err = LoadedTables::load_from(Path::new("no/such/dir")).err().unwrap();
        assert!(matches!(err, TableError::Io { .. }), "{err}");
    }
}
