use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use csv::StringRecord;

use super::error::LoadError;
use super::model::{
    is_null_token, Dataset, JobRecord, COMPANY_LOCATION, COMPANY_NAME, COMPANY_SIZE, EXPERIENCE_LEVEL,
    JOB_TITLE, REMOTE_CATEGORY, REQUIRED_COLUMNS, REQUIRED_SKILLS, SALARY_USD, YEAR,
};

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a dataset from a CSV file on disk.
pub fn load_path(path: &Path) -> Result<Dataset, LoadError> {
    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => LoadError::NotFound(path.to_path_buf()),
        _ => LoadError::Io {
            path: path.to_path_buf(),
            source: e,
        },
    })?;
    load_reader(file)
}

/// Load a dataset from uploaded bytes (drag-and-drop, browser upload).
pub fn load_bytes(bytes: &[u8]) -> Result<Dataset, LoadError> {
    load_reader(bytes)
}

/// Try the fixed default location.  A missing file is `Ok(None)`, not an
/// error: the caller then asks the user for data.
pub fn load_default(path: &Path) -> Result<Option<Dataset>, LoadError> {
    match load_path(path) {
        Ok(ds) => Ok(Some(ds)),
        Err(LoadError::NotFound(_)) => Ok(None),
        Err(e) => Err(e),
    }
}

// ---------------------------------------------------------------------------
// CSV parsing
// ---------------------------------------------------------------------------

/// CSV layout: header row, then one posting per row.  A `required_skills`
/// cell holding several skills must be quoted (`"Python, SQL"`), since the
/// in-cell separator is the field delimiter.
pub fn load_reader<R: Read>(reader: R) -> Result<Dataset, LoadError> {
    let mut reader = csv::Reader::from_reader(reader);
    let headers = reader.headers()?.clone();
    if headers.is_empty() {
        return Err(LoadError::Empty);
    }

    let layout = ColumnLayout::resolve(&headers)?;

    let mut records = Vec::new();
    for result in reader.records() {
        let row = result?;
        records.push(layout.parse_row(&row)?);
    }

    let columns = headers.iter().map(|h| h.to_string()).collect();
    Ok(Dataset::new(columns, records))
}

/// Header positions of the columns we interpret.
struct ColumnLayout {
    job_title: usize,
    company_name: usize,
    experience_level: usize,
    salary_usd: usize,
    remote_category: usize,
    company_location: usize,
    company_size: usize,
    year: usize,
    required_skills: Option<usize>,
}

impl ColumnLayout {
    fn resolve(headers: &StringRecord) -> Result<Self, LoadError> {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);

        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .copied()
            .filter(|c| find(*c).is_none())
            .map(|c| c.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(LoadError::MissingColumns(missing));
        }

        let at = |name: &str| find(name).unwrap_or_default();
        Ok(ColumnLayout {
            job_title: at(JOB_TITLE),
            company_name: at(COMPANY_NAME),
            experience_level: at(EXPERIENCE_LEVEL),
            salary_usd: at(SALARY_USD),
            remote_category: at(REMOTE_CATEGORY),
            company_location: at(COMPANY_LOCATION),
            company_size: at(COMPANY_SIZE),
            year: at(YEAR),
            required_skills: find(REQUIRED_SKILLS),
        })
    }

    fn parse_row(&self, row: &StringRecord) -> Result<JobRecord, LoadError> {
        let line = row.position().map(|p| p.line()).unwrap_or_default();
        let text = |idx: usize| {
            row.get(idx)
                .filter(|s| !is_null_token(s))
                .map(str::to_string)
        };

        Ok(JobRecord {
            job_title: text(self.job_title),
            company_name: text(self.company_name),
            experience_level: text(self.experience_level),
            salary_usd: parse_salary(row.get(self.salary_usd).unwrap_or(""), line)?,
            remote_category: text(self.remote_category),
            company_location: text(self.company_location),
            company_size: text(self.company_size),
            year: parse_year(row.get(self.year).unwrap_or(""), line)?,
            required_skills: self.required_skills.and_then(text),
            cells: row.iter().map(|c| c.to_string()).collect(),
        })
    }
}

fn parse_salary(s: &str, line: u64) -> Result<Option<f64>, LoadError> {
    let s = s.trim();
    if is_null_token(s) {
        return Ok(None);
    }
    match s.parse::<f64>() {
        Ok(v) if v.is_nan() => Ok(None),
        Ok(v) => Ok(Some(v)),
        Err(_) => Err(invalid_number(line, SALARY_USD, s)),
    }
}

/// Integers, plus integral floats (`2023.0`) as written by dataframe tools
/// when the column had nulls.  Floats outside the `i64` range are rejected.
fn parse_year(s: &str, line: u64) -> Result<Option<i64>, LoadError> {
    let s = s.trim();
    if is_null_token(s) {
        return Ok(None);
    }
    if let Ok(i) = s.parse::<i64>() {
        return Ok(Some(i));
    }
    match s.parse::<f64>() {
        Ok(f) if f.is_nan() => Ok(None),
        Ok(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 => {
            Ok(Some(f as i64))
        }
        _ => Err(invalid_number(line, YEAR, s)),
    }
}

fn invalid_number(line: u64, column: &'static str, value: &str) -> LoadError {
    LoadError::InvalidNumber {
        line,
        column,
        value: value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "job_title,company_name,experience_level,salary_usd,remote_category,company_location,company_size,year,required_skills";

    fn csv(rows: &[&str]) -> String {
        let mut s = String::from(HEADER);
        for r in rows {
            s.push('\n');
            s.push_str(r);
        }
        s.push('\n');
        s
    }

    #[test]
    fn parses_typed_fields_and_keeps_raw_cells() {
        let text = csv(&[
            r#"ML Engineer,Acme,Senior,150000,Remote,Germany,L,2024,"Python, SQL""#,
        ]);
        let ds = load_bytes(text.as_bytes()).unwrap();

        assert_eq!(ds.len(), 1);
        assert_eq!(ds.columns.len(), 9);
        let rec = &ds.records[0];
        assert_eq!(rec.job_title.as_deref(), Some("ML Engineer"));
        assert_eq!(rec.salary_usd, Some(150000.0));
        assert_eq!(rec.year, Some(2024));
        assert_eq!(rec.required_skills.as_deref(), Some("Python, SQL"));
        assert_eq!(rec.cells[8], "Python, SQL");
    }

    #[test]
    fn empty_cells_become_nulls() {
        let text = csv(&[",Acme,,,Hybrid,,M,,"]);
        let ds = load_bytes(text.as_bytes()).unwrap();
        let rec = &ds.records[0];

        assert_eq!(rec.job_title, None);
        assert_eq!(rec.experience_level, None);
        assert_eq!(rec.salary_usd, None);
        assert_eq!(rec.year, None);
        assert_eq!(rec.required_skills, None);
        assert_eq!(rec.company_name.as_deref(), Some("Acme"));
    }

    #[test]
    fn null_tokens_become_nulls_in_every_column() {
        let text = csv(&[
            "NA,Acme,N/A,NA,Hybrid,null,M,None,NaN",
            "A,B,Entry,NaN,Onsite,France,S,nan,",
        ]);
        let ds = load_bytes(text.as_bytes()).unwrap();

        let rec = &ds.records[0];
        assert_eq!(rec.job_title, None);
        assert_eq!(rec.experience_level, None);
        assert_eq!(rec.salary_usd, None);
        assert_eq!(rec.company_location, None);
        assert_eq!(rec.year, None);
        assert_eq!(rec.required_skills, None);
        assert_eq!(rec.cells[3], "NA");
        assert_eq!(ds.records[1].salary_usd, None);
        assert_eq!(ds.records[1].year, None);

        let nulls = ds.summary(0).null_counts;
        assert_eq!(nulls[3], (SALARY_USD.to_string(), 2));
        assert_eq!(nulls[7], (YEAR.to_string(), 2));
        assert_eq!(nulls[1], (COMPANY_NAME.to_string(), 0));
    }

    #[test]
    fn padded_headers_resolve_everywhere() {
        let text = "job_title, company_name, experience_level, salary_usd, remote_category, company_location, company_size, year, required_skills\nA,B,Entry,1,Onsite,France,S,2023,Python\n";
        let ds = load_bytes(text.as_bytes()).unwrap();
        assert_eq!(ds.records[0].required_skills.as_deref(), Some("Python"));
        assert!(ds.has_column(REQUIRED_SKILLS));
        assert_eq!(ds.columns[8], " required_skills");
    }

    #[test]
    fn accepts_integral_float_years() {
        let text = csv(&["A,B,Entry,1,Onsite,France,S,2023.0,"]);
        let ds = load_bytes(text.as_bytes()).unwrap();
        assert_eq!(ds.records[0].year, Some(2023));
    }

    #[test]
    fn header_only_is_an_empty_dataset() {
        let ds = load_bytes(csv(&[]).as_bytes()).unwrap();
        assert!(ds.is_empty());
        assert_eq!(ds.columns.len(), 9);
    }

    #[test]
    fn skills_column_is_optional() {
        let text = "job_title,company_name,experience_level,salary_usd,remote_category,company_location,company_size,year\nA,B,Entry,1,Onsite,France,S,2023\n";
        let ds = load_bytes(text.as_bytes()).unwrap();
        assert_eq!(ds.records[0].required_skills, None);
        assert!(!ds.has_column(REQUIRED_SKILLS));
    }

    #[test]
    fn rejects_empty_input() {
        assert!(matches!(load_bytes(b""), Err(LoadError::Empty)));
    }

    #[test]
    fn rejects_missing_required_columns() {
        let err = load_bytes(b"job_title,year\nA,2023\n").unwrap_err();
        match err {
            LoadError::MissingColumns(cols) => {
                assert!(cols.contains(&"company_name".to_string()));
                assert!(!cols.contains(&"year".to_string()));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_non_numeric_salary() {
        let text = csv(&["A,B,Entry,lots,Onsite,France,S,2023,"]);
        let err = load_bytes(text.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            LoadError::InvalidNumber { line: 2, column: SALARY_USD, .. }
        ));
    }

    #[test]
    fn rejects_fractional_year() {
        let text = csv(&["A,B,Entry,1,Onsite,France,S,2023.5,"]);
        assert!(matches!(
            load_bytes(text.as_bytes()),
            Err(LoadError::InvalidNumber { column: YEAR, .. })
        ));
    }

    #[test]
    fn rejects_years_outside_integer_range() {
        for year in ["1e30", "-1e30", "inf"] {
            let text = csv(&[format!("A,B,Entry,1,Onsite,France,S,{year},").as_str()]);
            assert!(matches!(
                load_bytes(text.as_bytes()),
                Err(LoadError::InvalidNumber { column: YEAR, .. })
            ));
        }
    }

    #[test]
    fn rejects_ragged_rows() {
        // Unquoted skill list spills into an extra field.
        let text = csv(&["A,B,Entry,1,Onsite,France,S,2023,Python, SQL"]);
        assert!(matches!(
            load_bytes(text.as_bytes()),
            Err(LoadError::Csv(_))
        ));
    }

    #[test]
    fn missing_default_file_is_absent_not_error() {
        let path = Path::new("definitely/not/here/AI_job_data.csv");
        assert!(matches!(load_default(path), Ok(None)));
        assert!(matches!(load_path(path), Err(LoadError::NotFound(_))));
    }
}
