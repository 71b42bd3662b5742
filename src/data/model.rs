// ---------------------------------------------------------------------------
// Column names
// ---------------------------------------------------------------------------

pub const JOB_TITLE: &str = "job_title";
pub const COMPANY_NAME: &str = "company_name";
pub const EXPERIENCE_LEVEL: &str = "experience_level";
pub const SALARY_USD: &str = "salary_usd";
pub const REMOTE_CATEGORY: &str = "remote_category";
pub const COMPANY_LOCATION: &str = "company_location";
pub const COMPANY_SIZE: &str = "company_size";
pub const YEAR: &str = "year";
pub const REQUIRED_SKILLS: &str = "required_skills";

/// Columns every dataset must carry.  `required_skills` is optional.
pub const REQUIRED_COLUMNS: [&str; 8] = [
    JOB_TITLE,
    COMPANY_NAME,
    EXPERIENCE_LEVEL,
    SALARY_USD,
    REMOTE_CATEGORY,
    COMPANY_LOCATION,
    COMPANY_SIZE,
    YEAR,
];

/// Cell texts read as missing, matched after trimming.  `nan` in any case and
/// with an optional sign is missing too, since that is what float parsing
/// turns into NaN.
const NULL_TOKENS: [&str; 14] = [
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "1.#IND", "1.#QNAN", "<NA>", "N/A",
    "n/a", "NA", "NULL", "null",
];

/// Whether a raw cell stands for a missing value.
pub fn is_null_token(cell: &str) -> bool {
    let t = cell.trim();
    NULL_TOKENS.contains(&t)
        || t == "None"
        || t.trim_start_matches(['+', '-']).eq_ignore_ascii_case("nan")
}

// ---------------------------------------------------------------------------
// JobRecord – one row of the table
// ---------------------------------------------------------------------------

/// A single job posting.
///
/// Typed fields are `None` when the source cell was a null token.  `cells` keeps the
/// raw row in header order so columns we don't interpret survive export.
#[derive(Debug, Clone, PartialEq)]
pub struct JobRecord {
    pub job_title: Option<String>,
    pub company_name: Option<String>,
    pub experience_level: Option<String>,
    pub salary_usd: Option<f64>,
    pub remote_category: Option<String>,
    pub company_location: Option<String>,
    pub company_size: Option<String>,
    pub year: Option<i64>,
    pub required_skills: Option<String>,
    pub cells: Vec<String>,
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed table.  Immutable once built; filtering produces views.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    /// Header row, in file order.
    pub columns: Vec<String>,
    /// All rows, in file order.
    pub records: Vec<JobRecord>,
}

impl Dataset {
    pub fn new(columns: Vec<String>, records: Vec<JobRecord>) -> Self {
        Dataset { columns, records }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Header names match after trimming, the same rule the loader resolves with.
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.trim() == name)
    }

    /// Shape, columns, null counts and a preview of the first `preview_rows` rows.
    pub fn summary(&self, preview_rows: usize) -> DatasetSummary {
        let mut null_counts: Vec<(String, usize)> =
            self.columns.iter().map(|c| (c.clone(), 0)).collect();
        for rec in &self.records {
            for (slot, cell) in null_counts.iter_mut().zip(&rec.cells) {
                if is_null_token(cell) {
                    slot.1 += 1;
                }
            }
        }

        DatasetSummary {
            rows: self.len(),
            columns: self.columns.clone(),
            null_counts,
            preview: self.records.iter().take(preview_rows).cloned().collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// DatasetSummary – the "overview" block shown above the charts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct DatasetSummary {
    pub rows: usize,
    pub columns: Vec<String>,
    /// Per-column count of null cells, in header order.
    pub null_counts: Vec<(String, usize)>,
    pub preview: Vec<JobRecord>,
}

impl DatasetSummary {
    /// `(rows, columns)`, the way a dataframe reports its shape.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.columns.len())
    }
}
