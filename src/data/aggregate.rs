use std::collections::HashMap;

use super::error::SchemaGap;
use super::model::{Dataset, JobRecord, REQUIRED_SKILLS};

pub const TOP_JOB_TITLES: usize = 10;
pub const TOP_COMPANIES: usize = 10;
pub const TOP_COUNTRIES: usize = 10;
pub const TOP_SKILLS: usize = 15;
pub const TOP_SALARY_COUNTRIES: usize = 15;

// ---------------------------------------------------------------------------
// AggregateView – category → measure, already ordered for display
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Measure {
    Count,
    MeanSalary,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AggregateEntry {
    pub label: String,
    pub value: f64,
}

/// A derived, read-only summary of one dataset.  Entries are in display
/// order; ties keep the order in which keys first appear in the data.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateView {
    pub measure: Measure,
    pub entries: Vec<AggregateEntry>,
}

impl AggregateView {
    fn counts(counts: Vec<(String, usize)>) -> Self {
        AggregateView {
            measure: Measure::Count,
            entries: counts
                .into_iter()
                .map(|(label, n)| AggregateEntry {
                    label,
                    value: n as f64,
                })
                .collect(),
        }
    }

    fn means(means: Vec<(String, f64)>) -> Self {
        AggregateView {
            measure: Measure::MeanSalary,
            entries: means
                .into_iter()
                .map(|(label, value)| AggregateEntry { label, value })
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn labels(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.label.clone()).collect()
    }

    /// Largest value, for colour scaling.
    pub fn max_value(&self) -> f64 {
        self.entries.iter().map(|e| e.value).fold(0.0, f64::max)
    }
}

// ---------------------------------------------------------------------------
// Insight catalogue
// ---------------------------------------------------------------------------

/// The fixed set of views the dashboard shows, in presentation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Insight {
    TopJobTitles,
    TopCompanies,
    SalaryByExperience,
    RemoteDistribution,
    TopCountries,
    TopSkills,
    SalaryByCountry,
    SalaryByCompanySize,
}

impl Insight {
    pub const ALL: [Insight; 8] = [
        Insight::TopJobTitles,
        Insight::TopCompanies,
        Insight::SalaryByExperience,
        Insight::RemoteDistribution,
        Insight::TopCountries,
        Insight::TopSkills,
        Insight::SalaryByCountry,
        Insight::SalaryByCompanySize,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Insight::TopJobTitles => "Top AI Job Titles",
            Insight::TopCompanies => "Companies Hiring the Most",
            Insight::SalaryByExperience => "Experience Level vs Average Salary",
            Insight::RemoteDistribution => "Remote Category Distribution",
            Insight::TopCountries => "Top Hiring Countries",
            Insight::TopSkills => "Most Common Required Skills",
            Insight::SalaryByCountry => "Average Salary by Country",
            Insight::SalaryByCompanySize => "Average Salary by Company Size",
        }
    }

    /// Axis label for the category side of the chart.
    pub fn category_label(self) -> &'static str {
        match self {
            Insight::TopJobTitles => "Job Title",
            Insight::TopCompanies => "Company",
            Insight::SalaryByExperience => "Experience Level",
            Insight::RemoteDistribution => "Remote Category",
            Insight::TopCountries | Insight::SalaryByCountry => "Country",
            Insight::TopSkills => "Skill",
            Insight::SalaryByCompanySize => "Company Size",
        }
    }

    pub fn compute(self, dataset: &Dataset) -> Result<AggregateView, SchemaGap> {
        match self {
            Insight::TopJobTitles => Ok(top_job_titles(dataset)),
            Insight::TopCompanies => Ok(top_companies(dataset)),
            Insight::SalaryByExperience => Ok(salary_by_experience(dataset)),
            Insight::RemoteDistribution => Ok(remote_distribution(dataset)),
            Insight::TopCountries => Ok(top_countries(dataset)),
            Insight::TopSkills => top_skills(dataset),
            Insight::SalaryByCountry => Ok(salary_by_country(dataset)),
            Insight::SalaryByCompanySize => Ok(salary_by_company_size(dataset)),
        }
    }
}

/// Evaluate the whole catalogue.  A schema gap only affects its own view.
pub fn compute_all(dataset: &Dataset) -> Vec<(Insight, Result<AggregateView, SchemaGap>)> {
    Insight::ALL
        .iter()
        .map(|&insight| {
            let result = insight.compute(dataset);
            if let Err(gap) = &result {
                log::warn!("{}: {gap}", insight.title());
            }
            (insight, result)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Individual aggregates
// ---------------------------------------------------------------------------

pub fn top_job_titles(dataset: &Dataset) -> AggregateView {
    top_counts(dataset, |r| r.job_title.as_deref(), TOP_JOB_TITLES)
}

pub fn top_companies(dataset: &Dataset) -> AggregateView {
    top_counts(dataset, |r| r.company_name.as_deref(), TOP_COMPANIES)
}

/// Ascending by mean salary.
pub fn salary_by_experience(dataset: &Dataset) -> AggregateView {
    let mut means = mean_salary_by(dataset, |r| r.experience_level.as_deref());
    means.sort_by(|a, b| a.1.total_cmp(&b.1));
    AggregateView::means(means)
}

/// Every category, most common first.
pub fn remote_distribution(dataset: &Dataset) -> AggregateView {
    let values = dataset
        .records
        .iter()
        .filter_map(|r| r.remote_category.as_deref());
    AggregateView::counts(count_values(values))
}

pub fn top_countries(dataset: &Dataset) -> AggregateView {
    top_counts(dataset, |r| r.company_location.as_deref(), TOP_COUNTRIES)
}

/// Skill cells are comma-separated lists; tokens are trimmed and empties
/// dropped before counting.
pub fn top_skills(dataset: &Dataset) -> Result<AggregateView, SchemaGap> {
    if !dataset.has_column(REQUIRED_SKILLS) {
        return Err(SchemaGap {
            column: REQUIRED_SKILLS,
        });
    }

    let tokens = dataset
        .records
        .iter()
        .filter_map(|r| r.required_skills.as_deref())
        .flat_map(|cell| cell.split(','))
        .map(str::trim)
        .filter(|s| !s.is_empty());

    let mut counts = count_values(tokens);
    counts.truncate(TOP_SKILLS);
    Ok(AggregateView::counts(counts))
}

/// Descending by mean salary, top 15.
pub fn salary_by_country(dataset: &Dataset) -> AggregateView {
    let mut means = mean_salary_by(dataset, |r| r.company_location.as_deref());
    means.sort_by(|a, b| b.1.total_cmp(&a.1));
    means.truncate(TOP_SALARY_COUNTRIES);
    AggregateView::means(means)
}

/// Ascending by mean salary.
pub fn salary_by_company_size(dataset: &Dataset) -> AggregateView {
    let mut means = mean_salary_by(dataset, |r| r.company_size.as_deref());
    means.sort_by(|a, b| a.1.total_cmp(&b.1));
    AggregateView::means(means)
}

// ---------------------------------------------------------------------------
// Grouping helpers
// ---------------------------------------------------------------------------

fn top_counts<F>(dataset: &Dataset, key: F, n: usize) -> AggregateView
where
    F: Fn(&JobRecord) -> Option<&str>,
{
    let mut counts = count_values(dataset.records.iter().filter_map(key));
    counts.truncate(n);
    AggregateView::counts(counts)
}

/// Occurrence counts, most frequent first.  `sort_by` is stable, so equal
/// counts stay in first-encounter order.
fn count_values<'a>(values: impl Iterator<Item = &'a str>) -> Vec<(String, usize)> {
    let mut index: HashMap<&'a str, usize> = HashMap::new();
    let mut counts: Vec<(String, usize)> = Vec::new();

    for v in values {
        match index.get(v) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(v, counts.len());
                counts.push((v.to_string(), 1));
            }
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// Mean of non-null salaries per non-null key, in first-encounter order.
/// Groups without a single salary are left out.
fn mean_salary_by<F>(dataset: &Dataset, key: F) -> Vec<(String, f64)>
where
    F: Fn(&JobRecord) -> Option<&str>,
{
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(String, f64, usize)> = Vec::new();

    for rec in &dataset.records {
        let (Some(k), Some(salary)) = (key(rec), rec.salary_usd) else {
            continue;
        };
        match index.get(k) {
            Some(&i) => {
                groups[i].1 += salary;
                groups[i].2 += 1;
            }
            None => {
                index.insert(k, groups.len());
                groups.push((k.to_string(), salary, 1));
            }
        }
    }

    groups
        .into_iter()
        .map(|(k, sum, n)| (k, sum / n as f64))
        .collect()
}
