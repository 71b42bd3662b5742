use std::fs;

use pretty_assertions::assert_eq;

use ai_jobs_dashboard::config::DashboardConfig;
use ai_jobs_dashboard::data::aggregate::{
    compute_all, remote_distribution, salary_by_experience, top_skills, Insight, Measure,
};
use ai_jobs_dashboard::data::error::{LoadError, SchemaGap};
use ai_jobs_dashboard::data::filter::{FilterCriteria, FilterOptions, FilteredView};
use ai_jobs_dashboard::data::loader::{load_bytes, load_default, load_path};
use ai_jobs_dashboard::state::{AppState, NoticeLevel};

const JOBS: &str = "\
job_id,job_title,company_name,experience_level,salary_usd,remote_category,company_location,company_size,year,required_skills
AI00001,ML Engineer,Acme,Senior,150000,Remote,Germany,L,2024,\"Python, SQL\"
AI00002,Data Scientist,Beta,Entry,50000,Onsite,France,S,2023,Python
AI00003,ML Engineer,Acme,Senior,160000,Hybrid,Germany,L,2024,
AI00004,AI Researcher,Gamma,Senior,170000,Remote,Germany,M,2023,\"PyTorch, Python\"
AI00005,Data Scientist,Beta,Entry,60000,Remote,France,S,2023,\"SQL ,Tableau\"
";

fn write_jobs(dir: &tempfile::TempDir) -> std::path::PathBuf {
    let path = dir.path().join("AI_job_data.csv");
    fs::write(&path, JOBS).unwrap();
    path
}

fn criteria(year: i64, location: &str, level: &str) -> FilterCriteria {
    FilterCriteria {
        year,
        location: location.to_string(),
        experience_level: level.to_string(),
    }
}

#[test]
fn test_load_from_disk_keeps_extra_columns() {
    let dir = tempfile::tempdir().unwrap();
    let ds = load_path(&write_jobs(&dir)).unwrap();

    assert_eq!(ds.len(), 5);
    assert_eq!(ds.columns[0], "job_id");
    assert_eq!(ds.records[3].cells[0], "AI00004");
}

#[test]
fn test_default_path_absent_then_present() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("AI_job_data.csv");
    assert!(load_default(&path).unwrap().is_none());

    fs::write(&path, JOBS).unwrap();
    assert_eq!(load_default(&path).unwrap().unwrap().len(), 5);
}

#[test]
fn test_skill_frequencies() {
    let ds = load_bytes(JOBS.as_bytes()).unwrap();
    let view = top_skills(&ds).unwrap();
    let pairs: Vec<(&str, f64)> = view
        .entries
        .iter()
        .map(|e| (e.label.as_str(), e.value))
        .collect();
    assert_eq!(
        pairs,
        vec![("Python", 3.0), ("SQL", 2.0), ("PyTorch", 1.0), ("Tableau", 1.0)]
    );
}

#[test]
fn test_padded_headers_keep_skill_view() {
    let text = "\
job_title, company_name, experience_level, salary_usd, remote_category, company_location, company_size, year, required_skills
A,X,Entry,50000,Remote,US,S,2023,Python
";
    let ds = load_bytes(text.as_bytes()).unwrap();
    let view = top_skills(&ds).unwrap();
    assert_eq!(view.labels(), vec!["Python"]);
}

#[test]
fn test_null_tokens_load_and_stay_out_of_filters() {
    let text = "\
job_title,company_name,experience_level,salary_usd,remote_category,company_location,company_size,year
A,X,Entry,NA,Remote,NA,S,2023
B,Y,N/A,100000,Remote,US,S,null
C,Z,Senior,120000,Remote,US,S,2024
";
    let ds = load_bytes(text.as_bytes()).unwrap();
    assert_eq!(ds.len(), 3);

    let opts = FilterOptions::from_dataset(&ds);
    assert_eq!(opts.years, vec![2023, 2024]);
    assert_eq!(opts.locations, vec!["US"]);
    assert_eq!(opts.experience_levels, vec!["Entry", "Senior"]);

    let view = salary_by_experience(&ds);
    assert_eq!(view.labels(), vec!["Senior"]);

    let nulls = ds.summary(0).null_counts;
    assert_eq!(nulls[3], ("salary_usd".to_string(), 1));
    assert_eq!(nulls[5], ("company_location".to_string(), 1));
}

#[test]
fn test_mean_salary_scenario() {
    let text = "\
job_title,company_name,experience_level,salary_usd,remote_category,company_location,company_size,year
A,X,Entry,50000,Remote,US,S,2023
B,Y,Senior,150000,Remote,US,S,2023
";
    let ds = load_bytes(text.as_bytes()).unwrap();
    let view = salary_by_experience(&ds);
    assert_eq!(view.measure, Measure::MeanSalary);
    assert_eq!(view.labels(), vec!["Entry", "Senior"]);
    assert_eq!(view.entries[0].value, 50000.0);
    assert_eq!(view.entries[1].value, 150000.0);

    // No skills column: only that view is unavailable.
    for (insight, result) in compute_all(&ds) {
        match insight {
            Insight::TopSkills => assert_eq!(
                result,
                Err(SchemaGap {
                    column: "required_skills"
                })
            ),
            _ => assert!(result.is_ok()),
        }
    }
}

#[test]
fn test_remote_distribution_has_every_category() {
    let ds = load_bytes(JOBS.as_bytes()).unwrap();
    let view = remote_distribution(&ds);
    assert_eq!(view.labels(), vec!["Remote", "Onsite", "Hybrid"]);
    assert_eq!(view.entries[0].value, 3.0);
}

#[test]
fn test_export_round_trip_through_file() {
    let dir = tempfile::tempdir().unwrap();
    let ds = load_path(&write_jobs(&dir)).unwrap();

    let view = FilteredView::apply(&ds, &criteria(2023, "France", "Entry"));
    assert_eq!(view.len(), 2);

    let out = dir.path().join("filtered_ai_jobs.csv");
    view.write_csv(fs::File::create(&out).unwrap()).unwrap();

    let reloaded = load_path(&out).unwrap();
    assert_eq!(reloaded, view.to_dataset());
}

#[test]
fn test_missing_criteria_export_header_only() {
    let ds = load_bytes(JOBS.as_bytes()).unwrap();
    let view = FilteredView::apply(&ds, &criteria(2099, "Nowhere", "X"));
    assert!(view.is_empty());

    let text = String::from_utf8(view.to_csv_bytes().unwrap()).unwrap();
    assert_eq!(text.lines().count(), 1);
    assert_eq!(text.lines().next(), JOBS.lines().next());

    let reloaded = load_bytes(text.as_bytes()).unwrap();
    assert!(reloaded.is_empty());
    assert_eq!(reloaded.columns, ds.columns);
}

#[test]
fn test_every_option_combination_is_a_subset() {
    let ds = load_bytes(JOBS.as_bytes()).unwrap();
    let opts = FilterOptions::from_dataset(&ds);
    let mut seen = 0;

    for &y in &opts.years {
        for l in &opts.locations {
            for e in &opts.experience_levels {
                let c = criteria(y, l, e);
                let view = FilteredView::apply(&ds, &c);
                assert!(view.len() <= ds.len());
                for rec in view.records() {
                    assert_eq!(rec.year, Some(y));
                    assert_eq!(rec.company_location.as_deref(), Some(l.as_str()));
                    assert_eq!(rec.experience_level.as_deref(), Some(e.as_str()));
                }
                seen += view.len();
            }
        }
    }
    // Each row has all three values, so it lands in exactly one combination.
    assert_eq!(seen, ds.len());
}

#[test]
fn test_bad_upload_is_reported_not_fatal() {
    let err = load_bytes(b"not,a,jobs,file\n1,2,3,4\n").unwrap_err();
    assert!(matches!(err, LoadError::MissingColumns(_)));

    let mut state = AppState::new(DashboardConfig::default());
    state.load_from_bytes("upload.csv", JOBS.as_bytes());
    state.load_from_bytes("garbage.csv", b"not,a,jobs,file\n1,2,3,4\n");

    assert_eq!(state.session.as_ref().unwrap().dataset.len(), 5);
    assert_eq!(state.notice.unwrap().level, NoticeLevel::Error);
}

#[test]
fn test_session_export_via_state() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("filtered_ai_jobs.csv");

    let mut state = AppState::new(DashboardConfig {
        default_dataset: write_jobs(&dir),
        ..DashboardConfig::default()
    });
    state.load_default();
    state.set_criteria(criteria(2024, "Germany", "Senior"));
    state.export_filtered(&out);

    let reloaded = load_path(&out).unwrap();
    let ids: Vec<&str> = reloaded
        .records
        .iter()
        .map(|r| r.cells[0].as_str())
        .collect();
    assert_eq!(ids, vec!["AI00001", "AI00003"]);
}
