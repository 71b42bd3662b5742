use std::collections::BTreeSet;
use std::io::Write;

use super::model::{Dataset, JobRecord};

// ---------------------------------------------------------------------------
// Filter options: what the user may pick from
// ---------------------------------------------------------------------------

/// Distinct, non-null values of the three filterable columns, ascending.
/// Built from the data, so every criterion drawn from here occurs at least once.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterOptions {
    pub years: Vec<i64>,
    pub locations: Vec<String>,
    pub experience_levels: Vec<String>,
}

impl FilterOptions {
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let mut years = BTreeSet::new();
        let mut locations = BTreeSet::new();
        let mut levels = BTreeSet::new();

        for rec in &dataset.records {
            if let Some(y) = rec.year {
                years.insert(y);
            }
            if let Some(l) = &rec.company_location {
                locations.insert(l.as_str());
            }
            if let Some(e) = &rec.experience_level {
                levels.insert(e.as_str());
            }
        }

        FilterOptions {
            years: years.into_iter().collect(),
            locations: locations.into_iter().map(str::to_string).collect(),
            experience_levels: levels.into_iter().map(str::to_string).collect(),
        }
    }

    /// First value of each list, the initial selection of the widgets.
    /// `None` when any list is empty.
    pub fn default_criteria(&self) -> Option<FilterCriteria> {
        Some(FilterCriteria {
            year: *self.years.first()?,
            location: self.locations.first()?.clone(),
            experience_level: self.experience_levels.first()?.clone(),
        })
    }
}

// ---------------------------------------------------------------------------
// Filter criteria and matching
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCriteria {
    pub year: i64,
    pub location: String,
    pub experience_level: String,
}

impl FilterCriteria {
    /// Exact match on all three columns.  A null cell never matches.
    pub fn matches(&self, rec: &JobRecord) -> bool {
        rec.year == Some(self.year)
            && rec.company_location.as_deref() == Some(self.location.as_str())
            && rec.experience_level.as_deref() == Some(self.experience_level.as_str())
    }
}

/// Return indices of records that match `criteria`, in dataset order.
pub fn filtered_indices(dataset: &Dataset, criteria: &FilterCriteria) -> Vec<usize> {
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| criteria.matches(rec))
        .map(|(i, _)| i)
        .collect()
}

// ---------------------------------------------------------------------------
// FilteredView – the matching subset, borrowed from its dataset
// ---------------------------------------------------------------------------

/// Rows of a dataset selected by index.  Never modifies the dataset; an empty
/// view is a normal result.
#[derive(Debug, Clone)]
pub struct FilteredView<'a> {
    dataset: &'a Dataset,
    indices: Vec<usize>,
}

impl<'a> FilteredView<'a> {
    pub fn apply(dataset: &'a Dataset, criteria: &FilterCriteria) -> Self {
        FilteredView {
            dataset,
            indices: filtered_indices(dataset, criteria),
        }
    }

    /// Wrap indices computed earlier against the same dataset.
    pub fn from_indices(dataset: &'a Dataset, indices: Vec<usize>) -> Self {
        FilteredView { dataset, indices }
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn columns(&self) -> &'a [String] {
        &self.dataset.columns
    }

    pub fn records(&self) -> impl Iterator<Item = &'a JobRecord> + '_ {
        let dataset = self.dataset;
        self.indices.iter().map(move |&i| &dataset.records[i])
    }

    /// Copy the selected rows out into a standalone dataset.
    pub fn to_dataset(&self) -> Dataset {
        Dataset::new(self.dataset.columns.clone(), self.records().cloned().collect())
    }

    /// Write the view in the input format: header row, same columns, no
    /// index column.  An empty view writes only the header.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), csv::Error> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(&self.dataset.columns)?;
        for rec in self.records() {
            wtr.write_record(&rec.cells)?;
        }
        wtr.flush()?;
        Ok(())
    }

    pub fn to_csv_bytes(&self) -> Result<Vec<u8>, csv::Error> {
        let mut buf = Vec::new();
        self.write_csv(&mut buf)?;
        Ok(buf)
    }
}
