use rustc_hash::FxHashMap;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrequencyEntry {
    pub value: String,
    pub count: usize,
}

/// Value counts of one column, most frequent first.
///
/// Ties keep the order in which values first appear in the dataset. Null
/// cells are not counted as a value; `null_count` records how many were
/// skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrequencyTable {
    pub title: String,
    pub column: String,
    pub entries: Vec<FrequencyEntry>,
    /// Distinct non-null values before truncation
    pub distinct: usize,
    pub null_count: usize,
}

impl FrequencyTable {
    pub fn from_cells<'a, I>(column: &str, cells: I, top_n: Option<usize>) -> Self
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        let mut positions: FxHashMap<&'a str, usize> = FxHashMap::default();
        let mut counts: Vec<(&'a str, usize)> = Vec::new();
        let mut null_count = 0;

        for cell in cells {
            let Some(value) = cell else {
                null_count += 1;
                continue;
            };
            match positions.get(value) {
                Some(&position) => counts[position].1 += 1,
                None => {
                    positions.insert(value, counts.len());
                    counts.push((value, 1));
                }
            }
        }

        let distinct = counts.len();
        // Stable sort keeps first-seen order among equal counts
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        if let Some(limit) = top_n {
            counts.truncate(limit);
        }

        Self {
            title: column.to_string(),
            column: column.to_string(),
            entries: counts
                .into_iter()
                .map(|(value, count)| FrequencyEntry {
                    value: value.to_string(),
                    count,
                })
                .collect(),
            distinct,
            null_count,
        }
    }

    pub fn titled<S: Into<String>>(mut self, title: S) -> Self {
        self.title = title.into();
        self
    }

    /// Sum of the retained counts
    pub fn total(&self) -> usize {
        self.entries.iter().map(|e| e.count).sum()
    }

    pub fn get(&self, value: &str) -> Option<usize> {
        self.entries
            .iter()
            .find(|e| e.value == value)
            .map(|e| e.count)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
