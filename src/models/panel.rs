use serde::{Deserialize, Serialize};

/// One circuit line of a panel schedule.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Row {
    pub id: String,
    pub label: String,
    pub meta: String,
}

impl Row {
    pub fn new(id: impl Into<String>, label: impl Into<String>, meta: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            meta: meta.into(),
        }
    }

    /// Builds a row from positional fields, padding missing ones with empty
    /// strings and ignoring anything past the third.
    pub fn from_fields<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut fields = fields.into_iter().map(|f| f.as_ref().trim().to_string());
        Self {
            id: fields.next().unwrap_or_default(),
            label: fields.next().unwrap_or_default(),
            meta: fields.next().unwrap_or_default(),
        }
    }

    pub fn fields(&self) -> [&str; 3] {
        [&self.id, &self.label, &self.meta]
    }

    pub fn field_mut(&mut self, column: usize) -> Option<&mut String> {
        match column {
            0 => Some(&mut self.id),
            1 => Some(&mut self.label),
            2 => Some(&mut self.meta),
            _ => None,
        }
    }

    pub fn is_blank(&self) -> bool {
        self.fields().iter().all(|f| f.is_empty())
    }

    pub fn matches_filter(&self, filter: &str) -> bool {
        if filter.is_empty() {
            return true;
        }

        let filter = filter.to_lowercase();
        self.fields()
            .iter()
            .any(|f| f.to_lowercase().contains(&filter))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Table {
    pub rows: Vec<Row>,
}

impl Table {
    /// Canonical column names, in their fixed positional order.
    pub const HEADERS: [&'static str; 3] = ["ID", "Label", "Meta"];

    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    /// Assembles a table from arbitrarily ordered named columns.
    ///
    /// Columns are matched to the canonical headers by name; a canonical
    /// column that is not present comes out as all-empty, and unknown
    /// columns are dropped.
    pub fn from_columns<H, R, S>(headers: &[H], records: R) -> Self
    where
        H: AsRef<str>,
        R: IntoIterator,
        R::Item: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let positions: Vec<Option<usize>> = Self::HEADERS
            .iter()
            .map(|name| headers.iter().position(|h| h.as_ref() == *name))
            .collect();

        let rows = records
            .into_iter()
            .map(|record| {
                let values: Vec<String> = record.into_iter().map(Into::into).collect();
                let pick = |slot: Option<usize>| {
                    slot.and_then(|i| values.get(i).cloned()).unwrap_or_default()
                };
                Row {
                    id: pick(positions[0]),
                    label: pick(positions[1]),
                    meta: pick(positions[2]),
                }
            })
            .collect();

        Self { rows }
    }

    pub fn headers(&self) -> [&'static str; 3] {
        Self::HEADERS
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn push(&mut self, row: Row) {
        self.rows.push(row);
    }

    pub fn insert_blank(&mut self, index: usize) {
        let index = index.min(self.rows.len());
        self.rows.insert(index, Row::default());
    }

    pub fn remove(&mut self, index: usize) -> Option<Row> {
        (index < self.rows.len()).then(|| self.rows.remove(index))
    }

    /// Drops rows whose three fields are all empty; returns how many went.
    pub fn remove_blank_rows(&mut self) -> usize {
        let before = self.rows.len();
        self.rows.retain(|row| !row.is_blank());
        before - self.rows.len()
    }

    pub fn get_filtered(&self, filter: &str) -> Vec<&Row> {
        self.rows
            .iter()
            .filter(|row| row.matches_filter(filter))
            .collect()
    }
}
