use std::collections::HashMap;

use crate::model::record::Record;

/// Records grouped by category. Category order is first-occurrence order in
/// the source rows; records within a category keep their row order.
#[derive(Debug, Clone, Default)]
pub struct GroupedReport {
    categories: Vec<CategoryGroup>,
    index: HashMap<String, usize>,
}

#[derive(Debug, Clone)]
pub struct CategoryGroup {
    pub name: String,
    pub records: Vec<Record>,
}

impl GroupedReport {
    pub fn from_records(records: Vec<Record>) -> Self {
        let mut grouped = Self::default();
        for record in records {
            grouped.push(record);
        }
        grouped
    }

    fn push(&mut self, record: Record) {
        if let Some(&idx) = self.index.get(&record.category) {
            self.categories[idx].records.push(record);
            return;
        }
        let idx = self.categories.len();
        self.index.insert(record.category.clone(), idx);
        self.categories.push(CategoryGroup {
            name: record.category.clone(),
            records: vec![record],
        });
    }

    pub fn categories(&self) -> &[CategoryGroup] {
        &self.categories
    }

    pub fn get(&self, category: &str) -> Option<&CategoryGroup> {
        self.index.get(category).map(|&idx| &self.categories[idx])
    }

    pub fn n_categories(&self) -> usize {
        self.categories.len()
    }

    pub fn n_records(&self) -> usize {
        self.categories.iter().map(|c| c.records.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn records(&self) -> impl Iterator<Item = &Record> + '_ {
        self.categories.iter().flat_map(|c| c.records.iter())
    }

    /// Replace the result of the first record whose test name matches.
    pub fn update_result(&mut self, test: &str, value: &str) -> bool {
        for group in &mut self.categories {
            if let Some(record) = group.records.iter_mut().find(|r| r.test == test) {
                record.result = value.to_string();
                return true;
            }
        }
        false
    }
}
