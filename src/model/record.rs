use serde::Serialize;

/// One lab-test observation as authored in the source CSV. Absent columns
/// are empty strings; numeric interpretation happens at the call sites.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Record {
    pub name: String,
    pub category: String,
    pub test: String,
    pub result: String,
    pub unit: String,
    pub min: String,
    pub max: String,
    pub date: String,
}

impl Record {
    pub fn set_field(&mut self, header: &str, value: &str) {
        match header {
            "Name" => self.name = value.to_string(),
            "Category" => self.category = value.to_string(),
            "Test" => self.test = value.to_string(),
            "Result" => self.result = value.to_string(),
            "Unit" => self.unit = value.to_string(),
            "Min" => self.min = value.to_string(),
            "Max" => self.max = value.to_string(),
            "Date" => self.date = value.to_string(),
            _ => {}
        }
    }

    pub fn date_or_recent(&self) -> &str {
        if self.date.is_empty() {
            "Recent"
        } else {
            &self.date
        }
    }
}
