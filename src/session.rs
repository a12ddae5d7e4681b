use crate::model::grouped::GroupedReport;
use crate::model::record::Record;

/// Owns the current grouped report. The only mutation paths are a wholesale
/// replace on load and a single-result update by test name.
#[derive(Debug, Default)]
pub struct ReportSession {
    subject: Option<String>,
    grouped: GroupedReport,
}

impl ReportSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace(&mut self, subject: Option<String>, records: Vec<Record>) {
        self.subject = subject;
        self.grouped = GroupedReport::from_records(records);
    }

    pub fn grouped(&self) -> &GroupedReport {
        &self.grouped
    }

    pub fn subject(&self) -> Option<&str> {
        self.subject.as_deref()
    }

    pub fn update_result(&mut self, test: &str, value: &str) -> bool {
        self.grouped.update_result(test, value)
    }
}
