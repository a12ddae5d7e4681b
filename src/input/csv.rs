use crate::model::record::Record;

#[derive(Debug, Clone, Default)]
pub struct ParsedReport {
    pub subject: Option<String>,
    pub records: Vec<Record>,
}

/// Split raw CSV text into records: first line is the header row, each
/// later non-empty line is zipped positionally against the headers with
/// every value trimmed. Ragged rows pad with empty strings. Commas inside
/// quoted fields are NOT handled; quoting is outside this format.
///
/// When the first header is exactly `Name`, the first row with a non-empty
/// first field names the report subject (later rows never overwrite it).
pub fn parse_report(text: &str) -> ParsedReport {
    let mut lines = text.split('\n');
    let headers: Vec<String> = match lines.next() {
        Some(line) => line
            .trim_end()
            .split(',')
            .map(|h| h.trim().to_string())
            .collect(),
        None => Vec::new(),
    };
    let name_first = headers.first().is_some_and(|h| h == "Name");

    let mut subject: Option<String> = None;
    let mut records = Vec::new();

    for raw in lines {
        let line = raw.trim_end();
        if line.is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split(',').collect();

        if name_first && subject.is_none() {
            let first = fields.first().map(|f| f.trim()).unwrap_or("");
            if !first.is_empty() {
                subject = Some(first.to_string());
            }
        }

        let mut record = Record::default();
        for (idx, header) in headers.iter().enumerate() {
            let value = fields.get(idx).map(|f| f.trim()).unwrap_or("");
            record.set_field(header, value);
        }
        records.push(record);
    }

    ParsedReport { subject, records }
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/csv.rs"]
mod tests;
