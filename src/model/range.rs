use serde::Serialize;

use crate::model::record::Record;

// Fixed indicator floors so out-of-range bars stay visible regardless of
// how far the value sits outside the range.
pub const LOW_POSITION_PCT: f64 = 10.0;
pub const HIGH_POSITION_PCT: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RangeStatus {
    Low,
    Normal,
    High,
}

impl RangeStatus {
    pub fn name(self) -> &'static str {
        match self {
            RangeStatus::Low => "Low",
            RangeStatus::Normal => "Normal",
            RangeStatus::High => "High",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RangeIndicator {
    pub status: RangeStatus,
    pub position_pct: f64,
}

pub fn parse_value(raw: &str) -> f64 {
    raw.trim().parse::<f64>().unwrap_or(f64::NAN)
}

/// Classify a record against its reference range. Unparsable values compare
/// false in both directions and fall through to Normal.
pub fn classify(record: &Record) -> RangeIndicator {
    let result = parse_value(&record.result);
    let min = parse_value(&record.min);
    let max = parse_value(&record.max);

    if result < min {
        RangeIndicator {
            status: RangeStatus::Low,
            position_pct: LOW_POSITION_PCT,
        }
    } else if result > max {
        RangeIndicator {
            status: RangeStatus::High,
            position_pct: HIGH_POSITION_PCT,
        }
    } else {
        RangeIndicator {
            status: RangeStatus::Normal,
            position_pct: (result - min) / (max - min) * 100.0,
        }
    }
}
