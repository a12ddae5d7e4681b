#[derive(Debug, Clone)]
pub struct SummaryThresholds {
    pub good_min: u32,
    pub caution_min: u32,
    pub findings_limit: usize,
    pub quick_insight_limit: usize,
    pub last_checkup_days: i64,
    pub next_checkup_days: i64,
}

impl SummaryThresholds {
    pub fn default_v1() -> Self {
        Self {
            good_min: 70,
            caution_min: 50,
            findings_limit: 3,
            quick_insight_limit: 10,
            last_checkup_days: 55,
            next_checkup_days: 125,
        }
    }
}
