use serde::Serialize;

use crate::analysis::remote::RemoteAnalyzer;
use crate::model::grouped::GroupedReport;
use crate::model::range::parse_value;
use crate::model::record::Record;

// Category labels as they appear in the supported lab reports.
const LIPID_CATEGORY: &str = "LIPID PROFILE";
const GLUCOSE_CATEGORIES: [&str; 2] = ["GLUCOSE FASTING", "Glycated Hemoglobin ( HbA1c ) HPLC"];
const CBC_CATEGORY: &str = "COMPLETE BLOOD COUNTS - CBC";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionTopic {
    Nutrition,
    Medications,
    Activity,
}

impl SuggestionTopic {
    pub fn all() -> &'static [SuggestionTopic] {
        &[
            SuggestionTopic::Nutrition,
            SuggestionTopic::Medications,
            SuggestionTopic::Activity,
        ]
    }

    pub fn name(self) -> &'static str {
        match self {
            SuggestionTopic::Nutrition => "nutrition",
            SuggestionTopic::Medications => "medications",
            SuggestionTopic::Activity => "activity",
        }
    }

    pub fn endpoint(self) -> &'static str {
        match self {
            SuggestionTopic::Nutrition => "nutrition-suggestions",
            SuggestionTopic::Medications => "medication-suggestions",
            SuggestionTopic::Activity => "activity-suggestions",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            SuggestionTopic::Nutrition => "Nutrition Suggestions",
            SuggestionTopic::Medications => "Medication Considerations",
            SuggestionTopic::Activity => "Activity Recommendations",
        }
    }

    pub fn remote_description(self) -> &'static str {
        match self {
            SuggestionTopic::Nutrition => {
                "Based on your health metrics, here are some nutrition recommendations that may help improve your health outcomes:"
            }
            SuggestionTopic::Medications => {
                "Based on your health data, here are some medication considerations to discuss with your doctor:"
            }
            SuggestionTopic::Activity => {
                "Based on your health metrics, here are some physical activity recommendations that may be beneficial:"
            }
        }
    }

    pub fn local_description(self) -> &'static str {
        match self {
            SuggestionTopic::Nutrition => {
                "Based on your health profile, here are some nutrition recommendations:"
            }
            SuggestionTopic::Medications => {
                "Based on your health profile, here are some medication considerations to discuss with your healthcare provider:"
            }
            SuggestionTopic::Activity => {
                "Based on your health profile, here are some physical activity recommendations:"
            }
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SuggestionSet {
    #[serde(rename = "isAI")]
    pub is_ai: bool,
    pub title: String,
    pub description: String,
    pub suggestions: Vec<String>,
}

/// Remote endpoint first when configured, rule-based defaults otherwise.
pub fn generate_suggestions(
    remote: Option<&RemoteAnalyzer>,
    report: &GroupedReport,
    topic: SuggestionTopic,
) -> SuggestionSet {
    if let Some(remote) = remote {
        match remote.suggestions(report, topic) {
            Ok(set) => return set,
            Err(err) => tracing::warn!(
                "remote {} suggestions failed; using local defaults: {err}",
                topic.name()
            ),
        }
    }
    SuggestionSet {
        is_ai: false,
        title: topic.title().to_string(),
        description: topic.local_description().to_string(),
        suggestions: local_defaults(report, topic),
    }
}

pub fn local_defaults(report: &GroupedReport, topic: SuggestionTopic) -> Vec<String> {
    match topic {
        SuggestionTopic::Nutrition => nutrition_defaults(report),
        SuggestionTopic::Medications => medication_defaults(report),
        SuggestionTopic::Activity => activity_defaults(report),
    }
}

fn nutrition_defaults(report: &GroupedReport) -> Vec<String> {
    let mut suggestions = vec![
        "Incorporate a variety of colorful vegetables and fruits daily".to_string(),
        "Stay hydrated with water rather than sugary beverages".to_string(),
    ];

    let lipid = has_lipid_issues(report);
    let glucose = has_glucose_issues(report);

    if lipid {
        suggestions.push(
            "Consider increasing your intake of omega-3 fatty acids from sources like fatty fish, flaxseeds, and walnuts".to_string(),
        );
        suggestions.push(
            "Reduce consumption of saturated fats found in red meat and full-fat dairy products"
                .to_string(),
        );
        suggestions.push(
            "Add more soluble fiber from foods like oats, beans, and fruits to help lower cholesterol".to_string(),
        );
    }

    if glucose {
        suggestions.push(
            "Choose complex carbohydrates like whole grains over simple carbs like white bread and sugar".to_string(),
        );
        suggestions
            .push("Include protein with each meal to help stabilize blood sugar levels".to_string());
        suggestions.push(
            "Consider a meal schedule that promotes stable blood sugar throughout the day"
                .to_string(),
        );
    }

    if !lipid && !glucose {
        suggestions.push(
            "Maintain a balanced diet with appropriate portions of proteins, carbohydrates, and healthy fats".to_string(),
        );
        suggestions.push(
            "Consider consulting with a registered dietitian for personalized nutrition advice"
                .to_string(),
        );
    }

    suggestions
}

fn medication_defaults(report: &GroupedReport) -> Vec<String> {
    let mut suggestions = vec![
        "IMPORTANT: This is not medical advice. Always consult with a healthcare professional before starting or changing medications".to_string(),
        "Keep an updated list of all medications, supplements, and vitamins you take".to_string(),
        "Discuss potential drug interactions with your healthcare provider".to_string(),
        "Follow medication schedules carefully and set reminders if needed".to_string(),
    ];

    if has_lipid_issues(report) {
        suggestions.push(
            "If taking cholesterol-lowering medications, consider discussing regular liver function tests with your doctor".to_string(),
        );
    }

    if has_glucose_issues(report) {
        suggestions.push(
            "For diabetes medications, monitor your blood glucose levels as recommended by your healthcare provider".to_string(),
        );
    }

    suggestions
}

fn activity_defaults(report: &GroupedReport) -> Vec<String> {
    let mut suggestions = vec![
        "Aim for at least 150 minutes of moderate-intensity aerobic activity per week".to_string(),
        "Include muscle-strengthening activities at least twice weekly".to_string(),
    ];

    if has_low_haemoglobin(report) {
        suggestions.push(
            "Start with shorter exercise sessions and gradually increase duration as your fitness improves".to_string(),
        );
        suggestions.push(
            "Monitor your heart rate during exercise and learn the signs of overexertion"
                .to_string(),
        );
        suggestions.push(
            "Consider activities that allow for easy adjustment of intensity, such as walking or stationary cycling".to_string(),
        );
    }

    suggestions.push("Find activities you enjoy to help maintain consistency".to_string());
    suggestions.push("Start any new exercise program gradually to avoid injury".to_string());
    suggestions.push(
        "Incorporate both cardiovascular exercise and strength training for balanced fitness"
            .to_string(),
    );

    suggestions
}

fn exceeds_max(record: &Record) -> bool {
    let max = parse_value(&record.max);
    let result = parse_value(&record.result);
    !max.is_nan() && max != 0.0 && result > max
}

fn below_min(record: &Record) -> bool {
    let min = parse_value(&record.min);
    let result = parse_value(&record.result);
    !min.is_nan() && min != 0.0 && result < min
}

fn has_lipid_issues(report: &GroupedReport) -> bool {
    report.get(LIPID_CATEGORY).is_some_and(|group| {
        group.records.iter().any(|r| {
            (r.test.contains("CHOLESTEROL")
                || r.test.contains("TRIGLYCERIDES")
                || r.test.contains("LDL"))
                && exceeds_max(r)
        })
    })
}

fn has_glucose_issues(report: &GroupedReport) -> bool {
    GLUCOSE_CATEGORIES.iter().any(|category| {
        report
            .get(category)
            .is_some_and(|group| group.records.iter().any(exceeds_max))
    })
}

fn has_low_haemoglobin(report: &GroupedReport) -> bool {
    report.get(CBC_CATEGORY).is_some_and(|group| {
        group
            .records
            .iter()
            .any(|r| r.test.contains("HAEMOGLOBIN") && below_min(r))
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/analysis/suggestions.rs"]
mod tests;
