use super::*;

use crate::input::csv::parse_report;

fn grouped(text: &str) -> GroupedReport {
    GroupedReport::from_records(parse_report(text).records)
}

#[test]
fn test_payload_shape() {
    let report = grouped(
        "Name,Category,Test,Result,Unit,Min,Max\n\
         Shoaib Alam,LIPID,Total Cholesterol,210,mg/dL,150,200\n\
         ,CBC,Note,pending,,,\n",
    );
    let payload = format_payload(&report);
    assert_eq!(payload.len(), 2);

    let value = serde_json::to_value(&payload).unwrap();
    let first = &value[0];
    assert_eq!(first["category"], "LIPID");
    assert_eq!(first["test"], "Total Cholesterol");
    assert_eq!(first["result"], 210.0);
    assert_eq!(first["resultRaw"], "210");
    assert_eq!(first["min"], 150.0);
    assert_eq!(first["isAbnormal"], true);

    let second = &value[1];
    assert!(second["result"].is_null());
    assert!(second["min"].is_null());
    assert!(second["max"].is_null());
    assert_eq!(second["isAbnormal"], false);
}

#[test]
fn test_payload_category_comes_from_group() {
    let report = grouped("Category,Test,Result\nCBC,Hemoglobin,14\n");
    let payload = format_payload(&report);
    assert_eq!(payload[0].category, "CBC");
}

#[test]
fn test_extract_summary_top_level() {
    let value = serde_json::json!({
        "keyFindings": "- findings",
        "recommendations": "- recs",
        "detailedAnalysis": "details"
    });
    let summary = extract_summary(&value).unwrap();
    assert_eq!(summary.key_findings, "- findings");
    assert_eq!(summary.recommendations, "- recs");
    assert_eq!(summary.detailed_analysis, "details");
}

#[test]
fn test_extract_summary_nested_under_predictions() {
    let value = serde_json::json!({
        "predictions": {
            "keyFindings": "- findings",
            "recommendations": "- recs",
            "detailedAnalysis": "details"
        }
    });
    let summary = extract_summary(&value).unwrap();
    assert_eq!(summary.key_findings, "- findings");
}

#[test]
fn test_extract_summary_accepts_aliases() {
    let value = serde_json::json!({
        "output": {
            "summary": "- findings",
            "details": "details"
        }
    });
    let summary = extract_summary(&value).unwrap();
    assert_eq!(summary.key_findings, "- findings");
    assert_eq!(summary.recommendations, "");
    assert_eq!(summary.detailed_analysis, "details");
}

#[test]
fn test_extract_summary_rejects_malformed_body() {
    let value = serde_json::json!({ "something": "else" });
    let err = extract_summary(&value).unwrap_err();
    assert!(matches!(err, AnalysisError::MalformedResponse(_)));
}

#[test]
fn test_insight_pair_pads_short_lists() {
    let pair = insight_pair(vec![]);
    assert_eq!(pair, ["Review your blood work", "Monitor your vitamin levels"]);

    let pair = insight_pair(vec!["only one".to_string()]);
    assert_eq!(pair[0], "only one");
    assert_eq!(pair[1], "Monitor your vitamin levels");

    let pair = insight_pair(vec![
        "a".to_string(),
        "b".to_string(),
        "c".to_string(),
    ]);
    assert_eq!(pair, ["a", "b"]);
}

#[test]
fn test_from_config_requires_base_url() {
    assert!(RemoteAnalyzer::from_config(RemoteConfig::default()).is_none());
    assert!(
        RemoteAnalyzer::from_config(RemoteConfig {
            base_url: Some("   ".to_string()),
            ..RemoteConfig::default()
        })
        .is_none()
    );
}

#[test]
fn test_from_config_trims_trailing_slash() {
    let remote = RemoteAnalyzer::from_config(RemoteConfig {
        base_url: Some("http://localhost:8000/mock-api/".to_string()),
        ..RemoteConfig::default()
    })
    .unwrap();
    assert_eq!(remote.base_url(), "http://localhost:8000/mock-api");
}
