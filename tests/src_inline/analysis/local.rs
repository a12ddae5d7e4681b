use super::*;

use crate::input::csv::parse_report;

fn grouped(text: &str) -> GroupedReport {
    GroupedReport::from_records(parse_report(text).records)
}

const SCENARIO: &str = "Category,Test,Result,Unit,Min,Max\n\
LIPID,Total Cholesterol,210,mg/dL,150,200\n\
CBC,Hemoglobin,10,g/dL,13,17\n";

#[test]
fn test_survey_counts_and_descriptors() {
    let report = grouped(SCENARIO);
    let survey = survey(&report);

    assert_eq!(survey.abnormal_count, 2);
    assert_eq!(survey.abnormal_metrics.len(), 2);

    let first = &survey.abnormal_metrics[0];
    assert_eq!(first.name, "Total Cholesterol");
    assert_eq!(first.value, "210 mg/dL");
    assert_eq!(first.status, RangeStatus::High);
    assert_eq!(first.normal_range, "150 - 200 mg/dL");

    let second = &survey.abnormal_metrics[1];
    assert_eq!(second.status, RangeStatus::Low);

    assert_eq!(survey.tallies.len(), 2);
    assert_eq!(survey.tallies[0].name, "LIPID");
    assert_eq!(survey.tallies[0].abnormal, 1);
    assert_eq!(survey.tallies[0].normal, 0);
}

#[test]
fn test_unparsable_results_count_as_normal_in_survey() {
    let report = grouped("Category,Test,Result,Min,Max\nCBC,Hemoglobin,pending,13,17\n");
    let survey = survey(&report);
    assert_eq!(survey.abnormal_count, 0);
    assert_eq!(survey.tallies[0].normal, 1);
}

#[test]
fn test_key_findings_lists_at_most_three_metrics() {
    let report = grouped(
        "Category,Test,Result,Unit,Min,Max\n\
         A,T1,30,u,0.5,20\n\
         A,T2,30,u,0.5,20\n\
         B,T3,30,u,0.5,20\n\
         B,T4,30,u,0.5,20\n",
    );
    let survey = survey(&report);
    let findings = render_key_findings(&survey, SummaryThresholds::default_v1().findings_limit);

    assert!(findings.contains("- **4 abnormal results** detected in your health metrics"));
    assert!(findings.contains("- Most concerning metrics:"));
    assert!(findings.contains("**T3**"));
    assert!(!findings.contains("**T4**"));
}

#[test]
fn test_key_findings_all_normal() {
    let report = grouped("Category,Test,Result,Unit,Min,Max\nCBC,Hemoglobin,14,g/dL,13,17\n");
    let survey = survey(&report);
    assert_eq!(
        render_key_findings(&survey, 3),
        "- All health metrics are within normal ranges\n"
    );
}

#[test]
fn test_recommendations_name_every_abnormal_metric() {
    let report = grouped(SCENARIO);
    let survey = survey(&report);
    let recommendations = render_recommendations(&survey);
    assert!(recommendations.contains("- **Consult your doctor** about the 2 abnormal results"));
    assert!(recommendations.contains("- **Monitor closely**: Total Cholesterol, Hemoglobin"));
    assert!(recommendations.contains("lifestyle changes"));
}

#[test]
fn test_recommendations_all_normal() {
    let report = grouped("Category,Test,Result,Min,Max\nCBC,Hemoglobin,14,13,17\n");
    let survey = survey(&report);
    let recommendations = render_recommendations(&survey);
    assert!(recommendations.contains("Continue with your current health regimen"));
    assert!(recommendations.contains("Maintain regular checkups"));
}

#[test]
fn test_detailed_analysis_category_breakdown_rounds_percent() {
    let report = grouped(
        "Category,Test,Result,Min,Max\n\
         CBC,T1,14,13,17\n\
         CBC,T2,14,13,17\n\
         CBC,T3,30,13,17\n",
    );
    let survey = survey(&report);
    let detailed = render_detailed_analysis(&survey);
    assert!(detailed.starts_with("### Category Breakdown:\n"));
    assert!(detailed.contains("- **CBC**: 2 normal, 1 abnormal (33%)\n"));
}

#[test]
fn test_detailed_analysis_guards_zero_record_category() {
    // Grouping never produces an empty category, but the renderer must not
    // divide by zero if handed one.
    let survey = ReportSurvey {
        tallies: vec![CategoryTally {
            name: "EMPTY".to_string(),
            normal: 0,
            abnormal: 0,
        }],
        ..ReportSurvey::default()
    };
    let detailed = render_detailed_analysis(&survey);
    assert!(detailed.contains("- **EMPTY**: 0 normal, 0 abnormal (0%)\n"));
}

#[test]
fn test_detailed_analysis_trends_need_more_than_one_point() {
    let report = grouped(
        "Category,Test,Result,Min,Max,Date\n\
         CBC,Hemoglobin,14,13,17,Jan\n\
         CBC,Hemoglobin,15,13,17,Feb\n\
         CBC,Platelets,250,150,400,Jan\n",
    );
    let survey = survey(&report);
    let detailed = render_detailed_analysis(&survey);
    assert!(detailed.contains("### Trend Analysis:\n"));
    assert!(detailed.contains("- **Hemoglobin**: Jan: 14 → Feb: 15\n"));
    assert!(!detailed.contains("**Platelets**"));
}

#[test]
fn test_trend_dates_default_to_recent() {
    let report = grouped(
        "Category,Test,Result,Min,Max\n\
         CBC,Hemoglobin,14,13,17\n\
         CBC,Hemoglobin,15,13,17\n",
    );
    let survey = survey(&report);
    let detailed = render_detailed_analysis(&survey);
    assert!(detailed.contains("- **Hemoglobin**: Recent: 14 → Recent: 15\n"));
}

#[test]
fn test_trends_follow_tests_across_categories() {
    let report = grouped(
        "Category,Test,Result,Min,Max,Date\n\
         PANEL A,Glucose,95,70,100,Jan\n\
         PANEL B,Glucose,105,70,100,Feb\n",
    );
    let survey = survey(&report);
    assert_eq!(survey.trends.len(), 1);
    assert_eq!(survey.trends[0].1.len(), 2);
}

#[test]
fn test_quick_counts_zero_bound_means_no_bound() {
    // The classifier treats min=0 as a real bound; the dashboard counter
    // does not. Both behaviors are pinned.
    let report = grouped("Category,Test,Result,Min,Max\nMISC,T1,-5,0,10\n");
    let counts = quick_counts(&report);
    assert_eq!(counts.total, 1);
    assert_eq!(counts.abnormal, 0);
    assert_eq!(
        classify(&report.categories()[0].records[0]).status,
        RangeStatus::Low
    );
}

#[test]
fn test_quick_counts_unparsable_results_not_abnormal() {
    let report = grouped("Category,Test,Result,Min,Max\nCBC,T1,pending,13,17\n");
    assert_eq!(quick_counts(&report).abnormal, 0);
}

#[test]
fn test_quick_counts_totals_and_categories() {
    let report = grouped(SCENARIO);
    let counts = quick_counts(&report);
    assert_eq!(counts.total, 2);
    assert_eq!(counts.abnormal, 2);
    assert_eq!(counts.categories, 2);
}

#[test]
fn test_quick_insights_templates() {
    let counts = QuickCounts {
        total: 5,
        abnormal: 2,
        categories: 3,
    };
    assert_eq!(
        quick_insights(&counts),
        ["2 metrics need attention", "3 categories analyzed"]
    );

    let clean = QuickCounts {
        total: 5,
        abnormal: 0,
        categories: 0,
    };
    assert_eq!(
        quick_insights(&clean),
        ["All metrics look good", "Add more health data"]
    );
}

#[test]
fn test_quick_status_unknown_for_empty_counts() {
    let thresholds = SummaryThresholds::default_v1();
    let counts = QuickCounts::default();
    assert_eq!(quick_status(&counts, 0, &thresholds), HealthStatus::Unknown);
}

#[test]
fn test_checkup_window_formatting() {
    let thresholds = SummaryThresholds::default_v1();
    let today = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
    let (last, next) = checkup_window(today, &thresholds);
    assert_eq!(last, "Jan 5, 2025");
    assert_eq!(next, "Jul 4, 2025");
}

#[test]
fn test_score_boundary_dataset() {
    // 10 metrics, 3 out of range: score lands exactly on the Good boundary.
    let mut csv = String::from("Category,Test,Result,Min,Max\n");
    for i in 0..7 {
        csv.push_str(&format!("PANEL,N{i},15,10,20\n"));
    }
    for i in 0..3 {
        csv.push_str(&format!("PANEL,A{i},25,10,20\n"));
    }
    let report = grouped(&csv);
    let counts = quick_counts(&report);
    assert_eq!((counts.total, counts.abnormal), (10, 3));

    let score = health_score(counts.total, counts.abnormal);
    assert_eq!(score, 70);
    let thresholds = SummaryThresholds::default_v1();
    assert_eq!(
        quick_status(&counts, score, &thresholds),
        HealthStatus::Good
    );
}

#[test]
fn test_analyzer_rejects_empty_report() {
    let analyzer = LocalAnalyzer::new();
    let empty = GroupedReport::default();
    assert!(matches!(
        analyzer.full_summary(&empty),
        Err(AnalysisError::EmptyReport)
    ));
    assert!(matches!(
        analyzer.quick_summary(&empty),
        Err(AnalysisError::EmptyReport)
    ));
}

#[test]
fn test_custom_thresholds_move_the_status_boundary() {
    let mut thresholds = SummaryThresholds::default_v1();
    thresholds.good_min = 90;
    let analyzer = LocalAnalyzer::with_thresholds(thresholds);

    let report = grouped(
        "Category,Test,Result,Min,Max\n\
         PANEL,N1,15,10,20\n\
         PANEL,N2,15,10,20\n\
         PANEL,N3,15,10,20\n\
         PANEL,A1,25,10,20\n",
    );
    let quick = analyzer.quick_summary(&report).unwrap();
    assert_eq!(quick.score, 75);
    assert_eq!(quick.status, HealthStatus::Caution);
}

#[test]
fn test_end_to_end_scenario() {
    let report = grouped(SCENARIO);

    let cholesterol = classify(&report.get("LIPID").unwrap().records[0]);
    assert_eq!(cholesterol.status, RangeStatus::High);
    assert_eq!(cholesterol.position_pct, 100.0);

    let hemoglobin = classify(&report.get("CBC").unwrap().records[0]);
    assert_eq!(hemoglobin.status, RangeStatus::Low);
    assert_eq!(hemoglobin.position_pct, 10.0);

    let analyzer = LocalAnalyzer::new();
    let quick = analyzer.quick_summary(&report).unwrap();
    assert!(!quick.is_ai);
    assert_eq!(quick.score, 0);
    assert_eq!(quick.status, HealthStatus::Warning);
    assert_eq!(
        quick.insights,
        ["2 metrics need attention", "2 categories analyzed"]
    );

    let summary = analyzer.full_summary(&report).unwrap();
    assert!(
        summary
            .key_findings
            .contains("- **2 abnormal results** detected")
    );
    assert!(
        summary
            .detailed_analysis
            .contains("- **LIPID**: 0 normal, 1 abnormal (100%)")
    );
}
