use fraud_dashboard::config::{DashboardConfig, IngressMode};
use fraud_dashboard::dashboard::{
    DashboardView, PipelineSettings, ReportPipeline, SectionOutcome, SourceSet,
};
use fraud_dashboard::data::schema::{FRAUD_COUNT, STEP};
use fraud_dashboard::data::{
    ReportError, ReportKind, ReportLoader, ReportProcessor, ReportSource, SortOrder,
};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_report(dir: &Path, kind: ReportKind, content: &str) {
    fs::write(dir.join(kind.default_file_name()), content).unwrap();
}

fn config_for(dir: &TempDir) -> DashboardConfig {
    DashboardConfig {
        data_dir: dir.path().to_path_buf(),
        ..Default::default()
    }
}

fn write_all_reports(dir: &Path) {
    write_report(
        dir,
        ReportKind::RawDataset,
        "step;type;amount;nameOrig;nameDest;isFraud\n\
         1;PAYMENT;9839.64;C1231006815;M1979787155;0\n\
         1;TRANSFER;181.0;C1305486145;C553264065;1\n\
         1;CASH_OUT;181.0;C840083671;C38997010\n",
    );
    write_report(
        dir,
        ReportKind::TransactionTypes,
        "CASH_IN\t1399284\nCASH_OUT\t2237500\nDEBIT\t41432\nPAYMENT\t2151495\nTRANSFER\t532909\n",
    );
    write_report(dir, ReportKind::FraudVsNonFraud, "0\t6354407\n1\t8213\n");
    write_report(dir, ReportKind::FraudByStep, "1\t16\n2\t8\n3\t4\n212\t40\n");
    write_report(dir, ReportKind::FraudByType, "CASH_OUT\t4116\nTRANSFER\t4097\n");
    write_report(
        dir,
        ReportKind::PatternDetail,
        "C1305486145→C553264065\t1\nC840083671→C38997010\t1\n",
    );
    write_report(
        dir,
        ReportKind::RepeatedPatterns,
        "+----------------------+-------+\n\
         | pattern              | count |\n\
         | C1305486145→C553264065 | 3 |\n\
         | C840083671→C38997010 | 2 |\n\
         +----------------------+-------+\n",
    );
}

#[test]
fn every_view_renders_from_the_data_folder() {
    let dir = TempDir::new().unwrap();
    write_all_reports(dir.path());
    let config = config_for(&dir);
    let sources = SourceSet::from_config(&config);
    let settings = PipelineSettings::from(&config);

    for view in DashboardView::ALL {
        let report = ReportPipeline::render(view, &sources, &settings);
        assert_eq!(report.sections.len(), view.report_kinds().len());
        for section in &report.sections {
            match &section.outcome {
                SectionOutcome::Ready(content) => assert!(content.notice.is_none(), "{view:?}"),
                other => panic!("{view:?} / {}: {other:?}", section.kind),
            }
        }
    }
}

#[test]
fn three_good_lines_and_one_malformed() {
    let dir = TempDir::new().unwrap();
    write_report(
        dir.path(),
        ReportKind::FraudByStep,
        "0\t5\n1\t42\n1\t2\t3\n2\t7\n",
    );
    let path = dir.path().join(ReportKind::FraudByStep.default_file_name());
    let table = ReportLoader::load_path(&path, &ReportKind::FraudByStep.schema()).unwrap();
    assert_eq!(table.height(), 3);
    assert_eq!(table.stats().malformed_lines, 1);

    let top = ReportProcessor::top_k(&table, FRAUD_COUNT, 1, SortOrder::Descending).unwrap();
    assert_eq!(top.text_values(STEP).unwrap(), vec![Some("1".to_string())]);
    assert_eq!(top.f64_values(FRAUD_COUNT).unwrap(), vec![Some(42.0)]);
}

#[test]
fn missing_report_is_source_unavailable_and_siblings_still_render() {
    let dir = TempDir::new().unwrap();
    write_report(
        dir.path(),
        ReportKind::PatternDetail,
        "C1→C2\t4\n",
    );
    let config = config_for(&dir);
    let sources = SourceSet::from_config(&config);
    let report = ReportPipeline::render(
        DashboardView::SuspiciousPatterns,
        &sources,
        &PipelineSettings::default(),
    );

    assert!(matches!(report.sections[0].outcome, SectionOutcome::Ready(_)));
    assert!(matches!(
        report.sections[1].outcome,
        SectionOutcome::Failed(ReportError::SourceUnavailable { .. })
    ));
}

#[test]
fn directory_in_place_of_file_is_source_unavailable() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join(ReportKind::FraudByType.default_file_name())).unwrap();
    let source = ReportSource::Path(dir.path().join(ReportKind::FraudByType.default_file_name()));
    let result = ReportLoader::load(&source, &ReportKind::FraudByType.schema());
    assert!(matches!(result, Err(ReportError::SourceUnavailable { .. })));
}

#[test]
fn readable_but_empty_file_is_no_data_not_an_error() {
    let dir = TempDir::new().unwrap();
    write_report(dir.path(), ReportKind::FraudByStep, "\n\nnot a row\n");
    let config = config_for(&dir);
    let report = ReportPipeline::render(
        DashboardView::FraudByStep,
        &SourceSet::from_config(&config),
        &PipelineSettings::default(),
    );
    match &report.sections[0].outcome {
        SectionOutcome::Ready(content) => {
            assert_eq!(content.notice.as_deref(), Some("No data"));
            assert!(content.insight.is_none());
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn upload_mode_uses_picked_bytes_over_the_data_folder() {
    let dir = TempDir::new().unwrap();
    write_report(dir.path(), ReportKind::FraudByType, "CASH_OUT\t1\n");
    let mut config = config_for(&dir);
    config.ingress = IngressMode::Upload;

    let mut sources = SourceSet::from_config(&config);
    let settings = PipelineSettings::from(&config);

    let report = ReportPipeline::render(DashboardView::FraudByType, &sources, &settings);
    assert!(matches!(
        report.sections[0].outcome,
        SectionOutcome::AwaitingSource
    ));

    sources.set_upload(
        ReportKind::FraudByType,
        "fraud_by_type.txt".to_string(),
        b"TRANSFER\t4097\nCASH_OUT\t4116\n".to_vec(),
    );
    let report = ReportPipeline::render(DashboardView::FraudByType, &sources, &settings);
    match &report.sections[0].outcome {
        SectionOutcome::Ready(content) => assert_eq!(
            content.insight.as_deref(),
            Some("The transaction type with the most fraud is CASH_OUT with 4116 cases.")
        ),
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn config_file_overrides_file_names() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("steps.tsv"), "5\t9\n").unwrap();
    let config_path = dir.path().join("dashboard.toml");
    fs::write(
        &config_path,
        format!(
            "data_dir = {:?}\n\n[files]\nfraud_by_step = \"steps.tsv\"\n",
            dir.path().display().to_string()
        ),
    )
    .unwrap();

    let config = DashboardConfig::load_from_file(&config_path).unwrap();
    let report = ReportPipeline::render(
        DashboardView::FraudByStep,
        &SourceSet::from_config(&config),
        &PipelineSettings::from(&config),
    );
    match &report.sections[0].outcome {
        SectionOutcome::Ready(content) => assert_eq!(
            content.insight.as_deref(),
            Some("Highest fraud occurs at step 5 with 9 fraud cases.")
        ),
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn spreadsheet_export_with_bom_and_quoted_separator() {
    let dir = TempDir::new().unwrap();
    write_report(
        dir.path(),
        ReportKind::RawDataset,
        "\u{feff}step;type;nameOrig\n1;\"PAY;MENT\";C1\n2;TRANSFER;C2\n",
    );
    let path = dir.path().join(ReportKind::RawDataset.default_file_name());
    let table = ReportLoader::load_path(&path, &ReportKind::RawDataset.schema()).unwrap();
    assert_eq!(table.column_names(), vec!["step", "type", "nameOrig"]);
    assert_eq!(table.height(), 2);
    assert_eq!(table.stats().malformed_lines, 0);
}
