use std::{fs, path::PathBuf};

use tempfile::tempdir;

use cloudsketch::CloudsketchError;
use cloudsketch_cli::{Args, OutputFormat, TargetArg, run};

fn plans_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("plans")
}

/// Collects all .txt plans from a directory
fn collect_plans(dir: PathBuf) -> Vec<PathBuf> {
    let mut files = if let Ok(entries) = fs::read_dir(&dir) {
        entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("txt")
            })
            .collect()
    } else {
        Vec::new()
    };

    files.sort();
    files
}

fn args(input: &PathBuf, output: &PathBuf) -> Args {
    Args {
        input: Some(input.to_string_lossy().to_string()),
        title: Some("Smoke Test".to_string()),
        target: TargetArg::All,
        format: OutputFormat::Raw,
        output: Some(output.to_string_lossy().to_string()),
        config: None,
        log_level: "off".to_string(),
    }
}

#[test]
fn e2e_smoke_test_all_plans() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let plans = collect_plans(plans_dir());
    assert!(!plans.is_empty(), "No plans found in tests/plans/");

    let mut failed = Vec::new();
    for plan in &plans {
        let output = temp_dir.path().join(plan.file_stem().unwrap());
        if let Err(e) = run(&args(plan, &output)) {
            failed.push((plan.clone(), e));
            continue;
        }

        for file in [
            "architecture.txt",
            "architecture.mmd",
            "architecture.puml",
            "summary.txt",
        ] {
            let content = fs::read_to_string(output.join(file)).unwrap_or_default();
            assert!(!content.is_empty(), "{file} missing for {}", plan.display());
        }

        let markup = fs::read_to_string(output.join("architecture.puml")).unwrap();
        assert!(markup.starts_with("@startuml\n"));
        assert!(markup.contains("title Smoke Test"));
        let flowchart = fs::read_to_string(output.join("architecture.mmd")).unwrap();
        assert!(flowchart.contains("flowchart TD"));
    }

    if !failed.is_empty() {
        eprintln!("\nPlans that failed:");
        for (path, err) in &failed {
            eprintln!("  - {}: {}", path.display(), err);
        }
        panic!("{} plan(s) failed unexpectedly", failed.len());
    }

    println!("✅ All {} plans rendered", plans.len());
}

#[test]
fn e2e_three_tier_plan() {
    let temp_dir = tempdir().unwrap();
    let output = temp_dir.path().join("out");
    run(&args(&plans_dir().join("three_tier.txt"), &output)).unwrap();

    let text = fs::read_to_string(output.join("architecture.txt")).unwrap();
    assert!(text.contains("COMPLEX ARCHITECTURE"));
    assert!(text.contains("SHARED SERVICES"));

    let summary = fs::read_to_string(output.join("summary.txt")).unwrap();
    assert!(summary.contains("Load Balancer → EC2 Instance 1 (distributes to)"));
    assert!(summary.contains("EC2 Instance 1 → RDS Database (queries)"));
}

#[test]
fn e2e_unrecognized_plan_uses_generic_diagram() {
    let temp_dir = tempdir().unwrap();
    let output = temp_dir.path().join("out");
    run(&args(&plans_dir().join("unrecognized.txt"), &output)).unwrap();

    let text = fs::read_to_string(output.join("architecture.txt")).unwrap();
    assert!(text.contains("Data Flow: Users → Gateway → App → Data → Storage"));
    let summary = fs::read_to_string(output.join("summary.txt")).unwrap();
    assert!(summary.contains("Generic cloud infrastructure components"));
}

#[test]
fn e2e_single_target_with_json_document() {
    let temp_dir = tempdir().unwrap();
    let output = temp_dir.path().join("out");
    let mut args = args(&plans_dir().join("static_site.txt"), &output);
    args.target = TargetArg::Flowchart;
    args.format = OutputFormat::Json;
    run(&args).unwrap();

    assert!(output.join("architecture.mmd").exists());
    assert!(output.join("summary.txt").exists());
    assert!(!output.join("architecture.txt").exists());
    assert!(!output.join("architecture.puml").exists());

    let json = fs::read_to_string(output.join("architecture.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["title"], "Smoke Test");
    assert!(
        value["diagrams"]["flowchart-markup"]
            .as_str()
            .unwrap()
            .contains("cloudfront --> s3")
    );
}

#[test]
fn e2e_markdown_document() {
    let temp_dir = tempdir().unwrap();
    let output = temp_dir.path().join("out");
    let mut args = args(&plans_dir().join("serverless.txt"), &output);
    args.format = OutputFormat::Markdown;
    run(&args).unwrap();

    let markdown = fs::read_to_string(output.join("architecture.md")).unwrap();
    assert!(markdown.starts_with("# Smoke Test\n"));
    assert!(markdown.contains("```mermaid\n"));
    assert!(markdown.contains("```plantuml\n"));
    assert!(markdown.contains("apigateway --> lambda : invokes"));
}

#[test]
fn e2e_custom_service_from_config() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(
        &config_path,
        r#"
[diagram]
title = "Queue Demo"

[[services]]
key = "sqs"
category = "compute"
label = "SQS Queue"
glyph = "📬"
patterns = ["sqs", "message queue"]
"#,
    )
    .unwrap();

    let plan_path = temp_dir.path().join("plan.txt");
    fs::write(&plan_path, "lambda sends to sqs, a message queue").unwrap();

    let output = temp_dir.path().join("out");
    let mut args = args(&plan_path, &output);
    args.title = None;
    args.config = Some(config_path.to_string_lossy().to_string());
    run(&args).unwrap();

    let flowchart = fs::read_to_string(output.join("architecture.mmd")).unwrap();
    assert!(flowchart.contains("title: \"Queue Demo\""));
    assert!(flowchart.contains("sqs[📬 SQS Queue]"));
    assert!(flowchart.contains("lambda --> sqs"));
}

#[test]
fn e2e_missing_input_fails() {
    let temp_dir = tempdir().unwrap();
    let output = temp_dir.path().join("out");
    let err = run(&args(&plans_dir().join("does_not_exist.txt"), &output)).unwrap_err();
    assert!(matches!(err, CloudsketchError::Io(_)));
}

#[test]
fn e2e_missing_config_fails() {
    let temp_dir = tempdir().unwrap();
    let output = temp_dir.path().join("out");
    let mut args = args(&plans_dir().join("static_site.txt"), &output);
    args.config = Some(temp_dir.path().join("nope.toml").to_string_lossy().to_string());
    let err = run(&args).unwrap_err();
    assert!(matches!(err, CloudsketchError::Config(_)));
}
