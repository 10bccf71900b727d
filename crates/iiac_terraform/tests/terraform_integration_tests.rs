//! Integration tests for generation and validation.
//!
//! External processes are replaced by `MockRunner`, so these tests run
//! without a Terraform installation.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use iiac_config::{ConfigFormat, ConfigLoader, Configuration};
use iiac_rules::{resolve, ModuleId, ResolutionPlan, OPTIONAL_MODULES};
use iiac_runner::{MockResponse, MockRunner, SimulatedFault};
use iiac_templates::TemplateError;
use iiac_terraform::{
    list_artifacts, ArtifactKind, IacError, IacGenerator, StepOutcome, Terraform, TerraformOptions,
    TerraformValidator,
};
use tempfile::{tempdir, TempDir};

fn shipped_templates() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../templates")
}

/// Write a minimal `aws` template set with one template per module.
fn write_templates(root: &Path, modules: &[ModuleId], common: &[&str]) {
    let dir = root.join("aws");
    fs::create_dir_all(&dir).unwrap();
    for module in modules {
        fs::write(
            dir.join(module.template_name()),
            format!("# {} in {{{{ region }}}} ({{{{ environment }}}})\n", module),
        )
        .unwrap();
    }
    for name in common {
        fs::write(dir.join(format!("{name}.tf.j2")), format!("# {name}\n")).unwrap();
    }
}

fn generator(templates: &Path, runner: &MockRunner) -> IacGenerator {
    IacGenerator::new(templates, terraform(runner))
}

fn terraform(runner: &MockRunner) -> Terraform {
    Terraform::new(Arc::new(runner.clone()), TerraformOptions::default())
}

fn minimal_plan() -> ResolutionPlan {
    let config = ConfigLoader::from_str(
        r#"{"provider":"aws","region":"us-east-1","resources":{}}"#,
        ConfigFormat::Json,
    )
    .unwrap();
    resolve(&config, None).unwrap()
}

fn workspace() -> (TempDir, PathBuf, PathBuf) {
    let temp = tempdir().unwrap();
    let templates = temp.path().join("templates");
    let output = temp.path().join("output");
    (temp, templates, output)
}

fn file_set(dir: &Path) -> BTreeSet<String> {
    list_artifacts(dir).unwrap().into_iter().collect()
}

#[tokio::test]
async fn test_minimal_configuration_end_to_end() {
    let (_temp, templates, output) = workspace();
    write_templates(&templates, &ModuleId::all(), &[]);
    let runner = MockRunner::new();

    let plan = minimal_plan();
    let report = generator(&templates, &runner).generate(&plan, &output).await.unwrap();

    assert_eq!(
        report.written_files(),
        vec!["vpc.tf", "ec2.tf", "iam.tf", "s3.tf", "alb.tf"]
    );
    assert_eq!(
        list_artifacts(&output).unwrap(),
        vec!["alb.tf", "ec2.tf", "iam.tf", "s3.tf", "vpc.tf"]
    );
    assert_eq!(
        fs::read_to_string(output.join("vpc.tf")).unwrap(),
        "# vpc in us-east-1 (dev)"
    );
}

#[tokio::test]
async fn test_listing_matches_plan_plus_present_common() {
    let (_temp, templates, output) = workspace();
    write_templates(&templates, &ModuleId::all(), &["variables", "provider"]);
    let runner = MockRunner::new();

    let config = Configuration::new("aws", "us-east-1")
        .with_resource("rds", true)
        .with_resource("alb", false);
    let plan = resolve(&config, None).unwrap();
    let report = generator(&templates, &runner).generate(&plan, &output).await.unwrap();

    let mut expected: BTreeSet<String> = plan.modules.iter().map(|m| m.file_name()).collect();
    expected.insert("variables.tf".to_string());
    expected.insert("provider.tf".to_string());
    assert_eq!(file_set(&output), expected);

    let skipped = report.skipped();
    assert_eq!(skipped.len(), 1);
    assert_eq!(skipped[0].file_name, "outputs.tf");
    assert_eq!(skipped[0].kind, ArtifactKind::Common);
    assert!(skipped[0].render.is_skipped());
    assert!(skipped[0].format.is_none());
}

#[tokio::test]
async fn test_formatter_runs_per_file_then_directory() {
    let (_temp, templates, output) = workspace();
    write_templates(&templates, &ModuleId::all(), &["outputs"]);
    let runner = MockRunner::new();

    let plan = minimal_plan();
    generator(&templates, &runner).generate(&plan, &output).await.unwrap();

    assert_eq!(
        runner.command_lines(),
        vec![
            "terraform fmt vpc.tf",
            "terraform fmt ec2.tf",
            "terraform fmt iam.tf",
            "terraform fmt s3.tf",
            "terraform fmt alb.tf",
            "terraform fmt outputs.tf",
            "terraform fmt",
        ]
    );
    assert!(runner.get_calls().iter().all(|c| c.working_dir == output));
}

#[tokio::test]
async fn test_formatter_failures_never_abort() {
    let (_temp, templates, output) = workspace();
    write_templates(&templates, &ModuleId::all(), &["variables", "outputs", "provider"]);
    let runner = MockRunner::new().on("terraform fmt", MockResponse::failure(2, "bad syntax"));

    let report = generator(&templates, &runner)
        .generate(&minimal_plan(), &output)
        .await
        .unwrap();

    assert_eq!(report.written_files().len(), 8);
    assert!(report
        .artifacts
        .iter()
        .all(|a| matches!(a.format, Some(StepOutcome::FailedIgnored(_)))));
    assert!(report.directory_format.is_failed());
}

#[tokio::test]
async fn test_missing_terraform_does_not_abort_generation() {
    let (_temp, templates, output) = workspace();
    write_templates(&templates, &ModuleId::all(), &[]);
    let runner = MockRunner::new().simulate_fault(SimulatedFault::Unavailable);

    let report = generator(&templates, &runner)
        .generate(&minimal_plan(), &output)
        .await
        .unwrap();

    assert_eq!(report.written_files().len(), 5);
    assert!(report.directory_format.is_failed());
}

#[tokio::test]
async fn test_generation_is_idempotent_and_replaces_output() {
    let (_temp, templates, output) = workspace();
    write_templates(&templates, &ModuleId::all(), &["variables"]);
    let runner = MockRunner::new();
    let gen = generator(&templates, &runner);
    let plan = minimal_plan();

    gen.generate(&plan, &output).await.unwrap();
    let first: Vec<(String, Vec<u8>)> = list_artifacts(&output)
        .unwrap()
        .into_iter()
        .map(|f| {
            let bytes = fs::read(output.join(&f)).unwrap();
            (f, bytes)
        })
        .collect();

    fs::write(output.join("stale.tf"), "left over").unwrap();
    gen.generate(&plan, &output).await.unwrap();
    let second: Vec<(String, Vec<u8>)> = list_artifacts(&output)
        .unwrap()
        .into_iter()
        .map(|f| {
            let bytes = fs::read(output.join(&f)).unwrap();
            (f, bytes)
        })
        .collect();

    assert_eq!(first, second);
    assert!(!output.join("stale.tf").exists());
}

#[tokio::test]
async fn test_missing_required_template_aborts_and_cleans_up() {
    let (_temp, templates, output) = workspace();
    write_templates(&templates, &[ModuleId::Vpc, ModuleId::Ec2, ModuleId::Iam, ModuleId::S3], &[]);
    fs::create_dir_all(&output).unwrap();
    fs::write(output.join("vpc.tf"), "from a previous run").unwrap();
    let runner = MockRunner::new();

    let err = generator(&templates, &runner)
        .generate(&minimal_plan(), &output)
        .await
        .unwrap_err();

    assert!(matches!(err, IacError::Template(TemplateError::NotFound(ref name)) if name == "alb.tf.j2"));
    assert!(!output.exists());
}

#[tokio::test]
async fn test_broken_required_template_is_fatal() {
    let (_temp, templates, output) = workspace();
    write_templates(&templates, &ModuleId::all(), &[]);
    fs::write(templates.join("aws").join("ec2.tf.j2"), "{% for %}").unwrap();
    let runner = MockRunner::new();

    let err = generator(&templates, &runner)
        .generate(&minimal_plan(), &output)
        .await
        .unwrap_err();

    assert!(matches!(err, IacError::Template(TemplateError::RenderingFailed { .. })));
    assert!(!output.exists());
}

#[tokio::test]
async fn test_broken_common_template_is_ignored() {
    let (_temp, templates, output) = workspace();
    write_templates(&templates, &ModuleId::all(), &["variables"]);
    fs::write(templates.join("aws").join("outputs.tf.j2"), "{% if %}").unwrap();
    let runner = MockRunner::new();

    let report = generator(&templates, &runner)
        .generate(&minimal_plan(), &output)
        .await
        .unwrap();

    let outputs = report
        .artifacts
        .iter()
        .find(|a| a.file_name == "outputs.tf")
        .unwrap();
    assert!(outputs.render.is_failed());
    assert!(output.join("variables.tf").exists());
    assert!(!output.join("outputs.tf").exists());
}

#[tokio::test]
async fn test_missing_template_set() {
    let (_temp, templates, output) = workspace();
    let runner = MockRunner::new();

    let err = generator(&templates, &runner)
        .generate(&minimal_plan(), &output)
        .await
        .unwrap_err();

    assert!(matches!(err, IacError::Template(TemplateError::TemplateSetNotFound(_))));
    assert!(!output.exists());
}

#[tokio::test]
async fn test_selected_service_generates_single_file() {
    let (_temp, templates, output) = workspace();
    write_templates(&templates, &ModuleId::all(), &[]);
    let runner = MockRunner::new();

    let plan = resolve(&Configuration::new("aws", "us-east-1"), Some("s3")).unwrap();
    generator(&templates, &runner).generate(&plan, &output).await.unwrap();

    assert_eq!(list_artifacts(&output).unwrap(), vec!["s3.tf"]);
}

#[tokio::test]
async fn test_shipped_templates_render_every_module() {
    let temp = tempdir().unwrap();
    let output = temp.path().join("output");
    let runner = MockRunner::new();

    let mut config = Configuration::new("aws", "eu-west-1").with_environment("staging");
    for optional in &OPTIONAL_MODULES {
        config = config.with_resource(optional.resource_key, true);
    }
    let plan = resolve(&config, None).unwrap();

    let report = generator(&shipped_templates(), &runner)
        .generate(&plan, &output)
        .await
        .unwrap();

    assert!(report.skipped().is_empty());
    assert_eq!(report.written_files().len(), ModuleId::all().len() + 3);

    let provider = fs::read_to_string(output.join("provider.tf")).unwrap();
    assert!(provider.contains("hashicorp/aws"));
    assert!(provider.contains("Env = \"staging\""));

    let variables = fs::read_to_string(output.join("variables.tf")).unwrap();
    assert!(variables.contains("default     = \"eu-west-1\""));
    assert!(variables.contains("variable \"db_engine\""));
}

#[tokio::test]
async fn test_generate_then_validate() {
    let (_temp, templates, output) = workspace();
    write_templates(&templates, &ModuleId::all(), &[]);
    let runner = MockRunner::new().on("terraform fmt -check", MockResponse::failure(3, "vpc.tf"));

    let tf = terraform(&runner);
    IacGenerator::new(&templates, tf.clone())
        .generate(&minimal_plan(), &output)
        .await
        .unwrap();
    runner.clear_calls();

    let report = TerraformValidator::new(tf).validate(&output).await.unwrap();

    assert!(!report.passed());
    assert_eq!(runner.command_lines(), vec!["terraform fmt -check"]);
}
