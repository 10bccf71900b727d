//! Terraform file generation from a resolution plan.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use iiac_rules::{ResolutionPlan, Variables};
use iiac_templates::{TemplateError, TemplateSet};

use crate::error::{IacError, IacResult};
use crate::outcome::StepOutcome;
use crate::terraform::Terraform;

/// Provider-wide artifacts rendered when their template exists.
pub const COMMON_ARTIFACTS: [&str; 3] = ["variables", "outputs", "provider"];

/// Whether an artifact came from a selected module or the common set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    Module,
    Common,
}

/// What happened to one artifact during generation.
#[derive(Debug, Clone, Serialize)]
pub struct ArtifactRecord {
    /// Output file name, e.g. `vpc.tf`
    pub file_name: String,
    pub kind: ArtifactKind,
    /// Render-and-write outcome; always `Done` for modules.
    pub render: StepOutcome,
    /// Formatter outcome, when the file was written.
    pub format: Option<StepOutcome>,
}

/// Summary of one generation run.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationReport {
    pub output_dir: PathBuf,
    /// Module artifacts in plan order, followed by the common artifacts.
    pub artifacts: Vec<ArtifactRecord>,
    /// Outcome of the closing formatter pass over the whole directory.
    pub directory_format: StepOutcome,
}

impl GenerationReport {
    /// File names that were written, in generation order.
    pub fn written_files(&self) -> Vec<&str> {
        self.artifacts
            .iter()
            .filter(|a| a.render.is_done())
            .map(|a| a.file_name.as_str())
            .collect()
    }

    /// Common artifacts that were not written, with the reason.
    pub fn skipped(&self) -> Vec<&ArtifactRecord> {
        self.artifacts.iter().filter(|a| !a.render.is_done()).collect()
    }
}

/// Renders a plan's templates into an output directory.
pub struct IacGenerator {
    templates_root: PathBuf,
    terraform: Terraform,
}

impl IacGenerator {
    /// Create a generator reading template sets from `templates_root`.
    pub fn new(templates_root: impl Into<PathBuf>, terraform: Terraform) -> Self {
        Self {
            templates_root: templates_root.into(),
            terraform,
        }
    }

    /// Replace `output_dir` with freshly generated Terraform files.
    ///
    /// Module templates are required; a missing or broken one aborts the run
    /// and removes `output_dir`. Common templates and formatting are
    /// best-effort and only show up in the report.
    pub async fn generate(&self, plan: &ResolutionPlan, output_dir: &Path) -> IacResult<GenerationReport> {
        info!("Generating {} module(s) into {:?}", plan.modules.len(), output_dir);

        reset_dir(output_dir)?;

        match self.write_all(plan, output_dir).await {
            Ok(report) => {
                info!("Generated {} file(s)", report.written_files().len());
                Ok(report)
            }
            Err(e) => {
                if let Err(cleanup) = fs::remove_dir_all(output_dir) {
                    warn!("Failed to clean up {:?}: {}", output_dir, cleanup);
                }
                Err(e)
            }
        }
    }

    async fn write_all(&self, plan: &ResolutionPlan, output_dir: &Path) -> IacResult<GenerationReport> {
        let templates = TemplateSet::open(plan.template_dir(&self.templates_root))?;
        let mut artifacts = Vec::with_capacity(plan.modules.len() + COMMON_ARTIFACTS.len());

        for module in &plan.modules {
            let rendered = templates.render(&module.template_name(), &plan.variables)?;
            let path = output_dir.join(module.file_name());
            fs::write(&path, rendered)?;
            debug!("Wrote {:?}", path);

            artifacts.push(ArtifactRecord {
                file_name: module.file_name(),
                kind: ArtifactKind::Module,
                render: StepOutcome::Done,
                format: Some(self.terraform.fmt_file(&path).await),
            });
        }

        for name in COMMON_ARTIFACTS {
            artifacts.push(self.write_common(&templates, name, &plan.variables, output_dir).await);
        }

        let directory_format = self.terraform.fmt_dir(output_dir).await;

        Ok(GenerationReport {
            output_dir: output_dir.to_path_buf(),
            artifacts,
            directory_format,
        })
    }

    async fn write_common(
        &self,
        templates: &TemplateSet,
        name: &str,
        variables: &Variables,
        output_dir: &Path,
    ) -> ArtifactRecord {
        let file_name = format!("{}.tf", name);
        let template_name = format!("{}.j2", file_name);
        let path = output_dir.join(&file_name);

        let render = match templates.render(&template_name, variables) {
            Ok(rendered) => match fs::write(&path, rendered) {
                Ok(()) => StepOutcome::Done,
                Err(e) => StepOutcome::FailedIgnored(e.to_string()),
            },
            Err(TemplateError::NotFound(_)) => StepOutcome::Skipped("template not found".to_string()),
            Err(e) => StepOutcome::FailedIgnored(e.to_string()),
        };

        let format = if render.is_done() {
            debug!("Wrote {:?}", path);
            Some(self.terraform.fmt_file(&path).await)
        } else {
            if render.is_failed() {
                warn!("Ignoring failure for {}: {}", file_name, render);
            } else {
                debug!("{} {}", file_name, render);
            }
            None
        };

        ArtifactRecord {
            file_name,
            kind: ArtifactKind::Common,
            render,
            format,
        }
    }
}

/// Remove `dir` if it exists and recreate it empty.
fn reset_dir(dir: &Path) -> IacResult<()> {
    if dir.exists() {
        debug!("Removing previous output at {:?}", dir);
        fs::remove_dir_all(dir)?;
    }
    fs::create_dir_all(dir)?;
    Ok(())
}

/// Sorted names of the files directly inside `dir`.
pub fn list_artifacts(dir: &Path) -> IacResult<Vec<String>> {
    if !dir.is_dir() {
        return Err(IacError::OutputDirNotFound(dir.to_path_buf()));
    }

    let mut names = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|e| IacError::Io(e.into()))?;
        if entry.file_type().is_file() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    names.sort();
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_reset_dir_removes_stale_files() {
        let temp = tempdir().unwrap();
        let out = temp.path().join("output");
        fs::create_dir_all(out.join("nested")).unwrap();
        fs::write(out.join("stale.tf"), "old").unwrap();

        reset_dir(&out).unwrap();

        assert!(out.is_dir());
        assert_eq!(fs::read_dir(&out).unwrap().count(), 0);
    }

    #[test]
    fn test_list_artifacts_sorted_files_only() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("vpc.tf"), "").unwrap();
        fs::write(temp.path().join("alb.tf"), "").unwrap();
        fs::create_dir(temp.path().join(".terraform")).unwrap();

        assert_eq!(
            list_artifacts(temp.path()).unwrap(),
            vec!["alb.tf".to_string(), "vpc.tf".to_string()]
        );
    }

    #[test]
    fn test_list_artifacts_missing_dir() {
        let temp = tempdir().unwrap();
        let err = list_artifacts(&temp.path().join("missing")).unwrap_err();
        assert!(matches!(err, IacError::OutputDirNotFound(_)));
    }
}
