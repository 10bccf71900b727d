//! Template set loading and rendering.

use std::path::PathBuf;

use minijinja::{path_loader, Environment, ErrorKind, Value};
use serde::Serialize;
use tracing::debug;
use walkdir::WalkDir;

use crate::error::{TemplateError, TemplateResult};

/// File extension carried by every template.
pub const TEMPLATE_EXTENSION: &str = "j2";

/// The templates of one provider, loaded lazily from a directory.
pub struct TemplateSet {
    dir: PathBuf,
    env: Environment<'static>,
}

impl TemplateSet {
    /// Open the template set rooted at `dir`.
    pub fn open(dir: impl Into<PathBuf>) -> TemplateResult<Self> {
        let dir = dir.into();
        if !dir.is_dir() {
            return Err(TemplateError::TemplateSetNotFound(dir));
        }

        let mut env = Environment::new();
        env.set_loader(path_loader(&dir));
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);

        debug!("Opened template set at {:?}", dir);
        Ok(Self { dir, env })
    }

    /// Check whether a template file exists in the set.
    pub fn has_template(&self, name: &str) -> bool {
        self.dir.join(name).is_file()
    }

    /// Names of all templates in the set, sorted.
    pub fn list(&self) -> Vec<String> {
        let mut names: Vec<String> = WalkDir::new(&self.dir)
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter(|e| {
                e.path()
                    .extension()
                    .map_or(false, |ext| ext == TEMPLATE_EXTENSION)
            })
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    /// Render the named template against `context`.
    pub fn render<S: Serialize>(&self, name: &str, context: &S) -> TemplateResult<String> {
        let template = self.env.get_template(name).map_err(|e| match e.kind() {
            ErrorKind::TemplateNotFound => TemplateError::NotFound(name.to_string()),
            _ => rendering_failed(name, &e),
        })?;

        let rendered = template
            .render(Value::from_serialize(context))
            .map_err(|e| rendering_failed(name, &e))?;

        debug!("Rendered template {}", name);
        Ok(rendered)
    }
}

fn rendering_failed(name: &str, err: &minijinja::Error) -> TemplateError {
    TemplateError::RenderingFailed {
        template: name.to_string(),
        message: err.to_string(),
    }
}
