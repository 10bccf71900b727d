//! Configuration-to-module resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use iiac_config::{CloudProvider, Configuration};

use crate::error::{ResolveError, ResolveResult};
use crate::module::{ModuleId, BASE_MODULES, OPTIONAL_MODULES};
use crate::variables::Variables;

/// Environment name used when the configuration does not set one.
pub const DEFAULT_ENVIRONMENT: &str = "dev";

/// Value of the `Project` tag attached to every resource.
pub const PROJECT_TAG: &str = "IntelligentIaC";

const DEFAULT_VPC_CIDR: &str = "10.0.0.0/16";
const DEFAULT_INSTANCE_TYPE: &str = "t3.micro";
const DEFAULT_INSTANCE_COUNT: u64 = 2;
const DEFAULT_DB_ENGINE: &str = "postgres";
const DEFAULT_DB_INSTANCE_CLASS: &str = "db.t3.micro";

/// What to render, and with which values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolutionPlan {
    /// Template collection key, the lower-cased provider name.
    pub template_set: String,
    /// Modules to render, base modules first.
    pub modules: Vec<ModuleId>,
    pub variables: Variables,
}

impl ResolutionPlan {
    /// Directory holding this plan's templates under `templates_root`.
    pub fn template_dir(&self, templates_root: &Path) -> PathBuf {
        templates_root.join(&self.template_set)
    }
}

/// Resolve a configuration into a plan.
///
/// When `selected_service` is given, the module list is narrowed to that
/// single module. Selecting a module the configuration does not enable is an
/// [`ResolveError::UnavailableService`]; selecting a name outside the module
/// registry is an [`ResolveError::UnknownService`].
pub fn resolve(config: &Configuration, selected_service: Option<&str>) -> ResolveResult<ResolutionPlan> {
    let provider = config.provider.to_lowercase();
    let variables = build_variables(config, &provider);

    let mut modules: Vec<ModuleId> = BASE_MODULES.to_vec();
    modules.extend(
        OPTIONAL_MODULES
            .iter()
            .filter(|o| variables.is_enabled(&o.variable_name()))
            .map(|o| o.module),
    );

    if let Some(service) = selected_service {
        let wanted: ModuleId = service
            .parse()
            .map_err(ResolveError::UnknownService)?;
        if !modules.contains(&wanted) {
            return Err(ResolveError::UnavailableService(service.to_string()));
        }
        modules = vec![wanted];
    }

    debug!("Resolved modules for {}: {:?}", provider, modules);

    Ok(ResolutionPlan {
        template_set: provider,
        modules,
        variables,
    })
}

fn build_variables(config: &Configuration, provider: &str) -> Variables {
    let resources = &config.resources;
    let environment = config
        .environment
        .clone()
        .unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string());

    let region = if config.region.trim().is_empty() {
        config
            .cloud()
            .unwrap_or(CloudProvider::Aws)
            .default_region()
            .to_string()
    } else {
        config.region.clone()
    };

    let mut vars = Variables::new();
    vars.insert("provider", provider);
    vars.insert("environment", environment.as_str());
    vars.insert("region", region);
    vars.insert(
        "vpc_cidr",
        config.vpc_cidr.as_deref().unwrap_or(DEFAULT_VPC_CIDR),
    );
    vars.insert("instance_type", resources.value_or("instance_type", DEFAULT_INSTANCE_TYPE));
    vars.insert("instance_count", resources.value_or("count", DEFAULT_INSTANCE_COUNT));
    vars.insert("db_engine", resources.value_or("db_engine", DEFAULT_DB_ENGINE));
    vars.insert(
        "db_instance_class",
        resources.value_or("db_instance_class", DEFAULT_DB_INSTANCE_CLASS),
    );

    for optional in &OPTIONAL_MODULES {
        vars.insert(
            optional.variable_name(),
            resources.flag(optional.resource_key, optional.default),
        );
    }

    vars.insert("tags", json!({ "Project": PROJECT_TAG, "Env": environment }));

    vars
}
