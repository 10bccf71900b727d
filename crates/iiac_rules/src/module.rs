//! Module identifiers and the optional-module table.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A named infrastructure component rendered into one Terraform file.
///
/// Variants are declared in registry order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleId {
    Vpc,
    Ec2,
    Iam,
    S3,
    Alb,
    Rds,
    Lambda,
    Dynamodb,
    Cloudfront,
    Route53,
    Cloudwatch,
    Secrets,
}

impl ModuleId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModuleId::Vpc => "vpc",
            ModuleId::Ec2 => "ec2",
            ModuleId::Iam => "iam",
            ModuleId::S3 => "s3",
            ModuleId::Alb => "alb",
            ModuleId::Rds => "rds",
            ModuleId::Lambda => "lambda",
            ModuleId::Dynamodb => "dynamodb",
            ModuleId::Cloudfront => "cloudfront",
            ModuleId::Route53 => "route53",
            ModuleId::Cloudwatch => "cloudwatch",
            ModuleId::Secrets => "secrets",
        }
    }

    /// Every module, in registry order.
    pub fn all() -> Vec<Self> {
        vec![
            ModuleId::Vpc,
            ModuleId::Ec2,
            ModuleId::Iam,
            ModuleId::S3,
            ModuleId::Alb,
            ModuleId::Rds,
            ModuleId::Lambda,
            ModuleId::Dynamodb,
            ModuleId::Cloudfront,
            ModuleId::Route53,
            ModuleId::Cloudwatch,
            ModuleId::Secrets,
        ]
    }

    /// Whether the module is always rendered.
    pub fn is_base(&self) -> bool {
        BASE_MODULES.contains(self)
    }

    /// Template file name for this module, e.g. `vpc.tf.j2`.
    pub fn template_name(&self) -> String {
        format!("{}.tf.j2", self.as_str())
    }

    /// Output file name for this module, e.g. `vpc.tf`.
    pub fn file_name(&self) -> String {
        format!("{}.tf", self.as_str())
    }
}

impl FromStr for ModuleId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        ModuleId::all()
            .into_iter()
            .find(|m| m.as_str() == wanted)
            .ok_or_else(|| s.to_string())
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Modules rendered for every configuration, in this order.
pub const BASE_MODULES: [ModuleId; 3] = [ModuleId::Vpc, ModuleId::Ec2, ModuleId::Iam];

/// One row of the optional-module table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionalModule {
    /// Key looked up in the configuration's `resources` mapping.
    pub resource_key: &'static str,
    /// Toggle value when the key is absent.
    pub default: bool,
    pub module: ModuleId,
}

impl OptionalModule {
    const fn new(resource_key: &'static str, default: bool, module: ModuleId) -> Self {
        Self {
            resource_key,
            default,
            module,
        }
    }

    /// Name of the variable carrying this toggle, e.g. `enable_rds`.
    pub fn variable_name(&self) -> String {
        format!("enable_{}", self.resource_key)
    }
}

/// Optional modules in the order they are appended after the base modules.
pub const OPTIONAL_MODULES: [OptionalModule; 9] = [
    OptionalModule::new("s3", true, ModuleId::S3),
    OptionalModule::new("alb", true, ModuleId::Alb),
    OptionalModule::new("rds", false, ModuleId::Rds),
    OptionalModule::new("lambda", false, ModuleId::Lambda),
    OptionalModule::new("dynamodb", false, ModuleId::Dynamodb),
    OptionalModule::new("cloudfront", false, ModuleId::Cloudfront),
    OptionalModule::new("route53", false, ModuleId::Route53),
    OptionalModule::new("cloudwatch", false, ModuleId::Cloudwatch),
    OptionalModule::new("secrets", false, ModuleId::Secrets),
];
