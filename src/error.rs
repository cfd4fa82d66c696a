use crate::component_type::ComponentType;
use thiserror::Error;

/// Hard failures. Missing evidence and weak matches are never errors; they
/// surface through confidence values, warnings and the unclassified result.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("No slot schema registered for component type '{component}'")]
    SchemaNotFound { component: ComponentType },

    #[error("Classifier registry and slot schemas are out of sync; no schema for: {}", list(.0))]
    MissingSchemas(Vec<ComponentType>),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to read configuration file '{path}': {source}")]
    ConfigRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_yaml::Error),
}

fn list(components: &[ComponentType]) -> String {
    components
        .iter()
        .map(|c| c.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

pub type Result<T> = std::result::Result<T, EngineError>;
