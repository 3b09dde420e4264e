//! Error types for frame rendering, provider discovery and configuration.

use thiserror::Error;

/// Failure of the expression collaborator while evaluating template text
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvaluationError {
    #[error("Unknown variable: {0}")]
    UnknownVariable(String),

    #[error("Malformed expression '{input}': {reason}")]
    Malformed { input: String, reason: String },

    #[error("Evaluator failure: {0}")]
    Failed(String),
}

/// Per-attribute render failures
///
/// These never escape a render; the engine records them and moves on.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenderError {
    #[error("Evaluation failed: {0}")]
    Evaluation(#[from] EvaluationError),

    #[error("Cannot coerce '{found}' to {expected}")]
    Coercion { expected: &'static str, found: String },

    #[error("Unknown item flag: {0}")]
    UnknownFlag(String),

    #[error("Unknown enchantment: {0}")]
    UnknownEnchantment(String),

    #[error("Malformed namespaced key: {0}")]
    MalformedKey(String),

    #[error("Feature {feature} unsupported on platform {version}")]
    Unsupported { feature: &'static str, version: u32 },
}

/// Provider construction failures
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InstantiationError {
    /// A required integration is not loadable in this process
    #[error("Missing dependency: {0}")]
    MissingDependency(String),

    #[error("{message}")]
    Wrapped {
        message: String,
        #[source]
        source: Box<InstantiationError>,
    },

    #[error("Instantiation failed: {0}")]
    Failed(String),
}

impl InstantiationError {
    /// Wrap another instantiation error with context
    pub fn wrap(message: impl Into<String>, source: InstantiationError) -> Self {
        InstantiationError::Wrapped {
            message: message.into(),
            source: Box::new(source),
        }
    }

    /// True for a missing dependency, directly or as the immediate cause.
    pub fn is_missing_dependency(&self) -> bool {
        match self {
            InstantiationError::MissingDependency(_) => true,
            InstantiationError::Wrapped { source, .. } => {
                matches!(**source, InstantiationError::MissingDependency(_))
            }
            InstantiationError::Failed(_) => false,
        }
    }
}

/// Fatal startup errors raised by the discovery scan
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("Failed to instantiate provider {class}: {source}")]
    Instantiation {
        class: String,
        #[source]
        source: InstantiationError,
    },

    #[error("Discovery runs during {expected:?}, not {actual:?}")]
    WrongLifeCycle {
        expected: crate::discovery::LifeCycle,
        actual: crate::discovery::LifeCycle,
    },
}

/// Registry installation errors
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Capability registry already installed")]
    AlreadyInstalled,
}

/// Activator failures
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ActivatorError {
    #[error("Invalid activator payload: {0}")]
    InvalidPayload(String),

    #[error("Activation failed: {0}")]
    Failed(String),
}

impl From<serde_json::Error> for ActivatorError {
    fn from(err: serde_json::Error) -> Self {
        ActivatorError::InvalidPayload(err.to_string())
    }
}

/// Element generator failures
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeneratorError {
    #[error("Generation failed: {0}")]
    Failed(String),

    #[error("Evaluation failed: {0}")]
    Evaluation(#[from] EvaluationError),
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Invalid frame definition: {0}")]
    Definition(String),

    #[error("Logging setup failed: {0}")]
    Logging(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Definition(err.to_string())
    }
}
