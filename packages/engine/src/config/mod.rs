//! Engine Configuration
//!
//! Runtime configuration for path compilation and traversal: recursion limits,
//! protocol dispatch defaults and compiled-path caching. A process-wide
//! configuration may be installed once at startup; everything else reads it
//! through [`EngineConfig::global`].

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

pub mod validation;

pub use validation::{ConfigDefaults, ConfigResult, ConfigValidator, ConfigurationError, Validator};

/// What a protocol path does when the focused value's type has no entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchPolicy {
    /// Raise `PathError::UnmatchedDispatch`
    #[default]
    FailFast,
    /// Treat the step as a navigator with zero results
    NoMatch,
}

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Optional cap on re-entry depth for recursive and protocol paths
    ///
    /// `None` lets depth follow the data.
    pub max_recursion_depth: Option<usize>,
    /// Policy for protocol paths declared without explicit options
    pub unmatched_dispatch: DispatchPolicy,
    /// Object field read by the default type tagger
    pub type_tag_field: String,
    /// Whether `Path` memoizes its compiled form
    pub cache_compiled_paths: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_recursion_depth: None,
            unmatched_dispatch: DispatchPolicy::FailFast,
            type_tag_field: ConfigDefaults::DEFAULT_TYPE_TAG_FIELD.to_string(),
            cache_compiled_paths: true,
        }
    }
}

impl Validator for EngineConfig {
    fn validate(&self) -> ConfigResult<()> {
        if let Some(depth) = self.max_recursion_depth {
            ConfigValidator::validate_depth(depth, "max_recursion_depth")?;
        }
        ConfigValidator::validate_field_name(&self.type_tag_field, "type_tag_field")?;
        Ok(())
    }
}

static GLOBAL_CONFIG: OnceLock<EngineConfig> = OnceLock::new();
static DEFAULT_CONFIG: OnceLock<EngineConfig> = OnceLock::new();

impl EngineConfig {
    /// Parse and validate a JSON configuration document
    ///
    /// Missing fields take their default values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::Parse` for malformed JSON and any
    /// validation error for out-of-range settings.
    pub fn from_json(document: &str) -> ConfigResult<Self> {
        let config: EngineConfig = serde_json::from_str(document)?;
        config.validate()?;
        Ok(config)
    }

    /// Cap the recursion depth
    #[must_use]
    pub fn with_max_recursion_depth(mut self, depth: usize) -> Self {
        self.max_recursion_depth = Some(depth);
        self
    }

    /// Set the default unmatched-dispatch policy
    #[must_use]
    pub fn with_unmatched_dispatch(mut self, policy: DispatchPolicy) -> Self {
        self.unmatched_dispatch = policy;
        self
    }

    /// Set the object field used for type tags
    #[must_use]
    pub fn with_type_tag_field(mut self, field: impl Into<String>) -> Self {
        self.type_tag_field = field.into();
        self
    }

    /// Enable or disable compiled-path memoization
    #[must_use]
    pub fn with_cache_compiled_paths(mut self, enabled: bool) -> Self {
        self.cache_compiled_paths = enabled;
        self
    }

    /// The process-wide configuration, or the defaults if none was installed
    pub fn global() -> &'static EngineConfig {
        match GLOBAL_CONFIG.get() {
            Some(config) => config,
            None => DEFAULT_CONFIG.get_or_init(EngineConfig::default),
        }
    }
}

/// Install the process-wide configuration
///
/// Must run during setup, before any path is compiled.
///
/// # Errors
///
/// Returns a validation error for invalid settings, or
/// `ConfigurationError::Conflict` if a configuration was already installed.
pub fn init_global_config(config: EngineConfig) -> ConfigResult<()> {
    config.validate()?;
    GLOBAL_CONFIG.set(config).map_err(|_| {
        log::warn!("global engine configuration already installed; keeping the existing one");
        ConfigurationError::Conflict("global engine configuration is already installed".into())
    })
}
