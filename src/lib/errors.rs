use std::path::PathBuf;

use config::ConfigError as ConfigLoaderError;
use rmcp::model::ErrorData;
use serde::Serialize;
use serde_json::{json, Map, Number, Value};
use thiserror::Error;

/// Errors that can occur while loading or validating configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to build (read) the configuration file.
    #[error("Failed to read configuration file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: ConfigLoaderError,
    },
    /// Failed to deserialize TOML into a struct.
    #[error("Failed to parse configuration file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ConfigLoaderError,
    },
    /// Required field is missing.
    #[error("Configuration file {path} is missing `{field}`")]
    MissingField { path: PathBuf, field: &'static str },
    /// Field failed validation.
    #[error("Configuration file {path} has invalid `{field}`: {message}")]
    InvalidField {
        path: PathBuf,
        field: &'static str,
        message: String,
    },
}

impl ConfigError {
    /// Helper to wrap `config::ConfigError` as a read failure.
    pub fn from_read_error(path: PathBuf, source: ConfigLoaderError) -> Self {
        Self::FileRead { path, source }
    }

    /// Helper to wrap `config::ConfigError` as a parse failure.
    pub fn from_parse_error(path: PathBuf, source: ConfigLoaderError) -> Self {
        Self::Parse { path, source }
    }
}

/// A resource envelope could not be constructed or parsed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EnvelopeError {
    #[error("resource uri must not be empty")]
    EmptyUri,
    #[error("resource uri `{uri}` must use the ui:// scheme")]
    UnsupportedScheme { uri: String },
    #[error("resource uri `{uri}` has no path after ui://")]
    MissingPath { uri: String },
    #[error("content field `{field}` must not be empty")]
    EmptyContent { field: &'static str },
    #[error("content type `{tag}` is not supported (expected rawHtml or externalUrl)")]
    UnknownContentType { tag: String },
    #[error("encoding `{value}` is not supported (expected text or blob)")]
    UnknownEncoding { value: String },
    #[error("content of type `{tag}` must not populate `{field}`")]
    ConflictingContent { tag: &'static str, field: &'static str },
    #[error("envelope is missing `{field}`")]
    MissingField { field: &'static str },
    #[error("envelope is not a JSON object: {message}")]
    Malformed { message: String },
    #[error("tool handler returned no envelopes")]
    EmptyResult,
}

/// Failures raised by the tool registry.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("tool `{name}` is already registered")]
    DuplicateName { name: String },
    #[error("tool name `{name}` is invalid: {reason}")]
    InvalidName { name: String, reason: &'static str },
    #[error("tool `{name}` is not registered")]
    NotFound { name: String },
    #[error("tool `{name}` produced an invalid envelope: {source}")]
    InvalidEnvelope {
        name: String,
        #[source]
        source: EnvelopeError,
    },
}

impl RegistryError {
    /// Convert into MCP error data for the dispatcher.
    pub fn to_error_data(&self) -> ErrorData {
        self.error_builder()
            .build()
            .unwrap_or_else(|err| ErrorData::internal_error(err.to_string(), None))
    }

    /// Same as [`Self::to_error_data`], tagged with the failing `tools/call` id.
    pub fn to_invocation_error_data(&self, invocation_id: &str) -> ErrorData {
        self.error_builder()
            .with_context_field("invocation_id", Value::String(invocation_id.to_string()))
            .build()
            .unwrap_or_else(|err| ErrorData::internal_error(err.to_string(), None))
    }

    fn error_builder(&self) -> ToolErrorDescriptorBuilder<'static> {
        match self {
            RegistryError::NotFound { name } => TOOL_NOT_FOUND_ERROR
                .builder()
                .retryable(false)
                .details(json!({ "tool": name })),
            RegistryError::InvalidEnvelope { name, source } => INVALID_ENVELOPE_ERROR
                .builder()
                .retryable(false)
                .details(json!({ "tool": name, "reason": source.to_string() })),
            RegistryError::DuplicateName { name } | RegistryError::InvalidName { name, .. } => {
                REGISTRY_INIT_FAILED_ERROR
                    .builder()
                    .retryable(false)
                    .details(json!({ "tool": name, "reason": self.to_string() }))
                    .with_exit_code_value(REGISTRY_INIT_FAILED_EXIT_CODE)
            }
        }
    }
}

/// How an error surfaces on the MCP wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// The caller asked for something that does not exist or is malformed.
    InvalidParams,
    /// The server itself misbehaved.
    Internal,
}

/// Structured error metadata returned by MCP tools.
#[derive(Debug, Clone, Serialize)]
pub struct ToolErrorDescriptor {
    /// Error code.
    pub code: &'static str,
    /// User-facing message.
    pub message: &'static str,
    /// Recommended remediation.
    pub remediation: &'static str,
    pub category: ErrorCategory,
}

impl ToolErrorDescriptor {
    /// Simple constructor.
    pub const fn new(
        code: &'static str,
        message: &'static str,
        remediation: &'static str,
        category: ErrorCategory,
    ) -> Self {
        Self {
            code,
            message,
            remediation,
            category,
        }
    }

    /// Create a builder.
    pub fn builder(&self) -> ToolErrorDescriptorBuilder<'_> {
        ToolErrorDescriptorBuilder::new(self)
    }
}

/// Builder for error data that fails if required fields are missing.
pub struct ToolErrorDescriptorBuilder<'a> {
    descriptor: &'a ToolErrorDescriptor,
    retryable: Option<bool>,
    details: Option<Value>,
    extra_fields: Map<String, Value>,
}

impl<'a> ToolErrorDescriptorBuilder<'a> {
    pub fn new(descriptor: &'a ToolErrorDescriptor) -> Self {
        Self {
            descriptor,
            retryable: None,
            details: None,
            extra_fields: Map::new(),
        }
    }

    pub fn retryable(mut self, retryable: bool) -> Self {
        self.retryable = Some(retryable);
        self
    }

    pub fn details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn with_context_field(mut self, key: &str, value: Value) -> Self {
        self.extra_fields.insert(key.to_string(), value);
        self
    }

    pub fn with_exit_code_value(mut self, exit_code: u8) -> Self {
        let numeric = Number::from(exit_code);
        self.extra_fields
            .insert("exit_code".into(), Value::Number(numeric));
        self
    }

    pub fn build(self) -> Result<ErrorData, ToolErrorBuilderError> {
        if self.descriptor.remediation.trim().is_empty() {
            return Err(ToolErrorBuilderError::MissingRemediation {
                code: self.descriptor.code,
            });
        }
        let retryable = self
            .retryable
            .ok_or(ToolErrorBuilderError::MissingRetryable {
                code: self.descriptor.code,
            })?;

        let mut data = Map::new();
        data.insert("code".into(), Value::String(self.descriptor.code.into()));
        data.insert(
            "remediation".into(),
            Value::String(self.descriptor.remediation.into()),
        );
        data.insert("retryable".into(), Value::Bool(retryable));
        if let Some(details) = self.details {
            data.insert("details".into(), details);
        }
        for (key, value) in self.extra_fields {
            data.insert(key, value);
        }

        let data = Some(Value::Object(data));
        Ok(match self.descriptor.category {
            ErrorCategory::InvalidParams => ErrorData::invalid_params(self.descriptor.message, data),
            ErrorCategory::Internal => ErrorData::internal_error(self.descriptor.message, data),
        })
    }
}

/// Errors when required builder fields are missing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ToolErrorBuilderError {
    #[error("retryable is missing (code={code})")]
    MissingRetryable { code: &'static str },
    #[error("remediation is empty (code={code})")]
    MissingRemediation { code: &'static str },
}

/// Process exit code used when the tool catalog cannot be built.
pub const REGISTRY_INIT_FAILED_EXIT_CODE: u8 = 45;

/// Standard error for calls naming an unregistered tool.
pub static TOOL_NOT_FOUND_ERROR: ToolErrorDescriptor = ToolErrorDescriptor::new(
    "TOOL_NOT_FOUND",
    "The requested tool is not registered on this server",
    "Call tools/list and retry with one of the advertised tool names.",
    ErrorCategory::InvalidParams,
);

/// Standard error when a handler yields a malformed envelope.
pub static INVALID_ENVELOPE_ERROR: ToolErrorDescriptor = ToolErrorDescriptor::new(
    "INVALID_ENVELOPE",
    "The tool produced a malformed UI resource",
    "Report the tool name and reason to the server maintainer; the handler must be fixed.",
    ErrorCategory::Internal,
);

/// Standard error when startup registration fails.
pub static REGISTRY_INIT_FAILED_ERROR: ToolErrorDescriptor = ToolErrorDescriptor::new(
    "REGISTRY_INIT_FAILED",
    "Tool registration failed during startup",
    "Check [tools] in config.toml and the registered tool names for duplicates.",
    ErrorCategory::Internal,
);
