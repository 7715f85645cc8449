//! Loaders for data contracts and compatibility policies.
//!
//! This module parses contract and policy documents into the strongly-typed
//! `Contract` and `Policy` structures, and provides file-backed implementations
//! of the kernel's loader traits. JSON is the only supported document format;
//! other extensions are recognised and rejected.
//!
//! # Example
//!
//! ```rust
//! use contracts_parser::parse_contract;
//!
//! let json = r#"{
//!     "name": "user_events",
//!     "version": "1.0.0",
//!     "schema": {
//!         "user_id": {"type": "string", "required": true}
//!     }
//! }"#;
//!
//! let contract = parse_contract(json).expect("Failed to parse contract");
//! assert_eq!(contract.name, "user_events");
//! ```

use contracts_core::{
    Contract, ContractLoadError, ContractLoader, LoadError, Policy, PolicyLoadError, PolicyLoader,
};
use serde::de::DeserializeOwned;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while loading a document.
#[derive(Debug, Error)]
pub enum ParserError {
    /// JSON parsing or deserialization failed
    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    /// File I/O error
    #[error("File I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Recognised but unsupported file format
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// Invalid file extension
    #[error("Invalid or missing file extension")]
    InvalidExtension,
}

/// Result type alias for parser operations.
pub type Result<T> = std::result::Result<T, ParserError>;

/// Supported document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// JSON format (.json)
    Json,
}

/// Parse a contract from a JSON string.
///
/// Both `schema` and the older `fields` key are accepted for the field map.
pub fn parse_contract(content: &str) -> Result<Contract> {
    parse_json(content)
}

/// Parse a policy from a JSON string.
///
/// # Example
///
/// ```rust
/// use contracts_parser::parse_policy;
/// use contracts_core::{CompatibilityMode, ExecutionProfile};
///
/// let policy = parse_policy(r#"{
///     "expected_version": "1.0.0",
///     "compatibility_mode": "STRICT"
/// }"#).unwrap();
///
/// assert_eq!(policy.compatibility_mode, CompatibilityMode::Strict);
/// assert_eq!(policy.execution_profile, ExecutionProfile::Batch);
/// ```
pub fn parse_policy(content: &str) -> Result<Policy> {
    parse_json(content)
}

fn parse_json<T: DeserializeOwned>(content: &str) -> Result<T> {
    Ok(serde_json::from_str(content)?)
}

/// Detect the document format from a file path based on its extension.
///
/// # Errors
///
/// Returns `ParserError::InvalidExtension` if the file has no extension.
/// Returns `ParserError::UnsupportedFormat` for any extension other than `.json`,
/// including `.yaml`, `.yml` and `.toml`.
pub fn detect_format(path: &Path) -> Result<DocumentFormat> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .ok_or(ParserError::InvalidExtension)?;

    match extension.to_lowercase().as_str() {
        "json" => Ok(DocumentFormat::Json),
        other => Err(ParserError::UnsupportedFormat(other.to_string())),
    }
}

/// Parse a contract from a file.
///
/// ```no_run
/// use contracts_parser::parse_contract_file;
/// use std::path::Path;
///
/// let contract = parse_contract_file(Path::new("contracts/contract_v2.json")).unwrap();
/// println!("Loaded contract: {} v{}", contract.name, contract.version);
/// ```
pub fn parse_contract_file(path: &Path) -> Result<Contract> {
    match detect_format(path)? {
        DocumentFormat::Json => parse_contract(&read(path)?),
    }
}

/// Parse a policy from a file.
pub fn parse_policy_file(path: &Path) -> Result<Policy> {
    match detect_format(path)? {
        DocumentFormat::Json => parse_policy(&read(path)?),
    }
}

fn read(path: &Path) -> Result<String> {
    debug!("Reading {}", path.display());
    Ok(std::fs::read_to_string(path)?)
}

/// [`ContractLoader`] that treats the source as a path to a JSON file.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonContractLoader;

impl ContractLoader for JsonContractLoader {
    fn load(&self, source: &str) -> std::result::Result<Contract, ContractLoadError> {
        parse_contract_file(Path::new(source)).map_err(|e| LoadError::new(source, e))
    }
}

/// [`PolicyLoader`] that treats the source as a path to a JSON file.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonPolicyLoader;

impl PolicyLoader for JsonPolicyLoader {
    fn load(&self, source: &str) -> std::result::Result<Policy, PolicyLoadError> {
        parse_policy_file(Path::new(source)).map_err(|e| LoadError::new(source, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts_core::{CompatibilityMode, ExecutionProfile, FieldSpec};
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_parse_valid_contract() {
        let json = r#"{
            "name": "city_spend",
            "version": "2.0.0",
            "schema": {
                "city": {"type": "string", "required": true},
                "spend": {"type": "int", "required": true},
                "channel": {"type": "string", "required": false}
            }
        }"#;

        let contract = parse_contract(json).expect("Failed to parse valid contract");

        assert_eq!(contract.name, "city_spend");
        assert_eq!(contract.version, "2.0.0");
        assert_eq!(contract.schema.len(), 3);
        assert_eq!(contract.field("spend"), Some(&FieldSpec::new("int", true)));
    }

    #[test]
    fn test_parse_legacy_contract_layout() {
        let json = r#"{
            "version": "1.0.0",
            "fields": {
                "city": {"type": "string", "required": true}
            }
        }"#;

        let contract = parse_contract(json).expect("Failed to parse legacy contract");
        assert_eq!(contract.name, "");
        assert!(contract.field("city").is_some());
    }

    #[test]
    fn test_parse_contract_missing_version() {
        let result = parse_contract(r#"{"name": "x", "schema": {}}"#);
        assert!(matches!(result.unwrap_err(), ParserError::JsonError(_)));
    }

    #[test]
    fn test_parse_contract_missing_type() {
        let json = r#"{"version": "1.0.0", "schema": {"a": {"required": true}}}"#;
        assert!(parse_contract(json).is_err());
    }

    #[test]
    fn test_parse_policy_full() {
        let json = r#"{
            "expected_version": "1.2.0",
            "compatibility_mode": "BACKWARD_COMPATIBLE",
            "execution_profile": "STREAMING"
        }"#;

        let policy = parse_policy(json).expect("Failed to parse policy");
        assert_eq!(policy.expected_version, "1.2.0");
        assert_eq!(policy.compatibility_mode, CompatibilityMode::BackwardCompatible);
        assert_eq!(policy.execution_profile, ExecutionProfile::Streaming);
    }

    #[test]
    fn test_parse_policy_missing_mode() {
        let result = parse_policy(r#"{"expected_version": "1.0.0"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_invalid_json() {
        let result = parse_policy("{ not json");
        assert!(matches!(result.unwrap_err(), ParserError::JsonError(_)));
    }

    #[test]
    fn test_detect_format_json() {
        assert_eq!(
            detect_format(Path::new("contract.json")).unwrap(),
            DocumentFormat::Json
        );
        assert_eq!(
            detect_format(Path::new("CONTRACT.JSON")).unwrap(),
            DocumentFormat::Json
        );
    }

    #[test]
    fn test_detect_format_unsupported() {
        for name in ["contract.yaml", "contract.yml", "contract.toml"] {
            let result = detect_format(Path::new(name));
            assert!(matches!(
                result.unwrap_err(),
                ParserError::UnsupportedFormat(_)
            ));
        }
    }

    #[test]
    fn test_detect_format_no_extension() {
        let result = detect_format(Path::new("contract"));
        assert!(matches!(result.unwrap_err(), ParserError::InvalidExtension));
    }

    #[test]
    fn test_json_loaders_read_files() {
        let dir = TempDir::new().unwrap();
        let contract_path = dir.path().join("contract_v1.json");
        let policy_path = dir.path().join("policy.json");

        fs::write(
            &contract_path,
            r#"{"name": "c", "version": "1.0.0", "schema": {"id": {"type": "int", "required": true}}}"#,
        )
        .unwrap();
        fs::write(
            &policy_path,
            r#"{"expected_version": "1.0.0", "compatibility_mode": "strict", "execution_profile": "batch"}"#,
        )
        .unwrap();

        let contract = JsonContractLoader
            .load(contract_path.to_str().unwrap())
            .unwrap();
        assert_eq!(contract.version, "1.0.0");

        let policy = JsonPolicyLoader.load(policy_path.to_str().unwrap()).unwrap();
        assert_eq!(policy.compatibility_mode, CompatibilityMode::Strict);
    }

    #[test]
    fn test_json_loader_missing_file_names_source() {
        let err = JsonContractLoader.load("does/not/exist.json").unwrap_err();
        assert_eq!(err.location(), "does/not/exist.json");
        assert!(err.to_string().starts_with("does/not/exist.json: File I/O error"), "got {err}");
    }

    #[test]
    fn test_json_loader_keeps_parser_error() {
        let dir = TempDir::new().unwrap();
        let policy_path = dir.path().join("policy.json");
        fs::write(&policy_path, "{ not json").unwrap();

        let err = JsonPolicyLoader.load(policy_path.to_str().unwrap()).unwrap_err();
        let cause = std::error::Error::source(&err).expect("parser error is kept");
        let parser_error = cause
            .downcast_ref::<ParserError>()
            .expect("cause is a ParserError");
        assert!(matches!(parser_error, ParserError::JsonError(_)));
    }

    #[test]
    fn test_json_loader_rejects_yaml_with_typed_cause() {
        let err = JsonContractLoader.load("contract.yaml").unwrap_err();
        let cause = std::error::Error::source(&err).expect("parser error is kept");
        assert!(matches!(
            cause.downcast_ref::<ParserError>(),
            Some(ParserError::UnsupportedFormat(_))
        ));
    }
}
