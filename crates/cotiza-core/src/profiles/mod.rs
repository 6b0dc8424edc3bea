pub mod builtin;
pub mod schema;

use crate::error::CotizaError;
use crate::fields::is_master_field;
use schema::VendorProfileDef;
use std::collections::HashSet;
use std::path::Path;

/// Load a vendor profile from a JSON file.
pub fn load_profile(path: &Path) -> Result<VendorProfileDef, CotizaError> {
    let content = std::fs::read_to_string(path).map_err(|e| CotizaError::ProfileLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_profile(&content, path)
}

/// Parse a vendor profile from a JSON string.
pub fn parse_profile(json: &str, source: &Path) -> Result<VendorProfileDef, CotizaError> {
    let profile: VendorProfileDef =
        serde_json::from_str(json).map_err(|e| CotizaError::ProfileLoad {
            path: source.to_path_buf(),
            reason: e.to_string(),
        })?;
    validate_profile(&profile)?;
    Ok(profile)
}

/// Parse a vendor profile from a JSON string (no file path context).
pub fn parse_profile_str(json: &str) -> Result<VendorProfileDef, CotizaError> {
    let profile: VendorProfileDef = serde_json::from_str(json).map_err(CotizaError::Json)?;
    validate_profile(&profile)?;
    Ok(profile)
}

/// Validate that a profile is well-formed.
pub fn validate_profile(profile: &VendorProfileDef) -> Result<(), CotizaError> {
    if !profile.company.is_known() {
        return Err(CotizaError::ProfileInvalid(
            "profile company must be one of: hdi, qualitas, ana, atlas".into(),
        ));
    }

    if profile.rules.is_empty() {
        return Err(CotizaError::ProfileInvalid(format!(
            "profile for '{}' has no rules",
            profile.company.key()
        )));
    }

    let mut seen = HashSet::new();
    for rule in &profile.rules {
        if !is_master_field(&rule.field) {
            return Err(CotizaError::ProfileInvalid(format!(
                "rule targets unknown field '{}'",
                rule.field
            )));
        }

        if !seen.insert(rule.field.as_str()) {
            return Err(CotizaError::ProfileInvalid(format!(
                "field '{}' has more than one rule",
                rule.field
            )));
        }

        if rule.anchors.is_empty() || rule.anchors.iter().any(|a| a.trim().is_empty()) {
            return Err(CotizaError::ProfileInvalid(format!(
                "field '{}' needs at least one non-empty anchor",
                rule.field
            )));
        }

        if rule.then.as_deref().is_some_and(|t| t.trim().is_empty())
            || rule.stop_at.iter().any(|s| s.trim().is_empty())
            || rule.exclude.iter().any(|s| s.trim().is_empty())
        {
            return Err(CotizaError::ProfileInvalid(format!(
                "field '{}' has an empty label",
                rule.field
            )));
        }

        if rule.window == Some(0) {
            return Err(CotizaError::ProfileInvalid(format!(
                "field '{}' has a zero-length window",
                rule.field
            )));
        }
    }

    Ok(())
}
