//! Comparison settings, optionally loaded from a TOML file.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::CotizaError;

/// Settings shared by extraction, financial completion and aggregation.
///
/// ```toml
/// placeholder = "No disponible"
/// max_text_len = 60
/// iva_rate = "0.16"
/// recargos_cap = "2000"
/// min_premium = "1000"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompareOptions {
    /// Shown for every field a company's document did not provide.
    pub placeholder: String,
    /// Free-text values are cut to this many characters.
    pub max_text_len: usize,
    /// IVA rate used when a quote does not print the tax.
    pub iva_rate: Decimal,
    /// Surcharges above this amount are treated as a mis-capture.
    pub recargos_cap: Decimal,
    /// Net premiums below this amount are treated as a mis-capture.
    pub min_premium: Decimal,
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self {
            placeholder: "No disponible".to_string(),
            max_text_len: 60,
            iva_rate: Decimal::new(16, 2),
            recargos_cap: Decimal::new(2000, 0),
            min_premium: Decimal::new(1000, 0),
        }
    }
}

impl CompareOptions {
    pub fn validate(&self) -> Result<(), CotizaError> {
        if self.placeholder.trim().is_empty() {
            return Err(CotizaError::ConfigInvalid(
                "placeholder must not be empty".into(),
            ));
        }
        if self.max_text_len == 0 {
            return Err(CotizaError::ConfigInvalid(
                "max_text_len must be greater than 0".into(),
            ));
        }
        if self.iva_rate.is_sign_negative() || self.iva_rate >= Decimal::ONE {
            return Err(CotizaError::ConfigInvalid(format!(
                "iva_rate must be between 0 and 1, got {}",
                self.iva_rate
            )));
        }
        if self.recargos_cap.is_sign_negative() || self.min_premium.is_sign_negative() {
            return Err(CotizaError::ConfigInvalid(
                "recargos_cap and min_premium must not be negative".into(),
            ));
        }
        Ok(())
    }
}

/// Load options from a TOML file. Missing keys keep their defaults.
pub fn load_options(path: &Path) -> Result<CompareOptions, CotizaError> {
    let content = std::fs::read_to_string(path).map_err(|e| CotizaError::ConfigLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let options: CompareOptions = toml::from_str(&content).map_err(|e| CotizaError::ConfigLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    options.validate()?;
    Ok(options)
}

/// Parse options from a TOML string (no file path context).
pub fn parse_options_str(content: &str) -> Result<CompareOptions, CotizaError> {
    let options: CompareOptions =
        toml::from_str(content).map_err(|e| CotizaError::ConfigInvalid(e.to_string()))?;
    options.validate()?;
    Ok(options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_defaults_are_valid() {
        let opts = CompareOptions::default();
        assert!(opts.validate().is_ok());
        assert_eq!(opts.iva_rate, dec!(0.16));
        assert_eq!(opts.placeholder, "No disponible");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let opts = parse_options_str(r#"placeholder = "N/D""#).unwrap();
        assert_eq!(opts.placeholder, "N/D");
        assert_eq!(opts.max_text_len, 60);
        assert_eq!(opts.recargos_cap, dec!(2000));
    }

    #[test]
    fn test_decimal_values_as_strings() {
        let opts = parse_options_str(
            r#"
            iva_rate = "0.08"
            min_premium = "500"
            "#,
        )
        .unwrap();
        assert_eq!(opts.iva_rate, dec!(0.08));
        assert_eq!(opts.min_premium, dec!(500));
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(parse_options_str("placehoder = \"x\"").is_err());
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(parse_options_str(r#"placeholder = " ""#).is_err());
        assert!(parse_options_str("max_text_len = 0").is_err());
        assert!(parse_options_str(r#"iva_rate = "1.5""#).is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_options(Path::new("/nonexistent/cotiza.toml")).unwrap_err();
        assert!(matches!(err, CotizaError::ConfigLoad { .. }));
    }
}
