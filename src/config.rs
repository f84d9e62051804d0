use std::str::FromStr;

use rust_decimal::Decimal;

// ============================================================================
// Order Configuration
// ============================================================================

/// Environment variable overriding the tax rate
pub const TAX_RATE_ENV: &str = "LUNCH_TRAY_TAX_RATE";

/// 8%
pub const DEFAULT_TAX_RATE: Decimal = Decimal::from_parts(8, 0, 0, false, 2);

/// 100%. Keeps the tax derivation within Decimal range for any accepted order.
pub const MAX_TAX_RATE: Decimal = Decimal::ONE;

pub const DEFAULT_LOG_FILTER: &str = "info,lunch_tray=debug";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Tax rate cannot be negative: {0}")]
    NegativeTaxRate(Decimal),

    #[error("Tax rate {0} exceeds the maximum of {max}", max = MAX_TAX_RATE)]
    TaxRateOutOfRange(Decimal),

    #[error("Invalid tax rate {value:?}: {source}")]
    InvalidTaxRate {
        value: String,
        source: rust_decimal::Error,
    },
}

#[derive(Clone, Debug)]
pub struct OrderConfig {
    /// Fixed for the lifetime of an accumulator
    pub tax_rate: Decimal,
    /// Default tracing filter when RUST_LOG is unset
    pub log_filter: String,
}

impl Default for OrderConfig {
    fn default() -> Self {
        Self {
            tax_rate: DEFAULT_TAX_RATE,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl OrderConfig {
    pub fn with_tax_rate(mut self, tax_rate: Decimal) -> Self {
        self.tax_rate = tax_rate;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tax_rate.is_sign_negative() && !self.tax_rate.is_zero() {
            return Err(ConfigError::NegativeTaxRate(self.tax_rate));
        }
        if self.tax_rate > MAX_TAX_RATE {
            return Err(ConfigError::TaxRateOutOfRange(self.tax_rate));
        }
        Ok(())
    }

    /// Defaults overridden by process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each known key
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(TAX_RATE_ENV) {
            let value = raw.trim();
            config.tax_rate = Decimal::from_str(value).map_err(|source| ConfigError::InvalidTaxRate {
                value: value.to_string(),
                source,
            })?;
        }

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_default_config() {
        let config = OrderConfig::default();
        assert_eq!(config.tax_rate, dec!(0.08));
        assert_eq!(config.log_filter, "info,lunch_tray=debug");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_lookup_overrides_tax_rate() {
        let config = OrderConfig::from_lookup(|key| {
            (key == TAX_RATE_ENV).then(|| " 0.0725 ".to_string())
        })
        .unwrap();

        assert_eq!(config.tax_rate, dec!(0.0725));
    }

    #[test]
    fn test_lookup_without_overrides_uses_defaults() {
        let config = OrderConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.tax_rate, DEFAULT_TAX_RATE);
    }

    #[test]
    fn test_invalid_tax_rate_rejected() {
        let result = OrderConfig::from_lookup(|_| Some("eight percent".to_string()));
        assert!(matches!(result, Err(ConfigError::InvalidTaxRate { .. })));
    }

    #[test]
    fn test_negative_tax_rate_rejected() {
        let config = OrderConfig::default().with_tax_rate(dec!(-0.01));
        assert!(matches!(config.validate(), Err(ConfigError::NegativeTaxRate(_))));

        let result = OrderConfig::from_lookup(|_| Some("-0.5".to_string()));
        assert!(matches!(result, Err(ConfigError::NegativeTaxRate(_))));
    }

    #[test]
    fn test_tax_rate_above_maximum_rejected() {
        let config = OrderConfig::default().with_tax_rate(dec!(1.01));
        assert!(matches!(config.validate(), Err(ConfigError::TaxRateOutOfRange(_))));

        let result = OrderConfig::from_lookup(|_| Some("79228162514264337593543950335".to_string()));
        assert!(matches!(result, Err(ConfigError::TaxRateOutOfRange(_))));

        assert!(OrderConfig::default().with_tax_rate(MAX_TAX_RATE).validate().is_ok());
    }

    #[test]
    fn test_zero_tax_rate_allowed() {
        let config = OrderConfig::default().with_tax_rate(Decimal::ZERO);
        assert!(config.validate().is_ok());
    }
}
