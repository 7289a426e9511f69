//! Service configuration

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;

use core_kernel::{CoreError, Money, SystemClock, Timezone};
use domain_lending::{BalanceEngine, LATE_FEE_PER_DAY};

/// Service configuration
///
/// Loaded from `LENDING_*` environment variables; unset keys keep their defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Log level
    pub log_level: String,
    /// IANA timezone used to decide what "today" is
    pub timezone: String,
    /// Flat penalty charged per overdue day
    pub late_fee_per_day: Decimal,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            timezone: "UTC".to_string(),
            late_fee_per_day: LATE_FEE_PER_DAY,
        }
    }
}

impl ServiceConfig {
    /// Loads configuration from environment
    pub fn from_env() -> Result<Self, CoreError> {
        let config: Self = config::Config::builder()
            .add_source(config::Environment::with_prefix("LENDING"))
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| CoreError::configuration(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Checks values that deserialization alone does not catch
    pub fn validate(&self) -> Result<(), CoreError> {
        self.timezone()?;
        if self.late_fee_per_day < dec!(0) {
            return Err(CoreError::configuration(format!(
                "late_fee_per_day must not be negative, got {}",
                self.late_fee_per_day
            )));
        }
        Ok(())
    }

    /// Returns the configured timezone
    pub fn timezone(&self) -> Result<Timezone, CoreError> {
        Ok(self.timezone.parse::<Timezone>()?)
    }

    /// Returns a wall clock in the configured timezone
    pub fn clock(&self) -> Result<SystemClock, CoreError> {
        Ok(SystemClock::new(self.timezone()?))
    }

    /// Returns a balance engine charging the configured late fee
    pub fn balance_engine(&self) -> BalanceEngine {
        BalanceEngine::new(Money::new(self.late_fee_per_day))
    }
}
