//! Application configuration
//!
//! Read once at startup from the environment (`.env` supported) into an
//! immutable structure. The rate card is passed explicitly into the pricing
//! functions rather than referenced as a global.

use std::env;
use std::net::SocketAddr;

use anyhow::{ensure, Context, Result};
use rust_decimal::Decimal;

use crate::pricing::RateCard;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_GEMINI_MODEL: &str = "gemini-3-flash-preview";

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub rate_card: RateCard,
    pub advisor: AdvisorConfig,
}

/// Advisor backend configuration
#[derive(Debug, Clone)]
pub struct AdvisorConfig {
    /// Without a key the advisor degrades to the fallback reply.
    pub api_key: Option<String>,
    pub model: String,
}

impl AppConfig {
    /// Load configuration from the environment, with published defaults.
    pub fn from_env() -> Result<Self> {
        let bind_addr = env_or("BIND_ADDR", DEFAULT_BIND_ADDR)
            .parse()
            .context("BIND_ADDR must be a host:port address")?;

        let defaults = RateCard::standard();
        let rate_card = RateCard {
            base_rate: env_decimal("BASE_RATE", defaults.base_rate)?,
            min_rate: env_decimal("MIN_RATE", defaults.min_rate)?,
            discount_step: env_decimal("DISCOUNT_STEP", defaults.discount_step)?,
            discount_rate_per_step: env_decimal(
                "DISCOUNT_RATE_PER_STEP",
                defaults.discount_rate_per_step,
            )?,
            currency: env_or("CURRENCY", &defaults.currency),
        };
        validate_rate_card(&rate_card)?;

        let advisor = AdvisorConfig {
            api_key: env::var("GEMINI_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty()),
            model: env_or("GEMINI_MODEL", DEFAULT_GEMINI_MODEL),
        };

        Ok(Self {
            bind_addr,
            rate_card,
            advisor,
        })
    }
}

fn env_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn env_decimal(name: &str, default: Decimal) -> Result<Decimal> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} must be a decimal number, got '{}'", name, raw)),
        Err(_) => Ok(default),
    }
}

pub(crate) fn validate_rate_card(card: &RateCard) -> Result<()> {
    ensure!(card.base_rate > Decimal::ZERO, "BASE_RATE must be positive");
    ensure!(
        card.min_rate >= Decimal::ZERO,
        "MIN_RATE must be non-negative"
    );
    ensure!(
        card.min_rate <= card.base_rate,
        "MIN_RATE must not exceed BASE_RATE"
    );
    ensure!(
        card.discount_step > Decimal::ZERO,
        "DISCOUNT_STEP must be positive"
    );
    ensure!(
        card.discount_rate_per_step >= Decimal::ZERO,
        "DISCOUNT_RATE_PER_STEP must be non-negative"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_standard_rate_card_is_valid() {
        assert!(validate_rate_card(&RateCard::standard()).is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_cards() {
        let mut card = RateCard::standard();
        card.base_rate = Decimal::ZERO;
        assert!(validate_rate_card(&card).is_err());

        let mut card = RateCard::standard();
        card.min_rate = dec!(1500);
        assert!(validate_rate_card(&card).is_err());

        let mut card = RateCard::standard();
        card.discount_step = Decimal::ZERO;
        assert!(validate_rate_card(&card).is_err());

        let mut card = RateCard::standard();
        card.discount_rate_per_step = dec!(-0.05);
        assert!(validate_rate_card(&card).is_err());
    }
}
