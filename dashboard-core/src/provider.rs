use crate::{
    Config, WeatherRecord, error::FetchError, provider::weatherapi::WeatherApiProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod weatherapi;

/// Source of current weather conditions.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Fetch current conditions for `city`, sending at most one request.
    async fn fetch(&self, city: &str) -> Result<WeatherRecord, FetchError>;
}

/// Construct the provider described by `config`.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let api_key = config.api_key()?;

    Ok(Box::new(WeatherApiProvider::with_base_url(
        api_key,
        config.provider.base_url.clone(),
    )))
}

/// Trim `city`, rejecting names that are empty or whitespace only.
pub(crate) fn normalize_city(city: &str) -> Result<&str, FetchError> {
    let trimmed = city.trim();
    if trimmed.is_empty() {
        return Err(FetchError::EmptyInput);
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn normalize_city_trims() {
        assert_eq!(normalize_city("  Paris \n").unwrap(), "Paris");
    }

    #[test]
    fn normalize_city_rejects_blank() {
        for input in ["", "   ", "\t\n"] {
            assert!(matches!(normalize_city(input), Err(FetchError::EmptyInput)));
        }
    }

    #[test]
    fn provider_from_config_works_when_key_configured() {
        let mut cfg = Config::default();
        cfg.set_api_key("KEY".to_string());

        let provider = provider_from_config(&cfg);
        assert!(provider.is_ok());
    }
}
