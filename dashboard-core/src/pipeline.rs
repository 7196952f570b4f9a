use std::path::Path;

use tracing::instrument;

use crate::{
    dashboard, error::DashboardError, model::WeatherRecord, provider::WeatherProvider,
};

/// Fetch current weather for `city` and render it to `output_path`.
///
/// Rendering is skipped entirely when the fetch fails.
#[instrument(skip(provider))]
pub async fn generate_dashboard(
    provider: &dyn WeatherProvider,
    city: &str,
    output_path: &Path,
) -> Result<WeatherRecord, DashboardError> {
    let record = provider.fetch(city).await?;
    dashboard::render(&record, output_path)?;
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::FetchError, model::sample_record};
    use async_trait::async_trait;

    #[derive(Debug)]
    struct FixedProvider(Option<WeatherRecord>);

    #[async_trait]
    impl WeatherProvider for FixedProvider {
        async fn fetch(&self, _city: &str) -> Result<WeatherRecord, FetchError> {
            self.0
                .clone()
                .ok_or_else(|| FetchError::Network("connection refused".into()))
        }
    }

    #[tokio::test]
    async fn fetch_failure_skips_render() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("weather_dashboard.png");

        let err = generate_dashboard(&FixedProvider(None), "Paris", &path)
            .await
            .unwrap_err();

        assert!(matches!(err, DashboardError::Fetch(FetchError::Network(_))));
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn success_renders_and_returns_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("weather_dashboard.png");

        let record = generate_dashboard(&FixedProvider(Some(sample_record())), "Paris", &path)
            .await
            .unwrap();

        assert_eq!(record.location_name, "Paris");
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }

    #[tokio::test]
    async fn render_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("weather_dashboard.png");

        let err = generate_dashboard(&FixedProvider(Some(sample_record())), "Paris", &path)
            .await
            .unwrap_err();

        assert!(matches!(err, DashboardError::Render(_)));
    }
}
