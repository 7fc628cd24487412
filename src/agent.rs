use anyhow::{anyhow, Result};
use tracing::{info, instrument, warn};

use crate::ai::config::AiConfig;
use crate::ai::reminder::generate_reminder;
use crate::config::Config;
use crate::messages::missing_keys_error;
use crate::places::PlacesClient;

/// Result of judging one location.
#[derive(Clone, Debug, PartialEq)]
pub enum LocationOutcome {
    /// Worth a photo; `message` is the reminder to show.
    Reminder { message: String },
    /// The model advised against a photo and said why.
    NotWorth { message: String },
    Failed { error: String },
}

/// Looks up where the user is and decides whether to nudge them.
#[derive(Clone)]
pub struct PhotoReminderAgent {
    ai: AiConfig,
    places: PlacesClient,
}

fn validate_coordinates(latitude: f64, longitude: f64) -> Result<()> {
    if !latitude.is_finite() || !longitude.is_finite() {
        return Err(anyhow!("coordinates must be finite numbers"));
    }
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(anyhow!("latitude {latitude} is out of range"));
    }
    if !(-180.0..=180.0).contains(&longitude) {
        return Err(anyhow!("longitude {longitude} is out of range"));
    }
    Ok(())
}

impl PhotoReminderAgent {
    pub fn new(ai: AiConfig, places: PlacesClient) -> Self {
        Self { ai, places }
    }

    /// Build the agent, refusing to start without both credentials.
    pub fn from_config(config: &Config) -> Result<Self> {
        let missing = config.missing_keys();
        match (&config.ai, &config.places) {
            (Some(ai), Some(places)) => {
                let places = PlacesClient::new(places.clone())?;
                Ok(Self::new(ai.clone(), places))
            }
            _ => Err(anyhow!(missing_keys_error(&missing))),
        }
    }

    #[instrument(level = "info", skip(self))]
    pub async fn process_location(
        &self,
        latitude: f64,
        longitude: f64,
        preferences: &[String],
    ) -> LocationOutcome {
        if let Err(err) = validate_coordinates(latitude, longitude) {
            warn!(error = %err, "rejecting location");
            return LocationOutcome::Failed {
                error: format!("Error processing location: {err}"),
            };
        }

        let place = self.places.nearby(latitude, longitude).await;
        if let Err(err) = &place {
            warn!(error = %err, "failed to get place details");
        }

        let draft = generate_reminder(&self.ai, place, preferences).await;
        if draft.worth_it {
            info!("photo reminder generated");
            LocationOutcome::Reminder {
                message: draft.message,
            }
        } else {
            info!("location judged not photo-worthy");
            LocationOutcome::NotWorth {
                message: draft.message,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PlacesConfig, DEFAULT_BIND_ADDR};

    #[test]
    fn coordinate_validation() {
        assert!(validate_coordinates(40.78, -73.96).is_ok());
        assert!(validate_coordinates(90.0, 180.0).is_ok());
        assert!(validate_coordinates(90.1, 0.0).is_err());
        assert!(validate_coordinates(0.0, -180.5).is_err());
        assert!(validate_coordinates(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn from_config_names_missing_keys() {
        let config = Config {
            bind_addr: DEFAULT_BIND_ADDR.into(),
            search_url: None,
            rate_limit_per_second: None,
            ai: None,
            places: Some(PlacesConfig {
                api_key: "p".into(),
                url: None,
                radius: 50,
            }),
        };
        let err = PhotoReminderAgent::from_config(&config).err().unwrap();
        assert_eq!(err.to_string(), "Missing required API keys: GOOGLE_API_KEY");
    }

    #[tokio::test]
    async fn invalid_coordinates_fail_without_network() {
        let agent = PhotoReminderAgent::new(
            AiConfig {
                api_key: "k".into(),
                model: "m".into(),
                chat_url: Some("http://127.0.0.1:9/".into()),
                timeout: crate::ai::config::DEFAULT_TIMEOUT,
            },
            PlacesClient::new(PlacesConfig {
                api_key: "p".into(),
                url: Some("http://127.0.0.1:9/".into()),
                radius: 50,
            })
            .unwrap(),
        );
        let outcome = agent.process_location(123.0, 0.0, &[]).await;
        assert!(matches!(outcome, LocationOutcome::Failed { .. }));
    }
}
