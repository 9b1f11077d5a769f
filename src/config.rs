// SPDX-License-Identifier: GPL-3.0-only

//! Widget configuration supplied by the host page.
//!
//! Options use the host-facing camelCase names. Unknown options are ignored
//! so a host can pass a larger settings object without breaking the widget.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::Deserialize;
use std::fmt;
use url::Url;

use crate::app_settings::{PREPROD_BASE_URL, PRODUCTION_BASE_URL, UTM_MEDIUM};
use crate::bridge::OutboundMessage;

/// Characters left alone by `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Deployment the remote experience is loaded from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum Environment {
    #[default]
    Production,
    Development,
    Staging,
}

impl From<String> for Environment {
    fn from(value: String) -> Self {
        match value.as_str() {
            "development" => Environment::Development,
            "staging" => Environment::Staging,
            _ => Environment::Production,
        }
    }
}

impl Environment {
    /// Host serving this environment.
    #[must_use]
    pub fn base_url(&self) -> &'static str {
        match self {
            Environment::Production => PRODUCTION_BASE_URL,
            Environment::Development | Environment::Staging => PREPROD_BASE_URL,
        }
    }
}

/// Options recognized by `initialize`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WidgetConfig {
    /// Log default callback invocations.
    pub enable_console_logs: bool,
    /// Partner application identifier. Required.
    pub app_id: Option<String>,
    pub environment: Environment,
    pub customer_country: Option<String>,
    pub customer_language: Option<String>,
    pub default_receive_country: Option<String>,
    /// Prefilled into the remote login form.
    pub customer_email: Option<String>,
}

/// Errors detected while validating a configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// A required option is missing or empty.
    MissingField(&'static str),
    /// The environment's base address could not be used.
    InvalidBaseUrl {
        url: &'static str,
        reason: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingField(name) => write!(f, "missing required option '{}'", name),
            ConfigError::InvalidBaseUrl { url, reason } => {
                write!(f, "invalid base address '{}': {}", url, reason)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

impl WidgetConfig {
    /// Creates a production configuration for `app_id`.
    pub fn new(app_id: impl Into<String>) -> Self {
        Self {
            app_id: Some(app_id.into()),
            ..Self::default()
        }
    }

    /// Parses a configuration from a JSON object.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    #[must_use]
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Sets the customer country and language path segments.
    #[must_use]
    pub fn with_customer(
        mut self,
        country: impl Into<String>,
        language: impl Into<String>,
    ) -> Self {
        self.customer_country = Some(country.into());
        self.customer_language = Some(language.into());
        self
    }

    #[must_use]
    pub fn with_default_receive_country(mut self, country: impl Into<String>) -> Self {
        self.default_receive_country = Some(country.into());
        self
    }

    #[must_use]
    pub fn with_customer_email(mut self, email: impl Into<String>) -> Self {
        self.customer_email = Some(email.into());
        self
    }

    #[must_use]
    pub fn with_console_logs(mut self, enabled: bool) -> Self {
        self.enable_console_logs = enabled;
        self
    }

    /// Returns the application identifier, which must be present.
    pub fn app_id(&self) -> Result<&str, ConfigError> {
        non_empty(&self.app_id).ok_or(ConfigError::MissingField("appId"))
    }

    /// Checks that the configuration can address a remote experience.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.frame_url().map(|_| ())
    }

    /// Builds the frame address.
    ///
    /// Country, language, receive country and app id become path segments in
    /// that order, skipping empty ones. Attribution parameters follow, plus
    /// the customer email encoded as a URI component when present.
    pub fn frame_url(&self) -> Result<Url, ConfigError> {
        let app_id = self.app_id()?;
        let base = self.environment.base_url();

        let mut url = Url::parse(base).map_err(|e| ConfigError::InvalidBaseUrl {
            url: base,
            reason: e.to_string(),
        })?;

        {
            let mut segments = url.path_segments_mut().map_err(|()| ConfigError::InvalidBaseUrl {
                url: base,
                reason: "address cannot carry a path".to_string(),
            })?;
            segments.pop_if_empty();
            let parts = [
                non_empty(&self.customer_country),
                non_empty(&self.customer_language),
                non_empty(&self.default_receive_country),
                Some(app_id),
            ];
            segments.extend(parts.into_iter().flatten());
        }

        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("utm_medium", UTM_MEDIUM)
                .append_pair("utm_source", app_id);
            if let Some(email) = non_empty(&self.customer_email) {
                let encoded = utf8_percent_encode(email, URI_COMPONENT).to_string();
                query.append_pair("email_prefill", &encoded);
            }
        }

        Ok(url)
    }

    /// Login redirect announced to the frame once it is listening.
    pub fn login_redirect(&self) -> Result<OutboundMessage, ConfigError> {
        let app_id = self.app_id()?;
        let country = self.default_receive_country.as_deref().unwrap_or_default();
        Ok(OutboundMessage::login_redirect(country, app_id))
    }
}
