use crate::error::{BadEnvVarSnafu, ParseNumberSnafu, RosterResult};
use dotenvy::var;
use snafu::ResultExt;
use std::{sync::Arc, time::Duration};

const DEFAULT_SERVER_IP: &str = "127.0.0.1:8080";
const DEFAULT_TOAST_SECS: u64 = 3;

#[derive(Clone, Debug)]
pub struct RuntimeConfiguration {
    server_ip: Arc<str>,
    source_config: Arc<RecordSourceConfig>,
    toast_duration: Duration,
}

impl RuntimeConfiguration {
    pub fn new() -> RosterResult<Self> {
        let server_ip = var("ROSTER_SERVER_IP").unwrap_or_else(|_| DEFAULT_SERVER_IP.to_string());

        let toast_duration = match var("ROSTER_TOAST_SECS") {
            Ok(secs) => Duration::from_secs(secs.parse().context(ParseNumberSnafu {
                name: "ROSTER_TOAST_SECS",
            })?),
            Err(_) => Duration::from_secs(DEFAULT_TOAST_SECS),
        };

        Ok(Self {
            server_ip: server_ip.into(),
            source_config: Arc::new(RecordSourceConfig::new()?),
            toast_duration,
        })
    }

    #[cfg(test)]
    pub fn from_parts(server_ip: &str, base_url: &str, toast_duration: Duration) -> Self {
        Self {
            server_ip: server_ip.into(),
            source_config: Arc::new(RecordSourceConfig::from_base_url(base_url)),
            toast_duration,
        }
    }

    pub fn server_ip(&self) -> &str {
        &self.server_ip
    }

    pub fn source_config(&self) -> Arc<RecordSourceConfig> {
        self.source_config.clone()
    }

    pub const fn toast_duration(&self) -> Duration {
        self.toast_duration
    }
}

#[derive(Debug)]
pub struct RecordSourceConfig {
    base_url: String,
}

impl RecordSourceConfig {
    pub fn new() -> RosterResult<Self> {
        let name = "ROSTER_RECORD_SOURCE_URL";
        let base_url = var(name).context(BadEnvVarSnafu { name })?;
        Ok(Self::from_base_url(&base_url))
    }

    pub fn from_base_url(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// `path` must start with a `/`
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}
