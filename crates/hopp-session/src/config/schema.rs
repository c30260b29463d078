use serde::Deserialize;

use crate::error::{Result, SessionError};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SessionConfig {
    pub version: u32,

    #[serde(default)]
    pub relay: RelaySection,

    #[serde(default)]
    pub render: RenderSection,
}

impl SessionConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(SessionError::Config(format!(
                "unsupported config version: {}",
                self.version
            )));
        }
        self.relay.validate()?;
        self.render.validate()?;
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RelaySection {
    /// Endpoint the harness probes; the worker itself takes the URL per INIT.
    #[serde(default)]
    pub endpoint: Option<String>,

    #[serde(default = "default_max_frame_bytes")]
    pub max_frame_bytes: usize,

    #[serde(default = "default_relay_queue")]
    pub queue_capacity: usize,
}

impl Default for RelaySection {
    fn default() -> Self {
        Self {
            endpoint: None,
            max_frame_bytes: default_max_frame_bytes(),
            queue_capacity: default_relay_queue(),
        }
    }
}

impl RelaySection {
    pub fn validate(&self) -> Result<()> {
        if !(1024..=64 * 1024 * 1024).contains(&self.max_frame_bytes) {
            return Err(SessionError::Config(
                "relay.max_frame_bytes must be between 1024 and 64 MiB".into(),
            ));
        }
        if !(1..=65536).contains(&self.queue_capacity) {
            return Err(SessionError::Config(
                "relay.queue_capacity must be between 1 and 65536".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RenderSection {
    #[serde(default = "default_render_queue")]
    pub queue_capacity: usize,
}

impl Default for RenderSection {
    fn default() -> Self {
        Self {
            queue_capacity: default_render_queue(),
        }
    }
}

impl RenderSection {
    pub fn validate(&self) -> Result<()> {
        if !(1..=4096).contains(&self.queue_capacity) {
            return Err(SessionError::Config(
                "render.queue_capacity must be between 1 and 4096".into(),
            ));
        }
        Ok(())
    }
}

fn default_max_frame_bytes() -> usize {
    1024 * 1024
}
fn default_relay_queue() -> usize {
    256
}
fn default_render_queue() -> usize {
    64
}
