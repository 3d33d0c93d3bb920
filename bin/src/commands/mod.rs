//! CLI command implementations.

use anyhow::{Context as _, Result};
use macrolens_lib::prelude::*;
use tracing::debug;

pub(crate) mod dashboard;
pub(crate) mod info;
pub(crate) mod list;
pub(crate) mod news;
pub(crate) mod reserves;
pub(crate) mod tic;

/// Shared state of the commands that reach the network.
pub(crate) struct Context {
    pub(crate) client: HttpClient,
    pub(crate) endpoints: Endpoints,
    pub(crate) settings: RunSettings,
    pub(crate) quiet: bool,
}

impl Context {
    /// Builds the HTTP client from the global flags.
    pub(crate) fn new(
        settings: RunSettings,
        user_agent: Option<String>,
        quiet: bool,
    ) -> Result<Self> {
        let mut config = ClientConfig {
            concurrency: settings.concurrency,
            ..Default::default()
        }
        .with_call_budget(settings.timeout);
        if let Some(user_agent) = user_agent {
            config.user_agent = user_agent;
        }
        debug!(
            user_agent = %config.user_agent,
            timeout = ?config.timeout,
            concurrency = config.concurrency,
            "building HTTP client"
        );
        let client = HttpClient::new(config).context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            endpoints: Endpoints::default(),
            settings,
            quiet,
        })
    }

    pub(crate) fn sources(&self) -> Sources {
        Sources::new(self.client.clone(), self.endpoints.clone())
    }

    pub(crate) fn lookups(&self) -> macrolens_lib::Lookups {
        macrolens_lib::Lookups::new(self.client.clone(), self.endpoints.clone())
            .with_timeout(self.settings.timeout)
    }
}
