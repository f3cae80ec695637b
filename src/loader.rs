use crate::config::{Configuration, CONFIG_PATH};
use crate::effects::{self, PageEffects};
use crate::fetch::Fetch;
use anyhow::{Context, Result};
use std::sync::mpsc::{channel, Receiver};
use std::sync::Arc;

#[derive(Debug)]
pub enum LoadOutcome {
    Loaded(Configuration),
    Failed(anyhow::Error),
}

/// Fetches and parses the site configuration, then applies the page effects.
pub struct ConfigLoader {
    fetcher: Arc<dyn Fetch>,
    effects: Arc<dyn PageEffects>,
}

impl ConfigLoader {
    pub fn new(fetcher: Arc<dyn Fetch>, effects: Arc<dyn PageEffects>) -> Self {
        Self { fetcher, effects }
    }

    pub fn load(&self) -> Result<Configuration> {
        let text = self
            .fetcher
            .fetch_text(CONFIG_PATH)
            .context("fetch site configuration")?;
        let config = Configuration::from_yaml(&text)?;
        tracing::info!(
            name = %config.name,
            socials = config.social_buttons.len(),
            projects = config.projects.len(),
            "site configuration loaded"
        );
        effects::apply_loaded(self.effects.as_ref(), &config);
        Ok(config)
    }

    /// Load on a worker thread. `notify` runs after the outcome is sent so the
    /// UI can schedule a repaint.
    pub fn spawn<N>(self, notify: N) -> Receiver<LoadOutcome>
    where
        N: Fn() + Send + 'static,
    {
        let (tx, rx) = channel();
        std::thread::spawn(move || {
            let outcome = match self.load() {
                Ok(config) => LoadOutcome::Loaded(config),
                Err(e) => LoadOutcome::Failed(e),
            };
            if tx.send(outcome).is_err() {
                tracing::debug!("configuration receiver dropped");
            }
            notify();
        });
        rx
    }
}
