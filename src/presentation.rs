use crate::config::{self, Configuration, DEFAULT_FONT, DEFAULT_ICON_FORMAT, DEFAULT_NAME};
use crate::loader::LoadOutcome;
use crate::overlay::OverlayController;

/// Everything the renderer reads. Owned by the UI thread.
#[derive(Debug, Clone)]
pub struct Presentation {
    pub icon_format: String,
    pub font: String,
    pub name: String,
    /// `None` until a load succeeds; panel bodies need it.
    pub config: Option<Configuration>,
    pub overlay: OverlayController,
}

impl Default for Presentation {
    fn default() -> Self {
        Self {
            icon_format: DEFAULT_ICON_FORMAT.into(),
            font: DEFAULT_FONT.into(),
            name: DEFAULT_NAME.into(),
            config: None,
            overlay: OverlayController::new(),
        }
    }
}

impl Presentation {
    pub fn apply(&mut self, outcome: LoadOutcome) {
        match outcome {
            LoadOutcome::Loaded(config) => {
                self.icon_format = config.icon_format.clone();
                self.font = config.font.clone();
                self.name = config.name.clone();
                self.config = Some(config);
            }
            LoadOutcome::Failed(e) => {
                tracing::error!("Error loading config: {e:#}");
                self.icon_format = DEFAULT_ICON_FORMAT.into();
                self.font = DEFAULT_FONT.into();
            }
        }
    }

    pub fn icon_path(&self) -> String {
        config::icon_path(&self.icon_format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_keeps_defaults() {
        let mut p = Presentation::default();
        p.apply(LoadOutcome::Failed(anyhow::anyhow!("offline")));
        assert_eq!(p.icon_format, "png");
        assert_eq!(p.font, "Inter");
        assert_eq!(p.name, "Ben");
        assert!(p.config.is_none());
        assert_eq!(p.icon_path(), "/config/usericon.png");
    }

    #[test]
    fn success_copies_configuration() {
        let mut p = Presentation::default();
        let cfg = Configuration::from_yaml("NAME: Ada\nICON_FORMAT: WEBP\n").unwrap();
        p.apply(LoadOutcome::Loaded(cfg));
        assert_eq!(p.name, "Ada");
        assert_eq!(p.icon_path(), "/config/usericon.webp");
        assert!(p.config.is_some());
    }
}
