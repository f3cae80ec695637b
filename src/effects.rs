use crate::config::Configuration;
use crate::fetch::Fetch;
use crate::fonts;
use eframe::egui;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

const FONT_WEIGHTS: &str = "300;400;500;600;700";

/// Display font requested by the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontRequest {
    pub family: String,
    pub stylesheet_url: String,
}

impl FontRequest {
    pub fn google(family: &str) -> Self {
        let family = family.trim().to_string();
        let stylesheet_url = format!(
            "https://fonts.googleapis.com/css2?family={}:wght@{FONT_WEIGHTS}&display=swap",
            family.replace(' ', "+")
        );
        Self {
            family,
            stylesheet_url,
        }
    }
}

/// One-time page effects triggered by a successful configuration load.
///
/// Implementations must tolerate repeated calls with the same arguments.
pub trait PageEffects: Send + Sync {
    fn set_title(&self, title: &str);
    fn apply_font(&self, font: &FontRequest);
}

/// Run the effects that follow a successful load.
pub fn apply_loaded(effects: &dyn PageEffects, config: &Configuration) {
    effects.set_title(&config.page_title());
    effects.apply_font(&FontRequest::google(&config.font));
}

/// Effects applied to the native window.
pub struct ViewportEffects {
    ctx: egui::Context,
    fetcher: Arc<dyn Fetch>,
    installed: Arc<Mutex<HashSet<String>>>,
}

impl ViewportEffects {
    pub fn new(ctx: egui::Context, fetcher: Arc<dyn Fetch>) -> Self {
        Self {
            ctx,
            fetcher,
            installed: Arc::new(Mutex::new(HashSet::new())),
        }
    }
}

impl PageEffects for ViewportEffects {
    fn set_title(&self, title: &str) {
        tracing::debug!(title, "setting window title");
        self.ctx
            .send_viewport_cmd(egui::ViewportCommand::Title(title.to_string()));
    }

    fn apply_font(&self, font: &FontRequest) {
        match self.installed.lock() {
            Ok(mut installed) => {
                if !installed.insert(font.family.clone()) {
                    return;
                }
            }
            Err(_) => {
                tracing::error!("failed to lock installed fonts");
                return;
            }
        }
        let ctx = self.ctx.clone();
        let fetcher = Arc::clone(&self.fetcher);
        let installed = Arc::clone(&self.installed);
        let font = font.clone();
        std::thread::spawn(move || {
            match fonts::download(fetcher.as_ref(), &font) {
                Ok(bytes) => {
                    fonts::install(&ctx, &font.family, bytes);
                    tracing::info!(family = %font.family, "display font installed");
                }
                Err(e) => {
                    tracing::warn!(family = %font.family, "font unavailable: {e:#}");
                    // Allow a later load to try again.
                    if let Ok(mut installed) = installed.lock() {
                        installed.remove(&font.family);
                    }
                }
            }
        });
    }
}
