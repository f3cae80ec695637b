use profile_site::config::DEFAULT_NAME;
use profile_site::effects::ViewportEffects;
use profile_site::fetch::{Fetch, SiteFetcher, SiteRoot};
use profile_site::gui::ProfileApp;
use profile_site::logging;
use profile_site::settings::Settings;

use eframe::egui;
use std::path::PathBuf;
use std::sync::Arc;

fn main() -> anyhow::Result<()> {
    let settings = Settings::load("settings.json")?.with_site_root(std::env::args().nth(1));
    logging::init(settings.debug_logging, settings.log_file.clone());

    let root = SiteRoot::parse(&settings.site_root).unwrap_or_else(|e| {
        tracing::error!("{e:#}; serving from the current directory");
        SiteRoot::Local(PathBuf::from("."))
    });
    tracing::info!(%root, "starting");
    let fetcher: Arc<dyn Fetch> = Arc::new(SiteFetcher::new(root)?);

    let (width, height) = settings.window_size;
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(format!("{DEFAULT_NAME}'s Website"))
            .with_inner_size([width, height])
            .with_min_inner_size([360.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "profile_site",
        native_options,
        Box::new(move |cc| {
            let effects = Arc::new(ViewportEffects::new(
                cc.egui_ctx.clone(),
                Arc::clone(&fetcher),
            ));
            Box::new(ProfileApp::new(&cc.egui_ctx, fetcher, effects))
        }),
    )
    .map_err(|e| anyhow::anyhow!("failed to open window: {e}"))
}
