mod paint;

pub use paint::UiEvent;

use crate::effects::PageEffects;
use crate::fetch::Fetch;
use crate::icons::IconCache;
use crate::loader::{ConfigLoader, LoadOutcome};
use crate::presentation::Presentation;
use crate::view::{self, ExternalLink, PageView, PanelBody};
use eframe::egui;
use std::sync::mpsc::{Receiver, TryRecvError};
use std::sync::Arc;
use std::time::Instant;

pub struct ProfileApp {
    state: Presentation,
    icons: IconCache,
    load_rx: Option<Receiver<LoadOutcome>>,
}

impl ProfileApp {
    /// Build the app and start loading the site configuration in the
    /// background. The page renders with defaults until the load finishes.
    pub fn new(
        ctx: &egui::Context,
        fetcher: Arc<dyn Fetch>,
        effects: Arc<dyn PageEffects>,
    ) -> Self {
        let loader = ConfigLoader::new(Arc::clone(&fetcher), effects);
        let repaint = ctx.clone();
        let load_rx = loader.spawn(move || repaint.request_repaint());
        Self {
            state: Presentation::default(),
            icons: IconCache::new(fetcher),
            load_rx: Some(load_rx),
        }
    }

    pub fn state(&self) -> &Presentation {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.load_rx.is_some()
    }

    /// Apply the load outcome once it arrives. Returns whether it did.
    pub fn poll_load(&mut self) -> bool {
        let received = match &self.load_rx {
            Some(rx) => rx.try_recv(),
            None => return false,
        };
        match received {
            Ok(outcome) => {
                self.state.apply(outcome);
                self.load_rx = None;
                true
            }
            Err(TryRecvError::Empty) => false,
            Err(TryRecvError::Disconnected) => {
                tracing::error!("configuration loader exited without a result");
                self.load_rx = None;
                false
            }
        }
    }

    /// Feed one UI event to the overlay. Links are returned for the caller to
    /// open.
    pub fn handle(&mut self, event: UiEvent, now: Instant) -> Option<ExternalLink> {
        let overlay = &mut self.state.overlay;
        match event {
            UiEvent::Open(section) => {
                overlay.open(section);
            }
            UiEvent::Close => {
                overlay.request_close(now);
            }
            UiEvent::Backdrop { inside_panel } => {
                overlay.backdrop_clicked(inside_panel, now);
            }
            UiEvent::Link(link) => return Some(link),
        }
        None
    }

    pub fn view(&self) -> PageView {
        view::project(&self.state, &self.icons)
    }

    fn request_images(&mut self, ctx: &egui::Context, view: &PageView) {
        self.icons.request(ctx, &view.icon_path);
        let Some(overlay) = &view.overlay else {
            return;
        };
        match &overlay.body {
            PanelBody::Socials { buttons, .. } => {
                for url in buttons.iter().filter_map(|b| b.icon.image.as_deref()) {
                    self.icons.request(ctx, url);
                }
            }
            PanelBody::Projects { cards } => {
                for url in cards.iter().filter_map(|c| c.icon.image.as_deref()) {
                    self.icons.request(ctx, url);
                }
            }
            PanelBody::About { .. } => {}
        }
    }

    /// Run one frame without needing an `eframe::Frame`.
    pub fn ui(&mut self, ctx: &egui::Context) {
        let now = Instant::now();
        self.poll_load();
        self.icons.poll(ctx);
        self.state.overlay.tick(now);

        let view = self.view();
        self.request_images(ctx, &view);
        let progress = self.state.overlay.close_progress(now);
        let events = paint::page(ctx, &view, &self.icons, progress);

        let now = Instant::now();
        for event in events {
            if let Some(link) = self.handle(event, now) {
                open_external(&link);
            }
        }
        if let Some(delay) = self.state.overlay.next_repaint(now) {
            ctx.request_repaint_after(delay);
        }
    }
}

fn open_external(link: &ExternalLink) {
    if link.url.trim().is_empty() {
        return;
    }
    tracing::debug!(url = %link.url, "opening link");
    // The system browser opens a fresh tab with no opener or referrer.
    if let Err(e) = open::that(&link.url) {
        tracing::error!("failed to open {}: {e}", link.url);
    }
}

impl eframe::App for ProfileApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ui(ctx);
    }
}
