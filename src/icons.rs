use crate::fetch::Fetch;
use crate::view::{ImageStatus, ImageStatusLookup};
use anyhow::{Context, Result};
use eframe::egui;
use std::collections::HashMap;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;

enum IconSlot {
    Pending,
    Loaded(egui::TextureHandle),
    Failed,
}

type Delivery = (String, Result<egui::ColorImage>);

/// Remote images used by the page. Each location is fetched at most once on a
/// worker thread; textures are created on the UI thread in [`IconCache::poll`].
pub struct IconCache {
    fetcher: Arc<dyn Fetch>,
    slots: HashMap<String, IconSlot>,
    tx: Sender<Delivery>,
    rx: Receiver<Delivery>,
}

pub fn decode(bytes: &[u8]) -> Result<egui::ColorImage> {
    let img = image::load_from_memory(bytes).context("decode image")?;
    let size = [img.width() as usize, img.height() as usize];
    let rgba = img.to_rgba8();
    Ok(egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw()))
}

impl IconCache {
    pub fn new(fetcher: Arc<dyn Fetch>) -> Self {
        let (tx, rx) = channel();
        Self {
            fetcher,
            slots: HashMap::new(),
            tx,
            rx,
        }
    }

    /// Start fetching `location` unless it was requested before.
    pub fn request(&mut self, ctx: &egui::Context, location: &str) {
        if location.is_empty() || self.slots.contains_key(location) {
            return;
        }
        self.slots.insert(location.to_string(), IconSlot::Pending);
        let fetcher = Arc::clone(&self.fetcher);
        let tx = self.tx.clone();
        let ctx = ctx.clone();
        let location = location.to_string();
        std::thread::spawn(move || {
            let result = fetcher
                .fetch_bytes(&location)
                .and_then(|bytes| decode(&bytes));
            if tx.send((location.clone(), result)).is_err() {
                tracing::debug!(%location, "icon receiver dropped");
                return;
            }
            ctx.request_repaint();
        });
    }

    /// Drain finished downloads. Returns whether anything changed.
    pub fn poll(&mut self, ctx: &egui::Context) -> bool {
        let mut changed = false;
        while let Ok((location, result)) = self.rx.try_recv() {
            let slot = match result {
                Ok(image) => IconSlot::Loaded(ctx.load_texture(
                    location.as_str(),
                    image,
                    egui::TextureOptions::LINEAR,
                )),
                Err(e) => {
                    tracing::warn!(%location, "icon unavailable: {e:#}");
                    IconSlot::Failed
                }
            };
            self.slots.insert(location, slot);
            changed = true;
        }
        changed
    }

    pub fn texture(&self, location: &str) -> Option<&egui::TextureHandle> {
        match self.slots.get(location) {
            Some(IconSlot::Loaded(tex)) => Some(tex),
            _ => None,
        }
    }

    pub fn has_pending(&self) -> bool {
        self.slots.values().any(|s| matches!(s, IconSlot::Pending))
    }
}

impl ImageStatusLookup for IconCache {
    fn status(&self, url: &str) -> ImageStatus {
        match self.slots.get(url) {
            Some(IconSlot::Loaded(_)) => ImageStatus::Loaded,
            Some(IconSlot::Failed) => ImageStatus::Failed,
            Some(IconSlot::Pending) | None => ImageStatus::Pending,
        }
    }
}
