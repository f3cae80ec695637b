use eframe::egui;
use profile_site::icons::{decode, IconCache};
use profile_site::view::{ImageStatus, ImageStatusLookup};
use std::io::Cursor;
use std::sync::Arc;
use std::time::Duration;

use mock_site::MemoryFetcher;

fn png_bytes() -> Vec<u8> {
    let img = image::DynamicImage::ImageRgba8(image::RgbaImage::from_pixel(
        3,
        2,
        image::Rgba([10, 20, 30, 255]),
    ));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageOutputFormat::Png).unwrap();
    out.into_inner()
}

fn settle(ctx: &egui::Context, cache: &mut IconCache) {
    for _ in 0..200 {
        cache.poll(ctx);
        if !cache.has_pending() {
            return;
        }
        std::thread::sleep(Duration::from_millis(10));
    }
    panic!("downloads never finished");
}

#[test]
fn decodes_png() {
    let image = decode(&png_bytes()).unwrap();
    assert_eq!(image.size, [3, 2]);
    assert!(decode(b"nope").is_err());
}

#[test]
fn statuses_follow_downloads() {
    let site = MemoryFetcher::default();
    site.insert("/config/usericon.png", png_bytes());
    site.insert("https://x/broken.png", b"<html>".to_vec());
    let ctx = egui::Context::default();
    let mut cache = IconCache::new(Arc::new(site));

    assert_eq!(cache.status("/config/usericon.png"), ImageStatus::Pending);
    cache.request(&ctx, "/config/usericon.png");
    cache.request(&ctx, "https://x/broken.png");
    cache.request(&ctx, "https://x/missing.png");
    settle(&ctx, &mut cache);

    assert_eq!(cache.status("/config/usericon.png"), ImageStatus::Loaded);
    assert!(cache.texture("/config/usericon.png").is_some());
    assert_eq!(cache.status("https://x/broken.png"), ImageStatus::Failed);
    assert_eq!(cache.status("https://x/missing.png"), ImageStatus::Failed);
}

#[test]
fn repeated_requests_fetch_once() {
    let site = MemoryFetcher::default();
    let ctx = egui::Context::default();
    let mut cache = IconCache::new(Arc::new(site.clone()));
    cache.request(&ctx, "/a.png");
    settle(&ctx, &mut cache);
    assert_eq!(cache.status("/a.png"), ImageStatus::Failed);

    // Becoming available later does not trigger a second download.
    site.insert("/a.png", png_bytes());
    cache.request(&ctx, "/a.png");
    assert!(!cache.has_pending());
    assert_eq!(cache.status("/a.png"), ImageStatus::Failed);
}

#[test]
fn dropping_cache_mid_download_is_harmless() {
    let site = MemoryFetcher::default();
    site.insert("/config/usericon.png", png_bytes());
    let ctx = egui::Context::default();
    let mut cache = IconCache::new(Arc::new(site.clone()));
    cache.request(&ctx, "/config/usericon.png");
    drop(cache);
    std::thread::sleep(Duration::from_millis(50));

    let mut cache = IconCache::new(Arc::new(site));
    cache.request(&ctx, "/config/usericon.png");
    settle(&ctx, &mut cache);
    assert_eq!(cache.status("/config/usericon.png"), ImageStatus::Loaded);
}
