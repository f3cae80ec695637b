use crate::effects::FontRequest;
use crate::fetch::Fetch;
use anyhow::{anyhow, bail, Context, Result};
use eframe::egui;
use once_cell::sync::Lazy;
use regex::Regex;

static FACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)@font-face\s*\{([^}]*)\}").unwrap());
static WEIGHT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"font-weight:\s*(\d+)").unwrap());
static URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"url\(\s*['"]?([^)'"]+)['"]?\s*\)(?:\s*format\(\s*['"]?([a-z0-9-]+))?"#).unwrap());

const PREFERRED_WEIGHT: u32 = 400;

/// One `@font-face` rule of a stylesheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontFace {
    pub weight: Option<u32>,
    pub url: String,
    pub format: Option<String>,
}

impl FontFace {
    /// egui only rasterizes TrueType/OpenType data.
    fn is_usable(&self) -> bool {
        match self.format.as_deref() {
            Some("truetype") | Some("opentype") => true,
            Some(_) => false,
            None => {
                let lower = self.url.to_ascii_lowercase();
                lower.ends_with(".ttf") || lower.ends_with(".otf")
            }
        }
    }
}

pub fn parse_faces(css: &str) -> Vec<FontFace> {
    FACE_RE
        .captures_iter(css)
        .filter_map(|block| {
            let body = block.get(1)?.as_str();
            let src = URL_RE.captures(body)?;
            Some(FontFace {
                weight: WEIGHT_RE
                    .captures(body)
                    .and_then(|c| c.get(1))
                    .and_then(|m| m.as_str().parse().ok()),
                url: src.get(1)?.as_str().trim().to_string(),
                format: src.get(2).map(|m| m.as_str().to_ascii_lowercase()),
            })
        })
        .collect()
}

/// Regular weight when present, otherwise the first usable face.
pub fn pick_face(faces: &[FontFace]) -> Option<&FontFace> {
    let usable = || faces.iter().filter(|f| f.is_usable());
    usable()
        .find(|f| f.weight == Some(PREFERRED_WEIGHT))
        .or_else(|| usable().next())
}

fn looks_like_font(bytes: &[u8]) -> bool {
    matches!(
        bytes.get(..4),
        Some([0x00, 0x01, 0x00, 0x00]) | Some(b"OTTO") | Some(b"true") | Some(b"ttcf")
    )
}

pub fn download(fetcher: &dyn Fetch, font: &FontRequest) -> Result<Vec<u8>> {
    let css = fetcher
        .fetch_text(&font.stylesheet_url)
        .context("fetch font stylesheet")?;
    let faces = parse_faces(&css);
    let face = pick_face(&faces)
        .ok_or_else(|| anyhow!("no usable font face for {}", font.family))?;
    tracing::debug!(url = %face.url, weight = ?face.weight, "downloading font face");
    let bytes = fetcher.fetch_bytes(&face.url).context("fetch font file")?;
    if !looks_like_font(&bytes) {
        bail!("{} is not a TrueType/OpenType font", face.url);
    }
    Ok(bytes)
}

/// Make `family` the preferred proportional font, keeping the built-in fonts
/// as fallbacks for missing glyphs.
pub fn install(ctx: &egui::Context, family: &str, bytes: Vec<u8>) {
    let mut fonts = egui::FontDefinitions::default();
    fonts
        .font_data
        .insert(family.to_string(), egui::FontData::from_owned(bytes));
    fonts
        .families
        .entry(egui::FontFamily::Proportional)
        .or_default()
        .insert(0, family.to_string());
    ctx.set_fonts(fonts);
    ctx.request_repaint();
}
