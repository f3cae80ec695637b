use anyhow::{bail, Context, Result};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_yaml::Value;

/// Site-relative location of the configuration document.
pub const CONFIG_PATH: &str = "/config/config.yml";

pub const DEFAULT_ICON_FORMAT: &str = "png";
pub const DEFAULT_FONT: &str = "Inter";
pub const DEFAULT_NAME: &str = "Ben";

/// Alignment keyword used for the About and Socials text blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

impl TextAlign {
    /// Lenient keyword parsing. Unknown keywords fall back to `Left`.
    pub fn from_keyword(keyword: &str) -> Self {
        match keyword.trim().to_ascii_lowercase().as_str() {
            "center" | "centre" => TextAlign::Center,
            "right" | "end" => TextAlign::Right,
            "justify" => TextAlign::Justify,
            _ => TextAlign::Left,
        }
    }
}

/// Either a remote image or a short text glyph shown in its place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Icon {
    Image(String),
    Glyph(String),
}

impl Icon {
    pub fn from_raw(raw: &str) -> Self {
        if raw.starts_with("http") {
            Icon::Image(raw.to_string())
        } else {
            Icon::Glyph(raw.to_string())
        }
    }

    pub fn image_url(&self) -> Option<&str> {
        match self {
            Icon::Image(url) => Some(url),
            Icon::Glyph(_) => None,
        }
    }

    /// Text shown when no image is displayed. Image icons fall back to the
    /// first character of `label`.
    pub fn glyph(&self, label: &str) -> String {
        match self {
            Icon::Image(_) => label.chars().next().map(String::from).unwrap_or_default(),
            Icon::Glyph(text) => text.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocialEntry {
    pub name: String,
    pub url: String,
    pub icon: Icon,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectEntry {
    pub icon: Icon,
    pub title: String,
    pub description: String,
    pub period: String,
    pub url: String,
}

/// Fully populated site configuration. Every optional field of the document
/// has been replaced by its default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    pub icon_format: String,
    pub font: String,
    pub name: String,
    pub about_me: String,
    pub about_me_align: TextAlign,
    pub socials: String,
    pub socials_align: TextAlign,
    pub social_buttons: Vec<SocialEntry>,
    pub projects: Vec<ProjectEntry>,
}

impl Configuration {
    pub fn from_yaml(text: &str) -> Result<Self> {
        let doc: Value = serde_yaml::from_str(text).context("parse config.yml")?;
        if !doc.is_mapping() {
            bail!("config.yml is not a mapping (found {})", kind(&doc));
        }
        let raw: RawConfig = serde_yaml::from_value(doc).context("read config.yml")?;
        Ok(raw.normalize())
    }

    /// Window title announced once the configuration is applied.
    pub fn page_title(&self) -> String {
        format!("{}'s Website", self.name)
    }

    pub fn icon_path(&self) -> String {
        icon_path(&self.icon_format)
    }
}

pub fn icon_path(format: &str) -> String {
    format!("/config/usericon.{}", format.to_lowercase())
}

/// Document shape as written by the site owner.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawConfig {
    #[serde(rename = "ICON_FORMAT", default, deserialize_with = "scalar_opt")]
    pub icon_format: Option<String>,
    #[serde(rename = "GOOGLE_FONT", default, deserialize_with = "scalar_opt")]
    pub google_font: Option<String>,
    #[serde(rename = "NAME", default, deserialize_with = "scalar_opt")]
    pub name: Option<String>,
    #[serde(rename = "ABOUT_ME_CONTENT", default, deserialize_with = "scalar_opt")]
    pub about_me_content: Option<String>,
    #[serde(rename = "ABOUT_ME_ALIGN", default, deserialize_with = "scalar_opt")]
    pub about_me_align: Option<String>,
    #[serde(rename = "SOCIALS_CONTENT", default, deserialize_with = "scalar_opt")]
    pub socials_content: Option<String>,
    #[serde(rename = "SOCIALS_ALIGN", default, deserialize_with = "scalar_opt")]
    pub socials_align: Option<String>,
    #[serde(rename = "SOCIAL_BUTTONS", default)]
    pub social_buttons: Option<Vec<RawSocialButton>>,
    #[serde(rename = "PROJECTS", default)]
    pub projects: Option<Vec<RawProject>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawSocialButton {
    #[serde(deserialize_with = "scalar")]
    pub name: String,
    #[serde(deserialize_with = "scalar")]
    pub url: String,
    #[serde(deserialize_with = "scalar")]
    pub icon: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawProject {
    #[serde(deserialize_with = "scalar")]
    pub icon: String,
    #[serde(deserialize_with = "scalar")]
    pub title: String,
    #[serde(deserialize_with = "scalar")]
    pub description: String,
    #[serde(deserialize_with = "scalar")]
    pub period: String,
    #[serde(deserialize_with = "scalar")]
    pub url: String,
}

/// Accept any YAML scalar where text is expected (`period: 2023`, `NAME: 42`).
fn scalar_opt<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        other => Err(D::Error::custom(format!(
            "expected a scalar, found {other:?}"
        ))),
    }
}

fn scalar<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(scalar_opt(deserializer)?.unwrap_or_default())
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "an empty document",
        Value::Bool(_) | Value::Number(_) | Value::String(_) => "a scalar",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

fn non_blank(value: Option<String>, default: &str) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => default.to_string(),
    }
}

impl RawConfig {
    pub fn normalize(self) -> Configuration {
        Configuration {
            icon_format: non_blank(self.icon_format, DEFAULT_ICON_FORMAT)
                .trim()
                .to_lowercase(),
            font: non_blank(self.google_font, DEFAULT_FONT),
            name: non_blank(self.name, DEFAULT_NAME),
            about_me: self.about_me_content.unwrap_or_default(),
            about_me_align: TextAlign::from_keyword(
                self.about_me_align.as_deref().unwrap_or_default(),
            ),
            socials: self.socials_content.unwrap_or_default(),
            socials_align: TextAlign::from_keyword(
                self.socials_align.as_deref().unwrap_or_default(),
            ),
            social_buttons: self
                .social_buttons
                .unwrap_or_default()
                .into_iter()
                .map(|b| SocialEntry {
                    icon: Icon::from_raw(&b.icon),
                    name: b.name,
                    url: b.url,
                })
                .collect(),
            projects: self
                .projects
                .unwrap_or_default()
                .into_iter()
                .map(|p| ProjectEntry {
                    icon: Icon::from_raw(&p.icon),
                    title: p.title,
                    description: p.description,
                    period: p.period,
                    url: p.url,
                })
                .collect(),
        }
    }
}
