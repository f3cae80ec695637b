use anyhow::{bail, Context, Result};
use reqwest::blocking::Client;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

const USER_AGENT: &str = "profile_site";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Source of every resource the page needs.
///
/// Locations are either absolute `http(s)` URLs or site-relative paths such as
/// `/config/config.yml`, which implementations resolve against their own root.
pub trait Fetch: Send + Sync {
    fn fetch_bytes(&self, location: &str) -> Result<Vec<u8>>;

    fn fetch_text(&self, location: &str) -> Result<String> {
        let bytes = self.fetch_bytes(location)?;
        String::from_utf8(bytes).with_context(|| format!("{location} is not valid UTF-8"))
    }
}

/// Where site-relative paths are looked up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SiteRoot {
    Remote(Url),
    Local(PathBuf),
}

/// A fully resolved location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resource {
    Remote(Url),
    Local(PathBuf),
}

pub fn is_remote(location: &str) -> bool {
    let lower = location.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

impl SiteRoot {
    /// Parse a root given either as an `http(s)` base URL or a directory.
    pub fn parse(root: &str) -> Result<Self> {
        let root = root.trim();
        if root.is_empty() {
            return Ok(SiteRoot::Local(PathBuf::from(".")));
        }
        if is_remote(root) {
            let mut url = Url::parse(root).with_context(|| format!("invalid site root {root}"))?;
            // `Url::join` replaces the last segment unless the path ends in '/'.
            if !url.path().ends_with('/') {
                let path = format!("{}/", url.path());
                url.set_path(&path);
            }
            return Ok(SiteRoot::Remote(url));
        }
        Ok(SiteRoot::Local(PathBuf::from(root)))
    }

    pub fn resolve(&self, location: &str) -> Result<Resource> {
        if is_remote(location) {
            let url = Url::parse(location.trim())
                .with_context(|| format!("invalid url {location}"))?;
            return Ok(Resource::Remote(url));
        }
        let relative = location.trim().trim_start_matches('/');
        if relative.is_empty() {
            bail!("empty resource path");
        }
        match self {
            SiteRoot::Remote(base) => Ok(Resource::Remote(
                base.join(relative)
                    .with_context(|| format!("cannot join {relative} onto {base}"))?,
            )),
            SiteRoot::Local(dir) => Ok(Resource::Local(dir.join(relative))),
        }
    }
}

impl std::fmt::Display for SiteRoot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SiteRoot::Remote(url) => write!(f, "{url}"),
            SiteRoot::Local(dir) => write!(f, "{}", dir.display()),
        }
    }
}

/// Fetches over HTTP or from disk depending on the resolved location.
pub struct SiteFetcher {
    root: SiteRoot,
    client: Client,
}

impl SiteFetcher {
    pub fn new(root: SiteRoot) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("build http client")?;
        Ok(Self { root, client })
    }
}

impl Fetch for SiteFetcher {
    fn fetch_bytes(&self, location: &str) -> Result<Vec<u8>> {
        match self.root.resolve(location)? {
            Resource::Remote(url) => {
                tracing::debug!(%url, "fetching");
                let resp = self
                    .client
                    .get(url.clone())
                    .send()
                    .with_context(|| format!("request {url}"))?;
                let status = resp.status();
                if !status.is_success() {
                    bail!("GET {url} returned {status}");
                }
                let body = resp.bytes().with_context(|| format!("read body of {url}"))?;
                Ok(body.to_vec())
            }
            Resource::Local(path) => {
                tracing::debug!(path = %path.display(), "reading");
                std::fs::read(&path).with_context(|| format!("read {}", path.display()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_root_gets_trailing_slash() {
        let root = SiteRoot::parse("https://example.com/me").unwrap();
        let Resource::Remote(url) = root.resolve("/config/config.yml").unwrap() else {
            panic!("expected remote resource");
        };
        assert_eq!(url.as_str(), "https://example.com/me/config/config.yml");
    }

    #[test]
    fn absolute_urls_ignore_root() {
        let root = SiteRoot::parse("site").unwrap();
        let res = root.resolve("https://cdn.example.com/a.png").unwrap();
        assert_eq!(
            res,
            Resource::Remote(Url::parse("https://cdn.example.com/a.png").unwrap())
        );
    }

    #[test]
    fn local_root_joins_relative_path() {
        let root = SiteRoot::parse("/srv/site").unwrap();
        assert_eq!(
            root.resolve("/config/usericon.png").unwrap(),
            Resource::Local(PathBuf::from("/srv/site/config/usericon.png"))
        );
    }

    #[test]
    fn empty_path_is_rejected() {
        let root = SiteRoot::parse("").unwrap();
        assert!(root.resolve("/").is_err());
    }

    #[test]
    fn reads_local_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("config")).unwrap();
        std::fs::write(dir.path().join("config/config.yml"), "NAME: Ada\n").unwrap();
        let fetcher =
            SiteFetcher::new(SiteRoot::Local(dir.path().to_path_buf())).unwrap();
        let text = fetcher.fetch_text("/config/config.yml").unwrap();
        assert_eq!(text, "NAME: Ada\n");
        assert!(fetcher.fetch_text("/config/missing.yml").is_err());
    }
}
