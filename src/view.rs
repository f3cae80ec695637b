//! Projection of the presentation state into a plain view tree.
//!
//! Nothing here touches egui.
//! `gui::paint` turns the tree into widgets.

use crate::config::{Configuration, Icon, TextAlign};
use crate::overlay::Section;
use crate::presentation::Presentation;

/// Hard cap on social buttons and project cards.
pub const MAX_ENTRIES: usize = 5;
pub const SUBTITLE: &str = "Welcome to my website!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageStatus {
    Pending,
    Loaded,
    Failed,
}

/// Load status of remote images, keyed by URL.
pub trait ImageStatusLookup {
    fn status(&self, url: &str) -> ImageStatus;
}

/// Every image reports the same status.
#[derive(Debug, Clone, Copy)]
pub struct UniformStatus(pub ImageStatus);

impl ImageStatusLookup for UniformStatus {
    fn status(&self, _url: &str) -> ImageStatus {
        self.0
    }
}

/// Link opened outside the page: new tab, no opener, no referrer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalLink {
    pub url: String,
    pub new_tab: bool,
    pub no_opener: bool,
    pub no_referrer: bool,
}

impl ExternalLink {
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
            new_tab: true,
            no_opener: true,
            no_referrer: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconView {
    pub image: Option<String>,
    pub status: Option<ImageStatus>,
    pub glyph: String,
}

impl IconView {
    fn project(icon: &Icon, label: &str, images: &dyn ImageStatusLookup) -> Self {
        let image = icon.image_url().map(str::to_string);
        let status = image.as_deref().map(|url| images.status(url));
        Self {
            image,
            status,
            glyph: icon.glyph(label),
        }
    }

    /// The image is attempted until it fails.
    pub fn image_visible(&self) -> bool {
        matches!(self.status, Some(ImageStatus::Pending | ImageStatus::Loaded))
    }

    pub fn glyph_visible(&self) -> bool {
        !self.image_visible()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocialButtonView {
    pub name: String,
    pub link: ExternalLink,
    pub icon: IconView,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectCardView {
    pub icon: IconView,
    pub title: String,
    pub period: String,
    pub description: String,
    pub link: ExternalLink,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelBody {
    About {
        text: String,
        align: TextAlign,
    },
    Socials {
        intro: String,
        align: TextAlign,
        buttons: Vec<SocialButtonView>,
    },
    Projects {
        cards: Vec<ProjectCardView>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayView {
    pub section: Section,
    pub title: &'static str,
    pub closing: bool,
    pub body: PanelBody,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavButton {
    pub section: Section,
    pub label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView {
    pub icon_path: String,
    pub greeting: String,
    pub subtitle: &'static str,
    pub nav: Vec<NavButton>,
    pub overlay: Option<OverlayView>,
}

pub fn greeting(name: &str) -> String {
    format!("Hi, I'm {name}.")
}

pub fn project(state: &Presentation, images: &dyn ImageStatusLookup) -> PageView {
    let overlay = match (state.overlay.section(), state.config.as_ref()) {
        (Some(section), Some(config)) => Some(OverlayView {
            section,
            title: section.title(),
            closing: state.overlay.is_closing(),
            body: panel_body(section, config, images),
        }),
        _ => None,
    };
    PageView {
        icon_path: state.icon_path(),
        greeting: greeting(&state.name),
        subtitle: SUBTITLE,
        nav: Section::ALL
            .iter()
            .map(|&section| NavButton {
                section,
                label: section.nav_label(),
            })
            .collect(),
        overlay,
    }
}

pub fn panel_body(
    section: Section,
    config: &Configuration,
    images: &dyn ImageStatusLookup,
) -> PanelBody {
    match section {
        Section::About => PanelBody::About {
            text: config.about_me.clone(),
            align: config.about_me_align,
        },
        Section::Socials => PanelBody::Socials {
            intro: config.socials.clone(),
            align: config.socials_align,
            buttons: config
                .social_buttons
                .iter()
                .take(MAX_ENTRIES)
                .map(|s| SocialButtonView {
                    name: s.name.clone(),
                    link: ExternalLink::new(&s.url),
                    icon: IconView::project(&s.icon, &s.name, images),
                })
                .collect(),
        },
        Section::Projects => PanelBody::Projects {
            cards: config
                .projects
                .iter()
                .take(MAX_ENTRIES)
                .map(|p| ProjectCardView {
                    icon: IconView::project(&p.icon, &p.title, images),
                    title: p.title.clone(),
                    period: p.period.clone(),
                    description: p.description.clone(),
                    link: ExternalLink::new(&p.url),
                })
                .collect(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::LoadOutcome;
    use std::time::Instant;

    const PENDING: UniformStatus = UniformStatus(ImageStatus::Pending);

    fn loaded(yaml: &str) -> Presentation {
        let mut p = Presentation::default();
        p.apply(LoadOutcome::Loaded(Configuration::from_yaml(yaml).unwrap()));
        p
    }

    #[test]
    fn base_page_always_renders() {
        let view = project(&Presentation::default(), &PENDING);
        assert_eq!(view.icon_path, "/config/usericon.png");
        assert_eq!(view.greeting, "Hi, I'm Ben.");
        let labels: Vec<_> = view.nav.iter().map(|n| n.label).collect();
        assert_eq!(labels, ["ABOUT ME", "SOCIALS", "PROJECTS"]);
        assert!(view.overlay.is_none());
    }

    #[test]
    fn overlay_needs_configuration() {
        let mut p = Presentation::default();
        p.overlay.open(Section::About);
        assert!(project(&p, &PENDING).overlay.is_none());
    }

    #[test]
    fn about_panel_keeps_text_and_alignment() {
        let mut p = loaded("ABOUT_ME_CONTENT: \"a\\n  b\"\nABOUT_ME_ALIGN: right\n");
        p.overlay.open(Section::About);
        let overlay = project(&p, &PENDING).overlay.unwrap();
        assert_eq!(overlay.title, "About Me");
        assert!(!overlay.closing);
        assert_eq!(
            overlay.body,
            PanelBody::About {
                text: "a\n  b".into(),
                align: TextAlign::Right
            }
        );
    }

    #[test]
    fn closing_flag_follows_controller() {
        let mut p = loaded("NAME: Ada\n");
        p.overlay.open(Section::Projects);
        p.overlay.request_close(Instant::now());
        let overlay = project(&p, &PENDING).overlay.unwrap();
        assert!(overlay.closing);
        assert_eq!(overlay.section, Section::Projects);
    }

    #[test]
    fn social_buttons_link_out_safely() {
        let mut p = loaded(
            "SOCIALS_CONTENT: hi\nSOCIALS_ALIGN: center\nSOCIAL_BUTTONS:\n  - {name: Mail, url: 'mailto:a@b', icon: '@'}\n",
        );
        p.overlay.open(Section::Socials);
        let Some(OverlayView {
            body: PanelBody::Socials { intro, align, buttons },
            ..
        }) = project(&p, &PENDING).overlay
        else {
            panic!("expected socials panel");
        };
        assert_eq!(intro, "hi");
        assert_eq!(align, TextAlign::Center);
        let link = &buttons[0].link;
        assert_eq!(link.url, "mailto:a@b");
        assert!(link.new_tab && link.no_opener && link.no_referrer);
        assert!(buttons[0].icon.glyph_visible());
        assert_eq!(buttons[0].icon.glyph, "@");
    }

    #[test]
    fn project_icon_status_drives_visibility() {
        let mut p = loaded(
            "PROJECTS:\n  - {icon: 'https://x/y.png', title: Zeta, description: d, period: now, url: 'https://z'}\n",
        );
        p.overlay.open(Section::Projects);
        let card = |status: ImageStatus| {
            match project(&p, &UniformStatus(status)).overlay.unwrap().body {
                PanelBody::Projects { cards } => cards[0].icon.clone(),
                other => panic!("unexpected body {other:?}"),
            }
        };
        let icon = card(ImageStatus::Pending);
        assert_eq!(icon.image.as_deref(), Some("https://x/y.png"));
        assert!(icon.image_visible() && !icon.glyph_visible());
        let icon = card(ImageStatus::Failed);
        assert!(!icon.image_visible() && icon.glyph_visible());
        assert_eq!(icon.glyph, "Z");
    }
}
