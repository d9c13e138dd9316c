use std::{fs, path::Path, sync::OnceLock, time::Duration};

use color_eyre::{Section, eyre::eyre};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::types::{AbsoluteUrl, LanguageTag, SocialPlatform, millis};

pub mod validate;

pub use validate::Violation;

// Site-wide metadata, as authored.
pub const SITE_WEBSITE: &str = "https://audiophyte.com/";
pub const SITE_AUTHOR: &str = "Graham Batzler";
pub const SITE_PROFILE: &str = "https://github.com/batzlerg/";
pub const SITE_DESCRIPTION: &str =
    "a blog about technology, sound, and nature. and probably other stuff sometimes.";
pub const SITE_TITLE: &str = "audiophyte";
pub const SITE_OG_IMAGE: &str = "logo.png";
pub const SITE_LIGHT_AND_DARK_MODE: bool = true;
pub const POST_PER_INDEX: u32 = 4;
pub const POST_PER_PAGE: u32 = 3;
// 15 minutes.
pub const SCHEDULED_POST_MARGIN: Duration = Duration::from_millis(15 * 60 * 1000);

// Used for the html `lang` attribute when `lang` is left empty.
pub const DEFAULT_HTML_LANG: &str = "en";
pub const LOCALE_LANG: &str = "en";
pub const LOCALE_LANG_TAGS: &[&str] = &["en-EN"];

pub const LOGO_ENABLE: bool = true;
pub const LOGO_SVG: bool = true;
pub const LOGO_WIDTH: u32 = 40;
pub const LOGO_HEIGHT: u32 = 40;

/// Replaced by the site title when a social link title is rendered.
pub const TITLE_PLACEHOLDER: &str = "{title}";

/// `SITE`: descriptive metadata and listing behaviour.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SiteSettings {
    /// Deployed domain root.
    pub website: AbsoluteUrl,
    pub author: String,
    pub profile: AbsoluteUrl,
    pub desc: String,
    pub title: String,
    /// Default social preview image, relative to the site root.
    pub og_image: String,
    pub light_and_dark_mode: bool,
    pub post_per_index: u32,
    pub post_per_page: u32,
    /// How far in the future a post may be dated and still count as published.
    #[serde(with = "millis")]
    pub scheduled_post_margin: Duration,
}

/// `LOCALE`: the html language and the formatting fallback list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LocaleSettings {
    pub lang: String,
    pub lang_tag: Vec<LanguageTag>,
}

impl LocaleSettings {
    /// Value for the html `lang` attribute.
    pub fn html_lang(&self) -> &str {
        let lang = self.lang.trim();
        if lang.is_empty() {
            DEFAULT_HTML_LANG
        } else {
            lang
        }
    }

    /// Locales for date and number formatting, `None` meaning the
    /// environment default.
    pub fn format_locales(&self) -> Option<&[LanguageTag]> {
        if self.lang_tag.is_empty() {
            None
        } else {
            Some(&self.lang_tag)
        }
    }
}

/// `LOGO_IMAGE`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LogoSettings {
    pub enable: bool,
    pub svg: bool,
    pub width: u32,
    pub height: u32,
}

impl LogoSettings {
    /// Asset file name the renderer looks for.
    pub fn file_name(&self) -> &'static str {
        if self.svg { "logo.svg" } else { "logo.png" }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SocialLink {
    pub name: SocialPlatform,
    pub href: AbsoluteUrl,
    /// May contain [`TITLE_PLACEHOLDER`].
    pub link_title: String,
    pub active: bool,
}

impl SocialLink {
    pub fn rendered_title(&self, site_title: &str) -> String {
        self.link_title.replace(TITLE_PLACEHOLDER, site_title)
    }
}

/// `SOCIALS`, in display order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SocialLinks(pub Vec<SocialLink>);

impl SocialLinks {
    pub fn new(links: Vec<SocialLink>) -> Self {
        Self(links)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn active(&self) -> impl Iterator<Item = &SocialLink> {
        self.0.iter().filter(|l| l.active)
    }
}

impl<'a> IntoIterator for &'a SocialLinks {
    type Item = &'a SocialLink;
    type IntoIter = std::slice::Iter<'a, SocialLink>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Everything the renderer reads: `SITE`, `LOCALE`, `LOGO_IMAGE` and
/// `SOCIALS`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SiteConfig {
    pub site: SiteSettings,
    pub locale: LocaleSettings,
    pub logo_image: LogoSettings,
    pub socials: SocialLinks,
}

static SHARED: OnceLock<SiteConfig> = OnceLock::new();

/// Source format of a configuration file, picked by extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Toml,
    Json,
}

impl Format {
    pub fn from_path(path: &Path) -> color_eyre::Result<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(Self::Toml),
            Some("json") => Ok(Self::Json),
            other => Err(eyre!(
                "unsupported configuration format {:?} for {}",
                other.unwrap_or_default(),
                path.display()
            ))
            .with_note(|| "Expected a .toml or .json file"),
        }
    }
}

impl SiteConfig {
    /// The configuration as authored for the site.
    ///
    /// The constants above are static literals; a malformed URL or language
    /// tag among them is a programming error and panics here rather than
    /// being dropped.
    pub fn builtin() -> Self {
        Self {
            site: SiteSettings {
                website: AbsoluteUrl::parse(SITE_WEBSITE).expect("built-in website is absolute"),
                author: SITE_AUTHOR.to_string(),
                profile: AbsoluteUrl::parse(SITE_PROFILE).expect("built-in profile is absolute"),
                desc: SITE_DESCRIPTION.to_string(),
                title: SITE_TITLE.to_string(),
                og_image: SITE_OG_IMAGE.to_string(),
                light_and_dark_mode: SITE_LIGHT_AND_DARK_MODE,
                post_per_index: POST_PER_INDEX,
                post_per_page: POST_PER_PAGE,
                scheduled_post_margin: SCHEDULED_POST_MARGIN,
            },
            locale: LocaleSettings {
                lang: LOCALE_LANG.to_string(),
                lang_tag: LOCALE_LANG_TAGS
                    .iter()
                    .map(|t| LanguageTag::parse(t).expect("built-in language tag is well-formed"))
                    .collect(),
            },
            logo_image: LogoSettings {
                enable: LOGO_ENABLE,
                svg: LOGO_SVG,
                width: LOGO_WIDTH,
                height: LOGO_HEIGHT,
            },
            socials: SocialLinks::new(vec![SocialLink {
                name: SocialPlatform::Github,
                href: AbsoluteUrl::parse(SITE_PROFILE).expect("built-in profile is absolute"),
                link_title: format!(" {TITLE_PLACEHOLDER} on Github"),
                active: true,
            }]),
        }
    }

    /// Process-wide built-in configuration, initialised on first use.
    pub fn shared() -> &'static Self {
        SHARED.get_or_init(Self::builtin)
    }

    /// The file at `path` when given, otherwise the built-in values.
    /// Either way the result has passed validation.
    pub fn resolve(path: Option<&Path>) -> color_eyre::Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => {
                debug!("no configuration file given, using built-in values");
                Self::builtin().validated()
            }
        }
    }

    pub fn load(path: &Path) -> color_eyre::Result<Self> {
        let format = Format::from_path(path)?;
        debug!(path = %path.display(), ?format, "reading site configuration");

        let raw = fs::read_to_string(path)
            .with_note(|| format!("While reading {}", path.display()))?;

        let config = match format {
            Format::Toml => Self::parse_toml(&raw),
            Format::Json => Self::parse_json(&raw),
        }
        .with_note(|| format!("While parsing {}", path.display()))?;

        config.validated()
    }

    pub fn from_toml_str(raw: &str) -> color_eyre::Result<Self> {
        Self::parse_toml(raw)?.validated()
    }

    pub fn from_json_str(raw: &str) -> color_eyre::Result<Self> {
        Self::parse_json(raw)?.validated()
    }

    fn parse_toml(raw: &str) -> color_eyre::Result<Self> {
        toml::from_str(raw).with_note(|| "While parsing TOML site configuration")
    }

    fn parse_json(raw: &str) -> color_eyre::Result<Self> {
        serde_json::from_str(raw).with_note(|| "While parsing JSON site configuration")
    }

    pub fn to_toml_string(&self) -> color_eyre::Result<String> {
        toml::to_string_pretty(self).with_note(|| "While serializing site configuration as TOML")
    }

    pub fn to_json_string(&self) -> color_eyre::Result<String> {
        serde_json::to_string_pretty(self)
            .with_note(|| "While serializing site configuration as JSON")
    }

    /// Reject the configuration if any invariant is broken.
    pub fn validate(&self) -> color_eyre::Result<()> {
        validate::check(self)
    }

    pub fn violations(&self) -> Vec<Violation> {
        validate::violations(self)
    }

    fn validated(self) -> color_eyre::Result<Self> {
        self.validate()?;
        info!(
            title = %self.site.title,
            website = %self.site.website,
            socials = self.socials.len(),
            "site configuration loaded"
        );
        Ok(self)
    }

    /// Social links to render, in order.
    pub fn active_socials(&self) -> impl Iterator<Item = &SocialLink> {
        self.socials.active()
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self::builtin()
    }
}
