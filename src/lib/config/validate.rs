//! Load-time checks for the invariants serde cannot express on its own.
//!
//! URL shape, tag shape, platform names and non-negative durations are
//! already enforced while deserializing. What is left here is anything
//! that depends on a value rather than a type: empty strings, zero page
//! sizes and the like. Every violation is collected so a broken file is
//! reported in one go.

use std::fmt;

use color_eyre::{Section, eyre::eyre};
use itertools::Itertools;
use tracing::{debug, warn};

use super::SiteConfig;
use crate::types::LanguageTag;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Violation {
    /// A required text field is blank.
    Empty { field: String },
    /// A count that pagination divides by is zero.
    NotPositive { field: &'static str },
    /// `lang` is set but is not a language tag.
    InvalidLang { value: String },
    /// The logo is enabled with a zero dimension.
    ZeroLogoDimension { field: &'static str },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} must not be empty"),
            Self::NotPositive { field } => write!(f, "{field} must be greater than zero"),
            Self::InvalidLang { value } => {
                write!(f, "locale.lang {value:?} is not a BCP-47 language tag")
            }
            Self::ZeroLogoDimension { field } => {
                write!(f, "logoImage.{field} must be non-zero while the logo is enabled")
            }
        }
    }
}

/// All violations found in `config`, in field order.
pub fn violations(config: &SiteConfig) -> Vec<Violation> {
    let mut out = Vec::new();
    let site = &config.site;

    for (field, value) in [
        ("site.author", &site.author),
        ("site.desc", &site.desc),
        ("site.title", &site.title),
    ] {
        if value.trim().is_empty() {
            out.push(Violation::Empty {
                field: field.to_string(),
            });
        }
    }

    if site.post_per_index == 0 {
        out.push(Violation::NotPositive {
            field: "site.postPerIndex",
        });
    }
    if site.post_per_page == 0 {
        out.push(Violation::NotPositive {
            field: "site.postPerPage",
        });
    }

    let lang = config.locale.lang.trim();
    if !lang.is_empty() && LanguageTag::parse(lang).is_none() {
        out.push(Violation::InvalidLang {
            value: config.locale.lang.clone(),
        });
    }

    let logo = &config.logo_image;
    if logo.enable {
        if logo.width == 0 {
            out.push(Violation::ZeroLogoDimension { field: "width" });
        }
        if logo.height == 0 {
            out.push(Violation::ZeroLogoDimension { field: "height" });
        }
    }

    for (i, link) in config.socials.0.iter().enumerate() {
        if link.link_title.trim().is_empty() {
            out.push(Violation::Empty {
                field: format!("socials[{i}].linkTitle"),
            });
        }
    }

    out
}

/// Fail with a single report listing every violation.
pub fn check(config: &SiteConfig) -> color_eyre::Result<()> {
    log_socials(config);

    let found = violations(config);
    if found.is_empty() {
        return Ok(());
    }

    let listing = found.iter().map(|v| format!("  - {v}")).join("\n");
    Err(eyre!(
        "invalid site configuration ({} problem(s)):\n{listing}",
        found.len()
    ))
    .with_note(|| "While validating site configuration")
}

fn log_socials(config: &SiteConfig) {
    // Allowed, but almost certainly a mistake.
    for dup in config.socials.0.iter().duplicates_by(|l| l.name) {
        warn!(name = %dup.name, "social link listed more than once");
    }
    for link in config.socials.0.iter().filter(|l| !l.active) {
        debug!(name = %link.name, "social link is inactive and will not be rendered");
    }
}
