//! Whether a dated post counts as published yet.
//!
//! Posts may be dated slightly in the future. Anything dated within
//! `scheduledPostMargin` of the build time is treated as published, so a
//! build that runs a few minutes early still picks it up.

use time::{Duration, OffsetDateTime};

use crate::config::SiteSettings;

/// How the site is being built.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    /// Production build: future-dated posts beyond the margin are hidden.
    #[default]
    Build,
    /// Local preview: every non-draft post is shown.
    Dev,
}

/// Anything the renderer lists that carries a publication date.
pub trait Scheduled {
    fn is_draft(&self) -> bool;
    fn pub_datetime(&self) -> OffsetDateTime;
}

/// Minimal publication state of a post.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PostStatus {
    pub draft: bool,
    pub pub_datetime: OffsetDateTime,
}

impl Scheduled for PostStatus {
    fn is_draft(&self) -> bool {
        self.draft
    }

    fn pub_datetime(&self) -> OffsetDateTime {
        self.pub_datetime
    }
}

impl SiteSettings {
    /// True when `now` is past `pub_datetime` minus the margin.
    pub fn is_published(&self, pub_datetime: OffsetDateTime, now: OffsetDateTime) -> bool {
        let margin = Duration::try_from(self.scheduled_post_margin).unwrap_or(Duration::MAX);
        match pub_datetime.checked_sub(margin) {
            Some(threshold) => now > threshold,
            // Margin reaches past the earliest representable instant.
            None => true,
        }
    }

    /// Posts that should be listed, in their original order.
    pub fn visible_posts<'a, T: Scheduled>(
        &self,
        posts: &'a [T],
        mode: Mode,
        now: OffsetDateTime,
    ) -> Vec<&'a T> {
        posts
            .iter()
            .filter(|p| !p.is_draft())
            .filter(|p| mode == Mode::Dev || self.is_published(p.pub_datetime(), now))
            .collect()
    }
}
