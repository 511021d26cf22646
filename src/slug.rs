use crate::error::{Result, SlugError};
use crate::utils::string::slugify;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// A non-empty string that satisfies the slug rules:
/// `[a-z0-9]` segments joined by single hyphens.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Slug(String);

impl Slug {
    /// Validate an existing string as a slug
    pub fn parse(s: impl Into<String>) -> Result<Self> {
        let s = s.into();
        validate(&s)?;
        Ok(Self(s))
    }

    /// Convert free text, `None` when nothing slug-worthy remains
    pub fn from_text(text: &str) -> Option<Self> {
        let slug = slugify(text);
        if slug.is_empty() {
            None
        } else {
            Some(Self(slug))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for Slug {
    type Err = SlugError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Slug {
    type Error = SlugError;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<Slug> for String {
    fn from(slug: Slug) -> Self {
        slug.0
    }
}

/// Check `s` against the slug rules, reporting the first one broken
fn validate(s: &str) -> Result<()> {
    if s.is_empty() {
        return Err(SlugError::Empty);
    }

    let mut prev_hyphen = false;
    for (index, ch) in s.chars().enumerate() {
        match ch {
            'a'..='z' | '0'..='9' => prev_hyphen = false,
            '-' => {
                if index == 0 {
                    return Err(SlugError::EdgeHyphen);
                }
                if prev_hyphen {
                    return Err(SlugError::DoubleHyphen { index });
                }
                prev_hyphen = true;
            }
            _ => return Err(SlugError::InvalidChar { ch, index }),
        }
    }

    if prev_hyphen {
        return Err(SlugError::EdgeHyphen);
    }

    Ok(())
}

pub fn is_valid_slug(s: &str) -> bool {
    validate(s).is_ok()
}

/// Shorten a slug to at most `max_chars` characters.
///
/// Prefers cutting at the last hyphen inside the limit so whole words are
/// kept; a single word longer than the limit is cut mid-word. The result
/// never ends with a hyphen.
pub fn truncate(slug: &str, max_chars: usize) -> &str {
    let cut = match slug.char_indices().nth(max_chars) {
        Some((idx, _)) => idx,
        None => return slug,
    };

    let head = &slug[..cut];
    let on_boundary = slug[cut..].starts_with('-');

    let head = if on_boundary {
        head
    } else {
        match head.rfind('-') {
            Some(last) => &head[..last],
            None => head,
        }
    };

    head.trim_end_matches('-')
}

/// Return `base`, or `base-2`, `base-3`, ... if it is already taken
pub fn make_unique(base: &str, taken: &HashSet<String>) -> String {
    if base.is_empty() || !taken.contains(base) {
        return base.to_string();
    }

    let mut counter: u32 = 2;
    loop {
        let candidate = format!("{}-{}", base, counter);
        if !taken.contains(&candidate) {
            return candidate;
        }
        counter += 1;
    }
}

/// What to use when conversion leaves nothing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Fallback {
    /// Keep the empty slug
    #[default]
    None,
    Literal(Slug),
    /// A fresh hyphenated UUID v4
    Uuid,
}

impl Fallback {
    pub fn apply(&self, slug: String) -> String {
        if !slug.is_empty() {
            return slug;
        }

        match self {
            Fallback::None => slug,
            Fallback::Literal(literal) => literal.to_string(),
            Fallback::Uuid => uuid::Uuid::new_v4().to_string(),
        }
    }
}

impl FromStr for Fallback {
    type Err = SlugError;

    /// `none`, `uuid`, or any valid slug used as a literal
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "none" => Ok(Fallback::None),
            "uuid" => Ok(Fallback::Uuid),
            other => Slug::parse(other).map(Fallback::Literal),
        }
    }
}

/// Conversion settings layered on top of [`slugify`]
#[derive(Debug, Clone, Default)]
pub struct SlugOptions {
    pub max_len: Option<usize>,
    pub fallback: Fallback,
}

impl SlugOptions {
    /// Convert and truncate, without applying the fallback
    pub fn base_slug(&self, text: &str) -> String {
        let slug = slugify(text);
        match self.max_len {
            Some(max) => truncate(&slug, max).to_string(),
            None => slug,
        }
    }

    /// Apply the fallback to a base slug of `text`.
    ///
    /// Returns the slug and whether the fallback supplied it. Fallback slugs
    /// are not truncated.
    pub fn with_fallback(&self, text: &str, base: String) -> (String, bool) {
        if !base.is_empty() {
            return (base, false);
        }

        let slug = self.fallback.apply(base);
        if slug.is_empty() {
            return (slug, false);
        }

        warn!("No slug for {:?}, used fallback {}", text, slug);
        (slug, true)
    }

    pub fn slugify(&self, text: &str) -> String {
        let base = self.base_slug(text);
        self.with_fallback(text, base).0
    }
}
