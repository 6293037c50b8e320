//! The extracted bookmark record.
//!
//! An [`Article`] is produced exactly once by the extractor and never mutated
//! afterward. Downstream consumers sort by [`Article::id`] and render with
//! [`Article::summary`] or [`Article::markdown`].

use serde::{Deserialize, Serialize};

/// What the owner saved: a link or a text note.
///
/// Modeled as a tagged union so a record is never both and never neither.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ArticleKind {
    /// A bookmarked URL.
    Link { url: String },
    /// A saved text passage.
    Note { text: String },
}

/// One extracted bookmark, tagged with its message sequence id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    id: u32,
    subject: String,
    kind: ArticleKind,
}

impl Article {
    /// Build a link article.
    pub fn link(id: u32, subject: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id,
            subject: subject.into(),
            kind: ArticleKind::Link { url: url.into() },
        }
    }

    /// Build a note article.
    pub fn note(id: u32, subject: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id,
            subject: subject.into(),
            kind: ArticleKind::Note { text: text.into() },
        }
    }

    /// The message sequence id — display tag and natural sort key.
    pub fn id(&self) -> u32 {
        self.id
    }

    /// The display label, possibly empty.
    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn kind(&self) -> &ArticleKind {
        &self.kind
    }

    /// Display label for a link: the subject, or the URL's final path
    /// segment when the subject is empty.
    fn link_label<'a>(&'a self, url: &'a str) -> &'a str {
        if self.subject.is_empty() {
            url_basename(url)
        } else {
            &self.subject
        }
    }

    /// One-line summary, e.g. for logging.
    pub fn summary(&self) -> String {
        match &self.kind {
            ArticleKind::Link { url } => {
                format!("{} [{}]({})", self.id, self.link_label(url), url)
            }
            ArticleKind::Note { text } => format!("{} *{}* {}", self.id, self.subject, text),
        }
    }

    /// Markdown list item, terminated by a newline.
    pub fn markdown(&self) -> String {
        match &self.kind {
            ArticleKind::Link { url } => {
                format!("* [{}]({}) _{}_\n", self.link_label(url), url, self.id)
            }
            ArticleKind::Note { text } => {
                let text = flatten_note_text(text);
                if self.subject.is_empty() {
                    format!("* {} _{}_\n", text, self.id)
                } else {
                    format!("* *{}* {} _{}_\n", self.subject, text, self.id)
                }
            }
        }
    }
}

/// Collapse note text for Markdown: trim each line, drop blank lines, and
/// indent continuation lines by one space.
fn flatten_note_text(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n ")
}

/// Final path segment of a URL, ignoring trailing slashes.
fn url_basename(url: &str) -> &str {
    let trimmed = url.trim_end_matches('/');
    match trimmed.rsplit_once('/') {
        Some((_, base)) if !base.is_empty() => base,
        _ if trimmed.is_empty() => url,
        _ => trimmed,
    }
}
