//! Message classification and extraction.
//!
//! One raw RFC822 message in, one [`Article`] or one typed failure out.
//! The pipeline is: header decode & provenance validation → content-type
//! dispatch → (multipart part scan → HTML link pick | attachment write) or
//! (plain-text URL-line scan).

pub mod attachment;
pub mod html;
pub mod multipart;
pub mod text;

use std::path::PathBuf;

use mail_parser::{Address, MessageParser, MimeHeaders};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::article::Article;
use crate::error::{ExtractError, Result};

/// Anchor labels used by known source sites for non-content chrome.
const DEFAULT_SKIP_LINK_TEXTS: &[&str] = &["Tweet", "Download", "@SciencePorn"];

fn default_skip_link_texts() -> Vec<String> {
    DEFAULT_SKIP_LINK_TEXTS.iter().map(|s| s.to_string()).collect()
}

// ── Configuration ───────────────────────────────────────────────────

/// Extraction settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Identity substring that must appear in both From and To for a
    /// message to count as an owned bookmark.
    pub owner: String,
    /// Where PDF attachments are materialized. Creating the directory is
    /// the caller's responsibility.
    pub scratch_dir: PathBuf,
    /// Anchor texts that never qualify as the article link.
    #[serde(default = "default_skip_link_texts")]
    pub skip_link_texts: Vec<String>,
}

impl ExtractorConfig {
    /// Config with the default anchor skip set.
    pub fn new(owner: impl Into<String>, scratch_dir: impl Into<PathBuf>) -> Self {
        Self {
            owner: owner.into(),
            scratch_dir: scratch_dir.into(),
            skip_link_texts: default_skip_link_texts(),
        }
    }
}

// ── Extractor ───────────────────────────────────────────────────────

/// Classifies one raw message and extracts its article.
pub struct Extractor {
    config: ExtractorConfig,
}

impl Extractor {
    pub fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Extract the article from one raw message.
    ///
    /// `id` is the message's sequence number; it tags the article and every
    /// failure. Header decoding degrades to verbatim values on malformed
    /// encoded words — only provenance and content-shape problems reject
    /// the message.
    pub fn extract(&self, id: u32, raw: &[u8]) -> Result<Article> {
        let message = MessageParser::default()
            .parse(raw)
            .ok_or(ExtractError::Malformed { id })?;

        let from = match message.from() {
            Some(addr) => address_text(addr),
            None => {
                warn!(id, "message has no From header");
                String::new()
            }
        };
        let to = match message.to() {
            Some(addr) => address_text(addr),
            None => {
                warn!(id, "message has no To header");
                String::new()
            }
        };

        if !from.contains(&self.config.owner) || !to.contains(&self.config.owner) {
            return Err(ExtractError::InvalidSender { id });
        }
        if message.to().map_or(0, |addr| addr.iter().count()) > 1 {
            return Err(ExtractError::TooManyRecipients { id });
        }

        let subject = message.subject().unwrap_or("").to_string();

        // An absent Content-Type header means text/plain (RFC 2045 §5.2).
        let media_type = message
            .content_type()
            .map(|ct| match ct.subtype() {
                Some(subtype) => format!("{}/{}", ct.ctype(), subtype).to_ascii_lowercase(),
                None => ct.ctype().to_ascii_lowercase(),
            })
            .unwrap_or_else(|| "text/plain".to_string());

        if media_type.starts_with("multipart/") {
            multipart::extract(&self.config, &message, id, &subject)
        } else if media_type.starts_with("text/plain") {
            text::extract(&message, id, &subject)
        } else {
            Err(ExtractError::UnsupportedContentType {
                id,
                observed: media_type,
            })
        }
    }
}

// ── Helpers ─────────────────────────────────────────────────────────

/// Flatten an address header into display-name + address text, for
/// owner-substring matching.
fn address_text(addr: &Address<'_>) -> String {
    let mut out = String::new();
    for a in addr.iter() {
        if let Some(name) = a.name() {
            out.push_str(name);
            out.push(' ');
        }
        if let Some(address) = a.address() {
            out.push_str(address);
            out.push(' ');
        }
    }
    out
}
