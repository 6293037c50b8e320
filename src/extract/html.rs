//! HTML link extraction.
//!
//! A forwarded/shared page embeds one real article link among share
//! widgets, handles, and boilerplate chrome. The pick is an ordered filter
//! over the document's anchors with strict first-match semantics — the
//! filters and their order must stay exactly as they are for re-runs to
//! reproduce prior output.

use std::borrow::Cow;
use std::sync::LazyLock;

use mail_parser::MessagePart;
use scraper::{Html, Selector};
use tracing::debug;

use crate::article::Article;
use crate::error::{ExtractError, Result};
use crate::extract::ExtractorConfig;

static ANCHOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a").unwrap());

/// Share-widget and compose href prefixes that never point at the article.
const SKIP_HREF_PREFIXES: &[&str] = &["https://twitter.com/", "mailto:"];

pub(crate) fn extract(config: &ExtractorConfig, part: &MessagePart<'_>, id: u32) -> Result<Article> {
    first_link(config, id, &part_body(part))
}

/// Select the first anchor, in document order, that passes every filter:
/// the visible text is not a handle or hashtag, is not a known chrome
/// label, the anchor has an `href`, and the `href` is not a share/compose
/// link. The winning anchor's text becomes the subject and its `href` the
/// URL.
pub(crate) fn first_link(config: &ExtractorConfig, id: u32, body: &str) -> Result<Article> {
    let document = Html::parse_document(body);
    document
        .select(&ANCHOR)
        .find_map(|anchor| {
            let text: String = anchor.text().collect();
            if text.starts_with('@') || text.starts_with('#') {
                return None;
            }
            if config.skip_link_texts.iter().any(|skip| *skip == text) {
                return None;
            }
            let href = anchor.value().attr("href")?;
            if SKIP_HREF_PREFIXES.iter().any(|p| href.starts_with(p)) {
                return None;
            }
            debug!(id, url = href, "anchor selected");
            Some(Article::link(id, text, href))
        })
        .ok_or(ExtractError::NoExtractableLink { id })
}

/// The part body as text. Transfer-encoding decoding already happened
/// during message parsing.
fn part_body<'a>(part: &'a MessagePart<'_>) -> Cow<'a, str> {
    match part.text_contents() {
        Some(text) => Cow::Borrowed(text),
        None => String::from_utf8_lossy(part.contents()),
    }
}
