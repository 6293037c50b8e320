//! Multipart sub-dispatch.
//!
//! Scans the top-level MIME parts in document order. The first `text/html`
//! part wins and goes to link extraction; otherwise the first
//! `application/pdf` part wins and goes to attachment extraction. A message
//! where neither shape shows up degrades to a visible placeholder note so
//! the record survives for manual repair — that outcome is deliberately not
//! an error.

use mail_parser::{Message, MimeHeaders, PartType};
use tracing::warn;

use crate::article::Article;
use crate::error::Result;
use crate::extract::{ExtractorConfig, attachment, html};

/// Body of the placeholder note produced when no part matched.
pub const UNPARSEABLE_MULTIPART: &str = "<unparseable multipart>";

pub(crate) fn extract(
    config: &ExtractorConfig,
    message: &Message<'_>,
    id: u32,
    subject: &str,
) -> Result<Article> {
    let PartType::Multipart(part_ids) = &message.root_part().body else {
        // Declared multipart but the body never split (e.g. no boundary).
        warn!(id, "multipart message with no parsable parts");
        return Ok(Article::note(id, subject, UNPARSEABLE_MULTIPART));
    };

    for &part_id in part_ids {
        let Some(part) = message.parts.get(part_id as usize) else {
            continue;
        };
        let Some(ct) = part.content_type() else {
            warn!(id, part = part_id, "part without content type, skipping");
            continue;
        };
        let ctype = ct.ctype();
        let subtype = ct.subtype().unwrap_or("");

        if ctype.eq_ignore_ascii_case("text") && subtype.eq_ignore_ascii_case("html") {
            return html::extract(config, part, id);
        }
        if ctype.eq_ignore_ascii_case("application") && subtype.eq_ignore_ascii_case("pdf") {
            return attachment::extract(config, part, id, subject);
        }
    }

    Ok(Article::note(id, subject, UNPARSEABLE_MULTIPART))
}
