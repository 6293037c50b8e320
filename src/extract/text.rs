//! Plain-text fallback.
//!
//! Most bookmark mails are just a URL pasted into an empty message. The
//! first line with an `http` prefix is the link; a message without one is
//! kept whole as a note.

use mail_parser::Message;

use crate::article::Article;
use crate::error::{ExtractError, Result};

pub(crate) fn extract(message: &Message<'_>, id: u32, subject: &str) -> Result<Article> {
    // Quoted-printable and base64 bodies arrive decoded from the parser.
    let body = message
        .body_text(0)
        .filter(|body| !body.is_empty())
        .ok_or(ExtractError::EmptyBody { id })?;

    for line in body.lines() {
        if line.starts_with("http") {
            return Ok(Article::link(id, subject, line.trim()));
        }
    }
    Ok(Article::note(id, subject, body))
}
