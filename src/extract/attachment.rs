//! PDF attachment extraction.
//!
//! The attachment's decoded bytes are materialized once under the scratch
//! directory; the article then points at the bare filename and the renderer
//! resolves it relative to its own output location. Re-runs see the file
//! already present and skip the write, so the same message can be processed
//! any number of times. Writes go through a temp file and a rename, which
//! keeps a concurrent duplicate write from ever leaving a torn file.

use std::io::Write;
use std::path::Path;

use mail_parser::{MessagePart, MimeHeaders};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::article::Article;
use crate::error::{ExtractError, Result};
use crate::extract::ExtractorConfig;

pub(crate) fn extract(
    config: &ExtractorConfig,
    part: &MessagePart<'_>,
    id: u32,
    subject: &str,
) -> Result<Article> {
    let filename = resolve_filename(part).ok_or(ExtractError::MissingFilename { id })?;

    // The body arrives transfer-decoded; nothing left means the part was
    // declared but never carried content.
    let contents = part.contents();
    if contents.is_empty() {
        return Err(ExtractError::CorruptAttachment { id });
    }

    let target = config.scratch_dir.join(&filename);
    if target.exists() {
        debug!(id, file = %filename, "attachment already present, skipping write");
    } else {
        write_atomic(&config.scratch_dir, &target, contents)
            .map_err(|source| ExtractError::Io { id, source })?;
        info!(id, file = %filename, "pdf written");
    }

    Ok(Article::link(id, subject, filename))
}

/// Filename from the Content-Type parameters, else from Content-Disposition.
/// Path components smuggled into the declared name are stripped — only the
/// final component is used.
fn resolve_filename(part: &MessagePart<'_>) -> Option<String> {
    let declared = part
        .content_type()
        .and_then(|ct| ct.attribute("filename").or_else(|| ct.attribute("name")))
        .or_else(|| {
            part.content_disposition()
                .and_then(|cd| cd.attribute("filename").or_else(|| cd.attribute("name")))
        })?;

    Path::new(declared)
        .file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string)
}

fn write_atomic(dir: &Path, target: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.persist(target).map_err(|err| err.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::article::ArticleKind;
    use base64::Engine as _;
    use base64::engine::general_purpose::STANDARD as BASE64;
    use mail_parser::{MessageParser, PartType};

    const PDF_BYTES: &[u8] = b"%PDF-1.4 fake body";

    fn pdf_message(type_params: &str, disposition: Option<&str>) -> String {
        let encoded = BASE64.encode(PDF_BYTES);
        let disposition = disposition
            .map(|d| format!("Content-Disposition: {d}\r\n"))
            .unwrap_or_default();
        format!(
            "From: me@example.com\r\nTo: me@example.com\r\nSubject: paper\r\n\
             Content-Type: multipart/mixed; boundary=\"b\"\r\n\r\n\
             --b\r\n\
             Content-Type: application/pdf{type_params}\r\n\
             {disposition}\
             Content-Transfer-Encoding: base64\r\n\r\n\
             {encoded}\r\n\
             --b--\r\n"
        )
    }

    /// Pull the single pdf part out of a fixture message.
    fn with_pdf_part<R>(raw: &str, f: impl FnOnce(&MessagePart<'_>) -> R) -> R {
        let message = MessageParser::default().parse(raw.as_bytes()).unwrap();
        let part = message
            .parts
            .iter()
            .find(|p| matches!(p.body, PartType::Binary(_) | PartType::InlineBinary(_)))
            .expect("fixture has a binary part");
        f(part)
    }

    #[test]
    fn filename_from_content_type_wins() {
        let raw = pdf_message("; filename=\"typed.pdf\"", Some("attachment; filename=\"disp.pdf\""));
        with_pdf_part(&raw, |part| {
            assert_eq!(resolve_filename(part).as_deref(), Some("typed.pdf"));
        });
    }

    #[test]
    fn filename_falls_back_to_disposition() {
        let raw = pdf_message("", Some("attachment; filename=\"disp.pdf\""));
        with_pdf_part(&raw, |part| {
            assert_eq!(resolve_filename(part).as_deref(), Some("disp.pdf"));
        });
    }

    #[test]
    fn no_filename_anywhere_is_an_error() {
        let raw = pdf_message("", None);
        let scratch = tempfile::tempdir().unwrap();
        let config = ExtractorConfig::new("me", scratch.path());
        with_pdf_part(&raw, |part| {
            let err = extract(&config, part, 11, "paper").unwrap_err();
            assert!(matches!(err, ExtractError::MissingFilename { id: 11 }));
        });
    }

    #[test]
    fn declared_path_components_are_stripped() {
        let raw = pdf_message("; filename=\"../../escape.pdf\"", None);
        with_pdf_part(&raw, |part| {
            assert_eq!(resolve_filename(part).as_deref(), Some("escape.pdf"));
        });
    }

    #[test]
    fn writes_once_and_skips_when_present() {
        let raw = pdf_message("; filename=\"once.pdf\"", None);
        let scratch = tempfile::tempdir().unwrap();
        let config = ExtractorConfig::new("me", scratch.path());

        let first = with_pdf_part(&raw, |part| extract(&config, part, 12, "paper").unwrap());
        let written = scratch.path().join("once.pdf");
        assert_eq!(std::fs::read(&written).unwrap(), PDF_BYTES);

        // Second run: file already there, article identical.
        let second = with_pdf_part(&raw, |part| extract(&config, part, 12, "paper").unwrap());
        assert_eq!(first, second);
        assert_eq!(std::fs::read(&written).unwrap(), PDF_BYTES);
    }

    #[test]
    fn article_url_is_the_bare_filename() {
        let raw = pdf_message("; filename=\"bare.pdf\"", None);
        let scratch = tempfile::tempdir().unwrap();
        let config = ExtractorConfig::new("me", scratch.path());
        let article = with_pdf_part(&raw, |part| extract(&config, part, 13, "paper").unwrap());
        assert_eq!(
            article.kind(),
            &ArticleKind::Link {
                url: "bare.pdf".into()
            }
        );
        assert_eq!(article.subject(), "paper");
    }
}
