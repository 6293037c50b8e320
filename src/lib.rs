//! mailmark — turn self-addressed bookmark emails into link and note records.
//!
//! The owner mails themselves a URL, a passage of text, or a PDF; the
//! extractor classifies each raw message and produces one [`Article`] (or
//! one typed [`ExtractError`]). The batch driver runs a whole message store
//! through extraction concurrently and returns the articles sorted by
//! sequence id. Fetching mail and rendering the article index are the
//! collaborators' business, not this crate's.

pub mod article;
pub mod batch;
pub mod error;
pub mod extract;

pub use article::{Article, ArticleKind};
pub use batch::{BatchOutcome, run_batch};
pub use error::{ExtractError, Result};
pub use extract::{Extractor, ExtractorConfig};
