//! Relative link validation for generated HTML sites.
//!
//! This crate provides:
//! - [`DocumentSet`]: the files of a site keyed by root-relative path
//! - [`resolve`]: relative path resolution between documents
//! - [`LinkChecker`]: a two-pass check that every relative `href`/`src`
//!   reaches an existing document and, for fragments, an existing anchor
//! - [`load_dir`]: loading a site directory from disk
//!
//! # Example
//!
//! ```
//! use lw_check::{CheckError, Document, DocumentSet, LinkChecker};
//!
//! let site: DocumentSet = [
//!     Document::new(
//!         "sub/src.html",
//!         r#"<a href="../t.html">T</a><a href="../missing.html">M</a>"#,
//!     ),
//!     Document::new("t.html", ""),
//! ]
//! .into_iter()
//! .collect();
//!
//! let Err(CheckError::BrokenLinks(broken)) = LinkChecker::new().check(&site) else {
//!     panic!("expected broken links");
//! };
//! assert_eq!(broken.links()[0].href, "../missing.html");
//! ```

mod checker;
mod document;
mod error;
mod index;
pub mod link;
mod loader;
mod path;

pub use checker::{DEFAULT_HTML_PATTERN, LinkChecker};
pub use document::{Document, DocumentSet};
pub use error::{BrokenLink, BrokenLinks, CheckError};
pub use index::{IdIndex, collect_ids};
pub use loader::{LoadError, load_dir};
pub use path::{PathError, resolve};
