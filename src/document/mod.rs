//! Document Model
//!
//! The page state both initializers read from:
//!
//! - **types**: Doctype, element tree and the owning Document
//! - **serialize**: outer-HTML serialization of the live tree
//! - **parse**: building a Document from an HTML file
//! - **error**: Error types
//!
//! # Example
//!
//! ```rust
//! use moodjar::document::{Document, Doctype, Element};
//!
//! let root = Element::new("html").child(Element::new("body").text("hi"));
//! let doc = Document::new(Some(Doctype::html5()), root);
//!
//! assert_eq!(doc.root().outer_html(), "<html><body>hi</body></html>");
//! ```

pub mod error;
pub mod parse;
pub mod serialize;
pub mod types;

pub use error::{DocumentError, DocumentResult};
pub use types::{Doctype, Document, Element, Node};
