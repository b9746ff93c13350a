//! An in-memory host application.
//!
//! Implements the [`Host`](crate::Host) contract the way a real modeling application behaves:
//! repeated attachment of the same observer is ignored, closing a document invalidates its
//! subjects, and every new, opened or activated document is announced to app observers.

mod attachments;
mod document;
mod host;

pub use document::{SimDocument, SimPart};
pub use host::{DocumentMode, SimHost};
