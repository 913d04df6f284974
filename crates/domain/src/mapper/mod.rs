//! Representation mapper.
//!
//! Each entity exists in up to four shapes: the inbound request, the domain
//! value, the persisted record, and the outbound response. Conversions copy a
//! field only when the target declares a field of the same name. Every
//! conversion destructures its source exhaustively, so a field added to any
//! shape fails the build until the mapping decides where it goes. A field
//! that must not cross a boundary (the password hash) is dropped by name.
//!
//! Request shapes keep every field optional on the wire; mapping a request
//! whose required field is absent fails with [`MappingError`].
//!
//! [`MappingError`]: crate::error::MappingError

pub mod catalog;
pub mod order;
pub mod user;

pub use catalog::ResponseCatalog;
pub use order::{RequestOrder, ResponseOrder};
pub use user::{RequestUser, ResponseUser};
