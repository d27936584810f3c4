//! HTTP Header Multimap.
//!
//! Header names are stored case preserved and compared exactly. Case-insensitive comparison
//! only happens when a [`HeaderOrder`] is resolved against the stored names.
mod matches;
mod field;
mod map;
mod order;
mod exclude;
mod sort;
mod write;
mod iter;

pub(crate) use field::HeaderField;
pub use map::HeaderMap;
pub use order::{HeaderOrder, HEADER_ORDER_KEY};
pub use exclude::Exclude;
pub use iter::{Iter, Names};
