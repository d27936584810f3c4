//! Ordered HTTP header multimap with wire-exact serialization.
//!
//! [`HeaderMap`] keeps header names exactly as inserted and serializes them as
//! `Name: value\r\n` lines, either sorted byte-wise or in the order given by an explicit
//! [`HeaderOrder`] hint.
#![warn(missing_debug_implementations)]

mod log;

pub mod headers;

pub use headers::{Exclude, HEADER_ORDER_KEY, HeaderMap, HeaderOrder};
