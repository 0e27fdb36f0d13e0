//! Core model of a price list
//!
//! Entry definition and discount classification, shared by the loader and
//! every renderer

pub mod entry;
pub mod value;
