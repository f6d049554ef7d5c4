// src/document/mod.rs
pub mod classifier;
pub mod element;
pub mod parser;

pub use element::{Document, Element, ElementKind, FilingFamily, FilingType};
