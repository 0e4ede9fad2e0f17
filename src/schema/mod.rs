//! Field schema module
//!
//! Declares the dimensions and metrics a connector exposes to the host.
//!
//! # Overview
//!
//! A [`Fields`] catalog is an ordered list of [`Field`] declarations. The
//! host asks for a subset of them by id; [`Fields::for_ids`] resolves that
//! subset in request order so rows can be built positionally.

mod types;

pub use types::{Field, FieldConcept, FieldType, Fields};
