//! Strata Core Types and Definitions
//!
//! This crate holds the data model behind the Strata architecture diagrams
//! and the click-to-detail selection mechanism:
//!
//! - **Catalog**: Static definitions of diagrams, components, layout trees and
//!   shortcuts ([`catalog`] module), including the built-in virtualization and
//!   containerization diagrams
//! - **Registry**: The validated, immutable component catalog ([`registry::Registry`])
//! - **Selection**: The single mutable "currently selected" reference
//!   ([`selection::SelectionController`])
//! - **Errors**: [`error::ConfigurationError`] and [`error::NotFoundError`]
//! - **Colors** and **Geometry**: Primitives shared with the renderer

pub mod catalog;
pub mod color;
pub mod error;
pub mod geometry;
pub mod registry;
pub mod selection;
