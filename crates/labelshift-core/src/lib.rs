//! Labelshift Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Labelshift label
//! dragging tool and its hosts. It includes:
//!
//! - **Identifiers**: Efficient string-interned identifiers ([`identifier::Id`])
//! - **Geometry**: Points, angles and bounds ([`geometry`] module)
//! - **Paths**: Fraction-parameterised link paths ([`path`] module)
//! - **Attachment**: How a label is attached to its link ([`attachment`] module)

pub mod attachment;
pub mod geometry;
pub mod identifier;
pub mod path;
