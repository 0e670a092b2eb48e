//! Core types and trait definitions for the Estágio application intake.
//!
//! This crate is free of HTTP and database dependencies. It owns the
//! submission data pipeline: form capture and validation, normalisation,
//! the write and read paths over a [`store::SubmissionStore`], the dashboard
//! access gate, and the list/detail view models.

pub mod error;
pub mod form;
pub mod gate;
pub mod memory;
pub mod phone;
pub mod reader;
pub mod schedule;
pub mod store;
pub mod submission;
pub mod view;
pub mod writer;

pub use error::{Error, Result};

#[cfg(test)]
mod tests;
