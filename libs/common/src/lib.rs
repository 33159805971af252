//! Common library for the rentmybike workspace
//!
//! This crate provides the PostgreSQL connectivity, schema migrations and
//! database error types shared by the services.

pub mod database;
pub mod error;
