//! Credit Flags API Library
//!
//! Computes credit-underwriting risk flags from a company's financial
//! statements and serves them over a single upload endpoint.
//!
//! # Modules
//!
//! - `api`: HTTP-facing components.
//! - `core`: Domain logic, models and errors.
//! - `config`: Configuration management.
//! - `errors`: Error handling types.
//! - `handlers`: HTTP request handlers.
//! - `models`: Financial statement and flag models.
//! - `routes`: Router assembly and middleware.
//! - `rules`: Statement selection, metrics and flag rules.

pub mod api;
pub mod core;

pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod rules;
