//! Task Manager API Library
//!
//! This library provides the REST API, storage backends, HTTP client and
//! screen view models for a small task management application.

pub mod api;
pub mod client;
pub mod domain;
pub mod infrastructure;
pub mod service;
pub mod ui;
