//! Common test utilities for integration tests.
//!
//! This module provides:
//!
//! - [`app_builder::TestAppBuilder`] - Build test Axum apps that mirror main.rs wiring
//! - [`factories`] - Seed a `MockCongressClient` with member and bill records
//!
//! # App Builder Usage
//!
//! ```ignore
//! use crate::common::app_builder::TestAppBuilder;
//! use crate::common::factories::MemberFactory;
//!
//! #[tokio::test]
//! async fn test_with_app() {
//!     let builder = TestAppBuilder::new();
//!     MemberFactory::new("P000197").insert(builder.client());
//!     let app = builder.build();
//!     // Use app.oneshot(...) to send requests
//! }
//! ```
//!
//! Each test binary compiles this module separately, so helpers unused by one
//! binary are expected.

#![allow(dead_code)]

pub mod app_builder;
pub mod factories;
