//! Domain layer containing business entities and logic.
//!
//! This module defines the data the service reasons about, the repository
//! interfaces it reads through, and the pure analytics aggregation. Nothing in
//! here depends on HTTP or on a concrete database.
//!
//! # Architecture
//!
//! - [`entities`] - Users, sessions, shortlinks, link lists and click events
//! - [`repositories`] - Data access trait definitions
//! - [`analytics`] - Report aggregation over fetched entities
//!
//! # Analytics Flow
//!
//! 1. Session middleware resolves a [`entities::CurrentUser`]
//! 2. [`crate::application::services::AnalyticsService`] fetches shortlinks,
//!    link lists and click events concurrently
//! 3. [`analytics::build_report`] shapes them into an [`analytics::AnalyticsReport`]

pub mod analytics;
pub mod entities;
pub mod repositories;
