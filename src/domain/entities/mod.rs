//! Core domain entities representing the business data model.
//!
//! # Entity Types
//!
//! - [`User`] - A registered account
//! - [`Session`] / [`CurrentUser`] - Server-side login sessions and the
//!   verified identity they resolve to
//! - [`ShortlinkSummary`] - The read model of a shortlink used by analytics
//! - [`LinkList`] / [`LinkListItem`] - Curated link pages
//! - [`ClickEvent`] - A single recorded click
//!
//! Creation inputs follow the `New*` naming (`NewUser`, `NewSession`).

pub mod click;
pub mod link_list;
pub mod session;
pub mod shortlink;
pub mod user;

pub use click::{ClickEvent, ClickKind};
pub use link_list::{LinkList, LinkListItem};
pub use session::{ActiveSession, CurrentUser, NewSession, Session};
pub use shortlink::ShortlinkSummary;
pub use user::{NewUser, User};
