//! Lazy-loading entity and cursor framework for the Telerivet REST API.
//!
//! This module provides:
//!
//! - **[`Entity`]**: a local handle to one remote object that fetches
//!   itself on first access to an unknown field and tracks local edits
//! - **[`VariableBag`]**: the dirty-tracked custom variables of an entity
//! - **[`ApiCursor<T>`]**: a lazily paginated, single-pass sequence over
//!   a collection endpoint
//! - **[`Resource`] / [`SavableResource`] traits**: the shared protocol of
//!   every typed wrapper in [`resources`]
//! - **[`QueryParams`]**: filters and ordering for collection queries
//! - **Path building**: percent-encoded path templates
//!
//! # Example
//!
//! ```rust,ignore
//! use telerivet::rest::{QueryParams, Resource, SavableResource};
//!
//! let project = client.init_project_by_id("PJ123");
//!
//! // No request yet: the handle only knows its ids.
//! let mut contact = project.init_contact_by_id("CT456");
//!
//! // First unknown field: one GET of /projects/PJ123/contacts/CT456.
//! let name = contact.name().await?;
//!
//! // Local edits, flushed as a single POST with just the changes.
//! contact.set_send_blocked(true);
//! contact.set_var("source", "import");
//! contact.save().await?;
//!
//! // Pages are fetched as the cursor is consumed.
//! let mut cursor = project.query_contacts(QueryParams::new().filter("name[prefix]", "A"));
//! while let Some(contact) = cursor.next().await? {
//!     println!("{contact}");
//! }
//! ```

mod cursor;
mod entity;
mod params;
mod path;
pub(crate) mod resource;
mod variables;

pub mod resources;

pub use cursor::{ApiCursor, MAX_PAGE_SIZE};
pub use entity::{Entity, VARS_FIELD};
pub use params::{QueryParams, SortDirection};
pub use path::{build_path, encode_segment};
pub use resource::{to_params, Resource, SavableResource};
pub use variables::VariableBag;
