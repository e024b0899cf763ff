//! # Telerivet API Rust Client
//!
//! A Rust client for the Telerivet REST API (SMS, MMS, voice, USSD and chat
//! messaging), built around lazily loaded resource handles.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`ClientConfig`] and [`ClientConfigBuilder`]
//! - Validated newtypes for the API key and base URL
//! - An async HTTP transport with basic authentication and typed errors
//! - [`rest::Entity`]: handles that fetch themselves on first access to an
//!   unknown field and send only changed fields on save
//! - [`rest::ApiCursor`]: lazily paginated collection queries
//! - Typed wrappers for every resource in [`rest::resources`]
//!
//! ## Quick Start
//!
//! ```rust
//! use telerivet::{ApiKey, ClientConfig};
//!
//! let config = ClientConfig::builder()
//!     .api_key(ApiKey::new("your-api-key").unwrap())
//!     .build()
//!     .unwrap();
//! assert_eq!(config.api_url().as_ref(), "https://api.telerivet.com/v1");
//! ```
//!
//! ## Working with Resources
//!
//! ```rust,ignore
//! use telerivet::{ApiKey, ClientConfig, TelerivetClient};
//! use telerivet::rest::{QueryParams, Resource, SavableResource};
//! use telerivet::rest::resources::SendMessageOptions;
//!
//! let client = TelerivetClient::new(&config)?;
//! let project = client.init_project_by_id("PJ123"); // no request
//!
//! project
//!     .send_message(SendMessageOptions::text("+16505550123", "Hello!"))
//!     .await?;
//!
//! let mut contacts = project.query_contacts(QueryParams::new().filter("name[prefix]", "A"));
//! while let Some(mut contact) = contacts.next().await? {
//!     contact.set_var("reviewed", true);
//!     contact.save().await?;
//! }
//! ```
//!
//! ## Error Handling
//!
//! Every network operation returns [`ApiError`]. Parameter validation
//! failures carry the offending parameter name:
//!
//! ```rust,ignore
//! use telerivet::ApiError;
//!
//! match project.send_message(options).await {
//!     Err(ApiError::InvalidParameter { param, message, .. }) => eprintln!("{param}: {message}"),
//!     Err(e) => return Err(e.into()),
//!     Ok(message) => println!("sent {}", message.id()),
//! }
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: configuration, the request counter and the debug
//!   flag live on client instances
//! - **Fail-fast validation**: all newtypes validate on construction
//! - **Thread-safe**: the client and transports are `Send + Sync`
//! - **Async-first**: designed for the Tokio runtime; calls are awaited one
//!   at a time, with no background prefetch

mod client;
pub mod clients;
pub mod config;
pub mod error;
pub mod rest;

pub use client::TelerivetClient;
pub use config::{ApiKey, ApiUrl, ClientConfig, ClientConfigBuilder};
pub use error::ConfigError;

// Re-export transport types
pub use clients::{ApiError, HttpClient, HttpMethod, HttpRequest, InvalidHttpRequestError, Transport};
