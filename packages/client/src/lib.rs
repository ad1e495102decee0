//! Authenticated HTTP client for LinkedIn's Voyager API.
//!
//! This crate owns everything that touches the network: session
//! credentials, request encoding, header discipline and status
//! classification. Decoded responses are handed to the resolvers in the
//! `voyager` crate, which never perform I/O themselves.
//!
//! # Crate layout
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`api`] | [`Voyager`]: profile, search, feed, post, follow and connect operations |
//! | [`messaging`] | Inbox listing, reading and sending on [`Voyager`] |
//! | [`executor`] | [`Executor`]: headers, query handling, body limits, status classification |
//! | [`query`] | Tuple-grammar variables and raw query strings |
//! | [`token`] | Latin-1 tracking tokens for the message-send endpoint |
//! | [`credentials`] | Session cookies and the CSRF/cookie headers derived from them |
//! | [`config`] | [`ClientConfig`], with environment overrides |
//! | [`error`] | The [`Error`] taxonomy |
//!
//! # Quick start
//!
//! ```rust,no_run
//! use voyager_client::{ClientConfig, Credentials, Voyager};
//!
//! # async fn run() -> Result<(), voyager_client::Error> {
//! let creds = Credentials::new("AQEDAR…", "ajax:1234567890");
//! let api = Voyager::new(creds, ClientConfig::from_env())?;
//!
//! let me = api.me().await?;
//! let mailbox = api.my_profile_urn().await?;
//! for convo in api.list_conversations(&mailbox, 20).await? {
//!     println!("{} ({} participants)", convo.entity_urn, convo.participants.len());
//! }
//! # let _ = me;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod credentials;
pub mod error;
pub mod executor;
pub mod messaging;
pub mod query;
pub mod token;

#[cfg(test)]
mod test_support;

pub use api::{SearchKind, Voyager};
pub use config::{ClientConfig, QueryIds};
pub use credentials::Credentials;
pub use error::Error;
pub use executor::{with_deadline, ApiRequest, Executor, HeaderProfile, Query};
pub use token::{generate_tracking_token, TokenError};
