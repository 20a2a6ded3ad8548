//! Blocking client for the Feedzilla news aggregation API.
//!
//! ```no_run
//! use fz_client::prelude::*;
//!
//! # fn main() -> Result<()> {
//! let client = ApiClient::new(5_000)?;
//! let latest = client
//!     .query()
//!     .category_id(7)
//!     .count(10)?
//!     .order(ArticleOrder::Latest)
//!     .articles()?;
//! for article in latest.iter() {
//!     println!("{} - {}", article.title, article.url);
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod logging;
pub mod query;
pub mod request;

pub use client::ApiClient;
pub use config::ClientConfig;
pub use query::{ArticleQuery, QueryBuilder};
pub use request::RequestTarget;

pub mod prelude {
    pub use super::{ApiClient, ArticleQuery, ClientConfig, QueryBuilder};
    pub use fz_core::prelude::*;
}
