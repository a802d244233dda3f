//! Inventory Client - product store controller for the inventory API
//!
//! [`ProductStore`] keeps the product list in sync with the server and
//! reports through a [`Presenter`]. [`NetworkHttpClient`] is the reqwest
//! transport; the `inventory` binary wires both to a console.

pub mod api;
pub mod config;
pub mod console;
pub mod error;
pub mod http;
pub mod presenter;
pub mod session;
pub mod snapshot;
pub mod store;

pub use api::ProductApi;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult, FailureKind};
pub use http::{FormPayload, HttpClient, ImageUpload, NetworkHttpClient};
pub use presenter::{Notice, NoticeLevel, Presenter};
pub use session::EditSession;
pub use snapshot::{Snapshot, SnapshotStorage};
pub use store::{ActionOutcome, ProductStore};

// Re-export shared types for convenience
pub use shared::{ProductFields, ProductRecord, ProductStats};
