//! Backend collaboration layer for the amlscope dashboard core.
//!
//! Wraps the monitoring backend's REST endpoints and live WebSocket channel,
//! and owns the [`DashboardSession`](session::DashboardSession): the single
//! serialized path through which every graph refresh, selection change, and
//! live event flows.

pub mod api;
pub mod error;
pub mod reconciler;
pub mod schema;
pub mod session;
pub mod stream;

pub use api::ApiClient;
pub use error::ClientError;
pub use reconciler::{LiveStreamReconciler, Outcome};
pub use session::DashboardSession;
pub use stream::LiveFeed;
