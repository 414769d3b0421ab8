pub mod id;
pub mod entity;
pub mod edge;
pub mod graph;
pub mod selection;
pub mod search;
pub mod live;
pub mod error;

// Re-export commonly used types
pub use id::{EntityId, EdgeId};
pub use entity::{Entity, Position, RiskStatus};
pub use edge::Relationship;
pub use graph::{EntityGraph, Layout, RawLink, RawNode};
pub use selection::Selection;
pub use search::resolve;
pub use live::{AlertRecord, LiveBuffer, LiveEvent, TransactionRecord, LIVE_BUFFER_CAP};
pub use error::CoreError;
