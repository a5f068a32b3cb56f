//! Session state that outlives a single event: undo snapshots, the
//! completion count and the resume cache.

mod cache;
mod completion;
mod history;

pub use cache::SessionCache;
pub use completion::CompletionTracker;
pub use history::SnapshotHistory;
