//! Site state: per-record entries and the snapshot that persists them.
//!
//! ```text
//! records ──► PostEntry ──► Collections ──┐
//!                                         ├─► Snapshot::reconcile ──► pages, feed, summary
//!            previous snapshot.json ──────┘
//! ```

mod store;
mod types;

pub use store::{Collections, Snapshot, SnapshotError};
pub use types::PostEntry;

#[cfg(test)]
pub(crate) mod tests {
    pub(crate) use super::store::tests::entry;
}
