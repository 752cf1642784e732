mod aggregator;
mod snapshot;
mod store;

pub use aggregator::VersionAggregator;
pub use snapshot::{allow_all, GameVersion, LoaderVisibility, VersionSnapshot};
pub use store::SnapshotStore;
