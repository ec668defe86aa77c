pub mod local_store;
pub mod remote_api;

pub use local_store::{OfflinePersistence, PreferencePersistence, ReferencePersistence};
pub use remote_api::RemoteApi;
