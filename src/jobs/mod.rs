pub mod profile_refresh;

pub use profile_refresh::{start_profile_refresher, ProfileRefreshQueue, RefreshTrigger};
