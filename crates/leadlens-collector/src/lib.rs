pub mod collect;
pub mod download;
pub mod error;
pub mod extract;
pub mod session;

pub use collect::collect_profiles;
pub use download::{build_download_client, download_photos};
pub use error::CollectorError;
pub use extract::{extract_profile_cards, ProfileCard};
pub use session::SearchSession;
