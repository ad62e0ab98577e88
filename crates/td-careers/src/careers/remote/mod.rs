//! Read-only access to the NocoDB tables behind the landing page.

pub mod cache;
pub mod directory;
pub mod nocodb;
pub mod profile;

pub use cache::TtlCache;
pub use directory::{Position, PositionDirectory, POSITIONS_TTL};
pub use nocodb::{FetchError, NocoDbClient, RecordPage};
pub use profile::{CompanyProfile, CompanyProfileSource, SocialLink, PROFILE_TTL};
