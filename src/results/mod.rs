mod record;
mod store;

pub use record::{ByElectionResult, Dated, ElectionRecord, ElectionResult, GeneralResult, TppRecord};
pub(crate) use record::two_party_share;
pub use store::ResultStore;
