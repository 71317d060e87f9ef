//! Store actor and the traits at its seams.

pub mod messages;
pub mod store;
pub mod traits;

pub use messages::{ActorError, StoreState};
pub use store::{AnalysisSource, StoreHandle};
pub use traits::{AnalysisService, CommunicationStore};
