//! Agent domain module
//!
//! Identity of transcript speakers, the safety guidelines every role follows,
//! and the role capability interface with its three variants.

pub mod guidelines;
pub mod profile;
pub mod role;
pub mod roles;

pub use guidelines::SAFETY_GUIDELINES;
pub use profile::AgentProfile;
pub use role::{AgentRole, RoleKind};
pub use roles::{PrimaryDiagnostician, SeniorReviewer, SpecialistConsultant};
