//! Domain layer - Core business entities and logic
//!
//! Users with a closed role tag, shifts, the listing filters and the
//! access policy. Nothing here touches the database.

pub mod assignment;
pub mod filters;
pub mod password;
pub mod policy;
pub mod shift;
pub mod user;

pub use assignment::{AssignmentInput, SyncOutcome};
pub use filters::{EffectiveFilters, RawShiftFilters, ShiftFilters};
pub use password::Password;
pub use policy::{authorize, Action, Actor};
pub use shift::{ServiceKind, Shift, ShiftDraft, ShiftInput, ShiftRecord, ShiftStatus};
pub use user::{NewUser, UnknownRole, User, UserChanges, UserInput, UserResponse, UserRole, UserSummary};
