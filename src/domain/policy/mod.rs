//! Pure decision rules: plan gating, form normalization, upload constraints and
//! link activation state.
//!
//! Nothing in this module performs I/O. Services in
//! [`crate::application::services`] call these rules before any collaborator.

pub mod avatar;
pub mod link_limits;
pub mod link_normalizer;
pub mod link_state;
pub mod profile_normalizer;

pub use avatar::{AvatarFormat, AvatarRejection, MAX_AVATAR_BYTES, validate_avatar};
pub use link_limits::{LinkQuota, can_create_link, can_schedule, remaining_links};
pub use link_normalizer::{LinkDraftError, SubmitMode, normalize_link};
pub use link_state::LinkState;
pub use profile_normalizer::{initials, normalize_profile};
