//! Role types for conversation participants.

use serde::{Deserialize, Serialize};

/// Who authored a message in a generation request.
///
/// # Examples
///
/// ```
/// use novelist_core::Role;
///
/// assert_ne!(Role::User, Role::Assistant);
/// assert_eq!(format!("{}", Role::System), "System");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
pub enum Role {
    /// System messages carry standing instructions
    System,
    /// User messages carry the prompt
    User,
    /// Assistant messages carry earlier model output
    Assistant,
}
