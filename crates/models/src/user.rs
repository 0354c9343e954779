use serde::{Deserialize, Serialize};

/// Identity produced by the auth collaborator. Whoever established the
/// session is out of scope here; handlers only consume `id` and
/// `display_name`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub display_name: String,
}
