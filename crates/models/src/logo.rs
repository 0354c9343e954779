use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ModelError;
use crate::user::UserProfile;

/// Attribution used when no user is signed in.
pub const ANONYMOUS: &str = "Anonymous";

/// A logo record. `id` is assigned by the storage backend on create and is
/// immutable afterwards; `created_at` drives stable listing order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Logo {
    pub id: Uuid,
    pub title: String,
    pub created_by: String,
    pub created_by_id: Option<String>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// The mutable fields of a logo as submitted through the add/edit form.
/// `image_url` is only set when the upload helper stored a file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LogoInput {
    pub title: String,
    pub image_url: Option<String>,
}

impl LogoInput {
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.title.trim().is_empty() {
            return Err(ModelError::Validation("title is required".into()));
        }
        Ok(())
    }
}

impl Logo {
    /// Materialize a new record from form input and the optional session
    /// user, the way the original add handler attributes creators.
    pub fn from_input(input: LogoInput, creator: Option<&UserProfile>) -> Self {
        let (created_by, created_by_id) = match creator {
            Some(user) => (user.display_name.clone(), Some(user.id.clone())),
            None => (ANONYMOUS.to_string(), None),
        };
        Self {
            id: Uuid::new_v4(),
            title: input.title,
            created_by,
            created_by_id,
            image_url: input.image_url,
            created_at: Utc::now(),
        }
    }

    /// Replace the mutable fields. Attribution and id survive edits.
    pub fn apply(&mut self, input: LogoInput) {
        self.title = input.title;
        if input.image_url.is_some() {
            self.image_url = input.image_url;
        }
    }
}
