//! Owner abstraction for attachable content objects.
//!
//! Images can be attached to arbitrary domain objects ("owners"). Each owner
//! type registers an [`OwnerResolver`] under its content type name; handlers
//! look owners up through the [`OwnerRegistry`]. An unknown content type or a
//! missing object is reported as not-found so URL probing reveals nothing
//! about which types and ids exist.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::AppError;

/// A domain object user images can be attached to.
pub trait Owner: Send + Sync {
    /// The user who owns this object, if it has a single owner.
    fn owning_user(&self) -> Option<Uuid>;

    /// Public URL of the object, used as the redirect fallback after
    /// form-style uploads.
    fn absolute_url(&self) -> Option<String>;

    /// Whether `user_id` may manage images attached to this object.
    /// Owner types with shared editing override this.
    fn user_can_edit(&self, user_id: Uuid) -> bool {
        self.owning_user() == Some(user_id)
    }
}

/// Result of binding an image to a named image field on an owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldBinding {
    Bound,
    UnknownField,
}

/// Looks up owners of one content type by object id.
#[async_trait]
pub trait OwnerResolver: Send + Sync {
    /// Content type name as it appears in URLs, e.g. "gallery".
    fn content_type(&self) -> &'static str;

    /// Fetch the owner object. `Ok(None)` means the id does not exist.
    async fn resolve(&self, object_id: Uuid) -> Result<Option<Box<dyn Owner>>, AppError>;

    /// Bind a stored image to a named image field on the owner.
    /// Owner types without image fields keep the default.
    async fn set_image_field(
        &self,
        object_id: Uuid,
        field: &str,
        image_id: Uuid,
    ) -> Result<FieldBinding, AppError> {
        let _ = (object_id, field, image_id);
        Ok(FieldBinding::UnknownField)
    }
}

/// Registry of attachable owner types, keyed by content type name.
#[derive(Default, Clone)]
pub struct OwnerRegistry {
    resolvers: HashMap<&'static str, Arc<dyn OwnerResolver>>,
}

impl OwnerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, resolver: Arc<dyn OwnerResolver>) {
        self.resolvers.insert(resolver.content_type(), resolver);
    }

    pub fn get(&self, content_type: &str) -> Option<&Arc<dyn OwnerResolver>> {
        self.resolvers.get(content_type)
    }

    pub fn contains(&self, content_type: &str) -> bool {
        self.resolvers.contains_key(content_type)
    }
}
