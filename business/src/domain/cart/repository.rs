use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::errors::RepositoryError;
use crate::domain::shared::value_objects::UserId;

use super::model::{Cart, CartLineItem};

#[async_trait]
pub trait CartRepository: Send + Sync {
    /// Returns the user's cart with its lines in insertion order, or `None`
    /// when the user has never added anything (distinct from an empty cart).
    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<Cart>, RepositoryError>;

    /// Writes one line item, creating the cart record on the fly when the
    /// user has none. The write is guarded by the product's live stock:
    /// returns `Conflict` when the stock no longer covers the line quantity
    /// (or the product vanished) at write time.
    async fn upsert_line_item(
        &self,
        user_id: &UserId,
        item: &CartLineItem,
    ) -> Result<(), RepositoryError>;

    /// Replaces a line's quantity in place, leaving its price snapshot
    /// untouched. Same live-stock guard as `upsert_line_item`.
    async fn update_line_quantity(
        &self,
        user_id: &UserId,
        item_id: Uuid,
        quantity: u32,
    ) -> Result<(), RepositoryError>;

    /// Removes one line; the cart record itself survives even when emptied.
    async fn remove_line_item(&self, user_id: &UserId, item_id: Uuid)
        -> Result<(), RepositoryError>;

    /// Deletes the cart record and all its lines. Succeeds when no cart
    /// exists.
    async fn delete_by_user(&self, user_id: &UserId) -> Result<(), RepositoryError>;
}
