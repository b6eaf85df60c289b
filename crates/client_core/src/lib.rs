use anyhow::Result;
use async_trait::async_trait;
use shared::{
    domain::{Item, ItemId},
    error::{normalize_name, BlockedAction, ListError, ValidationError},
    listing::{rows_from_items, ListRow},
};
use storage::{Storage, UpdateOutcome};
use tracing::{debug, error, info, warn};

pub mod alerts;
mod session;

pub use alerts::Alert;
pub use session::{EditSession, ADD_LABEL, UPDATE_LABEL};

/// Persistence seam used by [`SessionController`].
#[async_trait]
pub trait ItemStore: Send + Sync {
    async fn list_all(&self) -> Result<Vec<Item>>;
    async fn exists(&self, name: &str) -> Result<bool>;
    /// `None` when `name` is already taken and nothing was written.
    async fn create(&self, name: &str) -> Result<Option<Item>>;
    async fn update(&self, item_id: ItemId, name: &str) -> Result<UpdateOutcome>;
    async fn remove(&self, item_id: ItemId) -> Result<bool>;
}

#[async_trait]
impl ItemStore for Storage {
    async fn list_all(&self) -> Result<Vec<Item>> {
        self.list_items().await
    }

    async fn exists(&self, name: &str) -> Result<bool> {
        self.item_name_exists(name).await
    }

    async fn create(&self, name: &str) -> Result<Option<Item>> {
        self.create_item(name).await
    }

    async fn update(&self, item_id: ItemId, name: &str) -> Result<UpdateOutcome> {
        self.update_item_name(item_id, name).await
    }

    async fn remove(&self, item_id: ItemId) -> Result<bool> {
        self.remove_item(item_id).await
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletePrompt {
    pub item_id: ItemId,
    /// Name as last shown in the list, if the id was visible.
    pub name: Option<String>,
}

/// Asks the user whether a delete should go ahead.
#[async_trait]
pub trait Confirmer: Send {
    async fn confirm_delete(&mut self, prompt: &DeletePrompt) -> bool;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Added(Item),
    Updated(Item),
    Deleted { item_id: ItemId, removed: bool },
    DeleteCancelled(ItemId),
}

/// Drives add/edit/delete against an [`ItemStore`] and keeps the presented rows current.
///
/// Every method that talks to the store takes `&mut self`, so requests are issued one at a
/// time. A successful mutation is always followed by a full re-fetch of the list.
pub struct SessionController<S> {
    store: S,
    session: EditSession,
    pending_text: String,
    rows: Vec<ListRow>,
}

impl<S: ItemStore> SessionController<S> {
    pub async fn load(store: S) -> Result<Self, ListError> {
        let mut controller = Self {
            store,
            session: EditSession::Idle,
            pending_text: String::new(),
            rows: Vec::new(),
        };
        controller.refresh().await?;
        Ok(controller)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn state(&self) -> &EditSession {
        &self.session
    }

    pub fn is_editing(&self) -> bool {
        self.session.is_editing()
    }

    pub fn submit_label(&self) -> &'static str {
        self.session.submit_label()
    }

    pub fn pending_text(&self) -> &str {
        &self.pending_text
    }

    pub fn set_pending_text(&mut self, text: impl Into<String>) {
        self.pending_text = text.into();
    }

    pub fn rows(&self) -> &[ListRow] {
        &self.rows
    }

    pub fn row_at(&self, position: usize) -> Option<&ListRow> {
        self.rows.iter().find(|row| row.position == position)
    }

    pub async fn refresh(&mut self) -> Result<(), ListError> {
        let items = self
            .store
            .list_all()
            .await
            .map_err(|err| storage_failure("list items", err))?;
        self.rows = rows_from_items(items);
        Ok(())
    }

    pub fn begin_edit(&mut self, item: Item) {
        debug!(item_id = %item.id, "editing item");
        self.pending_text = item.name.clone();
        self.session = EditSession::Editing(item);
    }

    /// Adds `raw_text` as a new item, or renames the item being edited.
    ///
    /// On rejection the typed text is kept and the session stays where it was.
    pub async fn submit(&mut self, raw_text: &str) -> Result<Notice, ListError> {
        self.pending_text = raw_text.to_string();
        let name = match normalize_name(raw_text) {
            Ok(name) => name.to_string(),
            Err(err) => {
                debug!("rejected empty item name");
                return Err(err.into());
            }
        };

        match self.session.target().cloned() {
            None => self.add(name).await,
            Some(target) => self.rename(target, name).await,
        }
    }

    pub async fn request_delete<C>(
        &mut self,
        item_id: ItemId,
        confirmer: &mut C,
    ) -> Result<Notice, ListError>
    where
        C: Confirmer + ?Sized,
    {
        if self.session.is_editing() {
            debug!(%item_id, "delete blocked while editing");
            return Err(BlockedAction::DeleteWhileEditing.into());
        }

        let prompt = DeletePrompt {
            item_id,
            name: self
                .rows
                .iter()
                .find(|row| row.item.id == item_id)
                .map(|row| row.item.name.clone()),
        };
        if !confirmer.confirm_delete(&prompt).await {
            debug!(%item_id, "delete cancelled");
            return Ok(Notice::DeleteCancelled(item_id));
        }

        let removed = self
            .store
            .remove(item_id)
            .await
            .map_err(|err| storage_failure("delete item", err))?;
        if removed {
            info!(%item_id, "item deleted");
        } else {
            warn!(%item_id, "delete target no longer exists");
        }

        self.refresh().await?;
        Ok(Notice::Deleted { item_id, removed })
    }

    async fn add(&mut self, name: String) -> Result<Notice, ListError> {
        if self.name_taken(&name).await? {
            return Err(ValidationError::DuplicateName.into());
        }

        let Some(item) = self
            .store
            .create(&name)
            .await
            .map_err(|err| storage_failure("add item", err))?
        else {
            debug!(%name, "item name claimed by another writer");
            return Err(ValidationError::DuplicateName.into());
        };
        info!(item_id = %item.id, name = %item.name, "item added");

        self.pending_text.clear();
        self.refresh().await?;
        Ok(Notice::Added(item))
    }

    async fn rename(&mut self, target: Item, name: String) -> Result<Notice, ListError> {
        if name != target.name && self.name_taken(&name).await? {
            return Err(ValidationError::DuplicateName.into());
        }

        let outcome = self
            .store
            .update(target.id, &name)
            .await
            .map_err(|err| storage_failure("update item", err))?;
        match outcome {
            UpdateOutcome::Renamed => {
                info!(item_id = %target.id, from = %target.name, to = %name, "item renamed");
            }
            UpdateOutcome::Missing => {
                warn!(item_id = %target.id, "edited item no longer exists; nothing updated");
            }
            UpdateOutcome::NameTaken => {
                debug!(%name, "item name claimed by another writer");
                return Err(ValidationError::DuplicateName.into());
            }
        }

        self.session = EditSession::Idle;
        self.pending_text.clear();
        self.refresh().await?;
        Ok(Notice::Updated(Item::new(target.id, name)))
    }

    async fn name_taken(&self, name: &str) -> Result<bool, ListError> {
        let taken = self
            .store
            .exists(name)
            .await
            .map_err(|err| storage_failure("check item name", err))?;
        if taken {
            debug!(%name, "rejected duplicate item name");
        }
        Ok(taken)
    }
}

fn storage_failure(action: &str, err: anyhow::Error) -> ListError {
    let message = format!("failed to {action}: {err:#}");
    error!(%message, "storage operation failed");
    ListError::StorageUnavailable { message }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
