//! Item catalog screen

use std::time::Duration;

use super::{check_form, reject, Collection};
use crate::{
    client::PortariaApi,
    error::{ConsoleError, ConsoleResult},
    models::{Item, ItemForm},
    notice::NoticeBoard,
};

pub struct ItemsScreen<A> {
    api: A,
    items: Collection<Item>,
    notices: NoticeBoard,
}

impl<A: PortariaApi> ItemsScreen<A> {
    pub fn new(api: A, notice_ttl: Duration) -> Self {
        Self {
            api,
            items: Collection::default(),
            notices: NoticeBoard::new(notice_ttl),
        }
    }

    pub fn items(&self) -> &[Item] {
        self.items.as_slice()
    }

    pub fn notices(&self) -> &NoticeBoard {
        &self.notices
    }

    pub fn available_count(&self) -> usize {
        self.items.iter().filter(|i| i.available).count()
    }

    pub fn unavailable_count(&self) -> usize {
        self.items.iter().filter(|i| !i.available).count()
    }

    /// Replace the local list with the server's
    pub async fn load(&mut self) -> ConsoleResult<()> {
        match self.api.list_items().await {
            Ok(items) => {
                self.items.replace_all(items);
                Ok(())
            }
            Err(e) => {
                tracing::error!("Error loading items: {}", e);
                self.items.replace_all(Vec::new());
                self.notices.error("Error loading items");
                Err(e)
            }
        }
    }

    /// Create (`editing = None`) or update an item and splice the server's
    /// copy into the local list.
    pub async fn save(&mut self, editing: Option<&str>, form: &ItemForm) -> ConsoleResult<Item> {
        self.notices.clear();
        let form = form.normalized();
        check_form(&form, &mut self.notices)?;

        let result = match editing {
            Some(id) => self.api.update_item(id, &form).await,
            None => self.api.create_item(&form).await,
        };

        match result {
            Ok(item) => {
                match editing {
                    Some(id) => {
                        self.items.replace(id, item.clone());
                        self.notices.success("Item updated");
                    }
                    None => {
                        self.items.append(item.clone());
                        self.notices.success("Item created");
                    }
                }
                Ok(item)
            }
            Err(e) => {
                tracing::error!("Error saving item: {}", e);
                self.notices.error("Error saving item");
                Err(e)
            }
        }
    }

    /// Optimistically drop the item, then delete it on the server. On
    /// failure the whole list is refetched instead of re-inserting the
    /// cached copy.
    pub async fn delete(&mut self, id: &str, confirmed: bool) -> ConsoleResult<()> {
        if !confirmed {
            return reject(&mut self.notices, "Deletion must be confirmed");
        }
        self.notices.clear();

        self.items.remove(id);

        match self.api.delete_item(id).await {
            Ok(()) => {
                self.notices.success("Item deleted");
                Ok(())
            }
            Err(e) => {
                tracing::error!("Error deleting item {}: {}", id, e);
                match self.api.list_items().await {
                    Ok(items) => self.items.replace_all(items),
                    Err(refetch) => tracing::error!("Refetch after failed delete failed: {}", refetch),
                }
                self.notices.error("Error deleting item");
                Err(e)
            }
        }
    }

    /// Ask the server to flip availability; the local copy only changes
    /// once the server confirms.
    pub async fn toggle_availability(&mut self, id: &str) -> ConsoleResult<Item> {
        self.notices.clear();
        let current = match self.items.get(id) {
            Some(item) => item.available,
            None => {
                self.notices.error("Item not loaded");
                return Err(ConsoleError::InvalidState(format!("item {} is not loaded", id)));
            }
        };

        match self.api.set_item_availability(id, !current).await {
            Ok(item) => {
                self.notices.success(if item.available {
                    "Item made available"
                } else {
                    "Item made unavailable"
                });
                self.items.replace(id, item.clone());
                Ok(item)
            }
            Err(e) => {
                tracing::error!("Error changing availability of {}: {}", id, e);
                self.notices.error("Error changing availability");
                Err(e)
            }
        }
    }
}
