//! Item (lendable asset) model and form types

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::enums::ItemKind;
use super::Identified;

/// Item as returned by the loan service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "tipo")]
    pub kind: ItemKind,
    #[serde(rename = "disponivel")]
    pub available: bool,
    #[serde(rename = "localizacao")]
    pub location: String,
}

impl Identified for Item {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Create/update item request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ItemForm {
    #[serde(rename = "nome")]
    #[validate(length(min = 1, message = "Item name is required"))]
    pub name: String,
    #[serde(rename = "tipo")]
    pub kind: ItemKind,
    #[serde(rename = "disponivel")]
    pub available: bool,
    #[serde(rename = "localizacao")]
    #[validate(length(min = 1, message = "Location is required"))]
    pub location: String,
}

impl Default for ItemForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            kind: ItemKind::Key,
            available: true,
            location: String::new(),
        }
    }
}

impl ItemForm {
    pub fn normalized(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            kind: self.kind,
            available: self.available,
            location: self.location.trim().to_string(),
        }
    }
}

impl From<&Item> for ItemForm {
    fn from(item: &Item) -> Self {
        Self {
            name: item.name.clone(),
            kind: item.kind,
            available: item.available,
            location: item.location.clone(),
        }
    }
}
