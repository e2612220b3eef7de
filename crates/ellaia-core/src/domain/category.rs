use serde::{Deserialize, Serialize};

use crate::repository::{Entity, Patch};

/// Category entity. The slug is derived from the name on every write;
/// uniqueness is conventional, not enforced atomically.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub slug: String,
    pub name: String,
    pub description: String,
    pub color: String,
}

impl Entity for Category {
    const COLLECTION: &'static str = "categories";

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategory {
    pub name: String,
    pub description: String,
    pub color: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategory {
    pub name: Option<String>,
    pub description: Option<String>,
    pub color: Option<String>,
}

/// Merge-patch with the regenerated slug the service stamps alongside a
/// name change.
#[derive(Debug, Clone, Default)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub color: Option<String>,
}

impl Patch<Category> for CategoryPatch {
    fn apply(self, category: &mut Category) {
        if let Some(v) = self.name {
            category.name = v;
        }
        if let Some(v) = self.slug {
            category.slug = v;
        }
        if let Some(v) = self.description {
            category.description = v;
        }
        if let Some(v) = self.color {
            category.color = v;
        }
    }
}
