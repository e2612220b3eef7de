use serde::{Deserialize, Serialize};

use crate::repository::{Entity, Patch};

/// Tag entity. The slug doubles as the case/whitespace-insensitive
/// identity used for deduplication.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub id: String,
    pub slug: String,
    pub name: String,
}

impl Entity for Tag {
    const COLLECTION: &'static str = "tags";

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTag {
    pub name: String,
}

/// Merge-patch with the regenerated slug stamped alongside a rename.
#[derive(Debug, Clone, Default)]
pub struct TagPatch {
    pub name: Option<String>,
    pub slug: Option<String>,
}

impl Patch<Tag> for TagPatch {
    fn apply(self, tag: &mut Tag) {
        if let Some(v) = self.name {
            tag.name = v;
        }
        if let Some(v) = self.slug {
            tag.slug = v;
        }
    }
}
