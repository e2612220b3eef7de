//! Entity services: domain queries and convenience writes composed from
//! generic repository calls plus in-memory transformation. Query logic
//! never reaches the store adapter - it runs over the full in-memory set.

mod authors;
mod categories;
mod comments;
mod contact;
mod posts;
mod tags;

pub use authors::AuthorsService;
pub use categories::CategoriesService;
pub use comments::CommentsService;
pub use contact::ContactService;
pub use posts::PostsService;
pub use tags::TagsService;

/// Loading-registry key for a service operation, `operation_entity` or
/// `operation_entity_id`.
pub(crate) fn loading_key(operation: &str, entity: &str, id: Option<&str>) -> String {
    match id {
        Some(id) => format!("{operation}_{entity}_{id}"),
        None => format!("{operation}_{entity}"),
    }
}
