use serde::Serialize;

#[derive(Serialize, sqlx::FromRow)]
pub struct CategoryResponse {
    pub id: i64,
    pub name: String,
    pub sort_order: i32,
    /// The client must collect a free-text description before starting a
    /// session on this category.
    pub requires_description: bool,
}
