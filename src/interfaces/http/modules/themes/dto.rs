//! Theme DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::Theme;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ThemeDto {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub thumbnail: String,
}

impl From<&Theme> for ThemeDto {
    fn from(t: &Theme) -> Self {
        Self {
            id: t.id().map(|id| id.value()).unwrap_or_default(),
            name: t.name().value().to_string(),
            description: t.description().value().to_string(),
            thumbnail: t.thumbnail().to_string(),
        }
    }
}

/// Request to register a new theme
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateThemeRequest {
    /// Display name, at most 30 characters
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[validate(length(min = 1, message = "description must not be empty"))]
    pub description: String,
    /// Image URL
    #[serde(default)]
    pub thumbnail: String,
}
