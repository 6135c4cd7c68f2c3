//! Theme domain entity

use std::fmt;

use crate::domain::{DomainError, DomainResult};

pub const THEME_NAME_MAX_LENGTH: usize = 30;
pub const THEME_DESCRIPTION_MAX_LENGTH: usize = 255;

/// Persistence-assigned theme identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ThemeId(pub i32);

impl ThemeId {
    pub fn value(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for ThemeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for ThemeId {
    fn from(v: i32) -> Self {
        Self(v)
    }
}

/// Theme display name (non-blank, bounded)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ThemeName(String);

impl ThemeName {
    pub fn new(raw: impl Into<String>) -> DomainResult<Self> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DomainError::Validation("theme name must not be blank".into()));
        }
        if trimmed.chars().count() > THEME_NAME_MAX_LENGTH {
            return Err(DomainError::Validation(format!(
                "theme name must be at most {} characters",
                THEME_NAME_MAX_LENGTH
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

/// Theme description (non-blank, bounded)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ThemeDescription(String);

impl ThemeDescription {
    pub fn new(raw: impl Into<String>) -> DomainResult<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(DomainError::Validation(
                "theme description must not be blank".into(),
            ));
        }
        if raw.chars().count() > THEME_DESCRIPTION_MAX_LENGTH {
            return Err(DomainError::Validation(format!(
                "theme description must be at most {} characters",
                THEME_DESCRIPTION_MAX_LENGTH
            )));
        }
        Ok(Self(raw))
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

/// Escape room theme
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    id: Option<ThemeId>,
    name: ThemeName,
    description: ThemeDescription,
    thumbnail: String,
}

impl Theme {
    /// A theme that has not been persisted yet.
    pub fn new(name: ThemeName, description: ThemeDescription, thumbnail: impl Into<String>) -> Self {
        Self {
            id: None,
            name,
            description,
            thumbnail: thumbnail.into(),
        }
    }

    /// Validate raw input and build an unsaved theme.
    pub fn create(
        name: &str,
        description: &str,
        thumbnail: impl Into<String>,
    ) -> DomainResult<Self> {
        Ok(Self::new(
            ThemeName::new(name)?,
            ThemeDescription::new(description)?,
            thumbnail,
        ))
    }

    /// Rehydrate a persisted theme.
    pub fn of(
        id: ThemeId,
        name: ThemeName,
        description: ThemeDescription,
        thumbnail: impl Into<String>,
    ) -> Self {
        Self::new(name, description, thumbnail).with_id(id)
    }

    /// Copy of this theme carrying the persistence-assigned id.
    pub fn with_id(&self, id: ThemeId) -> Self {
        Self {
            id: Some(id),
            ..self.clone()
        }
    }

    pub fn id(&self) -> Option<ThemeId> {
        self.id
    }

    /// Id of a persisted theme; an unsaved theme is a validation failure.
    pub fn persisted_id(&self) -> DomainResult<ThemeId> {
        self.id
            .ok_or_else(|| DomainError::Validation("theme has not been saved".into()))
    }

    pub fn name(&self) -> &ThemeName {
        &self.name
    }

    pub fn description(&self) -> &ThemeDescription {
        &self.description
    }

    pub fn thumbnail(&self) -> &str {
        &self.thumbnail
    }
}
