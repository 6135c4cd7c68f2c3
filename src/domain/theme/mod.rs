//! Theme aggregate

pub mod model;
pub mod repository;

pub use model::{Theme, ThemeDescription, ThemeId, ThemeName};
pub use repository::ThemeRepository;
