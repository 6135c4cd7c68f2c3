//! Non-relational storage implementations

mod memory;

pub use memory::{
    InMemoryRepositoryProvider, InMemoryReservationRepository, InMemoryReservationTimeRepository,
    InMemoryThemeRepository,
};
