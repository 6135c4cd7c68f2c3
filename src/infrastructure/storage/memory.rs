//! In-memory repositories for development and testing
//!
//! Reservations store only the ids of their theme and time and are hydrated
//! on read. Every mutation runs under one write lock, so check-then-act
//! sequences (slot uniqueness, referential checks on delete) are atomic.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tokio::sync::Mutex;

use crate::domain::{
    BookingSlot, ClientName, ConflictKind, DomainError, DomainResult, EntityKind,
    RepositoryProvider, Reservation, ReservationDate, ReservationId, ReservationRepository,
    ReservationTime, ReservationTimeRepository, Theme, ThemeId, ThemeRepository, TimeId,
};

#[derive(Debug, Clone)]
struct ReservationRow {
    client_name: ClientName,
    date: ReservationDate,
    time_id: TimeId,
    theme_id: ThemeId,
}

#[derive(Default)]
struct MemoryTables {
    themes: DashMap<ThemeId, Theme>,
    times: DashMap<TimeId, ReservationTime>,
    reservations: DashMap<ReservationId, ReservationRow>,
    /// Unique (date, time, theme) index
    slots: DashMap<BookingSlot, ReservationId>,
    theme_counter: AtomicI32,
    time_counter: AtomicI32,
    reservation_counter: AtomicI32,
    write_lock: Mutex<()>,
}

impl MemoryTables {
    fn hydrate(&self, id: ReservationId, row: &ReservationRow) -> DomainResult<Reservation> {
        let time = self
            .times
            .get(&row.time_id)
            .map(|t| t.clone())
            .ok_or_else(|| dangling(id, EntityKind::Time))?;
        let theme = self
            .themes
            .get(&row.theme_id)
            .map(|t| t.clone())
            .ok_or_else(|| dangling(id, EntityKind::Theme))?;
        Reservation::of(id, row.client_name.clone(), row.date, time, theme)
    }

    fn rows_matching(
        &self,
        filter: impl Fn(&ReservationRow) -> bool,
    ) -> Vec<(ReservationId, ReservationRow)> {
        let mut rows: Vec<_> = self
            .reservations
            .iter()
            .filter(|e| filter(e.value()))
            .map(|e| (*e.key(), e.value().clone()))
            .collect();
        rows.sort_by_key(|(id, _)| *id);
        rows
    }

    fn any_row(&self, filter: impl Fn(&ReservationRow) -> bool) -> bool {
        self.reservations.iter().any(|e| filter(e.value()))
    }
}

fn dangling(id: ReservationId, kind: EntityKind) -> DomainError {
    DomainError::Storage(format!(
        "reservation {} references a missing {}",
        id, kind
    ))
}

fn next_id(counter: &AtomicI32) -> i32 {
    counter.fetch_add(1, Ordering::SeqCst) + 1
}

// ── Reservations ────────────────────────────────────────────────

pub struct InMemoryReservationRepository {
    tables: Arc<MemoryTables>,
}

#[async_trait]
impl ReservationRepository for InMemoryReservationRepository {
    async fn find_all(&self) -> DomainResult<Vec<Reservation>> {
        self.tables
            .rows_matching(|_| true)
            .iter()
            .map(|(id, row)| self.tables.hydrate(*id, row))
            .collect()
    }

    async fn find_by_id(&self, id: ReservationId) -> DomainResult<Option<Reservation>> {
        let row = self.tables.reservations.get(&id).map(|r| r.clone());
        row.map(|row| self.tables.hydrate(id, &row)).transpose()
    }

    async fn find_all_by_date_and_theme(
        &self,
        date: NaiveDate,
        theme_id: ThemeId,
    ) -> DomainResult<Vec<Reservation>> {
        self.tables
            .rows_matching(|r| r.date.value() == date && r.theme_id == theme_id)
            .iter()
            .map(|(id, row)| self.tables.hydrate(*id, row))
            .collect()
    }

    async fn exists_by_date_and_time_and_theme(
        &self,
        date: NaiveDate,
        time_id: TimeId,
        theme_id: ThemeId,
    ) -> DomainResult<bool> {
        Ok(self.tables.slots.contains_key(&BookingSlot {
            date,
            time_id,
            theme_id,
        }))
    }

    async fn exists_by_time_id(&self, time_id: TimeId) -> DomainResult<bool> {
        Ok(self.tables.any_row(|r| r.time_id == time_id))
    }

    async fn exists_by_theme_id(&self, theme_id: ThemeId) -> DomainResult<bool> {
        Ok(self.tables.any_row(|r| r.theme_id == theme_id))
    }

    async fn save(&self, reservation: Reservation) -> DomainResult<Reservation> {
        let _guard = self.tables.write_lock.lock().await;

        let slot = reservation.slot();
        if !self.tables.times.contains_key(&slot.time_id) {
            return Err(DomainError::not_found(EntityKind::Time, slot.time_id));
        }
        if !self.tables.themes.contains_key(&slot.theme_id) {
            return Err(DomainError::not_found(EntityKind::Theme, slot.theme_id));
        }

        let id = match self.tables.slots.entry(slot) {
            Entry::Occupied(_) => {
                return Err(DomainError::Conflict(ConflictKind::DuplicateBooking));
            }
            Entry::Vacant(vacant) => {
                let id = ReservationId(next_id(&self.tables.reservation_counter));
                vacant.insert(id);
                id
            }
        };

        self.tables.reservations.insert(
            id,
            ReservationRow {
                client_name: reservation.client_name().clone(),
                date: reservation.date(),
                time_id: slot.time_id,
                theme_id: slot.theme_id,
            },
        );
        Ok(reservation.with_id(id))
    }

    async fn delete_by_id(&self, id: ReservationId) -> DomainResult<bool> {
        let _guard = self.tables.write_lock.lock().await;

        let Some((_, row)) = self.tables.reservations.remove(&id) else {
            return Ok(false);
        };
        self.tables.slots.remove(&BookingSlot {
            date: row.date.value(),
            time_id: row.time_id,
            theme_id: row.theme_id,
        });
        Ok(true)
    }
}

// ── Themes ──────────────────────────────────────────────────────

pub struct InMemoryThemeRepository {
    tables: Arc<MemoryTables>,
}

#[async_trait]
impl ThemeRepository for InMemoryThemeRepository {
    async fn find_by_id(&self, id: ThemeId) -> DomainResult<Option<Theme>> {
        Ok(self.tables.themes.get(&id).map(|t| t.clone()))
    }

    async fn find_all(&self) -> DomainResult<Vec<Theme>> {
        let mut themes: Vec<Theme> = self.tables.themes.iter().map(|t| t.clone()).collect();
        themes.sort_by_key(|t| t.id());
        Ok(themes)
    }

    async fn exists_by_id(&self, id: ThemeId) -> DomainResult<bool> {
        Ok(self.tables.themes.contains_key(&id))
    }

    async fn save(&self, theme: Theme) -> DomainResult<Theme> {
        let _guard = self.tables.write_lock.lock().await;
        let id = ThemeId(next_id(&self.tables.theme_counter));
        let saved = theme.with_id(id);
        self.tables.themes.insert(id, saved.clone());
        Ok(saved)
    }

    async fn delete_by_id(&self, id: ThemeId) -> DomainResult<bool> {
        let _guard = self.tables.write_lock.lock().await;

        if !self.tables.themes.contains_key(&id) {
            return Ok(false);
        }
        if self.tables.any_row(|r| r.theme_id == id) {
            return Err(DomainError::Conflict(ConflictKind::ThemeInUse));
        }
        Ok(self.tables.themes.remove(&id).is_some())
    }

    async fn find_popular_themes(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        limit: u64,
    ) -> DomainResult<Vec<Theme>> {
        let mut counts: HashMap<ThemeId, u64> = HashMap::new();
        for row in self.tables.reservations.iter() {
            let date = row.date.value();
            if date >= start && date <= end {
                *counts.entry(row.theme_id).or_default() += 1;
            }
        }

        let mut ranked: Vec<(ThemeId, u64)> = counts.into_iter().collect();
        ranked.sort_by(|(a_id, a_count), (b_id, b_count)| {
            b_count.cmp(a_count).then_with(|| a_id.cmp(b_id))
        });

        Ok(ranked
            .into_iter()
            .filter_map(|(id, _)| self.tables.themes.get(&id).map(|t| t.clone()))
            .take(limit as usize)
            .collect())
    }
}

// ── Reservation times ───────────────────────────────────────────

pub struct InMemoryReservationTimeRepository {
    tables: Arc<MemoryTables>,
}

#[async_trait]
impl ReservationTimeRepository for InMemoryReservationTimeRepository {
    async fn find_by_id(&self, id: TimeId) -> DomainResult<Option<ReservationTime>> {
        Ok(self.tables.times.get(&id).map(|t| t.clone()))
    }

    async fn find_all(&self) -> DomainResult<Vec<ReservationTime>> {
        let mut times: Vec<ReservationTime> =
            self.tables.times.iter().map(|t| t.clone()).collect();
        times.sort_by_key(|t| (t.start_at(), t.id()));
        Ok(times)
    }

    async fn exists_by_id(&self, id: TimeId) -> DomainResult<bool> {
        Ok(self.tables.times.contains_key(&id))
    }

    async fn exists_by_start_at(&self, start_at: NaiveTime) -> DomainResult<bool> {
        Ok(self.tables.times.iter().any(|t| t.start_at() == start_at))
    }

    async fn save(&self, time: ReservationTime) -> DomainResult<ReservationTime> {
        let _guard = self.tables.write_lock.lock().await;

        if self.tables.times.iter().any(|t| t.start_at() == time.start_at()) {
            return Err(DomainError::Conflict(ConflictKind::DuplicateTime));
        }
        let id = TimeId(next_id(&self.tables.time_counter));
        let saved = time.with_id(id);
        self.tables.times.insert(id, saved.clone());
        Ok(saved)
    }

    async fn delete_by_id(&self, id: TimeId) -> DomainResult<bool> {
        let _guard = self.tables.write_lock.lock().await;

        if !self.tables.times.contains_key(&id) {
            return Ok(false);
        }
        if self.tables.any_row(|r| r.time_id == id) {
            return Err(DomainError::Conflict(ConflictKind::TimeInUse));
        }
        Ok(self.tables.times.remove(&id).is_some())
    }
}

// ── Provider ────────────────────────────────────────────────────

/// Repository provider backed by process memory.
pub struct InMemoryRepositoryProvider {
    reservations: InMemoryReservationRepository,
    themes: InMemoryThemeRepository,
    times: InMemoryReservationTimeRepository,
}

impl InMemoryRepositoryProvider {
    pub fn new() -> Self {
        let tables = Arc::new(MemoryTables::default());
        Self {
            reservations: InMemoryReservationRepository {
                tables: tables.clone(),
            },
            themes: InMemoryThemeRepository {
                tables: tables.clone(),
            },
            times: InMemoryReservationTimeRepository { tables },
        }
    }
}

impl Default for InMemoryRepositoryProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl RepositoryProvider for InMemoryRepositoryProvider {
    fn reservations(&self) -> &dyn ReservationRepository {
        &self.reservations
    }

    fn themes(&self) -> &dyn ThemeRepository {
        &self.themes
    }

    fn times(&self) -> &dyn ReservationTimeRepository {
        &self.times
    }
}
