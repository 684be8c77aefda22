//! Per-NPC skin-location cooldowns.
//!
//! Tracks, for each NPC, when the next custom skin-location change is allowed
//! and which location was submitted last.

use std::time::Duration;

use chrono::{DateTime, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::stores::profile::ProfileObserver;
use easynpc_domain::{NpcId, ProfileUpdate};

#[derive(Debug, Clone, PartialEq, Eq)]
struct CooldownEntry {
    next_allowed: DateTime<Utc>,
    last_location: String,
}

/// Why a skin-location change could not be reserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CooldownRejection {
    Throttled { remaining_secs: u64 },
    Unchanged,
}

/// A granted change. Hand it back to [`CooldownStore::release`] when the
/// change is not applied after all.
#[derive(Debug)]
#[must_use]
pub struct CooldownReservation {
    npc_id: NpcId,
    granted: CooldownEntry,
    previous: Option<CooldownEntry>,
}

pub struct CooldownStore {
    entries: DashMap<NpcId, CooldownEntry>,
    window: Duration,
}

impl CooldownStore {
    pub fn new(window: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            window,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Whole seconds until the next change is allowed, rounded up. Zero when
    /// no cooldown is active.
    pub fn remaining_secs(&self, npc_id: NpcId, now: DateTime<Utc>) -> u64 {
        self.entries
            .get(&npc_id)
            .map_or(0, |entry| Self::remaining(&entry, now))
    }

    fn remaining(entry: &CooldownEntry, now: DateTime<Utc>) -> u64 {
        let millis = entry.next_allowed.signed_duration_since(now).num_milliseconds();
        if millis <= 0 {
            0
        } else {
            (millis as u64).div_ceil(1000)
        }
    }

    fn entry_from(&self, location: String, now: DateTime<Utc>) -> CooldownEntry {
        let next_allowed = chrono::Duration::from_std(self.window)
            .ok()
            .and_then(|window| now.checked_add_signed(window))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        CooldownEntry {
            next_allowed,
            last_location: location,
        }
    }

    /// Check and start the cooldown in one step under the NPC's entry lock,
    /// so concurrent submissions for one NPC cannot both pass.
    ///
    /// `stored_location` stands in for the last submission when none was
    /// recorded yet.
    pub fn try_acquire(
        &self,
        npc_id: NpcId,
        location: &str,
        stored_location: &str,
        now: DateTime<Utc>,
    ) -> Result<CooldownReservation, CooldownRejection> {
        let granted = self.entry_from(location.to_string(), now);
        match self.entries.entry(npc_id) {
            Entry::Occupied(mut occupied) => {
                let remaining_secs = Self::remaining(occupied.get(), now);
                if remaining_secs > 0 {
                    return Err(CooldownRejection::Throttled { remaining_secs });
                }
                if occupied.get().last_location == location {
                    return Err(CooldownRejection::Unchanged);
                }
                let previous = occupied.insert(granted.clone());
                Ok(CooldownReservation {
                    npc_id,
                    granted,
                    previous: Some(previous),
                })
            }
            Entry::Vacant(vacant) => {
                if stored_location == location {
                    return Err(CooldownRejection::Unchanged);
                }
                vacant.insert(granted.clone());
                Ok(CooldownReservation {
                    npc_id,
                    granted,
                    previous: None,
                })
            }
        }
    }

    /// Undo a reservation whose change was not applied. Later reservations
    /// are left alone.
    pub fn release(&self, reservation: CooldownReservation) {
        let CooldownReservation {
            npc_id,
            granted,
            previous,
        } = reservation;
        if let Entry::Occupied(mut occupied) = self.entries.entry(npc_id) {
            if *occupied.get() != granted {
                return;
            }
            match previous {
                Some(previous) => {
                    occupied.insert(previous);
                }
                None => {
                    occupied.remove();
                }
            }
        }
    }

    pub fn last_location(&self, npc_id: NpcId) -> Option<String> {
        self.entries
            .get(&npc_id)
            .map(|entry| entry.last_location.clone())
    }

    /// Record an accepted change; the cooldown starts at `now`.
    pub fn record(&self, npc_id: NpcId, location: impl Into<String>, now: DateTime<Utc>) {
        let entry = self.entry_from(location.into(), now);
        self.entries.insert(npc_id, entry);
    }

    pub fn clear(&self, npc_id: NpcId) {
        self.entries.remove(&npc_id);
    }
}

impl ProfileObserver for CooldownStore {
    fn profile_updated(&self, _npc_id: NpcId, _update: &ProfileUpdate) {}

    fn profile_removed(&self, npc_id: NpcId) {
        self.clear(npc_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0)
            .single()
            .expect("valid timestamp")
    }

    #[test]
    fn no_entry_means_no_cooldown() {
        let store = CooldownStore::new(Duration::from_secs(20));
        assert_eq!(store.remaining_secs(NpcId::new(), at(0)), 0);
    }

    #[test]
    fn cooldown_counts_down_and_expires() {
        let store = CooldownStore::new(Duration::from_secs(20));
        let npc_id = NpcId::new();
        store.record(npc_id, "Notch", at(0));

        assert_eq!(store.remaining_secs(npc_id, at(0)), 20);
        assert_eq!(store.remaining_secs(npc_id, at(19)), 1);
        assert_eq!(store.remaining_secs(npc_id, at(20)), 0);
        assert_eq!(store.last_location(npc_id).as_deref(), Some("Notch"));
    }

    #[test]
    fn partial_seconds_round_up() {
        let store = CooldownStore::new(Duration::from_secs(20));
        let npc_id = NpcId::new();
        store.record(npc_id, "Notch", at(0));

        let now = at(5) + chrono::Duration::milliseconds(500);
        assert_eq!(store.remaining_secs(npc_id, now), 15);
    }

    #[test]
    fn cooldowns_are_per_npc() {
        let store = CooldownStore::new(Duration::from_secs(20));
        let first = NpcId::new();
        let second = NpcId::new();
        store.record(first, "Notch", at(0));

        assert_eq!(store.remaining_secs(second, at(1)), 0);
    }

    #[test]
    fn acquire_starts_cooldown_and_refuses_repeats() {
        let store = CooldownStore::new(Duration::from_secs(20));
        let npc_id = NpcId::new();

        assert_eq!(
            store.try_acquire(npc_id, "", "", at(0)).unwrap_err(),
            CooldownRejection::Unchanged
        );
        let _granted = store.try_acquire(npc_id, "Notch", "", at(0)).unwrap();
        assert_eq!(
            store.try_acquire(npc_id, "jeb_", "", at(3)).unwrap_err(),
            CooldownRejection::Throttled { remaining_secs: 17 }
        );
        assert_eq!(
            store.try_acquire(npc_id, "Notch", "", at(25)).unwrap_err(),
            CooldownRejection::Unchanged
        );
        assert!(store.try_acquire(npc_id, "jeb_", "", at(25)).is_ok());
    }

    #[test]
    fn release_restores_the_previous_state() {
        let store = CooldownStore::new(Duration::from_secs(20));
        let npc_id = NpcId::new();

        let first = store.try_acquire(npc_id, "Notch", "", at(0)).unwrap();
        store.release(first);
        assert_eq!(store.remaining_secs(npc_id, at(0)), 0);
        assert!(store.last_location(npc_id).is_none());

        store.record(npc_id, "Notch", at(0));
        let second = store.try_acquire(npc_id, "jeb_", "", at(30)).unwrap();
        store.release(second);
        assert_eq!(store.last_location(npc_id).as_deref(), Some("Notch"));
    }

    #[test]
    fn concurrent_acquires_grant_one_change() {
        let store = std::sync::Arc::new(CooldownStore::new(Duration::from_secs(20)));
        let npc_id = NpcId::new();

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = store.clone();
                std::thread::spawn(move || {
                    store
                        .try_acquire(npc_id, &format!("player_{i}"), "", at(0))
                        .is_ok()
                })
            })
            .collect();
        let granted = handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .filter(|granted| *granted)
            .count();
        assert_eq!(granted, 1);
    }

    #[test]
    fn removal_clears_cooldown() {
        let store = CooldownStore::new(Duration::from_secs(20));
        let npc_id = NpcId::new();
        store.record(npc_id, "Notch", at(0));

        store.profile_removed(npc_id);
        assert_eq!(store.remaining_secs(npc_id, at(1)), 0);
        assert!(store.last_location(npc_id).is_none());
    }
}
