//! Deadline timers checked once per step
//!
//! Waypoint waits and jump cooldowns are scheduled against wall-clock time,
//! not step count. Each entry carries the owner it belongs to and a
//! generational [`TimerId`]; owners keep the id they are waiting on and
//! ignore any fired id that does not match, so a reset entity never reacts
//! to a timer scheduled before the reset. Removing an entity cancels its
//! entries outright through [`Scheduler::cancel_owner`].

/// Simulation time in seconds
pub type SimTime = f64;

/// What a timer is for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Enemy pause at a waypoint
    WaypointWait,
    /// Player airborne window during which regrounding is suppressed
    JumpCooldown,
}

/// Identifies one scheduled entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId {
    slot: u32,
    generation: u32,
}

/// A timer whose deadline has passed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FiredTimer<K> {
    pub id: TimerId,
    pub owner: K,
    pub kind: TimerKind,
    pub deadline: SimTime,
}

#[derive(Debug, Clone, Copy)]
struct Pending<K> {
    owner: K,
    kind: TimerKind,
    deadline: SimTime,
}

#[derive(Debug)]
struct Entry<K> {
    generation: u32,
    pending: Option<Pending<K>>,
}

/// Deadline scheduler keyed by owner
#[derive(Debug)]
pub struct Scheduler<K> {
    entries: Vec<Entry<K>>,
    free: Vec<u32>,
}

impl<K: Copy + PartialEq> Scheduler<K> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            free: Vec::new(),
        }
    }

    /// Schedule a timer at an absolute deadline
    pub fn schedule(&mut self, owner: K, kind: TimerKind, deadline: SimTime) -> TimerId {
        let pending = Some(Pending {
            owner,
            kind,
            deadline,
        });

        if let Some(slot) = self.free.pop() {
            let entry = &mut self.entries[slot as usize];
            entry.pending = pending;
            return TimerId {
                slot,
                generation: entry.generation,
            };
        }

        let slot = self.entries.len() as u32;
        self.entries.push(Entry {
            generation: 0,
            pending,
        });
        TimerId {
            slot,
            generation: 0,
        }
    }

    /// Schedule a timer `delay` seconds after `now`
    pub fn schedule_after(&mut self, owner: K, kind: TimerKind, now: SimTime, delay: f64) -> TimerId {
        self.schedule(owner, kind, now + delay.max(0.0))
    }

    /// Cancel a pending timer. Returns `false` if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        match self.entries.get(id.slot as usize) {
            Some(entry) if entry.generation == id.generation && entry.pending.is_some() => {
                self.release(id.slot);
                true
            }
            _ => false,
        }
    }

    /// Cancel every pending timer owned by `owner`
    pub fn cancel_owner(&mut self, owner: K) -> usize {
        let slots: Vec<u32> = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.pending.map(|p| p.owner == owner).unwrap_or(false))
            .map(|(i, _)| i as u32)
            .collect();

        for &slot in &slots {
            self.release(slot);
        }
        slots.len()
    }

    /// Whether `id` is still waiting to fire
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.entries
            .get(id.slot as usize)
            .map(|e| e.generation == id.generation && e.pending.is_some())
            .unwrap_or(false)
    }

    pub fn pending_count(&self) -> usize {
        self.entries.iter().filter(|e| e.pending.is_some()).count()
    }

    /// Remove and return every timer due at `now`, earliest deadline first
    pub fn poll(&mut self, now: SimTime) -> Vec<FiredTimer<K>> {
        let mut fired = Vec::new();

        for (slot, entry) in self.entries.iter().enumerate() {
            if let Some(p) = entry.pending {
                if p.deadline <= now {
                    fired.push(FiredTimer {
                        id: TimerId {
                            slot: slot as u32,
                            generation: entry.generation,
                        },
                        owner: p.owner,
                        kind: p.kind,
                        deadline: p.deadline,
                    });
                }
            }
        }

        for timer in &fired {
            self.release(timer.id.slot);
        }

        fired.sort_by(|a, b| a.deadline.total_cmp(&b.deadline));
        fired
    }

    fn release(&mut self, slot: u32) {
        let entry = &mut self.entries[slot as usize];
        entry.pending = None;
        entry.generation = entry.generation.wrapping_add(1);
        self.free.push(slot);
    }
}

impl<K: Copy + PartialEq> Default for Scheduler<K> {
    fn default() -> Self {
        Self::new()
    }
}
