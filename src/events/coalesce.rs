//! # Batch coalescing.
//!
//! Collapses a drained batch into the events that actually need processing.
//!
//! ```text
//! batch:     A(1)  B  A(2)  C  A(3)        (A(n) == A(m) by key)
//! slots:     [A]   [B]             [C]
//!             ▲          │               │
//!             └── A(2) ──┘  A(3) ────────┘   (each merge overwrites A's slot)
//! result:    A(3)  B  C
//! ```
//!
//! ## Rules
//! - The map is keyed by event equality and remembers one representative per key.
//! - `representative.can_be_merged_with(&newer)` decides; the receiver is always
//!   the event already kept.
//! - On merge the newer event takes the representative's slot (not a new one at the end).
//! - On refusal the newer event gets its own slot; the representative is unchanged.

use std::collections::HashMap;

use crate::events::Event;

/// Returns the surviving events of `batch`, in slot order.
pub fn coalesce<E: Event>(batch: Vec<E>) -> Vec<E> {
    if batch.len() < 2 {
        return batch;
    }

    // order[slot] = index into batch
    let mut order: Vec<usize> = Vec::with_capacity(batch.len());
    {
        // key → slot of the current representative
        let mut seen: HashMap<&E, usize> = HashMap::with_capacity(batch.len());

        for (idx, event) in batch.iter().enumerate() {
            match seen.get(event).copied() {
                Some(slot) if batch[order[slot]].can_be_merged_with(event) => {
                    order[slot] = idx;
                }
                Some(_) => order.push(idx),
                None => {
                    seen.insert(event, order.len());
                    order.push(idx);
                }
            }
        }
    }

    let mut cells: Vec<Option<E>> = batch.into_iter().map(Some).collect();
    order
        .into_iter()
        .filter_map(|idx| cells[idx].take())
        .collect()
}
