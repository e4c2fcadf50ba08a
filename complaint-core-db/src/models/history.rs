use chrono::{DateTime, Utc};
use heapless::String as HeaplessString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::utils::hash_as_i64;

/// Database model for one audit-trail entry of a complaint.
///
/// Entries form a hash chain: `hash` is the deterministic hash of the entry
/// with its own `hash` field zeroed, and `antecedent_hash` carries the hash
/// of the previous entry (0 for the initial "Created" entry). Every mutation
/// of a complaint appends exactly one entry in the same transaction as the
/// mutation, so the chain is both complete and tamper-evident.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntryModel {
    pub id: Uuid,

    /// Reference to the complaint this entry belongs to
    pub complaint_id: Uuid,

    /// Position within the complaint's trail, starting at 0
    pub seq: i32,

    /// Human-readable action label, e.g. "Status changed to Resolved"
    pub action: HeaplessString<100>,

    /// Identity of the actor that performed the mutation
    pub actor_id: Uuid,

    /// Free-text remark attached to the mutation, empty when none was given
    pub remark: String,

    pub recorded_at: DateTime<Utc>,

    /// Hash of the previous entry in the chain (0 for the initial entry)
    pub antecedent_hash: i64,

    /// Hash of this entry computed with this field set to 0
    pub hash: i64,
}

/// Violation detected while verifying a complaint's history chain.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChainViolation {
    #[error("history entry {seq} does not hash to its stored value")]
    TamperedEntry { seq: i32 },

    #[error("history entry {seq} does not link to its predecessor's hash")]
    BrokenLink { seq: i32 },

    #[error("history entry at position {position} carries sequence number {seq}")]
    OutOfOrder { position: usize, seq: i32 },

    #[error("history entry {seq} could not be hashed: {reason}")]
    Unhashable { seq: i32, reason: String },
}

impl HistoryEntryModel {
    /// Builds a sealed entry: assigns a fresh id, links `antecedent_hash` and
    /// computes `hash` over the finished entry.
    ///
    /// `recorded_at` is truncated to microseconds before hashing, since
    /// timestamptz columns keep no finer precision and the hash must be
    /// recomputable from a reloaded row.
    pub fn sealed(
        complaint_id: Uuid,
        seq: i32,
        action: &str,
        actor_id: Uuid,
        remark: &str,
        recorded_at: DateTime<Utc>,
        antecedent_hash: i64,
    ) -> Result<Self, String> {
        let action = HeaplessString::try_from(action)
            .map_err(|_| format!("action label exceeds 100 bytes: {action}"))?;
        let recorded_at = DateTime::from_timestamp_micros(recorded_at.timestamp_micros())
            .unwrap_or(recorded_at);

        let mut entry = HistoryEntryModel {
            id: Uuid::new_v4(),
            complaint_id,
            seq,
            action,
            actor_id,
            remark: remark.to_string(),
            recorded_at,
            antecedent_hash,
            hash: 0,
        };
        entry.hash = hash_as_i64(&entry)?;
        Ok(entry)
    }

    /// Recomputes the hash of this entry with the `hash` field zeroed.
    pub fn recompute_hash(&self) -> Result<i64, String> {
        let mut copy = self.clone();
        copy.hash = 0;
        hash_as_i64(&copy)
    }
}

/// Verifies an ordered history trail: sequence numbers are dense from 0,
/// each entry hashes to its stored value, and each entry links to the hash
/// of its predecessor (0 for the first).
pub fn verify_history_chain(entries: &[HistoryEntryModel]) -> Result<(), ChainViolation> {
    let mut antecedent = 0i64;
    for (position, entry) in entries.iter().enumerate() {
        if entry.seq != position as i32 {
            return Err(ChainViolation::OutOfOrder {
                position,
                seq: entry.seq,
            });
        }
        if entry.antecedent_hash != antecedent {
            return Err(ChainViolation::BrokenLink { seq: entry.seq });
        }
        let recomputed = entry
            .recompute_hash()
            .map_err(|reason| ChainViolation::Unhashable {
                seq: entry.seq,
                reason,
            })?;
        if recomputed != entry.hash {
            return Err(ChainViolation::TamperedEntry { seq: entry.seq });
        }
        antecedent = entry.hash;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trail(complaint_id: Uuid, actions: &[&str]) -> Vec<HistoryEntryModel> {
        let actor = Uuid::new_v4();
        let mut entries: Vec<HistoryEntryModel> = Vec::new();
        for (seq, action) in actions.iter().enumerate() {
            let antecedent = entries.last().map(|e| e.hash).unwrap_or(0);
            entries.push(
                HistoryEntryModel::sealed(
                    complaint_id,
                    seq as i32,
                    action,
                    actor,
                    "",
                    Utc::now(),
                    antecedent,
                )
                .unwrap(),
            );
        }
        entries
    }

    #[test]
    fn sealed_entries_form_a_valid_chain() {
        let entries = trail(
            Uuid::new_v4(),
            &["Created", "Status changed to In Progress", "Status changed to Resolved"],
        );
        assert_eq!(verify_history_chain(&entries), Ok(()));
    }

    #[test]
    fn edited_remark_is_detected() {
        let mut entries = trail(Uuid::new_v4(), &["Created", "Status changed to Resolved"]);
        entries[1].remark = "looks fine now".to_string();
        assert_eq!(
            verify_history_chain(&entries),
            Err(ChainViolation::TamperedEntry { seq: 1 })
        );
    }

    #[test]
    fn dropped_entry_breaks_the_link() {
        let mut entries = trail(
            Uuid::new_v4(),
            &["Created", "Status changed to In Progress", "Status changed to Resolved"],
        );
        entries.remove(1);
        entries[1].seq = 1;
        assert_eq!(
            verify_history_chain(&entries),
            Err(ChainViolation::BrokenLink { seq: 1 })
        );
    }

    #[test]
    fn sealing_survives_microsecond_truncation() {
        let entry = HistoryEntryModel::sealed(
            Uuid::new_v4(),
            0,
            "Created",
            Uuid::new_v4(),
            "Complaint filed",
            Utc::now(),
            0,
        )
        .unwrap();
        assert_eq!(entry.recompute_hash().unwrap(), entry.hash);
        assert_eq!(entry.recorded_at.timestamp_subsec_nanos() % 1000, 0);
    }
}
