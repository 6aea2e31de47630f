use std::collections::HashSet;

use crate::model::{ContactRecord, NameCandidate, PhoneCandidate};

/// Tuning for [`associate`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AssociationParams {
    /// A name line may sit at most this far above its phone line.
    pub max_gap: f64,
    /// Name-line positions are bucketed to multiples of this when checking reuse.
    pub collision_bucket: f64,
}

impl Default for AssociationParams {
    fn default() -> Self {
        AssociationParams {
            max_gap: 170.0,
            collision_bucket: 5.0,
        }
    }
}

/// Bucket a name line's position. Halves round to even.
fn collision_key(center_y: f64, bucket: f64) -> i64 {
    (center_y / bucket).round_ties_even() as i64
}

/// Pair each phone with a name line above it.
///
/// Candidates are names at or above the phone and within `max_gap`. Strong
/// names beat weak ones; among equals the closest wins. If the winner's line
/// was already claimed by an earlier phone and another candidate exists, the
/// runner-up is taken instead. A lone candidate is reused rather than
/// dropping the phone. Phones with no candidate produce nothing.
pub fn associate(
    phones: &[PhoneCandidate],
    names: &[NameCandidate],
    params: &AssociationParams,
) -> Vec<ContactRecord> {
    let mut used: HashSet<i64> = HashSet::new();
    let mut contacts = Vec::new();

    for phone in phones {
        let mut candidates: Vec<&NameCandidate> = names
            .iter()
            .filter(|n| {
                n.center_y <= phone.center_y && phone.center_y - n.center_y <= params.max_gap
            })
            .collect();

        if candidates.is_empty() {
            tracing::debug!(phone = %phone.phone, y = phone.center_y, "no name line above phone");
            continue;
        }

        candidates.sort_by(|a, b| {
            a.strength.cmp(&b.strength).then_with(|| {
                let gap_a = phone.center_y - a.center_y;
                let gap_b = phone.center_y - b.center_y;
                gap_a.total_cmp(&gap_b)
            })
        });

        let mut chosen = candidates[0];
        let mut key = collision_key(chosen.center_y, params.collision_bucket);
        if used.contains(&key) && candidates.len() > 1 {
            chosen = candidates[1];
            key = collision_key(chosen.center_y, params.collision_bucket);
        }
        used.insert(key);

        contacts.push(ContactRecord {
            name: chosen.name.clone(),
            phone: phone.phone.clone(),
        });
    }

    contacts
}
