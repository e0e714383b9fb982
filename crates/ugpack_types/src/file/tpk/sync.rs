//! Merging of slot lists on reimport.

use std::collections::HashSet;

use super::{pack::AnimationPack, slot::AnimSlot};

/// Merges two slot lists by key.
///
/// The result holds every `incoming` slot in its original order, followed by
/// the `local` slots whose key does not occur in `incoming`, in `local` order.
/// Slots are matched on key only, not on content.
///
/// ```
/// use ugpack_types::file::tpk::{AnimSlot, synchronize};
///
/// let local = vec![AnimSlot::new("fire").unwrap(), AnimSlot::new("smoke").unwrap()];
/// let incoming = vec![AnimSlot::new("smoke").unwrap()];
///
/// let merged = synchronize(&local, &incoming);
/// let names: Vec<_> = merged.iter().map(AnimSlot::name).collect();
/// assert_eq!(names, ["smoke", "fire"]);
/// ```
pub fn synchronize(local: &[AnimSlot], incoming: &[AnimSlot]) -> Vec<AnimSlot> {
	let incoming_keys: HashSet<u32> = incoming.iter().map(AnimSlot::key).collect();

	let mut merged = incoming.to_vec();
	merged.extend(local.iter().filter(|slot| !incoming_keys.contains(&slot.key())).cloned());
	merged
}

impl AnimationPack {
	/// Replaces this pack's slots with `other`'s, keeping local-only slots at the end.
	pub fn synchronize(&mut self, other: &AnimationPack) {
		let merged = synchronize(self.slots(), other.slots());
		*self.slots_mut() = merged;
	}
}
