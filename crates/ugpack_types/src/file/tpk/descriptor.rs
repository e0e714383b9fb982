//! Presentation metadata for editors.
//!
//! Codecs never consult these tables. They describe how an editing UI should
//! group and lock the fields of packs and slots.

use super::{pack::AnimationPack, slot::AnimSlot};

/// Display metadata for one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldDescriptor {
	/// Field name
	pub name: &'static str,
	/// Group the field is shown under
	pub category: &'static str,
	/// Whether the field is derived and must not be edited
	pub read_only: bool,
}

impl FieldDescriptor {
	const fn new(name: &'static str, category: &'static str, read_only: bool) -> Self {
		Self {
			name,
			category,
			read_only,
		}
	}
}

/// Fields of [`AnimSlot`].
pub const ANIM_SLOT_FIELDS: &[FieldDescriptor] = &[
	FieldDescriptor::new("name", "Main", false),
	FieldDescriptor::new("key", "Main", true),
	FieldDescriptor::new("frames_per_second", "Primary", false),
	FieldDescriptor::new("time_base", "Primary", false),
	FieldDescriptor::new("frame_textures", "Primary", false),
];

/// Fields of [`AnimationPack`].
pub const ANIMATION_PACK_FIELDS: &[FieldDescriptor] = &[
	FieldDescriptor::new("collection_name", "Main", false),
	FieldDescriptor::new("game", "Main", true),
	FieldDescriptor::new("version", "Main", false),
	FieldDescriptor::new("anim_slots", "Primary", false),
	FieldDescriptor::new("anim_slot_count", "Primary", true),
];

/// Distinct categories of `fields`, in first-appearance order.
pub fn categories(fields: &[FieldDescriptor]) -> Vec<&'static str> {
	let mut result = Vec::new();
	for field in fields {
		if !result.contains(&field.category) {
			result.push(field.category);
		}
	}
	result
}

/// Formats every field of `slot` next to its descriptor.
pub fn slot_fields(slot: &AnimSlot) -> Vec<(FieldDescriptor, String)> {
	ANIM_SLOT_FIELDS
		.iter()
		.map(|field| {
			let value = match field.name {
				"name" => slot.name().to_string(),
				"key" => format!("0x{:08X}", slot.key()),
				"frames_per_second" => slot.frames_per_second.to_string(),
				"time_base" => slot.time_base.to_string(),
				_ => slot
					.frame_textures
					.iter()
					.map(ToString::to_string)
					.collect::<Vec<_>>()
					.join(", "),
			};
			(*field, value)
		})
		.collect()
}

/// Formats every field of `pack` next to its descriptor.
pub fn pack_fields(pack: &AnimationPack) -> Vec<(FieldDescriptor, String)> {
	ANIMATION_PACK_FIELDS
		.iter()
		.map(|field| {
			let value = match field.name {
				"collection_name" => pack.collection_name().to_string(),
				"game" => pack.game().to_string(),
				"version" => pack.version().to_string(),
				"anim_slots" => {
					pack.slots().iter().map(AnimSlot::name).collect::<Vec<_>>().join(", ")
				}
				_ => pack.slot_count().to_string(),
			};
			(*field, value)
		})
		.collect()
}
