//! Game variants and the binary constants each one uses.
//!
//! Several games share the texture animation pack contract but may differ in
//! block ids and record sizes. A [`Layout`] value carries those constants so the
//! codecs are written once and parameterised per game.

use std::fmt::{Display, Formatter};

use crate::file::UgFileError;

/// Block tags of the texture animation pack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockIds {
	/// Outer pack block
	pub pack: u32,
	/// Pack header sub-block
	pub header: u32,
	/// Slot table sub-block
	pub slots: u32,
	/// Flat frame table sub-block
	pub frames: u32,
}

/// Binary constants of one game's texture animation pack layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Layout {
	/// Block tags
	pub block_ids: BlockIds,
	/// Payload size of the pack header sub-block
	pub header_size: usize,
	/// Size of one native slot record
	pub slot_size: usize,
	/// Width of the fixed name field inside a slot record
	pub slot_name_width: usize,
	/// Size of one frame table entry
	pub frame_entry_size: usize,
}

/// Texture animation pack layout of Need for Speed: Underground.
pub const UNDERGROUND1_LAYOUT: Layout = Layout {
	block_ids: BlockIds {
		pack: 0xB030_0100,
		header: 0x3030_0101,
		slots: 0x3030_0102,
		frames: 0x3030_0103,
	},
	header_size: 0x10,
	slot_size: 0x34,
	slot_name_width: 0x18,
	frame_entry_size: 0x10,
};

/// Game a pack belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u32)]
pub enum Game {
	/// Need for Speed: Underground
	#[default]
	Underground1 = 1,
}

impl Game {
	/// Every supported game.
	pub const ALL: [Game; 1] = [Game::Underground1];

	/// Numeric identifier stored in serialization headers.
	pub fn id(self) -> u32 {
		self as u32
	}

	/// Looks up a game by its numeric identifier.
	pub fn from_id(id: u32) -> Result<Self, UgFileError> {
		match id {
			1 => Ok(Game::Underground1),
			_ => Err(UgFileError::UnknownGame(id)),
		}
	}

	/// Binary constants used by this game.
	pub fn layout(self) -> &'static Layout {
		match self {
			Game::Underground1 => &UNDERGROUND1_LAYOUT,
		}
	}

	/// Short lowercase name, as used in configuration files.
	pub fn as_str(self) -> &'static str {
		match self {
			Game::Underground1 => "underground1",
		}
	}
}

impl Display for Game {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Game::Underground1 => write!(f, "Underground1"),
		}
	}
}

impl std::str::FromStr for Game {
	type Err = UgFileError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Game::ALL.into_iter().find(|game| game.as_str().eq_ignore_ascii_case(s)).ok_or_else(|| {
			UgFileError::validation(format!("unknown game '{s}'"))
		})
	}
}
