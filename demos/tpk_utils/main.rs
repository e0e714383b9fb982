//! TPK animation pack utility.
//!
//! Provides the following subcommands:
//! - `inspect`: summarize a native animation pack block, grouped by field category.
//! - `export`: dump a native animation pack as JSON.
//! - `pack` / `unpack`: convert between the native block and the serialized form.
//! - `sync`: merge the slots of one native pack into another.
//! - `charset`: encode or decode text with a charset file.
//!
//! Settings are read from `ugpack.toml` (or `--config`) and `UGPACK_*`
//! environment variables, e.g. `UGPACK_DICTIONARY=names.txt`.

use std::{
	fs,
	io::{BufReader, Cursor},
	path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use serde::Deserialize;
use ugpack_rs::prelude::{
	AnimationPack, Charset, Game, KeyDictionary,
	file::tpk::descriptor::{self, FieldDescriptor},
};

fn main() -> Result<()> {
	env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

	let cli = Cli::parse();
	let settings = Settings::load(cli.config.as_deref())?;
	match cli.command {
		Command::Inspect(opts) => run_inspect(&settings, opts),
		Command::Export(opts) => run_export(&settings, opts),
		Command::Pack(opts) => run_pack(&settings, opts),
		Command::Unpack(opts) => run_unpack(&settings, opts),
		Command::Sync(opts) => run_sync(&settings, opts),
		Command::Charset(opts) => run_charset(&settings, opts),
	}
}

#[derive(Parser)]
#[command(name = "tpk_utils")]
#[command(author = "ugpack-rs project")]
#[command(version)]
#[command(about = "Inspect and convert TPK texture animation packs", long_about = None)]
struct Cli {
	/// Settings file (TOML), defaults to `ugpack.toml` when present
	#[arg(short, long, global = true, value_name = "FILE")]
	config: Option<PathBuf>,

	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand)]
enum Command {
	/// Print a summary of a native animation pack block
	Inspect(InspectArgs),
	/// Dump a native animation pack block as JSON
	Export(ExportArgs),
	/// Convert a native pack block into the serialized form
	Pack(ConvertArgs),
	/// Convert a serialized pack back into a native block
	Unpack(ConvertArgs),
	/// Merge the slots of an incoming native pack into a local one
	Sync(SyncArgs),
	/// Encode or decode text with a charset file
	Charset(CharsetArgs),
}

#[derive(Args)]
struct InspectArgs {
	/// Native animation pack block
	#[arg(value_name = "FILE")]
	file: PathBuf,

	/// Only show the slot with this name
	#[arg(short, long, value_name = "NAME")]
	slot: Option<String>,

	/// List every frame texture of each slot
	#[arg(short, long, default_value_t = false)]
	verbose: bool,
}

#[derive(Args)]
struct ExportArgs {
	/// Native animation pack block
	#[arg(value_name = "FILE")]
	file: PathBuf,

	/// Output JSON file, stdout when omitted
	#[arg(short, long, value_name = "FILE")]
	output: Option<PathBuf>,
}

#[derive(Args)]
struct ConvertArgs {
	/// Input file
	#[arg(value_name = "FILE")]
	file: PathBuf,

	/// Output file
	#[arg(short, long, value_name = "FILE")]
	output: PathBuf,
}

#[derive(Args)]
struct SyncArgs {
	/// Native pack block receiving the slots
	#[arg(value_name = "LOCAL")]
	local: PathBuf,

	/// Native pack block providing the slots
	#[arg(value_name = "INCOMING")]
	incoming: PathBuf,

	/// Output file, overwrites LOCAL when omitted
	#[arg(short, long, value_name = "FILE")]
	output: Option<PathBuf>,
}

#[derive(Args)]
struct CharsetArgs {
	/// Charset file, overrides the `charset` setting
	#[arg(long, value_name = "FILE")]
	file: Option<PathBuf>,

	#[command(subcommand)]
	action: CharsetAction,
}

#[derive(Subcommand)]
enum CharsetAction {
	/// Encode text and print the bytes as hex
	Encode {
		/// Text to encode
		text: String,
	},
	/// Decode hex bytes into text
	Decode {
		/// Hex encoded bytes
		hex: String,
	},
}

/// Settings shared by all subcommands.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Settings {
	/// Game whose layout is used (`underground1`)
	game: Option<String>,
	/// Name list used to resolve frame keys, one name per line
	dictionary: Option<PathBuf>,
	/// Default charset file
	charset: Option<PathBuf>,
}

impl Settings {
	fn load(path: Option<&Path>) -> Result<Self> {
		let file = match path {
			Some(path) => config::File::from(path).required(true),
			None => config::File::new("ugpack.toml", config::FileFormat::Toml).required(false),
		};

		let settings = config::Config::builder()
			.add_source(file)
			.add_source(config::Environment::with_prefix("UGPACK"))
			.build()
			.context("Failed to load settings")?
			.try_deserialize()
			.context("Invalid settings")?;
		log::debug!("Settings: {settings:?}");
		Ok(settings)
	}

	fn game(&self) -> Result<Game> {
		match self.game.as_deref() {
			Some(name) => Ok(name.parse()?),
			None => Ok(Game::default()),
		}
	}

	fn dictionary(&self) -> Result<KeyDictionary> {
		let Some(path) = &self.dictionary else {
			return Ok(KeyDictionary::new());
		};
		let file = fs::File::open(path)
			.with_context(|| format!("Failed to open dictionary {}", path.display()))?;
		let dict = KeyDictionary::load_lines(BufReader::new(file))?;
		log::info!("Loaded {} names from {}", dict.len(), path.display());
		Ok(dict)
	}
}

fn collection_name(path: &Path) -> String {
	path.file_stem().map(|stem| stem.to_string_lossy().into_owned()).unwrap_or_default()
}

fn read_native(settings: &Settings, path: &Path) -> Result<AnimationPack> {
	let data = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
	let dict = settings.dictionary()?;

	let mut pack = AnimationPack::with_game(collection_name(path), settings.game()?);
	pack.disassemble(&mut Cursor::new(data), &dict)
		.with_context(|| format!("Failed to parse animation pack {}", path.display()))?;
	Ok(pack)
}

fn write_file(path: &Path, data: &[u8]) -> Result<()> {
	fs::write(path, data).with_context(|| format!("Failed to write {}", path.display()))?;
	log::info!("Wrote {} bytes to {}", data.len(), path.display());
	Ok(())
}

fn print_fields(fields: &[(FieldDescriptor, String)], table: &[FieldDescriptor], indent: &str) {
	for category in descriptor::categories(table) {
		println!("{indent}[{category}]");
		for (field, value) in fields.iter().filter(|(field, _)| field.category == category) {
			let marker = if field.read_only {
				" (read-only)"
			} else {
				""
			};
			println!("{indent}  {:<16} {value}{marker}", field.name);
		}
	}
}

fn run_inspect(settings: &Settings, args: InspectArgs) -> Result<()> {
	let pack = read_native(settings, &args.file)?;

	println!("File: {}", args.file.display());
	println!("{pack}");
	print_fields(&descriptor::pack_fields(&pack), descriptor::ANIMATION_PACK_FIELDS, "");

	let slots: Vec<_> = match &args.slot {
		Some(name) => pack.slots().iter().filter(|slot| slot.name() == name).collect(),
		None => pack.slots().iter().collect(),
	};
	if slots.is_empty() {
		println!("No matching slots found.");
		return Ok(());
	}

	for (index, slot) in slots.into_iter().enumerate() {
		println!();
		println!("Slot #{index}: {slot} ({} frames)", slot.frame_count());
		print_fields(&descriptor::slot_fields(slot), descriptor::ANIM_SLOT_FIELDS, "  ");
		if args.verbose {
			for (frame_index, frame) in slot.frame_textures.iter().enumerate() {
				println!("    {frame_index:>3}: {frame}");
			}
		}
	}

	Ok(())
}

fn run_export(settings: &Settings, args: ExportArgs) -> Result<()> {
	let pack = read_native(settings, &args.file)?;
	let json = serde_json::to_string_pretty(&pack)?;
	match args.output {
		Some(path) => write_file(&path, json.as_bytes()),
		None => {
			println!("{json}");
			Ok(())
		}
	}
}

fn run_pack(settings: &Settings, args: ConvertArgs) -> Result<()> {
	let pack = read_native(settings, &args.file)?;
	let mut out = Vec::new();
	pack.serialize(&mut out)?;
	write_file(&args.output, &out)
}

fn run_unpack(settings: &Settings, args: ConvertArgs) -> Result<()> {
	let data = fs::read(&args.file)
		.with_context(|| format!("Failed to read {}", args.file.display()))?;
	let dict = settings.dictionary()?;

	let mut pack = AnimationPack::with_game(collection_name(&args.file), settings.game()?);
	pack.deserialize_with_header(&mut data.as_slice(), &dict)
		.with_context(|| format!("Failed to deserialize {}", args.file.display()))?;
	write_file(&args.output, &pack.to_bytes()?)
}

fn run_sync(settings: &Settings, args: SyncArgs) -> Result<()> {
	let mut local = read_native(settings, &args.local)?;
	let incoming = read_native(settings, &args.incoming)?;
	if local.game() != incoming.game() {
		bail!("Cannot merge packs of different games");
	}

	let before = local.slot_count();
	local.synchronize(&incoming);
	log::info!(
		"Merged {} into {}: {} slots before, {} after",
		args.incoming.display(),
		args.local.display(),
		before,
		local.slot_count()
	);

	let output = args.output.unwrap_or(args.local);
	write_file(&output, &local.to_bytes()?)
}

fn run_charset(settings: &Settings, args: CharsetArgs) -> Result<()> {
	let Some(path) = args.file.or_else(|| settings.charset.clone()) else {
		bail!("No charset file given, pass --file or set `charset`");
	};
	let data = fs::read(&path).with_context(|| format!("Failed to read {}", path.display()))?;
	let charset = Charset::from_bytes(&data)?;
	log::debug!("Charset {}: {charset}", path.display());

	match args.action {
		CharsetAction::Encode {
			text,
		} => println!("{}", hex::encode(charset.encode(&text))),
		CharsetAction::Decode {
			hex,
		} => {
			let bytes = hex::decode(hex.trim()).context("Invalid hex input")?;
			println!("{}", charset.decode(&bytes));
		}
	}
	Ok(())
}
