use std::{
	fs,
	path::{Path, PathBuf},
	sync::Arc,
};

use clap::{Parser, Subcommand};
use color_eyre::eyre;
use tracing_subscriber::EnvFilter;

use hoard_config::Config;
use hoard_domain::ItemImage;
use hoard_service::{HoardService, LocateRequest};
use hoard_storage::{Catalog, catalog, models::CatalogFile};

#[derive(Debug, Parser)]
#[command(
	version = hoard_cli::VERSION,
	rename_all = "kebab",
	styles = hoard_cli::styles(),
)]
pub struct Args {
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: PathBuf,
	#[command(subcommand)]
	pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
	/// Find the container holding an item described in plain words.
	Locate(LocateArgs),
	/// Suggest a name and description for an item photo.
	Describe(DescribeArgs),
}

#[derive(Debug, clap::Args)]
pub struct LocateArgs {
	/// Id of the user whose items are searched.
	#[arg(long, value_name = "ID")]
	pub user: i64,
	/// Maximum number of candidates; defaults to `search.candidate_k`.
	#[arg(long, value_name = "N")]
	pub k: Option<u32>,
	/// Print the result as JSON.
	#[arg(long)]
	pub json: bool,
	#[arg(value_name = "QUERY", required = true)]
	pub query: Vec<String>,
}

#[derive(Debug, clap::Args)]
pub struct DescribeArgs {
	/// Print the result as JSON.
	#[arg(long)]
	pub json: bool,
	#[arg(value_name = "IMAGE")]
	pub image: PathBuf,
}

pub async fn run(args: Args) -> color_eyre::Result<()> {
	let config = hoard_config::load(&args.config)?;

	init_tracing(&config)?;

	match args.command {
		Command::Locate(locate_args) => locate(config, locate_args).await,
		Command::Describe(describe_args) => describe(config, describe_args).await,
	}
}

async fn locate(config: Config, args: LocateArgs) -> color_eyre::Result<()> {
	let catalog = Catalog::load(&config.catalog.path)?;
	let service = HoardService::new(config, Arc::new(catalog));
	let req = LocateRequest { user_id: args.user, query: args.query.join(" "), k: args.k };
	let location = match service.find_item_location(req).await {
		Ok(location) => location,
		Err(err) => {
			tracing::error!(error = %err, "Item search failed.");

			return Err(eyre::eyre!(err.user_message()));
		},
	};

	if args.json {
		println!("{}", serde_json::to_string_pretty(&location)?);
	} else {
		println!("{location}");
	}

	Ok(())
}

async fn describe(config: Config, args: DescribeArgs) -> color_eyre::Result<()> {
	let image = read_image(&args.image)?;
	let empty = Catalog::from_file(CatalogFile::default(), PathBuf::new())?;
	let service = HoardService::new(config, Arc::new(empty));
	let generated = match service.describe_item_image(&image).await {
		Ok(generated) => generated,
		Err(err) => {
			tracing::error!(error = %err, path = %args.image.display(), "Item description failed.");

			return Err(eyre::eyre!(err.user_message()));
		},
	};

	if args.json {
		println!("{}", serde_json::to_string_pretty(&generated)?);
	} else {
		println!("Name: {}\nDescription: {}", generated.name, generated.description);
	}

	Ok(())
}

fn read_image(path: &Path) -> color_eyre::Result<ItemImage> {
	let bytes = fs::read(path)
		.map_err(|err| eyre::eyre!("Failed to read image {}: {err}.", path.display()))?;

	Ok(ItemImage { mime_type: catalog::mime_type_for(path).to_string(), bytes })
}

/// Installs the global subscriber. Fails if one is already installed.
pub fn init_tracing(config: &Config) -> color_eyre::Result<()> {
	let filter =
		EnvFilter::try_new(&config.service.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

	tracing_subscriber::fmt()
		.with_writer(std::io::stderr)
		.with_env_filter(filter)
		.try_init()
		.map_err(|err| eyre::eyre!("Failed to initialise tracing: {err}."))
}
