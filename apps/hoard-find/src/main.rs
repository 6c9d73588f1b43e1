use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = hoard_find::Args::parse();

	hoard_find::run(args).await
}
