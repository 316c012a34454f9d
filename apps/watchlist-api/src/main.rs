use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = watchlist_api::Args::parse();

	watchlist_api::run(args).await
}
