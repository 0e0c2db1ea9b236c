//! Render a single card through the same pipeline as the server.
//!
//! Usage: `cargo run --bin card -- member A000360 --lang en --format png -o card.png`

#![deny(
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used
)]

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use cc_render::{font_database, FontSpec, ResvgRasterizer, UsvgTextMeasurer};
use clap::{Parser, ValueEnum};
use congresscard_api::{
    card::{CardAssets, CardService, EntityKind, ImageFormat},
    config::Config,
    congress::{HttpCongressClient, Lang},
};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Kind {
    Member,
    Bill,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Svg,
    Png,
}

#[derive(Debug, Parser)]
#[command(name = "card", about = "Render one member or bill card")]
struct Args {
    /// Entity kind
    #[arg(value_enum)]
    kind: Kind,

    /// Member or bill id, without an image suffix
    id: String,

    /// Card language (`en` or `zh`)
    #[arg(long, default_value = "zh")]
    lang: String,

    #[arg(long, value_enum, default_value = "svg")]
    format: Format,

    /// Output file; stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Configuration file
    #[arg(long, default_value = "config.yaml")]
    config: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = Config::load_from(&args.config).map_err(|e| anyhow::anyhow!("{e}"))?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.logging.level)?)
        .with_writer(std::io::stderr)
        .init();

    let assets = CardAssets::load(Path::new(&config.assets.dir)).await?;
    let fontdb = font_database(Some(&config.assets.font_dir_path()));
    let service = CardService::new(
        Arc::new(HttpCongressClient::from_config(&config.upstream)?),
        Arc::new(
            UsvgTextMeasurer::new(Arc::clone(&fontdb))
                .with_timeout(config.render.measure_timeout()),
        ),
        Arc::new(ResvgRasterizer::new(fontdb, config.render.png_scale)),
        Arc::new(assets),
        FontSpec {
            family: config.render.font_family.clone(),
            size: config.render.font_size,
            ..FontSpec::default()
        },
    );

    let kind = match args.kind {
        Kind::Member => EntityKind::Member,
        Kind::Bill => EntityKind::Bill,
    };
    let format = match args.format {
        Format::Svg => ImageFormat::Svg,
        Format::Png => ImageFormat::Png,
    };
    let card = service
        .render_card(kind, &args.id, Lang::from_query(Some(&args.lang)), format)
        .await?;

    match &args.output {
        Some(path) => tokio::fs::write(path, &card.bytes)
            .await
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => std::io::stdout().write_all(&card.bytes)?,
    }
    tracing::info!(content_type = card.content_type, bytes = card.bytes.len(), "card rendered");
    Ok(())
}
