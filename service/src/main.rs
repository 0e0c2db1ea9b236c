#![deny(
    clippy::expect_used,
    clippy::panic,
    clippy::print_stdout,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used
)]

use std::{net::SocketAddr, path::Path, sync::Arc};

use axum::{middleware, Extension};
use cc_render::{font_database, FontSpec, ResvgRasterizer, UsvgTextMeasurer};
use congresscard_api::{
    card::{CardAssets, CardService},
    config::Config,
    congress::HttpCongressClient,
    http::{self, build_cors_layer, security_headers_middleware, SecurityHeaders},
};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Load and validate configuration first (fail-fast)
    let config = Config::load().map_err(|e| anyhow::anyhow!("{e}"))?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.logging.level)?)
        .init();

    // Init banner so container logs clearly show startup
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "congresscard-api starting up"
    );

    let assets = CardAssets::load(Path::new(&config.assets.dir)).await?;
    let fontdb = font_database(Some(&config.assets.font_dir_path()));

    let client = HttpCongressClient::from_config(&config.upstream)?;
    let measurer = UsvgTextMeasurer::new(Arc::clone(&fontdb))
        .with_timeout(config.render.measure_timeout());
    let rasterizer = ResvgRasterizer::new(fontdb, config.render.png_scale);
    let font = FontSpec {
        family: config.render.font_family.clone(),
        size: config.render.font_size,
        ..FontSpec::default()
    };

    let service = Arc::new(CardService::new(
        Arc::new(client),
        Arc::new(measurer),
        Arc::new(rasterizer),
        Arc::new(assets),
        font,
    ));

    let mut app = http::router()
        .layer(Extension(service))
        .layer(build_cors_layer(&config.cors))
        .layer(TraceLayer::new_for_http());

    if config.security_headers.enabled {
        let headers = SecurityHeaders::from_config(&config.security_headers)?;
        app = app
            .layer(middleware::from_fn(security_headers_middleware))
            .layer(Extension(headers));
    } else {
        tracing::info!("security headers disabled");
    }

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    tracing::info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
