//! cart-offers: promotional offer service
//!
//! ## Configuration
//! - `config.yaml` in the working directory, or the file named by
//!   CART_OFFERS_CONFIG (or the first command-line argument)
//! - CART_OFFERS__SERVER__PORT: HTTP port (default: 9002)
//! - CART_OFFERS__SEGMENT_SERVICE__BASE_URL: user segment service
//!   (default: http://localhost:1080/api/v1)
//! - CART_OFFERS_LOG: tracing filter (default: info)

use std::sync::Arc;

use tracing::info;

use cart_offers::api;
use cart_offers::bootstrap::{init_tracing, offer_resolver};
use cart_offers::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let path = std::env::args().nth(1);
    let config = Config::load(path.as_deref())?;
    let resolver = Arc::new(offer_resolver(&config)?);

    info!(
        clamp_at_zero = config.offers.clamp_at_zero,
        "cart-offers started"
    );

    api::serve(resolver, &config.server.bind_address()).await?;
    Ok(())
}
