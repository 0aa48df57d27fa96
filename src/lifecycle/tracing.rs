//! # Observability & Tracing
//!
//! [`setup_tracing`] installs the global subscriber for the binary.
//!
//! ## Configuration
//!
//! The filter comes from `RUST_LOG` and falls back to `info`. `LOG_FORMAT=text` (the
//! default) gives compact lines without the module prefix (`with_target(false)`);
//! every actor log line already names its table through the `entity_type` field.
//! `LOG_FORMAT=json` emits one JSON object per event for log shippers.
//!
//! ```bash
//! # Compact logs (default)
//! RUST_LOG=info cargo run
//!
//! # Pricing details and full request payloads
//! RUST_LOG=debug cargo run
//!
//! # Only the framework's actor loop
//! RUST_LOG=actor_framework=debug cargo run
//! ```
//!
//! ## Workflow Trace Example
//!
//! Placing an order for two products, with `RUST_LOG=debug`:
//!
//! ```text
//! DEBUG create_order: create_order called params=OrderCreate { owner_id: "u1", product_ids: [..] } owner_id=u1
//! DEBUG create_order: Create entity_type="order" params=OrderCreate { .. }
//! DEBUG List entity_type="product" requested=2 found=2
//! DEBUG Priced order_id=5D0C9A1E requested=2 resolved=2 total=350
//!  INFO Created entity_type="payment" id=C81F22B0
//!  INFO Charged order_id=5D0C9A1E transaction_id=C81F22B0
//!  INFO Created entity_type="order" id=5D0C9A1E
//!  INFO create_order: Order placed order_id=5D0C9A1E status=COMPLETED total=350 owner_id=u1
//! ```
//!
//! Each step is a structured field set, so the same run under `LOG_FORMAT=json` can be
//! filtered by `order_id` or `entity_type` downstream.

use tracing_subscriber::EnvFilter;

use crate::config::LogFormat;

pub fn setup_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match format {
        LogFormat::Text => builder
            .with_target(false) // entity_type identifies the actor
            .compact()
            .init(),
        LogFormat::Json => builder.json().init(),
    }
}
