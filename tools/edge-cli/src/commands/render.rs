//! Local render command.

use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::{Context as _, Result};
use contacts::ContactsApp;
use edge_data::{ContactStore, InMemoryContactStore};
use edge_handler::RenderReport;
use http::header::USER_AGENT;
use http::Request;
use serde::Serialize;

use super::RenderArgs;
use crate::context::Context;
use crate::output::status_badge;

#[derive(Debug, Serialize)]
struct RenderSummary {
    path: String,
    status: u16,
    final_status: u16,
    delivery: &'static str,
    headers: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    body: Option<String>,
}

/// Run the render command.
pub async fn run(args: RenderArgs, ctx: &Context) -> Result<()> {
    let mut config = ctx.config.clone();
    if args.spa {
        config.app.spa_mode = true;
    }

    let store: Arc<dyn ContactStore> = Arc::new(InMemoryContactStore::with_demo_data());
    let app = ContactsApp::new(config, store, ctx.bindings(), ctx.logger())?;

    let request = build_request(&args)?;
    ctx.output.debug(&format!("GET {}", args.path));

    let response = app.serve(&request).await?;
    let (parts, body) = response.into_parts();
    let delivery = if body.is_all_ready() {
        "all-ready"
    } else {
        "progressive"
    };

    let html = body.collect_string().await;

    // Late section errors only show up in the report.
    let final_status = parts
        .extensions
        .get::<RenderReport>()
        .map(|report| report.status())
        .unwrap_or(parts.status);

    let summary = RenderSummary {
        path: args.path.clone(),
        status: parts.status.as_u16(),
        final_status: final_status.as_u16(),
        delivery,
        headers: parts
            .headers
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect(),
        body: if args.head { None } else { Some(html) },
    };

    if ctx.output.is_json() {
        ctx.output.json(&summary);
        return Ok(());
    }

    print_summary(&summary, ctx);
    Ok(())
}

fn build_request(args: &RenderArgs) -> Result<Request<()>> {
    let mut builder = Request::builder().uri(args.path.as_str());
    if let Some(ref ua) = args.user_agent {
        builder = builder.header(USER_AGENT, ua.as_str());
    }
    builder
        .body(())
        .with_context(|| format!("Invalid request path: {}", args.path))
}

fn print_summary(summary: &RenderSummary, ctx: &Context) {
    ctx.output.header(&format!("GET {}", summary.path));
    ctx.output.kv("status", &status_badge(summary.status));
    if summary.final_status != summary.status {
        ctx.output
            .kv("status after streaming", &status_badge(summary.final_status));
    }
    ctx.output.kv("delivery", summary.delivery);

    ctx.output.info("");
    ctx.output.info("Headers:");
    for (name, value) in &summary.headers {
        ctx.output.kv(name, value);
    }

    if let Some(ref body) = summary.body {
        println!();
        println!("{}", body);
    }
}
