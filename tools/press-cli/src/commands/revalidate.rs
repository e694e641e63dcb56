//! Revalidation command.

use std::sync::Arc;

use anyhow::{bail, Context as _, Result};
use chrono::{DateTime, Utc};
use press_core::{ContentHandle, ContentTransitionEvent};
use press_revalidate::{
    DispatchOutcome, DryRunTransport, HttpTransport, OutboundRequest, RevalidationDispatcher,
};
use serde::Serialize;

use super::RevalidateArgs;
use crate::context::Context;
use crate::output::{outcome_badge, yes_no};

/// Run the revalidate command.
pub async fn run(args: RevalidateArgs, ctx: &Context) -> Result<()> {
    let config = ctx.config.revalidate_config();
    if !config.is_enabled() {
        ctx.output
            .debug("Secret or endpoint missing; qualifying transitions will not be sent");
    }

    let content = ContentHandle::new(args.id, args.content_type)
        .with_slug(args.slug)
        .with_title(args.title);
    let event = ContentTransitionEvent::new(args.from, args.to, content);

    let (outcome, recorded) = if args.dry_run {
        let transport = Arc::new(DryRunTransport::new());
        let dispatcher = RevalidationDispatcher::new(config, transport.clone());
        let outcome = dispatcher.on_status_transition(&event).await;
        (outcome, transport.sent().into_iter().next())
    } else {
        let transport = HttpTransport::new().context("Failed to create HTTP client")?;
        let dispatcher = RevalidationDispatcher::new(config, transport);
        let spinner = ctx.output.spinner("Revalidating...");
        let outcome = dispatcher.on_status_transition(&event).await;
        spinner.finish_and_clear();
        (outcome, None)
    };

    let report = RevalidateReport::new(&event, &outcome, recorded.as_ref(), args.dry_run);
    print_report(&report, ctx);

    if let DispatchOutcome::Failed { error, .. } = outcome {
        bail!("Revalidation failed: {}", error);
    }
    Ok(())
}

/// Machine-readable summary of one dispatch.
#[derive(Debug, Serialize)]
struct RevalidateReport {
    outcome: &'static str,
    from: String,
    to: String,
    content_id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    endpoint: Option<String>,
    dry_run: bool,
    timestamp: DateTime<Utc>,
}

impl RevalidateReport {
    fn new(
        event: &ContentTransitionEvent,
        outcome: &DispatchOutcome,
        recorded: Option<&OutboundRequest>,
        dry_run: bool,
    ) -> Self {
        let mut report = Self {
            outcome: outcome.label(),
            from: event.previous_status.to_string(),
            to: event.new_status.to_string(),
            content_id: event.content.id,
            path: None,
            reason: None,
            status: None,
            error: None,
            endpoint: recorded.map(|request| request.url.clone()),
            dry_run,
            timestamp: Utc::now(),
        };

        match outcome {
            DispatchOutcome::Skipped(reason) => report.reason = Some(format!("{:?}", reason)),
            DispatchOutcome::Disabled => {
                report.reason = Some("secret or endpoint not configured".to_string())
            }
            DispatchOutcome::Delivered { path } => report.path = Some(path.clone()),
            DispatchOutcome::Failed { path, error } => {
                report.path = Some(path.clone());
                report.status = error.status().map(|status| status.as_u16());
                report.error = Some(error.to_string());
            }
        }

        report
    }
}

fn print_report(report: &RevalidateReport, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(report);
        return;
    }

    ctx.output.header("Revalidation");
    ctx.output.kv("transition", &format!("{} → {}", report.from, report.to));
    ctx.output.kv("content", &report.content_id.to_string());
    ctx.output.kv("outcome", &outcome_badge(report.outcome));
    if let Some(path) = &report.path {
        ctx.output.kv("path", path);
    }
    if let Some(reason) = &report.reason {
        ctx.output.kv("reason", reason);
    }
    if let Some(endpoint) = &report.endpoint {
        ctx.output.kv("endpoint", endpoint);
    }
    ctx.output.kv("dry run", yes_no(report.dry_run));

    match report.outcome {
        "delivered" if report.dry_run => ctx.output.success("Request recorded, not sent"),
        "delivered" => ctx.output.success("Endpoint acknowledged"),
        "disabled" => ctx.output.warn("Set REVALIDATE_SECRET and REVALIDATE_URL to enable"),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use press_core::{ContentStatus, ContentType};
    use press_revalidate::{RevalidateConfig, SkipReason};

    use super::*;

    fn event(to: ContentStatus) -> ContentTransitionEvent {
        ContentTransitionEvent::new(
            ContentStatus::Draft,
            to,
            ContentHandle::new(9, ContentType::Post).with_slug("hello"),
        )
    }

    #[tokio::test]
    async fn test_dry_run_report_hides_secret() {
        let transport = Arc::new(DryRunTransport::new());
        let config = RevalidateConfig::new()
            .with_secret("top-secret")
            .with_endpoint("https://e/revalidate");
        let dispatcher = RevalidationDispatcher::new(config, transport.clone());

        let event = event(ContentStatus::Publish);
        let outcome = dispatcher.on_status_transition(&event).await;
        let recorded = transport.sent().into_iter().next();
        let report = RevalidateReport::new(&event, &outcome, recorded.as_ref(), true);

        assert_eq!(report.outcome, "delivered");
        assert_eq!(report.path.as_deref(), Some("/articles/hello"));
        assert_eq!(report.endpoint.as_deref(), Some("https://e/revalidate"));
        let json = serde_json::to_string(&report).unwrap();
        assert!(!json.contains("top-secret"));
    }

    #[test]
    fn test_skipped_report() {
        let outcome = DispatchOutcome::Skipped(SkipReason::NotPublished);
        let report = RevalidateReport::new(&event(ContentStatus::Pending), &outcome, None, false);

        assert_eq!(report.outcome, "skipped");
        assert_eq!(report.reason.as_deref(), Some("NotPublished"));
        assert!(report.path.is_none());
        assert_eq!(report.to, "pending");
    }
}
