//! Embed render command.

use anyhow::Result;
use press_embed::{
    render_container, ConsentCopy, DetachedContainer, EmbedConfig, ManualObserver,
    MountController, MountOptions, VisibilityDecision, VisibilityEntry,
};
use serde::Serialize;

use super::RenderArgs;
use crate::context::Context;

/// Run the render command.
pub async fn run(args: RenderArgs, ctx: &Context) -> Result<()> {
    let mut config = EmbedConfig::new(args.partner, args.entry)
        .with_autoplay(args.autoplay)
        .with_consent_required(!args.no_consent);
    if let Some(poster) = args.poster {
        config = config.with_poster(poster);
    }

    let report = if args.live {
        run_live(&config, ctx.config.embed.mount_options(), args.allow)
    } else {
        RenderReport {
            markup: render_container(&config, &ConsentCopy::default()),
            live: None,
        }
    };

    if ctx.output.is_json() {
        ctx.output.json(&report);
        return Ok(());
    }

    if let Some(live) = &report.live {
        if live.mounted {
            ctx.output.success("Mounted");
        } else {
            ctx.output.warn("Not mounted: waiting for consent (pass --allow)");
        }
    }
    ctx.output.raw(&report.markup);
    Ok(())
}

#[derive(Debug, Serialize)]
struct RenderReport {
    markup: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    live: Option<LiveState>,
}

#[derive(Debug, Serialize)]
struct LiveState {
    mounted: bool,
    consent_given: bool,
    observing: bool,
}

/// Render the container, show it to the controller and optionally click
/// the allow control.
fn run_live(config: &EmbedConfig, options: MountOptions, allow: bool) -> RenderReport {
    let container = DetachedContainer::from_config(config);
    let mut controller = MountController::setup(container, ManualObserver::default(), options);

    let decision = controller.on_visibility(&[VisibilityEntry::intersecting()]);
    if decision == VisibilityDecision::AwaitingConsent && allow {
        controller.on_consent_click();
    }

    let state = controller.state();
    let live = LiveState {
        mounted: state.mounted,
        consent_given: state.consent_given(),
        observing: controller.is_observing(),
    };

    RenderReport {
        markup: controller.container().inner_html().to_string(),
        live: Some(live),
    }
}
