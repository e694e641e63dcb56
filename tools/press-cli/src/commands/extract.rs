//! Block extraction command.

use std::fs;

use anyhow::{Context as _, Result};
use press_blocks::{parse_blocks, BlockNode, BlockRecord};

use super::{ExtractArgs, InputFormat};
use crate::context::Context;
use crate::output::yes_no;

/// Run the extract command.
pub async fn run(args: ExtractArgs, ctx: &Context) -> Result<()> {
    let path = ctx.resolve_path(&args.file);
    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read content file: {}", path.display()))?;

    let tree = load_tree(&content, args.input)?;
    let extractor = ctx.config.embed.extractor();
    ctx.output.debug(&format!(
        "Parsed {} top-level node(s), matching {}",
        tree.len(),
        extractor.block_name()
    ));

    let records = extractor.extract(&tree);

    if ctx.output.is_json() {
        ctx.output.json(&records);
        return Ok(());
    }

    print_records(&records, ctx);
    Ok(())
}

fn load_tree(content: &str, input: InputFormat) -> Result<Vec<BlockNode>> {
    match input {
        InputFormat::Markup => Ok(parse_blocks(content)),
        InputFormat::Tree => {
            BlockNode::tree_from_json(content).context("Failed to decode block tree")
        }
    }
}

fn print_records(records: &[BlockRecord], ctx: &Context) {
    if records.is_empty() {
        ctx.output.info("No Kaltura blocks found.");
        return;
    }

    ctx.output.header(&format!("{} Kaltura block(s)", records.len()));
    for (i, record) in records.iter().enumerate() {
        ctx.output.info("");
        ctx.output.list_item(&format!("#{}", i + 1));
        ctx.output.kv("partnerId", &record.provider_account_id);
        ctx.output.kv("entryId", &record.media_id);
        if !record.poster_url.is_empty() {
            ctx.output.kv("poster", &record.poster_url);
        }
        ctx.output.kv("autoplay", yes_no(record.autoplay));
        ctx.output.kv("consentRequired", yes_no(record.consent_required));
    }
}
