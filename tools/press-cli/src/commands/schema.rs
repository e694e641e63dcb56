//! Query schema command.

use anyhow::Result;
use press_blocks::{register_kaltura_schema, SchemaDocument};

use crate::context::Context;

/// Run the schema command.
pub async fn run(ctx: &Context) -> Result<()> {
    let mut schema = SchemaDocument::new();
    register_kaltura_schema(&mut schema);

    if ctx.output.is_json() {
        let types: Vec<_> = schema
            .types()
            .iter()
            .map(|ty| {
                let fields: Vec<_> = ty
                    .fields
                    .iter()
                    .map(|f| serde_json::json!({ "name": f.name, "type": f.ty.as_str() }))
                    .collect();
                serde_json::json!({ "name": ty.name, "fields": fields })
            })
            .collect();
        ctx.output.json(&serde_json::json!({ "types": types, "sdl": schema.to_sdl() }));
        return Ok(());
    }

    print!("{}", schema.to_sdl());
    Ok(())
}
