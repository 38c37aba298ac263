use crate::cli::{ExportArgs, ImportArgs};
use crate::context::CliContext;
use anyhow::bail;
use serde_json::{json, Value};

pub async fn handle_export(ctx: &mut CliContext, args: ExportArgs) -> anyhow::Result<Value> {
    let result = ctx.session_mut().export(&args.path).await;
    match result.data {
        Some(path) if result.ok => Ok(json!({ "exported": path.display().to_string() })),
        _ => bail!(
            "Failed to export to {}: {}",
            args.path.display(),
            result.error.unwrap_or_default()
        ),
    }
}

pub async fn handle_import(ctx: &mut CliContext, args: ImportArgs) -> anyhow::Result<Value> {
    let result = ctx.session_mut().import(&args.path).await;
    if !result.ok {
        bail!(
            "Failed to import {}: {}",
            args.path.display(),
            result.error.unwrap_or_default()
        );
    }
    Ok(json!({ "imported": result.data.unwrap_or_default() }))
}
