use crate::cli::ProjectAction;
use crate::context::CliContext;
use serde_json::Value;
use tracker_domain::{ActionName, ActionRequest, EntityKind};

pub fn handle(ctx: &mut CliContext, action: ProjectAction) -> anyhow::Result<Value> {
    match action {
        ProjectAction::Add { name } => {
            let effect = ctx.submit(ActionRequest::bare(ActionName::AddProject), |form| {
                form.set_name(name)
            })?;
            ctx.entity_json(effect.touched)
        }
        ProjectAction::Rename { id, name } => {
            let effect = ctx.submit(ActionRequest::on(ActionName::EditProject, id), |form| {
                form.set_name(name)
            })?;
            ctx.entity_json(effect.touched)
        }
        ProjectAction::Delete(args) => {
            ctx.delete(ActionRequest::on(ActionName::DeleteProject, args.id), args.yes)
        }
        ProjectAction::Toggle { id } => {
            ctx.expect_kind(id, EntityKind::Project)?;
            let effect = ctx.submit(ActionRequest::on(ActionName::ToggleCollapse, id), |_| {})?;
            ctx.entity_json(effect.touched)
        }
    }
}
