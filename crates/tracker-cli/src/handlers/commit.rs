use crate::cli::CommitAction;
use crate::context::CliContext;
use serde_json::Value;
use tracker_domain::{ActionName, ActionRequest};

pub fn handle(ctx: &mut CliContext, action: CommitAction) -> anyhow::Result<Value> {
    match action {
        CommitAction::Add { task, name } => {
            // Without --name the prefilled "Commit" stays.
            let effect = ctx.submit(ActionRequest::on(ActionName::AddCommit, task), |form| {
                if let Some(name) = name {
                    form.set_name(name);
                }
            })?;
            ctx.entity_json(effect.touched)
        }
        CommitAction::Edit { id, name } => {
            let effect = ctx.submit(ActionRequest::on(ActionName::EditCommit, id), |form| {
                form.set_name(name)
            })?;
            ctx.entity_json(effect.touched)
        }
        CommitAction::Delete(args) => {
            ctx.delete(ActionRequest::on(ActionName::DeleteCommit, args.id), args.yes)
        }
    }
}
