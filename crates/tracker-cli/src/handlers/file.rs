use crate::cli::{FileAction, FileEditArgs};
use crate::context::CliContext;
use serde_json::Value;
use tracker_domain::dispatcher::description_field;
use tracker_domain::{ActionName, ActionRequest, Form};

pub fn handle(ctx: &mut CliContext, action: FileAction) -> anyhow::Result<Value> {
    match action {
        FileAction::Add {
            commit,
            name,
            description,
        } => {
            let effect = ctx.submit(ActionRequest::on(ActionName::AddFile, commit), |form| {
                if let Form::File(file) = form {
                    file.name = Some(name);
                    if let Some(description) = description {
                        file.description = description_field(&description);
                    }
                }
            })?;
            ctx.entity_json(effect.touched)
        }
        FileAction::Edit(args) => handle_edit(ctx, args),
        FileAction::Delete(args) => {
            ctx.delete(ActionRequest::on(ActionName::DeleteFile, args.id), args.yes)
        }
    }
}

fn handle_edit(ctx: &mut CliContext, args: FileEditArgs) -> anyhow::Result<Value> {
    let effect = ctx.submit(ActionRequest::on(ActionName::EditFile, args.id), |form| {
        if let Form::File(file) = form {
            if let Some(name) = args.name {
                file.name = Some(name);
            }
            if let Some(description) = args.description {
                file.description = description_field(&description);
            }
        }
    })?;
    ctx.entity_json(effect.touched)
}
