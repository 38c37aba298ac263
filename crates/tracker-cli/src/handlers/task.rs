use crate::cli::{TaskAction, TaskEditArgs};
use crate::context::CliContext;
use serde_json::Value;
use tracker_domain::{ActionName, ActionRequest, EntityKind, Form};

pub fn handle(ctx: &mut CliContext, action: TaskAction) -> anyhow::Result<Value> {
    match action {
        TaskAction::Add { project, name } => {
            let effect = ctx.submit(ActionRequest::on(ActionName::AddTask, project), |form| {
                form.set_name(name)
            })?;
            ctx.entity_json(effect.touched)
        }
        TaskAction::Edit(args) => handle_edit(ctx, args),
        TaskAction::Delete(args) => {
            ctx.delete(ActionRequest::on(ActionName::DeleteTask, args.id), args.yes)
        }
        TaskAction::Toggle { id } => {
            // toggle-collapse also accepts projects.
            ctx.expect_kind(id, EntityKind::Task)?;
            let effect = ctx.submit(ActionRequest::on(ActionName::ToggleCollapse, id), |_| {})?;
            ctx.entity_json(effect.touched)
        }
    }
}

fn handle_edit(ctx: &mut CliContext, args: TaskEditArgs) -> anyhow::Result<Value> {
    let effect = ctx.submit(ActionRequest::on(ActionName::EditTask, args.id), |form| {
        if let Form::Task(task) = form {
            if let Some(name) = args.name {
                task.name = Some(name);
            }
            if let Some(status) = args.status {
                task.status = Some(status);
            }
        }
    })?;
    ctx.entity_json(effect.touched)
}
