use crate::cli::ShowArgs;
use crate::context::CliContext;
use anyhow::bail;
use serde_json::Value;
use tracker_core::ViewMode;
use tracker_domain::{ActionName, ActionRequest, Outcome};

pub fn handle(ctx: &mut CliContext, args: ShowArgs) -> anyhow::Result<Value> {
    let selections = [
        (ActionName::SelectProject, args.project),
        (ActionName::SelectTask, args.task),
        (ActionName::SelectCommit, args.commit),
    ];
    if args.project.is_some() {
        ctx.session_mut().set_view_mode(ViewMode::DrillDown);
    }
    for (action, id) in selections {
        let Some(id) = id else { break };
        if let Outcome::Ignored { reason } = ctx.session_mut().dispatch(ActionRequest::on(action, id))
        {
            bail!(reason);
        }
    }
    Ok(serde_json::to_value(ctx.session().render())?)
}
