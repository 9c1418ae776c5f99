use crate::reports;
use clap::Args;
use keymorph::error::{KeymorphError, KmResult};
use keymorph::layout::Layout;
use keymorph::layouts;
use keymorph::manager::Manager;

#[derive(Args, Debug, Clone)]
pub struct MutateArgs {
    /// Known layout name or 30-key string. A random layout when absent.
    #[arg(short, long)]
    pub layout: Option<String>,

    #[arg(short = 'n', long, default_value_t = 5)]
    pub steps: usize,
}

pub fn run(args: MutateArgs, mut manager: Manager) -> KmResult<()> {
    let mut parent = match &args.layout {
        Some(s) => layouts::resolve(s)?,
        None => manager.create(),
    };

    if !manager.can_manage(&parent) {
        return Err(KeymorphError::Unmanageable(parent.to_string()));
    }

    reports::print_layout_grid("Start", &parent);
    let mut child = Layout::blank();
    for step in 1..=args.steps {
        manager.mutate(&mut child, &parent);
        reports::print_mutation(step, &parent, &child);
        parent = child;
    }
    Ok(())
}
