use crate::reports;
use clap::Args;
use keymorph::error::KmResult;
use keymorph::layouts::{self, get_all_layouts};
use keymorph::manager::Manager;

#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    /// Known layout name or 30-key string. Every known layout when absent.
    #[arg(short, long)]
    pub layout: Option<String>,
}

pub fn run(args: CheckArgs, manager: &Manager) -> KmResult<()> {
    let mut targets = match &args.layout {
        Some(s) => vec![(s.clone(), layouts::resolve(s)?)],
        None => get_all_layouts()
            .into_iter()
            .map(|(known, layout)| (known.to_string(), layout))
            .collect(),
    };
    targets.sort_by(|a, b| a.0.cmp(&b.0));

    for (name, layout) in &targets {
        reports::print_layout_grid(name, layout);
    }
    reports::print_compatibility_report(&targets, manager);
    Ok(())
}
