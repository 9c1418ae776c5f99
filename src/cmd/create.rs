use crate::reports;
use clap::Args;
use keymorph::error::KmResult;
use keymorph::layout::Layout;
use keymorph::manager::Manager;
use rayon::prelude::*;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct CreateArgs {
    #[arg(short = 'n', long, default_value_t = 5)]
    pub count: usize,

    /// Independent generator streams. Output depends only on seed and this.
    #[arg(short, long, default_value_t = 4)]
    pub workers: usize,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

pub fn run(args: CreateArgs, manager: &Manager, seed: u64) -> KmResult<()> {
    let workers = args.workers.clamp(1, args.count.max(1));
    let chunk = args.count.div_ceil(workers);
    info!("Creating {} layouts across {} workers", args.count, workers);

    // One forked manager per worker; each owns a contiguous slice of the output.
    let layouts: Vec<Layout> = (0..workers)
        .into_par_iter()
        .map(|i| {
            let mut worker = manager.fork(seed.wrapping_add(i as u64));
            let start = (i * chunk).min(args.count);
            let end = ((i + 1) * chunk).min(args.count);
            (start..end).map(|_| worker.create()).collect::<Vec<_>>()
        })
        .collect::<Vec<_>>()
        .concat();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&layouts)?);
    } else {
        for (i, layout) in layouts.iter().enumerate() {
            reports::print_layout_grid(&format!("#{}", i + 1), layout);
        }
    }
    Ok(())
}
