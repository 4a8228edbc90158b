//! 透明性分析
//!
//! 对每个节点对输出最短路径全透明传输的 OSNR 及每个速率可用的最高效调制格式（JSON）。

use clap::Parser;
use onsim_rs::rmsa::transparency_analysis;
use onsim_rs::sim::SimulationSpec;
use std::error::Error;
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[command(name = "transparency", about = "透明传输 OSNR 分析")]
struct Args {
    /// 实验描述文件（JSON）
    #[arg(long)]
    spec: PathBuf,
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .init();

    let args = Args::parse();
    let spec = SimulationSpec::from_path(&args.spec)?;
    let base_dir = args.spec.parent().unwrap_or(Path::new("."));
    let topo = spec.build_topology(base_dir)?;
    let opts = spec.options()?;

    let mut schemes = opts.schemes;
    schemes.sort();
    let entries = transparency_analysis(&topo, &schemes, &opts.bitrates);
    println!("{}", serde_json::to_string_pretty(&entries)?);
    Ok(())
}
