//! 网络负载仿真
//!
//! 按实验描述文件在每个负载点上独立运行一次呼叫仿真，输出阻塞概率（JSON）。

use clap::Parser;
use onsim_rs::sim::{SimulationSpec, load_sweep, place_most_used};
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "network_load", about = "光网络负载扫描：每个负载点输出一次阻塞统计")]
struct Args {
    /// 实验描述文件（JSON）
    #[arg(long)]
    spec: PathBuf,
    /// 覆盖呼叫数
    #[arg(long)]
    calls: Option<u64>,
    /// 覆盖随机种子
    #[arg(long)]
    seed: Option<u64>,
    /// 覆盖路由算法（DJK / BELL / FIX / YEN<k>）
    #[arg(long)]
    routing: Option<String>,
    /// 覆盖频谱分配策略（FF / LF / BF / EF / RF）
    #[arg(long)]
    spectrum: Option<String>,
    /// 结果另存为 JSON 文件
    #[arg(long)]
    output: Option<PathBuf>,
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
    let mut spec = SimulationSpec::from_path(&args.spec)?;
    if let Some(calls) = args.calls {
        spec.num_calls = calls;
    }
    if let Some(seed) = args.seed {
        spec.seed = seed;
    }
    if let Some(routing) = args.routing {
        spec.routing = routing;
    }
    if let Some(spectrum) = args.spectrum {
        spec.spectrum = spectrum;
    }

    let base_dir = args.spec.parent().unwrap_or(Path::new("."));
    let (mut topo, config) = spec.build(base_dir)?;
    let loads = spec.loads()?;

    if let Some(p) = spec.placement {
        let load = p.load.unwrap_or_else(|| loads.iter().copied().fold(0.0, f64::max));
        topo = place_most_used(Arc::clone(&config), &topo, p.nodes, p.regenerators, load, spec.seed)?;
    }

    info!(points = loads.len(), nodes = topo.num_nodes(), "开始负载扫描");
    let reports = load_sweep(config, &topo, &loads, spec.seed)?;
    let json = serde_json::to_string_pretty(&reports)?;
    if let Some(out) = &args.output {
        fs::write(out, &json)?;
    }
    println!("{json}");
    Ok(())
}
