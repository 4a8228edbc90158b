//! 透明性分析
//!
//! 对每个有序节点对，沿最短（长度）路径做全透明传输，报告 OSNR 以及每个速率下
//! 可用的最高效调制格式。

use serde::Serialize;

use super::quality::most_efficient_physical_scheme;
use super::routing::{Exclusions, dijkstra};
use super::segment::segment_signal;
use crate::net::Topology;
use crate::phy::{ModulationScheme, TransmissionBitrate};

#[derive(Debug, Clone, Serialize)]
pub struct SchemeChoice {
    pub bitrate_gbps: f64,
    /// 星座点数；`None` 表示没有可行格式
    pub m: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TransparencyEntry {
    /// 1 起始的节点编号
    pub origin: usize,
    pub destination: usize,
    pub hops: usize,
    pub length_km: f64,
    pub osnr_db: f64,
    pub schemes: Vec<SchemeChoice>,
}

pub fn transparency_analysis(
    topo: &Topology,
    schemes: &[ModulationScheme],
    bitrates: &[TransmissionBitrate],
) -> Vec<TransparencyEntry> {
    let weights: Vec<Option<f64>> = topo
        .links()
        .iter()
        .map(|l| Some(l.length_km()))
        .collect();
    let mut entries = Vec::new();
    for o in topo.node_ids() {
        for d in topo.node_ids() {
            if o == d {
                continue;
            }
            let Some(route) = dijkstra(topo, &weights, o, d, &Exclusions::default()) else {
                continue;
            };
            let signal = segment_signal(topo, &route, 1);
            let schemes = bitrates
                .iter()
                .map(|&b| SchemeChoice {
                    bitrate_gbps: b.gbps(),
                    m: most_efficient_physical_scheme(topo, &route, schemes, b).map(|s| s.m()),
                })
                .collect();
            entries.push(TransparencyEntry {
                origin: o.label(),
                destination: d.label(),
                hops: route.len(),
                length_km: route.iter().map(|&l| topo.link(l).length_km()).sum(),
                osnr_db: signal.osnr().db(),
                schemes,
            });
        }
    }
    entries
}
