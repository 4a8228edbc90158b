//! 实验描述文件（JSON）
//!
//! 一个 `SimulationSpec` 描述一次完整实验：拓扑来源、算法（按简称）、物理参数、
//! 呼叫数、负载扫描范围、随机种子以及可选的再生器放置。缺省字段取文档中的默认值。

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::config::{RmsaOptions, SimConfig};
use super::sweep::load_points;
use crate::error::{ConfigError, ConfigResult};
use crate::net::{CostModel, NodeArchitecture, NodeType, Topology};
use crate::phy::{Gain, ModulationScheme, PhysicalParams, TransmissionBitrate};
use crate::rmsa::routing::PowerSeries;
use crate::rmsa::{RegeneratorAssignment, RoutingCost};
use crate::topo::{NsfnetOpts, RingOpts, build_nsfnet, build_ring, load_topology};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TopologySource {
    /// 拓扑文本文件；相对路径以描述文件所在目录为基准
    File { path: PathBuf },
    Ring {
        nodes: usize,
        length_km: f64,
        #[serde(default)]
        node_type: Option<NodeType>,
        #[serde(default)]
        architecture: Option<NodeArchitecture>,
        #[serde(default)]
        regenerators: u32,
    },
    Nsfnet {
        #[serde(default)]
        node_type: Option<NodeType>,
        #[serde(default)]
        architecture: Option<NodeArchitecture>,
        #[serde(default)]
        regenerators: u32,
    },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SchemeSpec {
    pub m: u32,
    pub snr_per_bit_db: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LoadSpec {
    pub min: f64,
    #[serde(default)]
    pub max: Option<f64>,
    #[serde(default)]
    pub step: Option<f64>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PlacementSpec {
    /// 放置再生器的节点数
    pub nodes: usize,
    /// 每个节点的再生器数
    pub regenerators: u32,
    /// 观察使用量时的负载；缺省取扫描的最大负载
    #[serde(default)]
    pub load: Option<f64>,
}

fn default_routing() -> String {
    "DJK".into()
}

fn default_cost() -> String {
    "SP".into()
}

fn default_spectrum() -> String {
    "FF".into()
}

fn default_regenerator_bitrate() -> f64 {
    100.0
}

fn default_num_calls() -> u64 {
    10_000
}

fn default_holding_time() -> f64 {
    1.0
}

fn default_seed() -> u64 {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationSpec {
    pub topology: TopologySource,
    #[serde(default)]
    pub physical: PhysicalParams,
    /// DJK / BELL / FIX / YEN / YEN<k>
    #[serde(default = "default_routing")]
    pub routing: String,
    /// MH / SP / LORa / LORc；`power_series` 存在时忽略
    #[serde(default = "default_cost")]
    pub routing_cost: String,
    #[serde(default)]
    pub power_series: Option<PowerSeries>,
    /// FF / LF / BF / EF / RF
    #[serde(default = "default_spectrum")]
    pub spectrum: String,
    /// FLR / FNS / SCRA；缺省为全透明
    #[serde(default)]
    pub regenerator_assignment: Option<String>,
    #[serde(default)]
    pub schemes: Option<Vec<SchemeSpec>>,
    #[serde(default)]
    pub bitrates_gbps: Option<Vec<f64>>,
    #[serde(default = "default_regenerator_bitrate")]
    pub regenerator_bitrate_gbps: f64,
    #[serde(default)]
    pub costs: CostModel,
    #[serde(default = "default_num_calls")]
    pub num_calls: u64,
    #[serde(default = "default_holding_time")]
    pub mean_holding_time: f64,
    pub load: LoadSpec,
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default)]
    pub placement: Option<PlacementSpec>,
}

impl SimulationSpec {
    pub fn from_json(raw: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn from_path(path: &Path) -> ConfigResult<Self> {
        let raw = fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    pub fn loads(&self) -> ConfigResult<Vec<f64>> {
        let max = self.load.max.unwrap_or(self.load.min);
        let step = self.load.step.unwrap_or(max - self.load.min);
        load_points(self.load.min, max, step)
    }

    pub fn build_topology(&self, base_dir: &Path) -> ConfigResult<Topology> {
        let phy = Arc::new(self.physical.clone());
        let topo = match &self.topology {
            TopologySource::File { path } => load_topology(&base_dir.join(path), phy)?,
            TopologySource::Ring {
                nodes,
                length_km,
                node_type,
                architecture,
                regenerators,
            } => build_ring(
                phy,
                &RingOpts {
                    nodes: *nodes,
                    length_km: *length_km,
                    node_type: node_type.unwrap_or(NodeType::Transparent),
                    architecture: architecture.unwrap_or(NodeArchitecture::SwitchingSelect),
                    regenerators: *regenerators,
                },
            )?,
            TopologySource::Nsfnet {
                node_type,
                architecture,
                regenerators,
            } => build_nsfnet(
                phy,
                &NsfnetOpts {
                    node_type: node_type.unwrap_or(NodeType::Transparent),
                    architecture: architecture.unwrap_or(NodeArchitecture::SwitchingSelect),
                    regenerators: *regenerators,
                },
            )?,
        };
        Ok(topo)
    }

    pub fn options(&self) -> ConfigResult<RmsaOptions> {
        let mut opts = RmsaOptions {
            routing: self.routing.parse().map_err(ConfigError::Invalid)?,
            spectrum: self.spectrum.parse().map_err(ConfigError::Invalid)?,
            regenerator_bitrate: TransmissionBitrate::from_gbps(self.regenerator_bitrate_gbps),
            costs: self.costs.clone(),
            num_calls: self.num_calls,
            mean_holding_time: self.mean_holding_time,
            ..RmsaOptions::default()
        };
        opts.cost = match &self.power_series {
            Some(psr) => RoutingCost::PowerSeries(psr.clone()),
            None => self.routing_cost.parse().map_err(ConfigError::Invalid)?,
        };
        if let Some(ra) = &self.regenerator_assignment {
            opts.regenerators = Some(ra.parse::<RegeneratorAssignment>().map_err(ConfigError::Invalid)?);
        }
        if let Some(schemes) = &self.schemes {
            opts.schemes = schemes
                .iter()
                .map(|s| ModulationScheme::new(s.m, Gain::from_db(s.snr_per_bit_db)))
                .collect();
        }
        if let Some(bitrates) = &self.bitrates_gbps {
            opts.bitrates = bitrates
                .iter()
                .map(|&b| TransmissionBitrate::from_gbps(b))
                .collect();
        }
        Ok(opts)
    }

    /// 构造拓扑与共享配置
    pub fn build(&self, base_dir: &Path) -> ConfigResult<(Topology, Arc<SimConfig>)> {
        let topo = self.build_topology(base_dir)?;
        let config = SimConfig::new(&topo, self.options()?)?;
        Ok((topo, Arc::new(config)))
    }
}
