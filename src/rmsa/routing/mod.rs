//! 路由算法
//!
//! 给定呼叫与可插拔的链路代价，返回一条或多条有序链路序列。
//! 空结果表示无路由，由调用方记为阻塞。

// 子模块声明
mod cache;
mod cost;
mod search;

// 重新导出公共接口
pub use cache::RouteCache;
pub use cost::{CostContext, Metric, PowerSeries, PowerSeriesVariant, RoutingCost};
pub use search::{Exclusions, bellman_ford, dijkstra, k_shortest, route_cost};

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::net::{LinkId, NodeId, Topology};
use crate::phy::{ModulationScheme, TransmissionBitrate};
use tracing::trace;

/// 一条路由：首尾相接的链路序列
pub type Route = Vec<LinkId>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoutingKind {
    Dijkstra,
    BellmanFord,
    /// Yen K 最短路径
    KShortest { k: usize },
    /// 预先计算、运行期间不变的路由
    Fixed,
}

impl fmt::Display for RoutingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoutingKind::Dijkstra => f.write_str("DJK"),
            RoutingKind::BellmanFord => f.write_str("BELL"),
            RoutingKind::KShortest { k } => write!(f, "YEN{k}"),
            RoutingKind::Fixed => f.write_str("FIX"),
        }
    }
}

/// "DJK" / "BELL" / "FIX" / "YEN" / "YEN3"
impl FromStr for RoutingKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DJK" | "dijkstra" => Ok(RoutingKind::Dijkstra),
            "BELL" | "bellman_ford" => Ok(RoutingKind::BellmanFord),
            "FIX" | "fixed" => Ok(RoutingKind::Fixed),
            "YEN" | "k_shortest" => Ok(RoutingKind::KShortest { k: 3 }),
            other => other
                .strip_prefix("YEN")
                .and_then(|k| k.parse().ok())
                .map(|k| RoutingKind::KShortest { k })
                .ok_or_else(|| format!("unknown routing algorithm '{other}'")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RoutingAlgorithm {
    kind: RoutingKind,
    cost: RoutingCost,
    max_bitrate: TransmissionBitrate,
    /// 频谱效率最低的调制格式，用于估算连续性指标所需的宽度
    width_scheme: Option<ModulationScheme>,
    cache: Option<Arc<RouteCache>>,
}

impl RoutingAlgorithm {
    /// 创建路由算法。固定路由会在 `topo` 当前（通常为空闲）状态下构建缓存。
    pub fn new(
        kind: RoutingKind,
        cost: RoutingCost,
        schemes: &[ModulationScheme],
        bitrates: &[TransmissionBitrate],
        topo: &Topology,
    ) -> Self {
        let max_bitrate = bitrates
            .iter()
            .copied()
            .fold(TransmissionBitrate::from_bps(0.0), |a, b| {
                if b.bps() > a.bps() { b } else { a }
            });
        let mut alg = Self {
            kind,
            cost,
            max_bitrate,
            width_scheme: schemes.iter().min().copied(),
            cache: None,
        };
        if kind == RoutingKind::Fixed {
            let weights = alg.weights(topo, max_bitrate);
            alg.cache = Some(Arc::new(RouteCache::build(topo, &weights)));
        }
        alg
    }

    pub fn kind(&self) -> RoutingKind {
        self.kind
    }

    pub fn cost(&self) -> &RoutingCost {
        &self.cost
    }

    pub fn cache(&self) -> Option<&Arc<RouteCache>> {
        self.cache.as_ref()
    }

    fn context(&self, topo: &Topology, bitrate: TransmissionBitrate) -> CostContext {
        let width = self
            .width_scheme
            .map(|s| s.num_slots(bitrate, topo.phy()))
            .unwrap_or(1);
        CostContext {
            bitrate,
            max_bitrate: self.max_bitrate,
            max_length_km: topo.longest_link_km(),
            max_noise_watts: topo.max_link_noise().watts(),
            width,
        }
    }

    /// 每条链路的当前代价；不可用链路为 `None`
    pub fn weights(&self, topo: &Topology, bitrate: TransmissionBitrate) -> Vec<Option<f64>> {
        let ctx = self.context(topo, bitrate);
        topo.links()
            .iter()
            .map(|link| {
                let usable = link.is_active()
                    && topo.node(link.from()).is_active()
                    && topo.node(link.to()).is_active();
                usable.then(|| self.cost.link_cost(link, &ctx))
            })
            .collect()
    }

    /// 为一次请求求候选路由，按优先级排列；空表示无路由
    pub fn route(
        &self,
        topo: &Topology,
        origin: NodeId,
        destination: NodeId,
        bitrate: TransmissionBitrate,
    ) -> Vec<Route> {
        let routes = match self.kind {
            RoutingKind::Fixed => self
                .cache
                .as_ref()
                .and_then(|c| c.get(origin, destination))
                .filter(|r| self.is_route_active(topo, r))
                .cloned()
                .into_iter()
                .collect(),
            RoutingKind::Dijkstra => {
                let w = self.weights(topo, bitrate);
                dijkstra(topo, &w, origin, destination, &Exclusions::default())
                    .into_iter()
                    .collect()
            }
            RoutingKind::BellmanFord => {
                let w = self.weights(topo, bitrate);
                bellman_ford(topo, &w, origin, destination, &Exclusions::default())
                    .into_iter()
                    .collect()
            }
            RoutingKind::KShortest { k } => {
                let w = self.weights(topo, bitrate);
                k_shortest(topo, &w, origin, destination, k)
            }
        };
        trace!(%origin, %destination, candidates = routes.len(), "路由计算完成");
        routes
    }

    fn is_route_active(&self, topo: &Topology, route: &[LinkId]) -> bool {
        route.iter().all(|&l| {
            let link = topo.link(l);
            link.is_active() && topo.node(link.from()).is_active() && topo.node(link.to()).is_active()
        })
    }
}
