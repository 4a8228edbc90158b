//! 再生器分配
//!
//! 把一条路由切分为若干透明段。每段必须在某个调制格式下物理可行且频谱足够；
//! 段与段的分界节点必须有足够的空闲再生器。

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::call::BlockReason;
use super::quality::{most_efficient_physical_scheme, most_efficient_scheme};
use super::segment::TransparentSegment;
use crate::net::{LinkId, NodeId, Topology};
use crate::phy::{ModulationScheme, TransmissionBitrate};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegeneratorAssignment {
    /// 贪心延伸当前段，直到不可行，再在最后一个可再生节点处切分
    FirstLongestReach,
    /// 同上，但在调制格式即将降级之前就切分
    FirstNarrowestSpectrum,
    /// 动态规划：先最少再生点，再最少总频隙
    ShortestCost,
}

/// 每个分界点消耗的再生器数：ceil(呼叫速率 / 单个再生器速率)
pub fn regenerators_needed(bitrate: TransmissionBitrate, per_regenerator: TransmissionBitrate) -> u32 {
    (bitrate.bps() / per_regenerator.bps()).ceil().max(1.0) as u32
}

struct Planner<'a> {
    topo: &'a Topology,
    route: &'a [LinkId],
    nodes: Vec<NodeId>,
    schemes: &'a [ModulationScheme],
    bitrate: TransmissionBitrate,
    needed: u32,
}

impl Planner<'_> {
    fn hops(&self) -> usize {
        self.route.len()
    }

    /// 路由上第 `i` 个节点能否作为段终点
    fn can_end_at(&self, i: usize) -> bool {
        i == self.hops() || self.topo.node(self.nodes[i]).has_available_regenerators(self.needed)
    }

    fn scheme(&self, from: usize, to: usize) -> Option<ModulationScheme> {
        most_efficient_scheme(self.topo, &self.route[from..to], self.schemes, self.bitrate)
    }

    fn segment(&self, from: usize, to: usize, scheme: ModulationScheme) -> TransparentSegment {
        let mut seg = TransparentSegment::new(
            self.route[from..to].to_vec(),
            scheme,
            scheme.num_slots(self.bitrate, self.topo.phy()),
        );
        if to < self.hops() {
            seg.regenerators_at_end = self.needed;
        }
        seg
    }

    /// 从 `from` 出发连一跳都不可行时的阻塞原因
    fn first_hop_reason(&self, from: usize) -> BlockReason {
        let hop = &self.route[from..from + 1];
        if most_efficient_physical_scheme(self.topo, hop, self.schemes, self.bitrate).is_none() {
            BlockReason::NoModulationScheme
        } else if self.scheme(from, from + 1).is_none() {
            BlockReason::NoSpectrum
        } else {
            BlockReason::NoRegenerationPlan
        }
    }

    fn greedy(&self, narrowest: bool) -> Result<Vec<TransparentSegment>, BlockReason> {
        let mut segments = Vec::new();
        let mut s = 0;
        while s < self.hops() {
            let mut last_ok: Option<(usize, ModulationScheme)> = None;
            for x in s + 1..=self.hops() {
                let Some(scheme) = self.scheme(s, x) else {
                    break;
                };
                if narrowest {
                    if let Some((_, ok)) = last_ok {
                        if scheme < ok {
                            break;
                        }
                    }
                }
                if self.can_end_at(x) {
                    last_ok = Some((x, scheme));
                }
            }
            let Some((x, scheme)) = last_ok else {
                return Err(self.first_hop_reason(s));
            };
            trace!(from = s, to = x, %scheme, "透明段确定");
            segments.push(self.segment(s, x, scheme));
            s = x;
        }
        Ok(segments)
    }

    fn shortest_cost(&self) -> Result<Vec<TransparentSegment>, BlockReason> {
        let n = self.hops();
        // best[j] = (再生点数, 总频隙数, 前驱位置, 调制格式)
        let mut best: Vec<Option<(u32, usize, usize, Option<ModulationScheme>)>> = vec![None; n + 1];
        best[0] = Some((0, 0, 0, None));
        for i in 0..n {
            let Some((regens, slots, _, _)) = best[i] else {
                continue;
            };
            for j in i + 1..=n {
                if !self.can_end_at(j) {
                    continue;
                }
                let Some(scheme) = self.scheme(i, j) else {
                    continue;
                };
                let cand = (
                    regens + u32::from(j < n),
                    slots + scheme.num_slots(self.bitrate, self.topo.phy()) * (j - i),
                );
                let better = match best[j] {
                    None => true,
                    Some((r, sl, _, _)) => cand < (r, sl),
                };
                if better {
                    best[j] = Some((cand.0, cand.1, i, Some(scheme)));
                }
            }
        }

        let mut bounds = Vec::new();
        let mut j = n;
        while j > 0 {
            let Some((_, _, i, Some(scheme))) = best[j] else {
                return Err(self.first_hop_reason(0));
            };
            bounds.push((i, j, scheme));
            j = i;
        }
        bounds.reverse();
        Ok(bounds
            .into_iter()
            .map(|(i, j, scheme)| self.segment(i, j, scheme))
            .collect())
    }
}

impl RegeneratorAssignment {
    pub fn nickname(&self) -> &'static str {
        match self {
            RegeneratorAssignment::FirstLongestReach => "FLR",
            RegeneratorAssignment::FirstNarrowestSpectrum => "FNS",
            RegeneratorAssignment::ShortestCost => "SCRA",
        }
    }

    /// 把 `route` 切分为透明段。不预留任何资源。
    pub fn plan(
        &self,
        topo: &Topology,
        route: &[LinkId],
        schemes: &[ModulationScheme],
        bitrate: TransmissionBitrate,
        regenerator_bitrate: TransmissionBitrate,
    ) -> Result<Vec<TransparentSegment>, BlockReason> {
        if route.is_empty() {
            return Err(BlockReason::NoRoute);
        }
        let planner = Planner {
            topo,
            route,
            nodes: topo.route_nodes(route),
            schemes,
            bitrate,
            needed: regenerators_needed(bitrate, regenerator_bitrate),
        };
        let result = match self {
            RegeneratorAssignment::FirstLongestReach => planner.greedy(false),
            RegeneratorAssignment::FirstNarrowestSpectrum => planner.greedy(true),
            RegeneratorAssignment::ShortestCost => planner.shortest_cost(),
        };
        match &result {
            Ok(segs) => debug!(strategy = self.nickname(), segments = segs.len(), "再生器分配完成"),
            Err(reason) => debug!(strategy = self.nickname(), %reason, "再生器分配失败"),
        }
        result
    }
}

impl fmt::Display for RegeneratorAssignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.nickname())
    }
}

impl FromStr for RegeneratorAssignment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "FLR" | "first_longest_reach" => Ok(RegeneratorAssignment::FirstLongestReach),
            "FNS" | "first_narrowest_spectrum" => Ok(RegeneratorAssignment::FirstNarrowestSpectrum),
            "SCRA" | "shortest_cost" => Ok(RegeneratorAssignment::ShortestCost),
            other => Err(format!("unknown regenerator assignment '{other}'")),
        }
    }
}
