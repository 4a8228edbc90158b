//! 频谱分配
//!
//! 所有策略共享同一个可行性扫描：对段内所有链路的频隙做逐下标 AND，
//! 得到公共空闲游程，再按策略在满足宽度的候选窗口中选一个。
//! 预留要么覆盖整段所有链路，要么什么都不做。

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::net::{LinkId, SlotWindow, Topology};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpectrumAssignment {
    #[default]
    FirstFit,
    LastFit,
    /// 能放下请求的最小空闲游程
    BestFit,
    /// 恰好等宽的空闲游程，没有则退化为 First-Fit
    ExactFit,
    /// 在所有可行起点中均匀随机
    RandomFit,
}

impl SpectrumAssignment {
    pub fn nickname(&self) -> &'static str {
        match self {
            SpectrumAssignment::FirstFit => "FF",
            SpectrumAssignment::LastFit => "LF",
            SpectrumAssignment::BestFit => "BF",
            SpectrumAssignment::ExactFit => "EF",
            SpectrumAssignment::RandomFit => "RF",
        }
    }

    /// 寻找窗口但不预留
    pub fn find<R: Rng + ?Sized>(
        &self,
        topo: &Topology,
        links: &[LinkId],
        width: usize,
        rng: &mut R,
    ) -> Option<SlotWindow> {
        if links.is_empty() || width == 0 {
            return None;
        }
        let runs: Vec<(usize, usize)> = free_runs(&availability_mask(topo, links))
            .into_iter()
            .filter(|&(_, len)| len >= width)
            .collect();
        let start = match self {
            SpectrumAssignment::FirstFit => runs.first().map(|&(s, _)| s),
            SpectrumAssignment::LastFit => runs.last().map(|&(s, len)| s + len - width),
            SpectrumAssignment::BestFit => runs
                .iter()
                .min_by_key(|&&(s, len)| (len, s))
                .map(|&(s, _)| s),
            SpectrumAssignment::ExactFit => runs
                .iter()
                .find(|&&(_, len)| len == width)
                .or(runs.first())
                .map(|&(s, _)| s),
            SpectrumAssignment::RandomFit => {
                let starts: Vec<usize> = runs
                    .iter()
                    .flat_map(|&(s, len)| s..=s + len - width)
                    .collect();
                if starts.is_empty() {
                    None
                } else {
                    Some(starts[rng.random_range(0..starts.len())])
                }
            }
        }?;
        Some(SlotWindow::new(start, width))
    }

    /// 寻找窗口并在段内所有链路上预留
    pub fn assign<R: Rng + ?Sized>(
        &self,
        topo: &mut Topology,
        links: &[LinkId],
        width: usize,
        rng: &mut R,
    ) -> Option<SlotWindow> {
        let window = self.find(topo, links, width, rng)?;
        for &l in links {
            topo.link_mut(l).occupy(window);
        }
        trace!(policy = self.nickname(), start = window.start, width, "预留频谱窗口");
        Some(window)
    }
}

impl fmt::Display for SpectrumAssignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.nickname())
    }
}

impl FromStr for SpectrumAssignment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "FF" | "first_fit" => Ok(SpectrumAssignment::FirstFit),
            "LF" | "last_fit" => Ok(SpectrumAssignment::LastFit),
            "BF" | "best_fit" => Ok(SpectrumAssignment::BestFit),
            "EF" | "exact_fit" => Ok(SpectrumAssignment::ExactFit),
            "RF" | "random_fit" => Ok(SpectrumAssignment::RandomFit),
            other => Err(format!("unknown spectrum assignment '{other}'")),
        }
    }
}

/// 逐下标 AND：段内所有链路都空闲的频隙为 true
pub fn availability_mask(topo: &Topology, links: &[LinkId]) -> Vec<bool> {
    let Some(first) = links.first() else {
        return Vec::new();
    };
    let mut mask: Vec<bool> = topo.link(*first).slots().iter().map(|s| s.is_free()).collect();
    for &l in &links[1..] {
        for (m, s) in mask.iter_mut().zip(topo.link(l).slots()) {
            *m &= s.is_free();
        }
    }
    mask
}

/// 空闲游程 (起点, 长度)，按起点升序
pub fn free_runs(mask: &[bool]) -> Vec<(usize, usize)> {
    let mut runs = Vec::new();
    let mut start = None;
    for (i, &free) in mask.iter().enumerate() {
        match (free, start) {
            (true, None) => start = Some(i),
            (false, Some(s)) => {
                runs.push((s, i - s));
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        runs.push((s, mask.len() - s));
    }
    runs
}

/// 段内最长公共连续空闲频隙数
pub fn max_contiguous(topo: &Topology, links: &[LinkId]) -> usize {
    free_runs(&availability_mask(topo, links))
        .into_iter()
        .map(|(_, len)| len)
        .max()
        .unwrap_or(0)
}
