//! 路由代价函数
//!
//! 代价只依赖单条链路与呼叫上下文；幂级数代价的指数与系数来自外部（文件或优化器），
//! 路由本身不关心它们的来历。

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::net::Link;
use crate::phy::TransmissionBitrate;

/// 幂级数代价的归一化指标，取值都在 [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// 空闲频隙比例
    Availability,
    /// 占用频隙比例
    Occupability,
    /// 长度 / 最长链路长度
    Distance,
    /// 链路噪声 / 最大链路噪声
    Noise,
    /// 呼叫速率 / 最大速率
    Bitrate,
    /// 可放置窗口数 / 最大可放置窗口数
    Contiguity,
}

impl Metric {
    /// 是否依赖当前频谱占用
    pub fn is_state_dependent(&self) -> bool {
        matches!(
            self,
            Metric::Availability | Metric::Occupability | Metric::Contiguity
        )
    }

    pub fn value(&self, link: &Link, ctx: &CostContext) -> f64 {
        let total = link.num_slots().max(1) as f64;
        match self {
            Metric::Availability => link.free_slot_count() as f64 / total,
            Metric::Occupability => link.occupied_slot_count() as f64 / total,
            Metric::Distance => ratio(link.length_km(), ctx.max_length_km),
            Metric::Noise => ratio(link.noise().watts(), ctx.max_noise_watts),
            Metric::Bitrate => ratio(ctx.bitrate.bps(), ctx.max_bitrate.bps()),
            Metric::Contiguity => {
                let positions = (link.num_slots() + 1).saturating_sub(ctx.width).max(1);
                link.placements(ctx.width) as f64 / positions as f64
            }
        }
    }
}

fn ratio(x: f64, max: f64) -> f64 {
    if max > 0.0 { x / max } else { 0.0 }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PowerSeriesVariant {
    /// sum_i sum_n c[i][n] * x_i^n
    Matricial,
    /// 各指标幂向量的 Kronecker 积与系数逐项相乘后求和
    Tensorial,
}

/// 幂级数代价
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerSeries {
    pub variant: PowerSeriesVariant,
    pub metrics: Vec<Metric>,
    pub min_exponent: i32,
    pub max_exponent: i32,
    pub coefficients: Vec<f64>,
}

impl PowerSeries {
    pub fn new(
        variant: PowerSeriesVariant,
        metrics: Vec<Metric>,
        min_exponent: i32,
        max_exponent: i32,
        coefficients: Vec<f64>,
    ) -> ConfigResult<Self> {
        let psr = Self {
            variant,
            metrics,
            min_exponent,
            max_exponent,
            coefficients,
        };
        psr.validate()?;
        Ok(psr)
    }

    pub fn num_terms(&self) -> usize {
        (self.max_exponent - self.min_exponent + 1).max(0) as usize
    }

    /// 给定指标与指数范围所需的系数个数
    pub fn expected_coefficients(&self) -> usize {
        let n = self.num_terms();
        match self.variant {
            PowerSeriesVariant::Matricial => n * self.metrics.len(),
            PowerSeriesVariant::Tensorial => n.pow(self.metrics.len() as u32),
        }
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.metrics.is_empty() {
            return Err(ConfigError::Invalid("power series needs at least one metric".into()));
        }
        if self.max_exponent < self.min_exponent {
            return Err(ConfigError::Invalid(format!(
                "power series exponents out of order: {} > {}",
                self.min_exponent, self.max_exponent
            )));
        }
        let expected = self.expected_coefficients();
        if self.coefficients.len() != expected {
            return Err(ConfigError::Invalid(format!(
                "power series expects {} coefficients, got {}",
                expected,
                self.coefficients.len()
            )));
        }
        Ok(())
    }

    /// 单个指标的幂向量 [x^min, ..., x^max]
    fn powers(&self, x: f64) -> Vec<f64> {
        // 负指数时避免 0^-n
        let x = if self.min_exponent < 0 { x.max(f64::EPSILON) } else { x };
        (self.min_exponent..=self.max_exponent)
            .map(|n| x.powi(n))
            .collect()
    }

    /// 按指标顺序给出的取值求代价
    pub fn evaluate(&self, values: &[f64]) -> f64 {
        match self.variant {
            PowerSeriesVariant::Matricial => values
                .iter()
                .flat_map(|&x| self.powers(x))
                .zip(&self.coefficients)
                .map(|(p, c)| p * c)
                .sum(),
            PowerSeriesVariant::Tensorial => {
                let mut kron = vec![1.0];
                for &x in values {
                    let p = self.powers(x);
                    kron = kron
                        .iter()
                        .flat_map(|a| p.iter().map(move |b| a * b))
                        .collect();
                }
                kron.iter().zip(&self.coefficients).map(|(p, c)| p * c).sum()
            }
        }
    }

    pub fn is_state_dependent(&self) -> bool {
        self.metrics.iter().any(Metric::is_state_dependent)
    }
}

/// 计算链路代价时需要的呼叫/网络上下文
#[derive(Debug, Clone, Copy)]
pub struct CostContext {
    pub bitrate: TransmissionBitrate,
    pub max_bitrate: TransmissionBitrate,
    pub max_length_km: f64,
    pub max_noise_watts: f64,
    /// 以最低效调制格式计的所需频隙数
    pub width: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RoutingCost {
    MinimumHops,
    ShortestPath,
    /// 1 + L/Lmax + 占用比例
    LengthOccupationAvailability,
    /// 1 + L/Lmax + 1/(可放置窗口数 + 1)
    LengthOccupationContiguity,
    PowerSeries(PowerSeries),
}

impl RoutingCost {
    pub fn link_cost(&self, link: &Link, ctx: &CostContext) -> f64 {
        match self {
            RoutingCost::MinimumHops => 1.0,
            RoutingCost::ShortestPath => link.length_km(),
            RoutingCost::LengthOccupationAvailability => {
                1.0 + Metric::Distance.value(link, ctx) + Metric::Occupability.value(link, ctx)
            }
            RoutingCost::LengthOccupationContiguity => {
                1.0 + Metric::Distance.value(link, ctx)
                    + 1.0 / (link.placements(ctx.width) as f64 + 1.0)
            }
            RoutingCost::PowerSeries(psr) => {
                let values: Vec<f64> = psr.metrics.iter().map(|m| m.value(link, ctx)).collect();
                psr.evaluate(&values)
            }
        }
    }

    /// 代价是否随频谱占用变化（决定固定路由缓存是否有意义）
    pub fn is_state_dependent(&self) -> bool {
        match self {
            RoutingCost::MinimumHops | RoutingCost::ShortestPath => false,
            RoutingCost::LengthOccupationAvailability
            | RoutingCost::LengthOccupationContiguity => true,
            RoutingCost::PowerSeries(psr) => psr.is_state_dependent(),
        }
    }

    pub fn nickname(&self) -> &'static str {
        match self {
            RoutingCost::MinimumHops => "MH",
            RoutingCost::ShortestPath => "SP",
            RoutingCost::LengthOccupationAvailability => "LORa",
            RoutingCost::LengthOccupationContiguity => "LORc",
            RoutingCost::PowerSeries(p) => match p.variant {
                PowerSeriesVariant::Matricial => "matPSR",
                PowerSeriesVariant::Tensorial => "tenPSR",
            },
        }
    }
}

impl fmt::Display for RoutingCost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.nickname())
    }
}

/// 只解析不需要额外参数的代价；幂级数代价由 `PowerSeries` 单独构造
impl FromStr for RoutingCost {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MH" | "minimum_hops" => Ok(RoutingCost::MinimumHops),
            "SP" | "shortest_path" => Ok(RoutingCost::ShortestPath),
            "LORa" | "length_occupation_availability" => {
                Ok(RoutingCost::LengthOccupationAvailability)
            }
            "LORc" | "length_occupation_contiguity" => {
                Ok(RoutingCost::LengthOccupationContiguity)
            }
            other => Err(format!("unknown routing cost '{other}'")),
        }
    }
}
