//! 增益与功率单位
//!
//! 提供 dB/线性 与 dBm/瓦特 之间的换算。

use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub};

/// 增益（内部以 dB 存储）
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Gain {
    db: f64,
}

impl Gain {
    /// 0 dB（透明）
    pub const UNITY: Gain = Gain { db: 0.0 };

    pub fn from_db(db: f64) -> Self {
        Self { db }
    }

    pub fn from_linear(linear: f64) -> Self {
        Self {
            db: 10.0 * linear.log10(),
        }
    }

    pub fn db(&self) -> f64 {
        self.db
    }

    pub fn linear(&self) -> f64 {
        10f64.powf(0.1 * self.db)
    }
}

impl Neg for Gain {
    type Output = Gain;

    fn neg(self) -> Gain {
        Gain { db: -self.db }
    }
}

// 级联增益在 dB 域相加
impl Add for Gain {
    type Output = Gain;

    fn add(self, rhs: Gain) -> Gain {
        Gain {
            db: self.db + rhs.db,
        }
    }
}

impl Sub for Gain {
    type Output = Gain;

    fn sub(self, rhs: Gain) -> Gain {
        Gain {
            db: self.db - rhs.db,
        }
    }
}

/// 功率（内部以瓦特存储，允许为 0）
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Power {
    watts: f64,
}

impl Power {
    pub const ZERO: Power = Power { watts: 0.0 };

    pub fn from_watts(watts: f64) -> Self {
        Self { watts }
    }

    pub fn from_dbm(dbm: f64) -> Self {
        Self {
            watts: 1e-3 * 10f64.powf(0.1 * dbm),
        }
    }

    pub fn watts(&self) -> f64 {
        self.watts
    }

    /// 0 W 对应 -inf dBm。
    pub fn dbm(&self) -> f64 {
        10.0 * (self.watts * 1e3).log10()
    }
}

impl Mul<Gain> for Power {
    type Output = Power;

    fn mul(self, g: Gain) -> Power {
        Power {
            watts: self.watts * g.linear(),
        }
    }
}

impl MulAssign<Gain> for Power {
    fn mul_assign(&mut self, g: Gain) {
        self.watts *= g.linear();
    }
}

impl Add for Power {
    type Output = Power;

    fn add(self, rhs: Power) -> Power {
        Power {
            watts: self.watts + rhs.watts,
        }
    }
}

impl AddAssign for Power {
    fn add_assign(&mut self, rhs: Power) {
        self.watts += rhs.watts;
    }
}
