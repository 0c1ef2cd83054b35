//! 時間單位換算

use std::fmt;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::ScheduleError;

const SECONDS_PER_MINUTE: i64 = 60;
const SECONDS_PER_HOUR: i64 = 60 * SECONDS_PER_MINUTE;
const SECONDS_PER_DAY: i64 = 24 * SECONDS_PER_HOUR;

/// 時間單位
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DurationUnit {
    /// 天
    #[serde(rename = "day")]
    Day,
    /// 小時
    #[serde(rename = "hr")]
    Hour,
    /// 分鐘
    #[serde(rename = "min")]
    Minute,
    /// 秒
    #[serde(rename = "sec")]
    Second,
}

impl DurationUnit {
    /// 每單位對應的秒數
    pub fn seconds(self) -> Decimal {
        match self {
            DurationUnit::Day => Decimal::from(SECONDS_PER_DAY),
            DurationUnit::Hour => Decimal::from(SECONDS_PER_HOUR),
            DurationUnit::Minute => Decimal::from(SECONDS_PER_MINUTE),
            DurationUnit::Second => Decimal::ONE,
        }
    }

    /// 將數值換算為秒
    pub fn to_seconds(self, value: Decimal) -> Decimal {
        value * self.seconds()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DurationUnit::Day => "day",
            DurationUnit::Hour => "hr",
            DurationUnit::Minute => "min",
            DurationUnit::Second => "sec",
        }
    }
}

impl fmt::Display for DurationUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DurationUnit {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "day" => Ok(DurationUnit::Day),
            "hr" => Ok(DurationUnit::Hour),
            "min" => Ok(DurationUnit::Minute),
            "sec" => Ok(DurationUnit::Second),
            other => Err(ScheduleError::UnknownUnit(other.to_string())),
        }
    }
}

/// 將 (數值, 單位) 換算為秒
pub fn to_seconds(value: Decimal, unit: DurationUnit) -> Decimal {
    unit.to_seconds(value)
}

/// 供顯示用的時間長度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedDuration {
    pub value: Decimal,
    pub unit: DurationUnit,
}

impl fmt::Display for FormattedDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value.normalize(), self.unit)
    }
}

/// 將秒數轉為最大可用單位，保留兩位小數
///
/// 不足一分鐘時直接以秒表示，不做四捨五入。
pub fn format_duration(seconds: Decimal) -> FormattedDuration {
    let unit = [DurationUnit::Day, DurationUnit::Hour, DurationUnit::Minute]
        .into_iter()
        .find(|unit| seconds >= unit.seconds());

    match unit {
        Some(unit) => FormattedDuration {
            value: (seconds / unit.seconds())
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
            unit,
        },
        None => FormattedDuration {
            value: seconds,
            unit: DurationUnit::Second,
        },
    }
}
