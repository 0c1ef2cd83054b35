//! 製程指標與資源時間序列模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 瓶頸設備
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bottleneck {
    /// 設備ID
    pub equipment_id: String,

    /// 設備名稱
    pub name: String,

    /// 單批次佔用時長（秒）
    pub duration: Decimal,

    /// 實體數量
    pub quantity: u32,
}

/// 製程指標（由排程結果推導，不持久化）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessDetails {
    /// 瓶頸設備
    pub bottleneck: Bottleneck,

    /// 單批次時長（秒）
    pub batch_duration: Decimal,

    /// 整個批次計劃時長（秒）
    pub campaign_duration: Decimal,

    /// 批次數量
    pub batch_qty: u32,

    /// 週期時間：相鄰批次開始時間之差（秒）
    pub cycle_time: Decimal,
}

/// 資源時間序列上的一個點
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Timepoint {
    /// 時間（秒）
    pub time: Decimal,

    /// 該時間點的資源總用量
    pub value: Decimal,
}

impl Timepoint {
    pub fn new(time: Decimal, value: Decimal) -> Self {
        Self { time, value }
    }
}
