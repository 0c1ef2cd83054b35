//! 批次計劃模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::unit::DurationUnit;

/// 排程方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchedulingType {
    /// 依瓶頸設備（考慮實體數量）自動計算批次間隔
    Optimized,
    /// 固定頻率
    Fixed,
}

/// 批次計劃（Campaign）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    /// 批次數量（至少為 1）
    pub quantity: u32,

    /// 排程方式
    pub scheduling_type: SchedulingType,

    /// 固定頻率（僅 `Fixed` 時使用）
    pub frequency: Decimal,

    /// 頻率單位
    pub frequency_unit: DurationUnit,
}

impl Campaign {
    /// 創建優化排程的批次計劃
    pub fn optimized(quantity: u32) -> Self {
        Self {
            quantity,
            scheduling_type: SchedulingType::Optimized,
            frequency: Decimal::ZERO,
            frequency_unit: DurationUnit::Hour,
        }
    }

    /// 創建固定頻率的批次計劃
    pub fn fixed(quantity: u32, frequency: Decimal, frequency_unit: DurationUnit) -> Self {
        Self {
            quantity,
            scheduling_type: SchedulingType::Fixed,
            frequency,
            frequency_unit,
        }
    }

    /// 固定頻率（秒）
    pub fn frequency_seconds(&self) -> Decimal {
        self.frequency_unit.to_seconds(self.frequency)
    }

    /// 檢查是否為固定頻率排程
    pub fn is_fixed(&self) -> bool {
        self.scheduling_type == SchedulingType::Fixed
    }
}

impl Default for Campaign {
    fn default() -> Self {
        Self::optimized(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_campaign() {
        let campaign = Campaign::fixed(3, Decimal::from(4), DurationUnit::Hour);

        assert!(campaign.is_fixed());
        assert_eq!(campaign.frequency_seconds(), Decimal::from(14_400));
    }

    #[test]
    fn test_campaign_wire_shape() {
        let json = r#"{
            "quantity": 5,
            "schedulingType": "optimized",
            "frequency": 0,
            "frequencyUnit": "hr"
        }"#;

        let campaign: Campaign = serde_json::from_str(json).unwrap();
        assert_eq!(campaign, Campaign::optimized(5));
    }
}
