//! 排程引擎配置

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 排程引擎配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// 單一批次計劃允許的最大批次數；None 表示不限制
    pub max_batches_per_campaign: Option<u32>,

    /// 資源時間序列在區間邊緣前後取樣的間距（秒）
    pub timeline_bracket: Decimal,

    /// 有意義的資源時間序列最少點數
    pub min_timeline_points: usize,

    /// 是否檢查設備實體的佔用衝突
    ///
    /// 固定頻率排程下，同一實體上的相鄰批次可能重疊；
    /// 衝突只產生警告，不會中止計算。
    pub detect_instance_conflicts: bool,
}

impl EngineConfig {
    /// 創建預設配置
    pub fn new() -> Self {
        Self {
            max_batches_per_campaign: None,
            timeline_bracket: Decimal::ONE,
            min_timeline_points: 3,
            detect_instance_conflicts: true,
        }
    }

    /// 建構器模式：設置最大批次數
    pub fn with_max_batches_per_campaign(mut self, max: u32) -> Self {
        self.max_batches_per_campaign = Some(max);
        self
    }

    /// 建構器模式：設置取樣間距
    pub fn with_timeline_bracket(mut self, bracket: Decimal) -> Self {
        self.timeline_bracket = bracket;
        self
    }

    /// 建構器模式：設置有意義時間序列的最少點數
    pub fn with_min_timeline_points(mut self, points: usize) -> Self {
        self.min_timeline_points = points;
        self
    }

    /// 建構器模式：設置是否檢查實體佔用衝突
    pub fn with_detect_instance_conflicts(mut self, detect: bool) -> Self {
        self.detect_instance_conflicts = detect;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();

        assert_eq!(config.max_batches_per_campaign, None);
        assert_eq!(config.timeline_bracket, Decimal::ONE);
        assert_eq!(config.min_timeline_points, 3);
        assert!(config.detect_instance_conflicts);
    }

    #[test]
    fn test_config_builder() {
        let config = EngineConfig::new()
            .with_max_batches_per_campaign(12)
            .with_timeline_bracket(Decimal::new(5, 1))
            .with_detect_instance_conflicts(false);

        assert_eq!(config.max_batches_per_campaign, Some(12));
        assert_eq!(config.timeline_bracket, Decimal::new(5, 1));
        assert!(!config.detect_instance_conflicts);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: EngineConfig =
            serde_json::from_str(r#"{ "max_batches_per_campaign": 20 }"#).unwrap();

        assert_eq!(config.max_batches_per_campaign, Some(20));
        assert_eq!(config.min_timeline_points, 3);
    }
}
