//! # Campaign Calculation Engine
//!
//! 批次計劃排程計算引擎

pub mod metrics;
pub mod replication;
pub mod resource_timeline;
pub mod scheduler;
pub mod span;
pub mod timing;
pub mod validation;

use campaign_core::{Campaign, Equipment, EquipmentWithTiming, ProcessDetails, Result, Timepoint};
use rust_decimal::Decimal;

// Re-export 主要類型
pub use metrics::ProcessMetricsCalculator;
pub use replication::{assign_instance, replicated_id, CampaignReplicator, InstanceConflict};
pub use resource_timeline::{average, peak, ResourceTimelineAggregator, ResourceUsage};
pub use scheduler::CampaignScheduler;
pub use span::EquipmentSpanCalculator;
pub use timing::{OperationTimingResolver, OperationWindow};
pub use validation::InputValidator;

/// 排程計算結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleResult {
    /// 複製後的設備排程
    pub equipment: Vec<EquipmentWithTiming>,

    /// 批次間隔（秒）
    pub inter_batch_offset: Decimal,

    /// 警告信息
    pub warnings: Vec<ScheduleWarning>,

    /// 計算耗時（毫秒）
    pub calculation_time_ms: Option<u128>,
}

impl ScheduleResult {
    /// 創建空的計算結果
    pub fn empty() -> Self {
        Self {
            equipment: Vec::new(),
            inter_batch_offset: Decimal::ZERO,
            warnings: Vec::new(),
            calculation_time_ms: None,
        }
    }

    /// 添加警告
    pub fn add_warning(&mut self, warning: ScheduleWarning) {
        self.warnings.push(warning);
    }

    /// 所有批次的工序總數
    pub fn operation_count(&self) -> usize {
        self.equipment.iter().map(|eq| eq.operations.len()).sum()
    }
}

/// 排程警告（不中止計算的問題，例如設備實體佔用重疊）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleWarning {
    pub equipment_id: String,
    pub message: String,
}

impl ScheduleWarning {
    pub fn new(equipment_id: String, message: String) -> Self {
        Self {
            equipment_id,
            message,
        }
    }
}

/// 以預設配置計算排程，只返回複製後的設備
pub fn compute_schedule(
    equipment: &[Equipment],
    campaign: &Campaign,
) -> Result<Vec<EquipmentWithTiming>> {
    CampaignScheduler::default()
        .compute(equipment, campaign)
        .map(|result| result.equipment)
}

/// 計算製程指標
pub fn compute_process_details(equipment: &[EquipmentWithTiming]) -> Result<ProcessDetails> {
    ProcessMetricsCalculator::calculate(equipment)
}

/// 以預設配置建立資源用量時間序列
pub fn compute_resource_timeline(
    equipment: &[EquipmentWithTiming],
    resource_id: &str,
) -> Vec<Timepoint> {
    ResourceTimelineAggregator::default().build(equipment, resource_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_result() {
        let mut result = ScheduleResult::empty();
        assert_eq!(result.operation_count(), 0);

        result.add_warning(ScheduleWarning::new(
            "R-1".to_string(),
            "overlap".to_string(),
        ));
        assert_eq!(result.warnings.len(), 1);
    }
}
