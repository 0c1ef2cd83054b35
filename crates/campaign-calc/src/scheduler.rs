//! 批次計劃排程主入口

use campaign_core::{
    Campaign, EngineConfig, Equipment, EquipmentWithTiming, ProcessDetails, ResourceOption,
    Result, Timepoint,
};

use crate::metrics::ProcessMetricsCalculator;
use crate::replication::CampaignReplicator;
use crate::resource_timeline::{ResourceTimelineAggregator, ResourceUsage};
use crate::span::EquipmentSpanCalculator;
use crate::validation::InputValidator;
use crate::{ScheduleResult, ScheduleWarning};

/// 批次計劃排程器
pub struct CampaignScheduler {
    config: EngineConfig,
}

impl CampaignScheduler {
    /// 創建新的排程器
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// 主排程計算入口
    pub fn compute(&self, equipment: &[Equipment], campaign: &Campaign) -> Result<ScheduleResult> {
        tracing::info!(
            "開始排程計算：設備 {} 台，批次 {} 批，排程方式 {:?}",
            equipment.len(),
            campaign.quantity,
            campaign.scheduling_type
        );

        let start_time = std::time::Instant::now();

        // Step 1: 輸入驗證
        tracing::debug!("Step 1: 輸入驗證");
        InputValidator::validate(equipment, campaign, &self.config)?;

        // Step 2: 第一批次工序時間
        tracing::debug!("Step 2: 解析第一批次工序時間");
        let single_batch = EquipmentSpanCalculator::single_batch(equipment)?;

        // Step 3: 批次間隔
        tracing::debug!("Step 3: 計算批次間隔");
        let offset = CampaignReplicator::inter_batch_offset(&single_batch, campaign)?;
        tracing::debug!("批次間隔: {} 秒", offset);

        // Step 4: 批次複製
        tracing::debug!("Step 4: 複製 {} 個批次", campaign.quantity);
        let replicated =
            CampaignReplicator::replicate_with_offset(&single_batch, campaign.quantity, offset)?;

        let mut result = ScheduleResult::empty();
        result.inter_batch_offset = offset;

        // Step 5: 實體佔用衝突
        if self.config.detect_instance_conflicts {
            tracing::debug!("Step 5: 檢查設備實體佔用");
            for conflict in CampaignReplicator::find_instance_conflicts(&replicated) {
                tracing::warn!(
                    "設備 {} 實體 {}：批次 {} 與批次 {} 重疊 {} 秒",
                    conflict.later.equipment_id,
                    conflict.later.instance,
                    conflict.earlier.batch_number,
                    conflict.later.batch_number,
                    conflict.overlap()
                );
                result.add_warning(ScheduleWarning::new(
                    conflict.later.equipment_id.clone(),
                    format!(
                        "實體 {} 上批次 {} 開始時批次 {} 尚未結束（重疊 {} 秒）",
                        conflict.later.instance,
                        conflict.later.batch_number,
                        conflict.earlier.batch_number,
                        conflict.overlap()
                    ),
                ));
            }
        }

        result.equipment = replicated;

        let elapsed = start_time.elapsed();
        result.calculation_time_ms = Some(elapsed.as_millis());

        tracing::info!(
            "排程計算完成：工序 {} 道，警告 {} 則，耗時 {:?}",
            result.operation_count(),
            result.warnings.len(),
            elapsed
        );

        Ok(result)
    }

    /// 製程指標
    pub fn process_details(&self, equipment: &[EquipmentWithTiming]) -> Result<ProcessDetails> {
        ProcessMetricsCalculator::calculate(equipment)
    }

    /// 指定資源的用量時間序列
    pub fn resource_timeline(
        &self,
        equipment: &[EquipmentWithTiming],
        resource_id: &str,
    ) -> Vec<Timepoint> {
        ResourceTimelineAggregator::new(&self.config).build(equipment, resource_id)
    }

    /// 所有資源的用量摘要
    pub fn resource_usage(
        &self,
        equipment: &[EquipmentWithTiming],
        resources: &[ResourceOption],
    ) -> Vec<ResourceUsage> {
        ResourceTimelineAggregator::new(&self.config).summarize(equipment, resources)
    }
}

impl Default for CampaignScheduler {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
