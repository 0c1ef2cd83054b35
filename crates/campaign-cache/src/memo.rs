//! 排程結果記憶
//!
//! 保存最後一次的輸入與結果。輸入在結構上相同時直接返回緩存結果；
//! 任何變更都會重新計算，並清除依賴該排程的資源時間序列。

use std::collections::HashMap;

use campaign_calc::{CampaignScheduler, ScheduleResult};
use campaign_core::{Campaign, EngineConfig, Equipment, Result, Timepoint};

struct CachedSchedule {
    equipment: Vec<Equipment>,
    campaign: Campaign,
    result: ScheduleResult,
}

impl CachedSchedule {
    fn matches(&self, equipment: &[Equipment], campaign: &Campaign) -> bool {
        self.campaign == *campaign && self.equipment.as_slice() == equipment
    }
}

/// 排程記憶
pub struct ScheduleMemo {
    scheduler: CampaignScheduler,
    cached: Option<CachedSchedule>,
    timelines: HashMap<String, Vec<Timepoint>>,
    hits: u64,
    misses: u64,
}

impl ScheduleMemo {
    /// 創建新的記憶
    pub fn new(config: EngineConfig) -> Self {
        Self {
            scheduler: CampaignScheduler::new(config),
            cached: None,
            timelines: HashMap::new(),
            hits: 0,
            misses: 0,
        }
    }

    /// 返回緩存結果，輸入有變更時重新計算
    ///
    /// 計算失敗時不緩存錯誤，保留上一次成功的結果。
    pub fn get_or_compute(
        &mut self,
        equipment: &[Equipment],
        campaign: &Campaign,
    ) -> Result<ScheduleResult> {
        if let Some(entry) = &self.cached {
            if entry.matches(equipment, campaign) {
                self.hits += 1;
                tracing::debug!("排程緩存命中（累計 {} 次）", self.hits);
                return Ok(entry.result.clone());
            }
        }

        let result = self.scheduler.compute(equipment, campaign)?;
        self.misses += 1;
        tracing::debug!("輸入已變更，重新計算排程（累計 {} 次）", self.misses);
        self.timelines.clear();
        self.cached = Some(CachedSchedule {
            equipment: equipment.to_vec(),
            campaign: campaign.clone(),
            result: result.clone(),
        });

        Ok(result)
    }

    /// 依緩存排程取得資源用量時間序列；尚無排程時返回 None
    pub fn resource_timeline(&mut self, resource_id: &str) -> Option<Vec<Timepoint>> {
        let entry = self.cached.as_ref()?;

        if let Some(timeline) = self.timelines.get(resource_id) {
            return Some(timeline.clone());
        }

        let timeline = self
            .scheduler
            .resource_timeline(&entry.result.equipment, resource_id);
        self.timelines
            .insert(resource_id.to_string(), timeline.clone());
        Some(timeline)
    }

    /// 最後一次成功的排程結果
    pub fn cached_result(&self) -> Option<&ScheduleResult> {
        self.cached.as_ref().map(|entry| &entry.result)
    }

    /// 已緩存時間序列的資源數
    pub fn cached_timeline_count(&self) -> usize {
        self.timelines.len()
    }

    /// 清除所有緩存
    pub fn invalidate(&mut self) {
        self.cached = None;
        self.timelines.clear();
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}

impl Default for ScheduleMemo {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
