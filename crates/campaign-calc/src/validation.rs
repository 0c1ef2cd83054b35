//! 輸入驗證
//!
//! 在排程前檢查：
//! - 設備實體數量為 0
//! - 批次數量為 0 或超過上限
//! - 固定頻率為負

use campaign_core::{Campaign, EngineConfig, Equipment, Result, ScheduleError};
use rust_decimal::Decimal;

/// 輸入驗證器
pub struct InputValidator;

impl InputValidator {
    /// 驗證設備與批次計劃，遇到第一個錯誤即返回
    pub fn validate(
        equipment: &[Equipment],
        campaign: &Campaign,
        config: &EngineConfig,
    ) -> Result<()> {
        Self::validate_equipment(equipment)?;
        Self::validate_campaign(campaign, config)
    }

    /// 驗證設備列表
    ///
    /// 工序ID重複由工序時間解析器檢查。
    pub fn validate_equipment(equipment: &[Equipment]) -> Result<()> {
        match equipment.iter().find(|eq| eq.quantity == 0) {
            Some(eq) => Err(ScheduleError::InvalidEquipment(format!(
                "設備 {} 的實體數量必須至少為 1",
                eq.id
            ))),
            None => Ok(()),
        }
    }

    /// 驗證批次計劃
    pub fn validate_campaign(campaign: &Campaign, config: &EngineConfig) -> Result<()> {
        if campaign.quantity == 0 {
            return Err(ScheduleError::InvalidCampaign(
                "批次數量必須至少為 1".to_string(),
            ));
        }

        if let Some(max) = config.max_batches_per_campaign {
            if campaign.quantity > max {
                return Err(ScheduleError::InvalidCampaign(format!(
                    "批次數量 {} 超過上限 {}",
                    campaign.quantity, max
                )));
            }
        }

        if campaign.is_fixed() && campaign.frequency < Decimal::ZERO {
            return Err(ScheduleError::InvalidCampaign(format!(
                "固定頻率不可為負: {} {}",
                campaign.frequency, campaign.frequency_unit
            )));
        }

        Ok(())
    }
}
