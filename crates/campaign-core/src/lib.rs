//! # Campaign Core
//!
//! 批次排程核心資料模型與類型定義

pub mod campaign;
pub mod config;
pub mod equipment;
pub mod metrics;
pub mod operation;
pub mod resource;
pub mod schedule;
pub mod unit;

// Re-export 主要類型
pub use campaign::{Campaign, SchedulingType};
pub use config::EngineConfig;
pub use equipment::Equipment;
pub use metrics::{Bottleneck, ProcessDetails, Timepoint};
pub use operation::{Operation, PredecessorRelation, ResourceDemand, INITIAL_PREDECESSOR};
pub use resource::ResourceOption;
pub use schedule::{EquipmentWithTiming, InstanceOccupancy, TimedOperation};
pub use unit::{format_duration, to_seconds, DurationUnit, FormattedDuration};

/// 排程錯誤類型
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScheduleError {
    #[error("工序 {operation_id} 引用了不存在的前置工序: {predecessor_id}")]
    MissingPredecessor {
        operation_id: String,
        predecessor_id: String,
    },

    #[error("偵測到循環依賴: {}", .cycle.join(" → "))]
    CyclicDependency { cycle: Vec<String> },

    #[error("設備沒有任何工序: {0}")]
    EmptyEquipment(String),

    #[error("未知的時間單位: {0}")]
    UnknownUnit(String),

    #[error("重複的工序ID: {0}")]
    DuplicateOperationId(String),

    #[error("無效的設備配置: {0}")]
    InvalidEquipment(String),

    #[error("無效的批次計劃: {0}")]
    InvalidCampaign(String),

    #[error("排程為空，無法計算指標")]
    EmptySchedule,
}

pub type Result<T> = std::result::Result<T, ScheduleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_error_names_path() {
        let err = ScheduleError::CyclicDependency {
            cycle: vec!["A".to_string(), "B".to_string(), "A".to_string()],
        };

        assert!(err.to_string().contains("A → B → A"));
    }

    #[test]
    fn test_missing_predecessor_message() {
        let err = ScheduleError::MissingPredecessor {
            operation_id: "OP-2".to_string(),
            predecessor_id: "GHOST".to_string(),
        };

        let message = err.to_string();
        assert!(message.contains("OP-2"));
        assert!(message.contains("GHOST"));
    }
}
