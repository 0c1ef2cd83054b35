//! # Campaign
//!
//! 批次製程排程引擎：解析工序時間、複製批次、計算製程指標與資源用量。

pub use campaign_cache::ScheduleMemo;
pub use campaign_calc::{
    assign_instance, average, compute_process_details, compute_resource_timeline,
    compute_schedule, peak, CampaignScheduler, ResourceUsage, ScheduleResult, ScheduleWarning,
};
pub use campaign_core::{
    format_duration, to_seconds, Bottleneck, Campaign, DurationUnit, EngineConfig, Equipment,
    EquipmentWithTiming, FormattedDuration, Operation, PredecessorRelation, ProcessDetails,
    ResourceDemand, ResourceOption, Result, ScheduleError, SchedulingType, TimedOperation,
    Timepoint, INITIAL_PREDECESSOR,
};
