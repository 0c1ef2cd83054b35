//! 排程結果模型（帶時間的工序與設備）

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::operation::Operation;

/// 已排定時間的工序
///
/// 時間為相對於第一批次起點的秒數，可為負值。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimedOperation {
    #[serde(flatten)]
    pub operation: Operation,

    /// 開始時間（秒）
    pub start: Decimal,

    /// 結束時間（秒）
    pub end: Decimal,

    /// 批次編號（從 1 開始）
    pub batch_number: u32,
}

impl TimedOperation {
    /// 創建第一批次的工序
    pub fn first_batch(operation: Operation, start: Decimal, end: Decimal) -> Self {
        Self {
            operation,
            start,
            end,
            batch_number: 1,
        }
    }

    pub fn id(&self) -> &str {
        &self.operation.id
    }

    /// 檢查時間點是否落在 [start, end] 內
    pub fn covers(&self, time: Decimal) -> bool {
        self.start <= time && time <= self.end
    }
}

/// 帶時間的設備
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentWithTiming {
    /// 設備ID
    pub id: String,

    /// 名稱
    pub name: String,

    /// 實體數量
    pub quantity: u32,

    /// 單批次佔用時長（秒）
    pub duration: Decimal,

    /// 所有批次的工序
    pub operations: Vec<TimedOperation>,
}

impl EquipmentWithTiming {
    /// 指定批次的工序
    pub fn batch_operations(&self, batch_number: u32) -> impl Iterator<Item = &TimedOperation> {
        self.operations
            .iter()
            .filter(move |op| op.batch_number == batch_number)
    }

    /// 指定批次在此設備上的佔用時間窗 (最早開始, 最晚結束)
    pub fn batch_window(&self, batch_number: u32) -> Option<(Decimal, Decimal)> {
        self.batch_operations(batch_number)
            .fold(None, |window, op| match window {
                None => Some((op.start, op.end)),
                Some((start, end)) => Some((start.min(op.start), end.max(op.end))),
            })
    }

    /// 觀察到的最大批次編號
    pub fn batch_count(&self) -> u32 {
        self.operations
            .iter()
            .map(|op| op.batch_number)
            .max()
            .unwrap_or(0)
    }

    /// 依ID查找工序
    pub fn find_operation(&self, operation_id: &str) -> Option<&TimedOperation> {
        self.operations.iter().find(|op| op.id() == operation_id)
    }
}

/// 設備實體佔用記錄（某批次在哪個實體上、佔用多久）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceOccupancy {
    /// 設備ID
    pub equipment_id: String,

    /// 實體編號（從 1 開始）
    pub instance: u32,

    /// 批次編號
    pub batch_number: u32,

    /// 開始時間（秒）
    pub start: Decimal,

    /// 結束時間（秒）
    pub end: Decimal,
}

impl InstanceOccupancy {
    /// 檢查兩筆佔用是否在同一實體上重疊
    ///
    /// 首尾相接（前一批結束即下一批開始）不算重疊。
    pub fn overlaps(&self, other: &InstanceOccupancy) -> bool {
        self.equipment_id == other.equipment_id
            && self.instance == other.instance
            && self.start < other.end
            && other.start < self.end
    }
}
