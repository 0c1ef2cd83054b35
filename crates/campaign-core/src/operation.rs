//! 工序模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::unit::DurationUnit;

/// 無前置工序的哨兵值（工序鏈起點）
pub const INITIAL_PREDECESSOR: &str = "initial";

/// 前置關係
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PredecessorRelation {
    /// 前置完成後開始
    FinishToStart,
    /// 與前置同時開始
    StartToStart,
    /// 與前置同時完成
    FinishToFinish,
    /// 前置開始時完成
    StartToFinish,
}

impl PredecessorRelation {
    /// 依前置工序的時間窗計算本工序的開始時間（秒）
    pub fn anchor_start(
        self,
        predecessor_start: Decimal,
        predecessor_end: Decimal,
        duration: Decimal,
        offset: Decimal,
    ) -> Decimal {
        match self {
            PredecessorRelation::FinishToStart => predecessor_end + offset,
            PredecessorRelation::StartToStart => predecessor_start + offset,
            PredecessorRelation::FinishToFinish => predecessor_end - duration + offset,
            PredecessorRelation::StartToFinish => predecessor_start - duration + offset,
        }
    }
}

/// 工序的資源需求（整個工序期間恆定）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceDemand {
    /// 資源選項ID
    pub resource_option_id: String,

    /// 需求數量
    pub value: Decimal,
}

impl ResourceDemand {
    pub fn new(resource_option_id: impl Into<String>, value: Decimal) -> Self {
        Self {
            resource_option_id: resource_option_id.into(),
            value,
        }
    }
}

/// 工序
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    /// 工序ID
    pub id: String,

    /// 名稱
    pub name: String,

    /// 持續時間
    pub duration: Decimal,

    /// 持續時間單位
    pub duration_unit: DurationUnit,

    /// 前置工序ID（`"initial"` 表示無前置）
    pub predecessor_id: String,

    /// 前置關係
    pub predecessor_relation: PredecessorRelation,

    /// 偏移量（可為負）
    pub offset: Decimal,

    /// 偏移量單位
    pub offset_unit: DurationUnit,

    /// 資源需求
    #[serde(default)]
    pub resources: Vec<ResourceDemand>,

    /// 所屬設備ID
    pub parent_id: String,
}

impl Operation {
    /// 創建新的工序（預設為起點、完成後開始、零偏移）
    pub fn new(
        id: impl Into<String>,
        parent_id: impl Into<String>,
        duration: Decimal,
        duration_unit: DurationUnit,
    ) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            duration,
            duration_unit,
            predecessor_id: INITIAL_PREDECESSOR.to_string(),
            predecessor_relation: PredecessorRelation::FinishToStart,
            offset: Decimal::ZERO,
            offset_unit: DurationUnit::Second,
            resources: Vec::new(),
            parent_id: parent_id.into(),
        }
    }

    /// 建構器模式：設置名稱
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// 建構器模式：設置前置工序與關係
    pub fn with_predecessor(
        mut self,
        predecessor_id: impl Into<String>,
        relation: PredecessorRelation,
    ) -> Self {
        self.predecessor_id = predecessor_id.into();
        self.predecessor_relation = relation;
        self
    }

    /// 建構器模式：設置偏移量
    pub fn with_offset(mut self, offset: Decimal, unit: DurationUnit) -> Self {
        self.offset = offset;
        self.offset_unit = unit;
        self
    }

    /// 建構器模式：添加資源需求
    pub fn with_resource(mut self, resource_option_id: impl Into<String>, value: Decimal) -> Self {
        self.resources
            .push(ResourceDemand::new(resource_option_id, value));
        self
    }

    /// 前置工序ID；起點工序返回 None
    pub fn predecessor(&self) -> Option<&str> {
        if self.predecessor_id == INITIAL_PREDECESSOR {
            None
        } else {
            Some(self.predecessor_id.as_str())
        }
    }

    /// 檢查是否為工序鏈起點
    pub fn is_root(&self) -> bool {
        self.predecessor().is_none()
    }

    /// 持續時間（秒）
    pub fn duration_seconds(&self) -> Decimal {
        self.duration_unit.to_seconds(self.duration)
    }

    /// 偏移量（秒）
    pub fn offset_seconds(&self) -> Decimal {
        self.offset_unit.to_seconds(self.offset)
    }

    /// 查找指定資源的需求量（同一資源多筆時取第一筆）
    pub fn demand_for(&self, resource_option_id: &str) -> Option<Decimal> {
        self.resources
            .iter()
            .find(|r| r.resource_option_id == resource_option_id)
            .map(|r| r.value)
    }
}
