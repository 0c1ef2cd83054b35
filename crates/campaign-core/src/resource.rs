//! 資源選項模型

use serde::{Deserialize, Serialize};

/// 資源選項（蒸汽、冷卻水、電力等），僅作描述用途
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceOption {
    /// 資源ID
    pub id: String,

    /// 名稱
    pub name: String,

    /// 單位標籤
    pub unit: String,
}

impl ResourceOption {
    pub fn new(id: impl Into<String>, name: impl Into<String>, unit: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            unit: unit.into(),
        }
    }
}
