//! 設備模型

use serde::{Deserialize, Serialize};

use crate::operation::Operation;

fn default_quantity() -> u32 {
    1
}

/// 設備（可包含多個相同的實體單元）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Equipment {
    /// 設備ID
    pub id: String,

    /// 名稱
    pub name: String,

    /// 有序工序列表
    #[serde(default)]
    pub operations: Vec<Operation>,

    /// 實體數量（並行的相同單元，至少為 1）
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

impl Equipment {
    /// 創建新的設備（單一實體，無工序）
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            operations: Vec::new(),
            quantity: default_quantity(),
        }
    }

    /// 建構器模式：設置實體數量
    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    /// 建構器模式：添加工序
    pub fn with_operation(mut self, operation: Operation) -> Self {
        self.operations.push(operation);
        self
    }

    /// 添加工序
    pub fn add_operation(&mut self, operation: Operation) {
        self.operations.push(operation);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unit::DurationUnit;
    use rust_decimal::Decimal;

    #[test]
    fn test_equipment_builder() {
        let equipment = Equipment::new("R-101", "Reactor")
            .with_quantity(2)
            .with_operation(Operation::new(
                "CHARGE",
                "R-101",
                Decimal::from(30),
                DurationUnit::Minute,
            ));

        assert_eq!(equipment.quantity, 2);
        assert_eq!(equipment.operations.len(), 1);
    }

    #[test]
    fn test_quantity_defaults_to_one() {
        let equipment: Equipment =
            serde_json::from_str(r#"{ "id": "F-1", "name": "Filter", "operations": [] }"#).unwrap();

        assert_eq!(equipment.quantity, 1);
    }
}
