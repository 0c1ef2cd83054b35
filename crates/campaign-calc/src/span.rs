//! 設備單批次時長計算

use campaign_core::{Equipment, EquipmentWithTiming, Result, ScheduleError, TimedOperation};
use rust_decimal::Decimal;

use crate::timing::OperationTimingResolver;

/// 工序集合的時間跨度（最晚結束 - 最早開始）；空集合返回 None
pub fn operations_span<'a>(operations: impl IntoIterator<Item = &'a TimedOperation>) -> Option<Decimal> {
    operations
        .into_iter()
        .fold(None, |bounds: Option<(Decimal, Decimal)>, op| match bounds {
            None => Some((op.start, op.end)),
            Some((start, end)) => Some((start.min(op.start), end.max(op.end))),
        })
        .map(|(start, end)| end - start)
}

/// 設備時長計算器
pub struct EquipmentSpanCalculator;

impl EquipmentSpanCalculator {
    /// 計算設備自身工序的時間跨度
    pub fn span(equipment_id: &str, operations: &[TimedOperation]) -> Result<Decimal> {
        operations_span(operations)
            .ok_or_else(|| ScheduleError::EmptyEquipment(equipment_id.to_string()))
    }

    /// 解析所有設備第一批次的工序時間，並計算各設備時長
    pub fn single_batch(equipment: &[Equipment]) -> Result<Vec<EquipmentWithTiming>> {
        let mut resolver = OperationTimingResolver::new(equipment)?;
        let mut timed_equipment = Vec::with_capacity(equipment.len());

        for eq in equipment {
            let mut operations = Vec::with_capacity(eq.operations.len());
            for op in &eq.operations {
                let window = resolver.resolve(op)?;
                operations.push(TimedOperation::first_batch(op.clone(), window.start, window.end));
            }

            let duration = Self::span(&eq.id, &operations)?;
            tracing::debug!("設備 {} 單批次時長: {} 秒", eq.id, duration);

            timed_equipment.push(EquipmentWithTiming {
                id: eq.id.clone(),
                name: eq.name.clone(),
                quantity: eq.quantity,
                duration,
                operations,
            });
        }

        Ok(timed_equipment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campaign_core::{DurationUnit, Operation, PredecessorRelation};

    #[test]
    fn test_reactor_single_batch() {
        let equipment = vec![Equipment::new("R-1", "Reactor")
            .with_operation(Operation::new("A", "R-1", Decimal::from(2), DurationUnit::Hour))
            .with_operation(
                Operation::new("B", "R-1", Decimal::from(1), DurationUnit::Hour)
                    .with_predecessor("A", PredecessorRelation::FinishToStart),
            )];

        let timed = EquipmentSpanCalculator::single_batch(&equipment).unwrap();

        assert_eq!(timed.len(), 1);
        assert_eq!(timed[0].duration, Decimal::from(10_800));
        assert!(timed[0].operations.iter().all(|op| op.batch_number == 1));
        // 輸入不被修改，工序順序保持不變
        assert_eq!(timed[0].operations[0].operation, equipment[0].operations[0]);
        assert_eq!(timed[0].operations[1].id(), "B");
    }

    #[test]
    fn test_span_uses_own_operations_only() {
        // 過濾機的工序依賴反應器，但時長只計算自身工序
        let equipment = vec![
            Equipment::new("R-1", "Reactor").with_operation(Operation::new(
                "REACT",
                "R-1",
                Decimal::from(4),
                DurationUnit::Hour,
            )),
            Equipment::new("F-1", "Filter").with_operation(
                Operation::new("FILTER", "F-1", Decimal::from(30), DurationUnit::Minute)
                    .with_predecessor("REACT", PredecessorRelation::FinishToStart),
            ),
        ];

        let timed = EquipmentSpanCalculator::single_batch(&equipment).unwrap();
        assert_eq!(timed[1].duration, Decimal::from(1_800));
        assert_eq!(timed[1].operations[0].start, Decimal::from(14_400));
    }

    #[test]
    fn test_span_with_overlapping_operations() {
        let equipment = vec![Equipment::new("R-1", "Reactor")
            .with_operation(Operation::new("A", "R-1", Decimal::from(2), DurationUnit::Hour))
            .with_operation(
                Operation::new("B", "R-1", Decimal::from(3), DurationUnit::Hour)
                    .with_predecessor("A", PredecessorRelation::FinishToFinish),
            )];

        // B: [-3600, 7200]，A: [0, 7200]
        let timed = EquipmentSpanCalculator::single_batch(&equipment).unwrap();
        assert_eq!(timed[0].duration, Decimal::from(10_800));
    }

    #[test]
    fn test_empty_equipment_rejected() {
        let equipment = vec![Equipment::new("EMPTY", "Idle Tank")];

        let err = EquipmentSpanCalculator::single_batch(&equipment).unwrap_err();
        assert_eq!(err, ScheduleError::EmptyEquipment("EMPTY".to_string()));
    }

    #[test]
    fn test_operations_span_empty() {
        assert_eq!(operations_span(std::iter::empty::<&TimedOperation>()), None);
    }
}
