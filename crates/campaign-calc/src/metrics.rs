//! 製程指標計算

use campaign_core::{Bottleneck, EquipmentWithTiming, ProcessDetails, Result, ScheduleError};
use rust_decimal::Decimal;

use crate::span::operations_span;

/// 製程指標計算器
pub struct ProcessMetricsCalculator;

impl ProcessMetricsCalculator {
    /// 從複製後的排程計算所有指標
    pub fn calculate(equipment: &[EquipmentWithTiming]) -> Result<ProcessDetails> {
        Ok(ProcessDetails {
            bottleneck: Self::bottleneck(equipment)?,
            batch_duration: Self::batch_duration(equipment)?,
            campaign_duration: Self::campaign_duration(equipment)?,
            batch_qty: Self::batch_quantity(equipment)?,
            cycle_time: Self::cycle_time(equipment)?,
        })
    }

    /// 瓶頸：單批次時長最長的設備（相同時取輸入順序中的第一個）
    pub fn bottleneck(equipment: &[EquipmentWithTiming]) -> Result<Bottleneck> {
        let mut iter = equipment.iter();
        let mut slowest = iter.next().ok_or(ScheduleError::EmptySchedule)?;

        for eq in iter {
            if eq.duration > slowest.duration {
                slowest = eq;
            }
        }

        Ok(Bottleneck {
            equipment_id: slowest.id.clone(),
            name: slowest.name.clone(),
            duration: slowest.duration,
            quantity: slowest.quantity,
        })
    }

    /// 第一批次在所有設備上的時間跨度
    pub fn batch_duration(equipment: &[EquipmentWithTiming]) -> Result<Decimal> {
        operations_span(equipment.iter().flat_map(|eq| eq.batch_operations(1)))
            .ok_or(ScheduleError::EmptySchedule)
    }

    /// 所有批次在所有設備上的時間跨度
    pub fn campaign_duration(equipment: &[EquipmentWithTiming]) -> Result<Decimal> {
        operations_span(equipment.iter().flat_map(|eq| eq.operations.iter()))
            .ok_or(ScheduleError::EmptySchedule)
    }

    /// 觀察到的最大批次編號
    pub fn batch_quantity(equipment: &[EquipmentWithTiming]) -> Result<u32> {
        equipment
            .iter()
            .flat_map(|eq| eq.operations.iter())
            .map(|op| op.batch_number)
            .max()
            .ok_or(ScheduleError::EmptySchedule)
    }

    /// 週期時間：第二批次最早開始 - 第一批次最早開始；只有一批時等於批次時長
    pub fn cycle_time(equipment: &[EquipmentWithTiming]) -> Result<Decimal> {
        let earliest_start = |batch_number: u32| {
            equipment
                .iter()
                .flat_map(|eq| eq.batch_operations(batch_number))
                .map(|op| op.start)
                .min()
        };

        match (earliest_start(1), earliest_start(2)) {
            (Some(first), Some(second)) => Ok(second - first),
            _ => Self::batch_duration(equipment),
        }
    }
}
