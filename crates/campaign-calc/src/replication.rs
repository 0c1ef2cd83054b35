//! 批次複製與設備實體分配

use std::collections::HashSet;

use campaign_core::{
    Campaign, EquipmentWithTiming, InstanceOccupancy, Operation, Result, ScheduleError,
    SchedulingType, TimedOperation,
};
use rust_decimal::Decimal;

/// 批次在設備實體間輪流分配：批次 n 使用實體 ((n - 1) mod 數量) + 1
pub fn assign_instance(batch_number: u32, instance_quantity: u32) -> u32 {
    if instance_quantity <= 1 {
        return 1;
    }
    batch_number.saturating_sub(1) % instance_quantity + 1
}

/// 複製工序的ID，由原ID與批次編號決定
pub fn replicated_id(operation_id: &str, batch_number: u32) -> String {
    format!("{operation_id}-batch{batch_number}")
}

/// 同一實體上相鄰批次的佔用衝突
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceConflict {
    pub earlier: InstanceOccupancy,
    pub later: InstanceOccupancy,
}

impl InstanceConflict {
    /// 重疊時長（秒）
    pub fn overlap(&self) -> Decimal {
        self.earlier.end.min(self.later.end) - self.earlier.start.max(self.later.start)
    }
}

/// 批次複製器
pub struct CampaignReplicator;

impl CampaignReplicator {
    /// 計算批次間隔（秒）
    ///
    /// - 固定頻率：頻率換算為秒
    /// - 優化：各設備「單批次時長 / 實體數量」的最大值
    pub fn inter_batch_offset(
        single_batch: &[EquipmentWithTiming],
        campaign: &Campaign,
    ) -> Result<Decimal> {
        match campaign.scheduling_type {
            SchedulingType::Fixed => Ok(campaign.frequency_seconds()),
            SchedulingType::Optimized => {
                let mut offset = Decimal::ZERO;
                for eq in single_batch {
                    if eq.quantity == 0 {
                        return Err(ScheduleError::InvalidEquipment(format!(
                            "設備 {} 的實體數量必須至少為 1",
                            eq.id
                        )));
                    }
                    offset = offset.max(eq.duration / Decimal::from(eq.quantity));
                }
                Ok(offset)
            }
        }
    }

    /// 依批次計劃複製第一批次的工序
    pub fn replicate(
        single_batch: &[EquipmentWithTiming],
        campaign: &Campaign,
    ) -> Result<Vec<EquipmentWithTiming>> {
        if campaign.quantity == 0 {
            return Err(ScheduleError::InvalidCampaign(
                "批次數量必須至少為 1".to_string(),
            ));
        }

        let offset = Self::inter_batch_offset(single_batch, campaign)?;
        Self::replicate_with_offset(single_batch, campaign.quantity, offset)
    }

    /// 以指定批次間隔複製第一批次的工序
    ///
    /// 第一批次保持不變；第 n 批次的工序整體平移 (n - 1) × offset，
    /// 前置工序ID改指向同批次的複製品。
    pub fn replicate_with_offset(
        single_batch: &[EquipmentWithTiming],
        batch_quantity: u32,
        offset: Decimal,
    ) -> Result<Vec<EquipmentWithTiming>> {
        let mut seen_ids: HashSet<String> = HashSet::new();
        let mut replicated = Vec::with_capacity(single_batch.len());

        for eq in single_batch {
            let first_batch: Vec<&TimedOperation> = eq.batch_operations(1).collect();
            let mut operations: Vec<TimedOperation> =
                Vec::with_capacity(first_batch.len() * batch_quantity.max(1) as usize);

            for op in &first_batch {
                Self::claim_id(&mut seen_ids, op.id())?;
                operations.push((*op).clone());
            }

            for batch_index in 1..batch_quantity {
                let batch_number = batch_index + 1;
                let shift = Decimal::from(batch_index) * offset;

                for op in &first_batch {
                    let copy = Self::shifted_copy(op, batch_number, shift);
                    Self::claim_id(&mut seen_ids, copy.id())?;
                    operations.push(copy);
                }
            }

            replicated.push(EquipmentWithTiming {
                id: eq.id.clone(),
                name: eq.name.clone(),
                quantity: eq.quantity,
                duration: eq.duration,
                operations,
            });
        }

        Ok(replicated)
    }

    /// 各批次在設備上的佔用（依輪流規則分配實體）
    pub fn instance_occupancy(equipment: &EquipmentWithTiming) -> Vec<InstanceOccupancy> {
        (1..=equipment.batch_count())
            .filter_map(|batch_number| {
                equipment
                    .batch_window(batch_number)
                    .map(|(start, end)| InstanceOccupancy {
                        equipment_id: equipment.id.clone(),
                        instance: assign_instance(batch_number, equipment.quantity),
                        batch_number,
                        start,
                        end,
                    })
            })
            .collect()
    }

    /// 找出同一實體上被下一輪批次提前佔用的情況
    ///
    /// 各批次時間窗長度相同且依批次遞增，因此只需比較每個批次與
    /// 同實體上前一個批次（批次編號相差實體數量）。
    pub fn find_instance_conflicts(equipment: &[EquipmentWithTiming]) -> Vec<InstanceConflict> {
        let mut conflicts = Vec::new();

        for eq in equipment {
            let occupancy = Self::instance_occupancy(eq);
            let stride = eq.quantity.max(1) as usize;

            for (later_idx, later) in occupancy.iter().enumerate().skip(stride) {
                let earlier = &occupancy[later_idx - stride];
                if earlier.overlaps(later) {
                    conflicts.push(InstanceConflict {
                        earlier: earlier.clone(),
                        later: later.clone(),
                    });
                }
            }
        }

        conflicts
    }

    fn shifted_copy(op: &TimedOperation, batch_number: u32, shift: Decimal) -> TimedOperation {
        let predecessor_id = match op.operation.predecessor() {
            None => op.operation.predecessor_id.clone(),
            Some(predecessor_id) => replicated_id(predecessor_id, batch_number),
        };

        TimedOperation {
            operation: Operation {
                id: replicated_id(op.id(), batch_number),
                predecessor_id,
                ..op.operation.clone()
            },
            start: op.start + shift,
            end: op.end + shift,
            batch_number,
        }
    }

    fn claim_id(seen_ids: &mut HashSet<String>, id: &str) -> Result<()> {
        if seen_ids.insert(id.to_string()) {
            Ok(())
        } else {
            Err(ScheduleError::DuplicateOperationId(id.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span::EquipmentSpanCalculator;
    use campaign_core::{DurationUnit, Equipment, Operation, PredecessorRelation};
    use rstest::rstest;

    fn reactor() -> Equipment {
        Equipment::new("R-1", "Reactor")
            .with_operation(Operation::new("A", "R-1", Decimal::from(2), DurationUnit::Hour))
            .with_operation(
                Operation::new("B", "R-1", Decimal::from(1), DurationUnit::Hour)
                    .with_predecessor("A", PredecessorRelation::FinishToStart),
            )
    }

    fn dryer(quantity: u32) -> Equipment {
        Equipment::new("D-1", "Dryer")
            .with_quantity(quantity)
            .with_operation(Operation::new("DRY", "D-1", Decimal::from(2), DurationUnit::Hour))
    }

    #[rstest]
    #[case(1, 1, 1)]
    #[case(5, 1, 1)]
    #[case(1, 2, 1)]
    #[case(2, 2, 2)]
    #[case(3, 2, 1)]
    #[case(6, 3, 3)]
    #[case(7, 3, 1)]
    fn test_assign_instance(#[case] batch: u32, #[case] quantity: u32, #[case] expected: u32) {
        assert_eq!(assign_instance(batch, quantity), expected);
    }

    #[test]
    fn test_fixed_offset() {
        let single = EquipmentSpanCalculator::single_batch(&[reactor()]).unwrap();
        let campaign = Campaign::fixed(3, Decimal::from(4), DurationUnit::Hour);

        let offset = CampaignReplicator::inter_batch_offset(&single, &campaign).unwrap();
        assert_eq!(offset, Decimal::from(14_400));

        let replicated = CampaignReplicator::replicate(&single, &campaign).unwrap();
        let starts: Vec<(String, Decimal, u32)> = replicated[0]
            .operations
            .iter()
            .filter(|op| op.operation.name == "A")
            .map(|op| (op.id().to_string(), op.start, op.batch_number))
            .collect();

        assert_eq!(
            starts,
            vec![
                ("A".to_string(), Decimal::ZERO, 1),
                ("A-batch2".to_string(), Decimal::from(14_400), 2),
                ("A-batch3".to_string(), Decimal::from(28_800), 3),
            ]
        );
    }

    #[test]
    fn test_optimized_offset_respects_instances() {
        // 反應器 10800 秒 × 1 台，乾燥機 7200 秒 × 2 台 → max(10800, 3600)
        let single = EquipmentSpanCalculator::single_batch(&[reactor(), dryer(2)]).unwrap();

        let offset =
            CampaignReplicator::inter_batch_offset(&single, &Campaign::optimized(4)).unwrap();
        assert_eq!(offset, Decimal::from(10_800));
    }

    #[test]
    fn test_optimized_offset_with_parallel_bottleneck() {
        // 乾燥機 7 小時、2 台 → 每台 3.5 小時，超過反應器的 3 小時
        let long_dryer = Equipment::new("D-1", "Dryer").with_quantity(2).with_operation(
            Operation::new("DRY", "D-1", Decimal::from(7), DurationUnit::Hour),
        );
        let single = EquipmentSpanCalculator::single_batch(&[reactor(), long_dryer]).unwrap();

        let offset =
            CampaignReplicator::inter_batch_offset(&single, &Campaign::optimized(4)).unwrap();
        assert_eq!(offset, Decimal::from(12_600));
    }

    #[test]
    fn test_replicated_predecessor_points_to_same_batch() {
        let single = EquipmentSpanCalculator::single_batch(&[reactor()]).unwrap();
        let replicated =
            CampaignReplicator::replicate(&single, &Campaign::optimized(2)).unwrap();

        let b2 = replicated[0].find_operation("B-batch2").unwrap();
        assert_eq!(b2.operation.predecessor_id, "A-batch2");
        assert_eq!(b2.batch_number, 2);

        let a2 = replicated[0].find_operation("A-batch2").unwrap();
        assert!(a2.operation.is_root());
    }

    #[test]
    fn test_first_batch_unchanged() {
        let single = EquipmentSpanCalculator::single_batch(&[reactor()]).unwrap();
        let replicated =
            CampaignReplicator::replicate(&single, &Campaign::optimized(3)).unwrap();

        let first: Vec<&TimedOperation> = replicated[0].batch_operations(1).collect();
        let unreplicated: Vec<&TimedOperation> = single[0].operations.iter().collect();
        assert_eq!(first, unreplicated);
        assert_eq!(replicated[0].operations.len(), 6);
        assert_eq!(replicated[0].batch_count(), 3);
    }

    #[test]
    fn test_generated_id_collision_rejected() {
        let clashing = Equipment::new("R-1", "Reactor")
            .with_operation(Operation::new("A", "R-1", Decimal::from(1), DurationUnit::Hour))
            .with_operation(Operation::new(
                "A-batch2",
                "R-1",
                Decimal::from(1),
                DurationUnit::Hour,
            ));
        let single = EquipmentSpanCalculator::single_batch(&[clashing]).unwrap();

        let err = CampaignReplicator::replicate(&single, &Campaign::optimized(2)).unwrap_err();
        assert_eq!(err, ScheduleError::DuplicateOperationId("A-batch2".to_string()));
    }

    #[test]
    fn test_zero_quantity_campaign_rejected() {
        let single = EquipmentSpanCalculator::single_batch(&[reactor()]).unwrap();

        assert!(matches!(
            CampaignReplicator::replicate(&single, &Campaign::optimized(0)),
            Err(ScheduleError::InvalidCampaign(_))
        ));
    }

    #[test]
    fn test_instance_occupancy_round_robin() {
        let single = EquipmentSpanCalculator::single_batch(&[dryer(2)]).unwrap();
        let replicated = CampaignReplicator::replicate_with_offset(
            &single,
            4,
            Decimal::from(3_600),
        )
        .unwrap();

        let occupancy = CampaignReplicator::instance_occupancy(&replicated[0]);
        let instances: Vec<u32> = occupancy.iter().map(|o| o.instance).collect();
        assert_eq!(instances, vec![1, 2, 1, 2]);
        assert_eq!(occupancy[2].start, Decimal::from(7_200));
    }

    #[test]
    fn test_optimized_cadence_has_no_conflicts() {
        let single = EquipmentSpanCalculator::single_batch(&[reactor(), dryer(2)]).unwrap();
        let replicated =
            CampaignReplicator::replicate(&single, &Campaign::optimized(6)).unwrap();

        assert!(CampaignReplicator::find_instance_conflicts(&replicated).is_empty());
    }

    #[test]
    fn test_fixed_cadence_conflict_detected() {
        // 反應器需要 3 小時，固定每 2 小時一批 → 每個後續批次都與前一批重疊 1 小時
        let single = EquipmentSpanCalculator::single_batch(&[reactor()]).unwrap();
        let campaign = Campaign::fixed(3, Decimal::from(2), DurationUnit::Hour);
        let replicated = CampaignReplicator::replicate(&single, &campaign).unwrap();

        let conflicts = CampaignReplicator::find_instance_conflicts(&replicated);
        assert_eq!(conflicts.len(), 2);
        assert_eq!(conflicts[0].earlier.batch_number, 1);
        assert_eq!(conflicts[0].later.batch_number, 2);
        assert_eq!(conflicts[0].overlap(), Decimal::from(3_600));
    }

    #[test]
    fn test_parallel_instances_absorb_fixed_cadence() {
        // 乾燥機 2 小時 × 2 台，每 1 小時一批：同一實體每 2 小時輪到一次，首尾相接不衝突
        let single = EquipmentSpanCalculator::single_batch(&[dryer(2)]).unwrap();
        let campaign = Campaign::fixed(5, Decimal::from(1), DurationUnit::Hour);
        let replicated = CampaignReplicator::replicate(&single, &campaign).unwrap();

        assert!(CampaignReplicator::find_instance_conflicts(&replicated).is_empty());
    }
}
