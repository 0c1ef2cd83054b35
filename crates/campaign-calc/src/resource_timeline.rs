//! 資源用量時間序列
//!
//! 每個需要該資源的工序貢獻一段固定用量的區間 [start, end]。
//! 在每個區間邊緣前後取樣，得到用量的階梯函數。

use campaign_core::{
    EngineConfig, EquipmentWithTiming, ResourceOption, TimedOperation, Timepoint,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::span::operations_span;

/// 單一資源的用量摘要
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceUsage {
    /// 資源選項
    pub resource: ResourceOption,

    /// 用量時間序列
    pub timeline: Vec<Timepoint>,

    /// 峰值用量
    pub peak: Decimal,

    /// 時間加權平均用量
    pub average: Decimal,
}

/// 資源時間序列聚合器
pub struct ResourceTimelineAggregator {
    bracket: Decimal,
    min_points: usize,
}

impl ResourceTimelineAggregator {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            bracket: config.timeline_bracket,
            min_points: config.min_timeline_points,
        }
    }

    /// 建立指定資源的用量時間序列
    ///
    /// 首點固定為 (0, 0)，末點固定為 (批次計劃時長, 0)。
    pub fn build(&self, equipment: &[EquipmentWithTiming], resource_id: &str) -> Vec<Timepoint> {
        // 需要該資源的工序及其用量
        let demands: Vec<(&TimedOperation, Decimal)> = equipment
            .iter()
            .flat_map(|eq| eq.operations.iter())
            .filter_map(|op| op.operation.demand_for(resource_id).map(|value| (op, value)))
            .collect();

        let mut critical_points = Vec::with_capacity(demands.len() * 4);
        for (op, _) in &demands {
            critical_points.push(op.start - self.bracket);
            critical_points.push(op.start);
            critical_points.push(op.end);
            critical_points.push(op.end + self.bracket);
        }

        // 排序並去重
        critical_points.sort();
        critical_points.dedup();

        let campaign_duration =
            operations_span(equipment.iter().flat_map(|eq| eq.operations.iter()))
                .unwrap_or(Decimal::ZERO);

        let mut timeline = Vec::with_capacity(critical_points.len() + 2);
        timeline.push(Timepoint::new(Decimal::ZERO, Decimal::ZERO));
        for time in critical_points {
            let value = demands
                .iter()
                .filter(|(op, _)| op.covers(time))
                .map(|(_, value)| *value)
                .sum();
            timeline.push(Timepoint::new(time, value));
        }
        timeline.push(Timepoint::new(campaign_duration, Decimal::ZERO));

        tracing::debug!("資源 {} 時間序列點數: {}", resource_id, timeline.len());
        timeline
    }

    /// 時間序列點數是否足以構成有意義的圖表
    pub fn is_meaningful(&self, timeline: &[Timepoint]) -> bool {
        timeline.len() >= self.min_points
    }

    /// 為每個資源選項建立用量摘要，略過沒有意義的時間序列
    pub fn summarize(
        &self,
        equipment: &[EquipmentWithTiming],
        resources: &[ResourceOption],
    ) -> Vec<ResourceUsage> {
        resources
            .iter()
            .filter_map(|resource| {
                let timeline = self.build(equipment, &resource.id);
                if !self.is_meaningful(&timeline) {
                    return None;
                }

                Some(ResourceUsage {
                    resource: resource.clone(),
                    peak: peak(&timeline).unwrap_or(Decimal::ZERO),
                    average: average(&timeline),
                    timeline,
                })
            })
            .collect()
    }
}

impl Default for ResourceTimelineAggregator {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}

/// 峰值用量；空序列返回 None
pub fn peak(timeline: &[Timepoint]) -> Option<Decimal> {
    timeline.iter().map(|point| point.value).max()
}

/// 時間加權平均用量（左端取樣的階梯積分）
///
/// 只計入時間前進的區段；序列頭尾的固定點可能造成時間倒退，
/// 這些區段不貢獻面積也不計入總時長。與直接套用
/// `Σ value·dt / Σ dt`（倒退區段的 dt 為負）的結果不同：
/// 後者的分母恰為批次計劃時長，但平均值可能超過峰值。
pub fn average(timeline: &[Timepoint]) -> Decimal {
    let (area, total) = timeline
        .windows(2)
        .fold((Decimal::ZERO, Decimal::ZERO), |(area, total), pair| {
            let dt = pair[1].time - pair[0].time;
            if dt > Decimal::ZERO {
                (area + pair[0].value * dt, total + dt)
            } else {
                (area, total)
            }
        });

    if total.is_zero() {
        Decimal::ZERO
    } else {
        area / total
    }
}
