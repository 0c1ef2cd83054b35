//! 反應器批次計劃示例

use anyhow::Context;
use campaign::{
    format_duration, Campaign, CampaignScheduler, DurationUnit, EngineConfig, Equipment,
    Operation, PredecessorRelation, ResourceOption,
};
use rust_decimal::Decimal;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    println!("=== 反應器批次計劃示例 ===\n");

    // 反應器：投料 → 反應（用蒸汽）→ 冷卻（用冷卻水）
    let reactor = Equipment::new("R-101", "Reactor")
        .with_operation(Operation::new("charge", "R-101", Decimal::from(30), DurationUnit::Minute))
        .with_operation(
            Operation::new("react", "R-101", Decimal::from(4), DurationUnit::Hour)
                .with_predecessor("charge", PredecessorRelation::FinishToStart)
                .with_resource("steam", Decimal::from(5)),
        )
        .with_operation(
            Operation::new("cool", "R-101", Decimal::from(45), DurationUnit::Minute)
                .with_predecessor("react", PredecessorRelation::FinishToStart)
                .with_resource("water", Decimal::from(12)),
        );

    // 過濾機在冷卻結束前 15 分鐘開始
    let filter = Equipment::new("F-201", "Filter").with_operation(
        Operation::new("filter", "F-201", Decimal::from(2), DurationUnit::Hour)
            .with_predecessor("cool", PredecessorRelation::FinishToStart)
            .with_offset(Decimal::from(-15), DurationUnit::Minute),
    );

    // 兩台乾燥機輪流使用
    let dryer = Equipment::new("D-301", "Dryer").with_quantity(2).with_operation(
        Operation::new("dry", "D-301", Decimal::from(8), DurationUnit::Hour)
            .with_predecessor("filter", PredecessorRelation::FinishToStart)
            .with_resource("steam", Decimal::from(2)),
    );

    let equipment = vec![reactor, filter, dryer];
    let resources = vec![
        ResourceOption::new("steam", "Steam", "t/h"),
        ResourceOption::new("water", "Cooling Water", "m3/h"),
    ];

    let scheduler = CampaignScheduler::new(EngineConfig::default());

    for campaign in [
        Campaign::optimized(5),
        Campaign::fixed(5, Decimal::from(4), DurationUnit::Hour),
    ] {
        println!(
            "--- 排程方式: {:?}，批次數量: {} ---",
            campaign.scheduling_type, campaign.quantity
        );

        let result = scheduler
            .compute(&equipment, &campaign)
            .context("排程計算失敗")?;
        let details = scheduler
            .process_details(&result.equipment)
            .context("製程指標計算失敗")?;

        println!("批次間隔: {}", format_duration(result.inter_batch_offset));
        println!(
            "瓶頸設備: {} ({}，{} 台)",
            details.bottleneck.name,
            format_duration(details.bottleneck.duration),
            details.bottleneck.quantity
        );
        println!("單批次時長: {}", format_duration(details.batch_duration));
        println!("批次計劃時長: {}", format_duration(details.campaign_duration));
        println!("週期時間: {}", format_duration(details.cycle_time));

        for usage in scheduler.resource_usage(&result.equipment, &resources) {
            println!(
                "資源 {}: 峰值 {} {}，平均 {} {}",
                usage.resource.name,
                usage.peak,
                usage.resource.unit,
                usage.average.round_dp(2),
                usage.resource.unit
            );
        }

        for warning in &result.warnings {
            println!("  ! [{}] {}", warning.equipment_id, warning.message);
        }

        println!();
    }

    Ok(())
}
