//! 工序時間解析
//!
//! 每個工序最多只有一個前置工序，前置關係因此構成一片森林（可跨設備）。
//! 解析時沿前置鏈向上走到起點或已解析的工序，再自上游往下逐一計算，
//! 不使用遞迴，鏈長不受呼叫堆疊限制。

use std::collections::{HashMap, HashSet};

use campaign_core::{Equipment, Operation, Result, ScheduleError};
use rust_decimal::Decimal;

/// 工序時間窗（相對於批次起點的秒數）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OperationWindow {
    pub start: Decimal,
    pub end: Decimal,
}

impl OperationWindow {
    /// 依前置工序時間窗計算工序時間窗；無前置時以偏移量為開始時間
    pub fn for_operation(operation: &Operation, predecessor: Option<OperationWindow>) -> Self {
        let offset = operation.offset_seconds();
        let duration = operation.duration_seconds();

        let start = match predecessor {
            None => offset,
            Some(pred) => operation
                .predecessor_relation
                .anchor_start(pred.start, pred.end, duration, offset),
        };

        Self {
            start,
            end: start + duration,
        }
    }
}

/// 工序時間解析器（帶記憶化）
pub struct OperationTimingResolver<'a> {
    /// 所有設備的工序索引
    lookup: HashMap<&'a str, &'a Operation>,

    /// 已解析的時間窗
    resolved: HashMap<&'a str, OperationWindow>,
}

impl<'a> OperationTimingResolver<'a> {
    /// 以所有設備的工序建立解析器
    pub fn new(equipment: &'a [Equipment]) -> Result<Self> {
        let mut lookup = HashMap::new();

        for op in equipment.iter().flat_map(|eq| eq.operations.iter()) {
            if lookup.insert(op.id.as_str(), op).is_some() {
                return Err(ScheduleError::DuplicateOperationId(op.id.clone()));
            }
        }

        Ok(Self {
            lookup,
            resolved: HashMap::new(),
        })
    }

    /// 解析單一工序的時間窗（已解析者直接返回）
    pub fn resolve(&mut self, operation: &'a Operation) -> Result<OperationWindow> {
        if let Some(window) = self.resolved.get(operation.id.as_str()) {
            return Ok(*window);
        }

        // 向上收集尚未解析的前置鏈：chain[0] 為目標工序，末端為最上游
        let mut chain: Vec<&'a Operation> = Vec::new();
        let mut visiting: HashSet<&'a str> = HashSet::new();
        let mut cursor = Some(operation);

        while let Some(current) = cursor {
            if self.resolved.contains_key(current.id.as_str()) {
                break;
            }

            if !visiting.insert(current.id.as_str()) {
                return Err(Self::cycle_error(&chain, &current.id));
            }
            chain.push(current);

            cursor = match current.predecessor() {
                None => None,
                Some(predecessor_id) => Some(self.lookup_predecessor(current, predecessor_id)?),
            };
        }

        // 自上游往下計算
        let mut window = OperationWindow::default();
        for op in chain.into_iter().rev() {
            let predecessor = match op.predecessor() {
                None => None,
                Some(predecessor_id) => Some(self.resolved_window(op, predecessor_id)?),
            };

            window = OperationWindow::for_operation(op, predecessor);
            self.resolved.insert(op.id.as_str(), window);
        }

        Ok(window)
    }

    /// 解析所有工序，返回 工序ID → 時間窗
    pub fn resolve_all(mut self) -> Result<HashMap<&'a str, OperationWindow>> {
        let operations: Vec<&'a Operation> = self.lookup.values().copied().collect();
        for op in operations {
            self.resolve(op)?;
        }
        Ok(self.resolved)
    }

    /// 已解析的工序數量
    pub fn resolved_count(&self) -> usize {
        self.resolved.len()
    }

    fn lookup_predecessor(
        &self,
        operation: &Operation,
        predecessor_id: &str,
    ) -> Result<&'a Operation> {
        self.lookup
            .get(predecessor_id)
            .copied()
            .ok_or_else(|| ScheduleError::MissingPredecessor {
                operation_id: operation.id.clone(),
                predecessor_id: predecessor_id.to_string(),
            })
    }

    fn resolved_window(&self, operation: &Operation, predecessor_id: &str) -> Result<OperationWindow> {
        self.resolved
            .get(predecessor_id)
            .copied()
            .ok_or_else(|| ScheduleError::MissingPredecessor {
                operation_id: operation.id.clone(),
                predecessor_id: predecessor_id.to_string(),
            })
    }

    /// 以前置方向列出循環，例如 A → B → A 表示 A 的前置是 B、B 的前置是 A
    fn cycle_error(chain: &[&Operation], repeated_id: &str) -> ScheduleError {
        let begin = chain
            .iter()
            .position(|op| op.id == repeated_id)
            .unwrap_or(0);

        let mut cycle: Vec<String> = chain[begin..].iter().map(|op| op.id.clone()).collect();
        cycle.push(repeated_id.to_string());

        ScheduleError::CyclicDependency { cycle }
    }
}
