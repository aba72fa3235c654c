//! Order types and the deferred order queue.
use std::collections::VecDeque;
use std::fmt;

use bevy::prelude::Resource;

use crate::goods::GoodId;
use crate::market::TradeDirection;

/// Identifier handed back for every submitted order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OrderId(u64);

impl OrderId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ORD-{:04}", self.0)
    }
}

/// A requested trade. Transient: executed or rejected, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub good: GoodId,
    pub direction: TradeDirection,
    pub quantity: u32,
}

impl Order {
    pub fn buy(good: impl Into<GoodId>, quantity: u32) -> Self {
        Self {
            good: good.into(),
            direction: TradeDirection::Buy,
            quantity,
        }
    }

    pub fn sell(good: impl Into<GoodId>, quantity: u32) -> Self {
        Self {
            good: good.into(),
            direction: TradeDirection::Sell,
            quantity,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PendingOrder {
    pub id: OrderId,
    pub order: Order,
}

#[derive(Debug, Default, Clone)]
pub struct OrderQueueMetrics {
    pub submitted: u64,
    pub executed: u64,
    pub rejected: u64,
    pub cancelled: u64,
}

/// Orders waiting for the next simulation step.
///
/// Submissions are never executed inline: they sit here until the drain
/// system runs at the start of the next tick, so a trade triggered from
/// within a market update cannot mutate the market mid-update.
#[derive(Resource, Debug, Default)]
pub struct OrderQueue {
    pending: VecDeque<PendingOrder>,
    next_id: u64,
    metrics: OrderQueueMetrics,
}

impl OrderQueue {
    pub fn submit(&mut self, order: Order) -> OrderId {
        self.next_id += 1;
        let id = OrderId::new(self.next_id);
        self.pending.push_back(PendingOrder { id, order });
        self.metrics.submitted += 1;
        id
    }

    /// Discards a pending order that has not been drained yet.
    pub fn cancel(&mut self, id: OrderId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|pending| pending.id != id);
        let cancelled = self.pending.len() < before;
        if cancelled {
            self.metrics.cancelled += 1;
        }
        cancelled
    }

    /// Takes every order submitted up to this point, in submission order.
    pub fn take_pending(&mut self) -> Vec<PendingOrder> {
        self.pending.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn metrics(&self) -> &OrderQueueMetrics {
        &self.metrics
    }

    pub(crate) fn record_executed(&mut self) {
        self.metrics.executed += 1;
    }

    pub(crate) fn record_rejected(&mut self) {
        self.metrics.rejected += 1;
    }
}
