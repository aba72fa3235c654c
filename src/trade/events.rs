//! Trade outcome messages consumed by the ledger and the UI layer.
use bevy::prelude::{Event, Message};

use super::{engine::TradeReceipt, errors::TradeRejection, orders::Order, orders::OrderId};

/// Fired for every successfully executed order.
#[derive(Event, Message, Debug, Clone)]
pub struct TradeExecutedEvent {
    pub id: OrderId,
    pub receipt: TradeReceipt,
}

/// Fired for every rejected order, carrying the reason for the UI to
/// surface as a message rather than a crash.
#[derive(Event, Message, Debug, Clone)]
pub struct TradeRejectedEvent {
    pub id: OrderId,
    pub order: Order,
    pub reason: TradeRejection,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::goods::GoodId;
    use crate::market::TradeDirection;

    #[test]
    fn trade_events_expose_fields() {
        let event = TradeExecutedEvent {
            id: OrderId::new(7),
            receipt: TradeReceipt {
                day: 2,
                good: GoodId::from("wool"),
                direction: TradeDirection::Buy,
                quantity: 3,
                unit_price: 3.0,
                fee: 0.45,
                total: 9.45,
                cash_after: 90.55,
                used_storage_after: 3,
            },
        };
        assert_eq!(event.id.value(), 7);
        assert_eq!(event.receipt.quantity, 3);

        let rejected = TradeRejectedEvent {
            id: OrderId::new(8),
            order: Order::sell("wool", 9),
            reason: TradeRejection::InvalidQuantity { quantity: 0 },
        };
        assert_eq!(rejected.order.direction, TradeDirection::Sell);
    }
}
