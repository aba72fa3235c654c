//! Market change notifications consumed by the UI layer.
use bevy::prelude::{Event, Message};

use crate::goods::GoodId;

/// Fired whenever a market update moves a good's price.
#[derive(Event, Message, Debug, Clone)]
pub struct PriceChangedEvent {
    pub good: GoodId,
    pub old_price: f32,
    pub new_price: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_event_exposes_fields() {
        let event = PriceChangedEvent {
            good: GoodId::from("wine"),
            old_price: 10.0,
            new_price: 11.5,
        };

        assert_eq!(event.good, GoodId::from("wine"));
        assert!(event.new_price > event.old_price);
    }
}
