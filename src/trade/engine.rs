//! The transaction engine: the single choke point for all trades.
use crate::depot::Depot;
use crate::goods::GoodId;
use crate::market::{Market, MarketTuning, TradeDirection};

use super::{errors::TradeRejection, orders::Order};

/// Outcome of an executed trade, carrying the executed price and the new
/// depot balances.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeReceipt {
    pub day: u64,
    pub good: GoodId,
    pub direction: TradeDirection,
    pub quantity: u32,
    pub unit_price: f32,
    pub fee: f32,
    /// Cash paid for a buy, cash received for a sell.
    pub total: f32,
    pub cash_after: f32,
    pub used_storage_after: u32,
}

/// Validates and executes an order against depot and market.
///
/// Validation is exhaustive before any mutation, which makes the commit
/// phase infallible: once the checks pass, cash, inventory, and market
/// pressure are applied in sequence with no rollback machinery needed.
pub fn execute(
    order: &Order,
    day: u64,
    depot: &mut Depot,
    market: &mut Market,
    tuning: &MarketTuning,
) -> Result<TradeReceipt, TradeRejection> {
    if order.quantity == 0 {
        return Err(TradeRejection::InvalidQuantity {
            quantity: order.quantity,
        });
    }

    let quote = market.quote(&order.good, order.direction, order.quantity, tuning)?;

    match order.direction {
        TradeDirection::Buy => {
            if !depot.can_afford(quote.total) {
                return Err(TradeRejection::InsufficientFunds {
                    required: quote.total,
                    available: depot.cash(),
                });
            }
            if !depot.can_store(order.quantity) {
                return Err(TradeRejection::InsufficientStorage {
                    requested: order.quantity,
                    free: depot.free_storage(),
                });
            }

            depot.debit(quote.total)?;
            depot.deposit(order.good.clone(), order.quantity)?;
            market.apply_trade(&order.good, TradeDirection::Buy, order.quantity)?;
        }
        TradeDirection::Sell => {
            depot.withdraw(&order.good, order.quantity)?;
            depot.credit(quote.total);
            market.apply_trade(&order.good, TradeDirection::Sell, order.quantity)?;
        }
    }

    Ok(TradeReceipt {
        day,
        good: order.good.clone(),
        direction: order.direction,
        quantity: order.quantity,
        unit_price: quote.unit_price,
        fee: quote.fee,
        total: quote.total,
        cash_after: depot.cash(),
        used_storage_after: depot.used_storage(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::goods::{
        data::{GoodConfig, GoodsConfig},
        GoodCategory, GoodRegistry,
    };

    fn tuning() -> MarketTuning {
        MarketTuning {
            fee_percent: 0.25,
            default_population: 120,
            food_per_capita: 1.0,
            raw_material_per_capita: 1.0,
            craft_per_capita: 1.0,
            luxury_per_capita: 1.0,
            ..MarketTuning::default()
        }
    }

    fn market() -> Market {
        let registry = GoodRegistry::from_config(GoodsConfig {
            goods: vec![GoodConfig {
                symbol: "grain".to_string(),
                name: "Grain".to_string(),
                category: GoodCategory::Food,
                base_price: 10.0,
                volatility: 1.0,
                min_price: None,
                max_price: None,
                market_supply: 100.0,
            }],
        })
        .unwrap();
        Market::from_registry(&registry, 120, &tuning())
    }

    fn grain() -> GoodId {
        GoodId::from("grain")
    }

    #[test]
    fn buy_without_funds_is_rejected_and_state_preserved() {
        let mut depot = Depot::new(50.0, 100);
        let mut market = market();

        // 6 units at 10.0 plus the 25% surcharge costs 75.
        let rejection =
            execute(&Order::buy("grain", 6), 0, &mut depot, &mut market, &tuning()).unwrap_err();
        assert!(matches!(
            rejection,
            TradeRejection::InsufficientFunds { required, .. } if (required - 75.0).abs() < 1e-4
        ));
        assert!((depot.cash() - 50.0).abs() < f32::EPSILON);
        assert_eq!(depot.used_storage(), 0);
        assert!((market.entry(&grain()).unwrap().supply - 100.0).abs() < f32::EPSILON);
    }

    #[test]
    fn buy_without_storage_does_not_charge_cash() {
        let mut depot = Depot::new(1000.0, 100);
        depot.deposit(grain(), 90).unwrap();
        let mut market = market();

        let rejection = execute(
            &Order::buy("grain", 20),
            0,
            &mut depot,
            &mut market,
            &tuning(),
        )
        .unwrap_err();
        assert_eq!(
            rejection,
            TradeRejection::InsufficientStorage {
                requested: 20,
                free: 10,
            }
        );
        assert!((depot.cash() - 1000.0).abs() < f32::EPSILON);
        assert_eq!(depot.used_storage(), 90);
    }

    #[test]
    fn successful_buy_moves_cash_goods_and_pressure() {
        let mut depot = Depot::new(100.0, 100);
        let mut market = market();

        let receipt =
            execute(&Order::buy("grain", 4), 3, &mut depot, &mut market, &tuning()).unwrap();
        assert_eq!(receipt.day, 3);
        assert_eq!(receipt.quantity, 4);
        assert!((receipt.unit_price - 10.0).abs() < 1e-4);
        assert!((receipt.fee - 10.0).abs() < 1e-4);
        assert!((receipt.total - 50.0).abs() < 1e-4);
        assert!((receipt.cash_after - 50.0).abs() < 1e-4);
        assert_eq!(receipt.used_storage_after, 4);

        assert_eq!(depot.quantity_of(&grain()), 4);
        let entry = market.entry(&grain()).unwrap();
        assert!((entry.supply - 96.0).abs() < f32::EPSILON);
        assert!((entry.pressure - 4.0).abs() < f32::EPSILON);
        // Price moves only on the next market update.
        assert!((entry.price - 10.0).abs() < f32::EPSILON);
    }

    #[test]
    fn sell_requires_held_stock() {
        let mut depot = Depot::new(0.0, 100);
        depot.deposit(grain(), 2).unwrap();
        let mut market = market();

        let rejection = execute(
            &Order::sell("grain", 5),
            0,
            &mut depot,
            &mut market,
            &tuning(),
        )
        .unwrap_err();
        assert!(matches!(
            rejection,
            TradeRejection::InsufficientStock { held: 2, .. }
        ));
        assert_eq!(depot.quantity_of(&grain()), 2);
        assert!(depot.cash().abs() < f32::EPSILON);
    }

    #[test]
    fn successful_sell_credits_net_proceeds() {
        let mut depot = Depot::new(0.0, 100);
        depot.deposit(grain(), 10).unwrap();
        let mut market = market();

        let receipt = execute(
            &Order::sell("grain", 4),
            0,
            &mut depot,
            &mut market,
            &tuning(),
        )
        .unwrap();
        // 40 gross minus the 25% surcharge nets 30.
        assert!((receipt.total - 30.0).abs() < 1e-4);
        assert!((depot.cash() - 30.0).abs() < 1e-4);
        assert_eq!(depot.quantity_of(&grain()), 6);

        let entry = market.entry(&grain()).unwrap();
        assert!((entry.supply - 104.0).abs() < f32::EPSILON);
        assert!((entry.pressure + 4.0).abs() < f32::EPSILON);
    }

    #[test]
    fn zero_quantity_and_unknown_goods_are_rejected() {
        let mut depot = Depot::new(100.0, 100);
        let mut market = market();

        let rejection =
            execute(&Order::buy("grain", 0), 0, &mut depot, &mut market, &tuning()).unwrap_err();
        assert_eq!(rejection, TradeRejection::InvalidQuantity { quantity: 0 });

        let rejection =
            execute(&Order::buy("silk", 1), 0, &mut depot, &mut market, &tuning()).unwrap_err();
        assert_eq!(
            rejection,
            TradeRejection::NotFound {
                good: GoodId::from("silk"),
            }
        );
    }
}
