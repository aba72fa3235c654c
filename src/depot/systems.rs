//! Systems applying daily depot upkeep.
use bevy::prelude::*;

use crate::clock::DayBoundaryEvent;

use super::resources::{Depot, DepotSettings};

/// Books the daily cost of living on every day boundary.
pub fn deduct_cost_of_living(
    mut depot: ResMut<Depot>,
    settings: Res<DepotSettings>,
    mut days: MessageReader<DayBoundaryEvent>,
) {
    for event in days.read() {
        if settings.daily_cost_of_living <= 0.0 {
            continue;
        }
        let deducted = depot.deduct_cost_of_living(settings.daily_cost_of_living);
        if deducted < settings.daily_cost_of_living {
            warn!(
                "Day {}: cost of living {:.2} only partially covered ({:.2} paid, purse empty)",
                event.day, settings.daily_cost_of_living, deducted
            );
        } else {
            debug!(
                "Day {}: cost of living {:.2} deducted, balance {:.2}",
                event.day,
                deducted,
                depot.cash()
            );
        }
    }
}
