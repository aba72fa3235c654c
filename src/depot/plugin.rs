//! DepotPlugin sets up the player depot and its daily upkeep.
use bevy::prelude::*;

use crate::clock::advance_sim_clock;

use super::{
    resources::{Depot, DepotSettings},
    systems::deduct_cost_of_living,
};

pub struct DepotPlugin;

impl Plugin for DepotPlugin {
    fn build(&self, app: &mut App) {
        let settings = DepotSettings::load_or_default();
        info!(
            "Depot configured: {:.0} starting money, {} storage, {:.2}/day upkeep",
            settings.starting_money, settings.storage_capacity, settings.daily_cost_of_living
        );

        app.insert_resource(Depot::from_settings(&settings))
            .insert_resource(settings)
            .add_systems(Update, deduct_cost_of_living.after(advance_sim_clock));
    }
}
