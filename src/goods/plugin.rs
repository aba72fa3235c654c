//! GoodsPlugin loads the commodity catalog into the session world.
use bevy::prelude::*;

use super::data::GoodRegistry;

pub struct GoodsPlugin;

impl Plugin for GoodsPlugin {
    fn build(&self, app: &mut App) {
        let registry = GoodRegistry::default();
        info!("Good registry loaded with {} goods", registry.len());
        app.insert_resource(registry);
    }
}
