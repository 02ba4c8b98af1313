use bevy::prelude::*;
use ds_render::timeline::advance_scroll;

use crate::input;

pub struct ScrollInputPlugin;

impl Plugin for ScrollInputPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (input::wheel_scroll_system, input::key_scroll_system).before(advance_scroll),
        );
    }
}
