//! Side-effect collaborators the rules notify but never depend on.
//!
//! All methods take `&self`: implementations are fire-and-forget sinks and use
//! interior mutability where they keep state.

use crate::map::RenderHandle;
use crate::state::{EntityId, Position, StatusEffectType, StatusStacks};

/// Effect text and status bar rendering.
pub trait StatusPresenter: Send + Sync {
    /// Shows the name of a triggering effect near a combatant.
    ///
    /// `priority` is the effect's position in the current resolution sequence.
    fn show_effect_text(
        &self,
        kind: StatusEffectType,
        position: Position,
        is_player: bool,
        priority: u32,
    );

    /// Redraws an entity's status bar after its stacks changed.
    fn update_status_ui(&self, entity: EntityId, stacks: &StatusStacks);
}

/// Sound playback.
pub trait AudioSink: Send + Sync {
    fn play_sound_effect(&self, sound_id: &str);
}

/// The merge arena and the player's inventory inside it.
pub trait MergeArena: Send + Sync {
    /// Removes one random item. Returns false when there was nothing to remove.
    fn remove_random_item(&self) -> bool;

    /// Drops one obstructive object into the arena.
    fn spawn_disturbance_object(&self);

    fn item_count(&self) -> u32;
}

/// Owner of the visuals attached to map nodes.
pub trait MapRenderer: Send + Sync {
    /// Destroys the visual behind `handle`. Called for pruned nodes.
    fn release(&self, handle: RenderHandle);
}
