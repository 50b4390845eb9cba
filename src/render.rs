//! Presentation seam.
//!
//! The simulation never touches a renderer.  `RenderSync` replays a frame's
//! `GameEvent`s against a `Scene` and an `AudioSink`, keeping the map from
//! entity id to visual node, then moves every live node to its entity's
//! current position.

use std::collections::HashMap;

use tracing::trace;

use crate::entities::{EntityId, GameEvent, GameState, Overlay, Sound, Sprite};

/// Rendering container.
pub trait Scene {
    type Node: Copy;

    fn create_node(&mut self, sprite: Sprite) -> Self::Node;
    fn set_position(&mut self, node: Self::Node, x: f64, y: f64);
    fn remove_node(&mut self, node: Self::Node);
    fn show_overlay(&mut self, overlay: Overlay);
}

/// Fire-and-forget sound playback.
pub trait AudioSink {
    fn play(&mut self, sound: Sound);
}

pub struct RenderSync<N> {
    nodes: HashMap<EntityId, N>,
}

impl<N: Copy> Default for RenderSync<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: Copy> RenderSync<N> {
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
        }
    }

    /// Number of entities that currently have a visual node.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: EntityId) -> Option<N> {
        self.nodes.get(&id).copied()
    }

    /// Dispatch `events` in order, then sync positions for every category.
    pub fn apply<S, A>(&mut self, state: &GameState, events: &[GameEvent], scene: &mut S, audio: &mut A)
    where
        S: Scene<Node = N>,
        A: AudioSink,
    {
        for event in events {
            match *event {
                GameEvent::Spawned { id, sprite } => {
                    let node = scene.create_node(sprite);
                    if let Some(old) = self.nodes.insert(id, node) {
                        scene.remove_node(old);
                    }
                }
                GameEvent::Despawned { id } => {
                    // Unknown ids were already removed.
                    if let Some(node) = self.nodes.remove(&id) {
                        scene.remove_node(node);
                    }
                }
                GameEvent::PlaySound(sound) => audio.play(sound),
                GameEvent::ShowOverlay(overlay) => scene.show_overlay(overlay),
            }
        }

        self.sync_player(state, scene);
        self.sync_lasers(state, scene);
        self.sync_enemies(state, scene);
        self.sync_enemy_lasers(state, scene);
        trace!(nodes = self.nodes.len(), frame = state.frame, "render sync");
    }

    pub fn sync_player<S: Scene<Node = N>>(&self, state: &GameState, scene: &mut S) {
        if !state.player.alive {
            return;
        }
        if let Some(node) = self.node(state.player.id) {
            scene.set_position(node, state.player.x, state.player.y);
        }
    }

    pub fn sync_lasers<S: Scene<Node = N>>(&self, state: &GameState, scene: &mut S) {
        for laser in &state.lasers {
            if let Some(node) = self.node(laser.id) {
                scene.set_position(node, laser.x, laser.y);
            }
        }
    }

    pub fn sync_enemies<S: Scene<Node = N>>(&self, state: &GameState, scene: &mut S) {
        for enemy in &state.enemies {
            if let Some(node) = self.node(enemy.id) {
                let (x, y) = enemy.position();
                scene.set_position(node, x, y);
            }
        }
    }

    pub fn sync_enemy_lasers<S: Scene<Node = N>>(&self, state: &GameState, scene: &mut S) {
        for laser in &state.enemy_lasers {
            if let Some(node) = self.node(laser.id) {
                scene.set_position(node, laser.x, laser.y);
            }
        }
    }
}
