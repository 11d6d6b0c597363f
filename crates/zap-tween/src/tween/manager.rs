// tween/manager.rs
//
// Tween container. Owns tweens, runs them in sequences, and routes contacts.
//
// Usage:
//   let mut tweens = TweenManager::new();
//   let id = tweens.add(builder.build(&scene)?);
//   tweens.tick(dt, &mut scene);              // advance every sequence head
//   tweens.dispatch_contacts(&mut scene);     // after physics reported contacts

use std::collections::VecDeque;
use std::fmt;

use slotmap::SlotMap;

use crate::api::config::{TweenConfig, TweenSettings};
use crate::api::types::{SequenceId, TweenId};
use crate::core::scene::{NodeHandle, Scene};

use super::tween::{TweenStatus, Tweenable};

/// Tweens that run one after another. Only the head advances.
struct Sequence {
    id: SequenceId,
    queue: VecDeque<TweenId>,
}

/// Owns and drives all tweens.
pub struct TweenManager {
    tweens: SlotMap<TweenId, Box<dyn Tweenable>>,
    /// Visited in creation order.
    sequences: Vec<Sequence>,
    next_sequence: u32,
    global_time_scale: f32,
    /// Global pause. Tweens that ignore it keep running.
    paused: bool,
    defaults: TweenSettings,
    /// Tweens that ended and were removed, to be polled.
    finished: Vec<TweenId>,
}

impl Default for TweenManager {
    fn default() -> Self {
        Self::with_config(&TweenConfig::default())
    }
}

impl TweenManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: &TweenConfig) -> Self {
        Self {
            tweens: SlotMap::with_key(),
            sequences: Vec::new(),
            next_sequence: 0,
            global_time_scale: config.global_time_scale,
            paused: config.start_paused,
            defaults: config.defaults.clone(),
            finished: Vec::new(),
        }
    }

    /// Settings to seed builders with (`with_settings`).
    pub fn defaults(&self) -> &TweenSettings {
        &self.defaults
    }

    // -- Ownership --

    /// Add a stand-alone tween (a one-element sequence).
    pub fn add(&mut self, tween: impl Tweenable + 'static) -> TweenId {
        let id = self.tweens.insert(Box::new(tween));
        let sequence = self.new_sequence();
        sequence.queue.push_back(id);
        id
    }

    /// Add tweens that play one after another, in iteration order.
    pub fn add_sequence(
        &mut self,
        tweens: impl IntoIterator<Item = Box<dyn Tweenable>>,
    ) -> SequenceId {
        let ids: VecDeque<TweenId> = tweens.into_iter().map(|t| self.tweens.insert(t)).collect();
        let sequence = self.new_sequence();
        sequence.queue = ids;
        sequence.id
    }

    /// Queue a tween at the end of an existing sequence. Returns `None` if the
    /// sequence has already played out.
    pub fn append(&mut self, sequence: SequenceId, tween: impl Tweenable + 'static) -> Option<TweenId> {
        let index = self.sequences.iter().position(|s| s.id == sequence)?;
        let id = self.tweens.insert(Box::new(tween));
        self.sequences[index].queue.push_back(id);
        Some(id)
    }

    fn new_sequence(&mut self) -> &mut Sequence {
        let id = SequenceId(self.next_sequence);
        self.next_sequence = self.next_sequence.wrapping_add(1);
        self.sequences.push(Sequence { id, queue: VecDeque::new() });
        let last = self.sequences.len() - 1;
        &mut self.sequences[last]
    }

    /// The tween a sequence is currently running.
    pub fn sequence_head(&self, sequence: SequenceId) -> Option<TweenId> {
        self.sequences
            .iter()
            .find(|s| s.id == sequence)
            .and_then(|s| s.queue.front().copied())
    }

    /// Delete and drop a tween. Returns `false` for unknown ids.
    pub fn remove(&mut self, id: TweenId, scene: &mut Scene) -> bool {
        let Some(mut tween) = self.tweens.remove(id) else {
            return false;
        };
        tween.delete(scene);
        self.unlink(id);
        true
    }

    /// Delete every tween animating `node`. Returns how many were removed.
    pub fn remove_target(&mut self, node: NodeHandle, scene: &mut Scene) -> usize {
        let ids: Vec<TweenId> = self
            .tweens
            .iter()
            .filter(|(_, t)| t.target().handle == node)
            .map(|(id, _)| id)
            .collect();
        for &id in &ids {
            self.remove(id, scene);
        }
        ids.len()
    }

    fn unlink(&mut self, id: TweenId) {
        for sequence in &mut self.sequences {
            sequence.queue.retain(|queued| *queued != id);
        }
        self.sequences.retain(|s| !s.queue.is_empty());
    }

    /// Delete everything.
    pub fn clear(&mut self, scene: &mut Scene) {
        for (_, tween) in self.tweens.iter_mut() {
            tween.delete(scene);
        }
        self.tweens.clear();
        self.sequences.clear();
        self.finished.clear();
    }

    pub fn get(&self, id: TweenId) -> Option<&dyn Tweenable> {
        let tween: &dyn Tweenable = &**self.tweens.get(id)?;
        Some(tween)
    }

    pub fn get_mut(&mut self, id: TweenId) -> Option<&mut dyn Tweenable> {
        let tween: &mut dyn Tweenable = &mut **self.tweens.get_mut(id)?;
        Some(tween)
    }

    pub fn contains(&self, id: TweenId) -> bool {
        self.tweens.contains_key(id)
    }

    // -- Playback control --

    pub fn pause(&mut self, id: TweenId) {
        if let Some(tween) = self.tweens.get_mut(id) {
            tween.pause();
        }
    }

    pub fn resume(&mut self, id: TweenId) {
        if let Some(tween) = self.tweens.get_mut(id) {
            tween.resume();
        }
    }

    /// Freeze every tween that does not ignore the global pause.
    pub fn pause_all(&mut self) {
        self.paused = true;
    }

    pub fn resume_all(&mut self) {
        self.paused = false;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn global_time_scale(&self) -> f32 {
        self.global_time_scale
    }

    /// Negative and non-finite scales are rejected.
    pub fn set_global_time_scale(&mut self, scale: f32) {
        if scale.is_finite() && scale >= 0.0 {
            self.global_time_scale = scale;
        } else {
            log::warn!("set_global_time_scale: ignoring {}", scale);
        }
    }

    // -- Frame driving --

    /// Advance the head of every sequence. Returns the number of tweens that
    /// ended this tick. The next tween of a sequence starts on the next tick.
    pub fn tick(&mut self, dt: f32, scene: &mut Scene) -> usize {
        let mut ended = 0;

        for sequence in &mut self.sequences {
            let Some(&id) = sequence.queue.front() else { continue };
            let Some(tween) = self.tweens.get_mut(id) else {
                sequence.queue.pop_front();
                continue;
            };
            if self.paused && !tween.ignores_global_pause() {
                continue;
            }

            if tween.update(dt, self.global_time_scale, scene) {
                tween.delete(scene);
                self.tweens.remove(id);
                sequence.queue.pop_front();
                self.finished.push(id);
                ended += 1;
            }
        }

        self.sequences.retain(|s| !s.queue.is_empty());
        ended
    }

    /// Deliver queued scene contacts to the tweens bound to each node, then
    /// sweep tweens the contacts deleted. Returns the number swept.
    pub fn dispatch_contacts(&mut self, scene: &mut Scene) -> usize {
        let events = scene.drain_contacts();
        if events.is_empty() {
            return 0;
        }

        for event in &events {
            for (_, tween) in self.tweens.iter_mut() {
                if tween.bound_node() == Some(event.node) {
                    tween.handle_contact(event, scene);
                }
            }
        }

        let deleted: Vec<TweenId> = self
            .tweens
            .iter()
            .filter(|(_, t)| t.status() == TweenStatus::Deleted)
            .map(|(id, _)| id)
            .collect();
        for &id in &deleted {
            self.tweens.remove(id);
            self.unlink(id);
            self.finished.push(id);
        }
        if !deleted.is_empty() {
            log::debug!("dispatch_contacts: {} tween(s) deleted by contact", deleted.len());
        }
        deleted.len()
    }

    /// Drain ids of tweens that ended and were removed.
    pub fn drain_finished(&mut self) -> impl Iterator<Item = TweenId> + '_ {
        self.finished.drain(..)
    }

    /// Number of owned tweens, queued ones included.
    pub fn len(&self) -> usize {
        self.tweens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }
}

impl fmt::Debug for TweenManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TweenManager")
            .field("tweens", &self.tweens.len())
            .field("sequences", &self.sequences.len())
            .field("global_time_scale", &self.global_time_scale)
            .field("paused", &self.paused)
            .finish()
    }
}
