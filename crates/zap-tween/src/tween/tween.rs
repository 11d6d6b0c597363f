// tween/tween.rs
//
// The tween lifecycle, shared by every value kind:
//
//   Created -> Delayed -> (prepare) -> Running <-> Paused
//   Running -> Completed, or back to Running while loops remain
//   any     -> Deleted
//
// The property strategy decides what is interpolated and where it goes; this
// file owns time, loops, events and teardown.

use crate::api::config::{LoopType, TweenSettings};
use crate::api::types::{ContactEvent, ContactKind};
use crate::core::scene::{ContactBinding, NodeHandle, Scene};

use super::curve::CustomCurve;
use super::delegate::{DeleteHandle, TweenDelegates};
use super::easing::{compute_custom_easing, compute_easing};
use super::property::TweenProperty;
use super::target::TweenTarget;

/// Lifecycle state of a tween.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TweenStatus {
    /// Initialized, never updated.
    #[default]
    Created,
    /// Counting down the start delay.
    Delayed,
    /// Start values captured, sampling every update.
    Running,
    /// Frozen; resumes to the state it was paused from.
    Paused,
    /// Reached the end with no loops left. `current_value` is the end value.
    Completed,
    /// Torn down. Every further call is a no-op.
    Deleted,
}

impl TweenStatus {
    /// Whether an update would advance time.
    pub fn is_active(self) -> bool {
        matches!(self, Self::Created | Self::Delayed | Self::Running)
    }

    pub fn is_finished(self) -> bool {
        matches!(self, Self::Completed | Self::Deleted)
    }
}

/// A single tween: timing, loops, events, and a property strategy.
#[derive(Debug)]
pub struct Tween<P: TweenProperty> {
    property: P,
    target: TweenTarget,
    settings: TweenSettings,
    /// Replaces `settings.easing` when present.
    curve: Option<CustomCurve>,
    status: TweenStatus,
    /// Where `resume` returns to.
    resume_status: TweenStatus,
    elapsed: f32,
    delay_remaining: f32,
    loops_remaining: i32,
    current: P::Value,
    prepared: bool,
    has_bound_functions: bool,
    binding: Option<ContactBinding>,
    // Effective flags, after checking the target can produce the contact.
    delete_on_hit: bool,
    delete_on_overlap: bool,
    delete_request: DeleteHandle,
    warned_stale: bool,
    /// Event hooks.
    pub delegates: TweenDelegates<P::Value>,
}

impl<P: TweenProperty> Tween<P> {
    /// Initialize a tween. Nothing touches the scene until the first update.
    pub fn new(property: P, target: TweenTarget, settings: TweenSettings) -> Self {
        let current = property.start_value();
        Self {
            delay_remaining: settings.delay.max(0.0),
            loops_remaining: settings.loop_count,
            property,
            target,
            settings,
            curve: None,
            status: TweenStatus::Created,
            resume_status: TweenStatus::Created,
            elapsed: 0.0,
            current,
            prepared: false,
            has_bound_functions: false,
            binding: None,
            delete_on_hit: false,
            delete_on_overlap: false,
            delete_request: DeleteHandle::default(),
            warned_stale: false,
            delegates: TweenDelegates::default(),
        }
    }

    /// Use a custom curve instead of the named easing.
    pub fn with_curve(mut self, curve: CustomCurve) -> Self {
        self.curve = Some(curve);
        self
    }

    pub fn set_curve(&mut self, curve: Option<CustomCurve>) {
        self.curve = curve;
    }

    pub fn set_time_scale(&mut self, time_scale: f32) {
        self.settings.time_scale = time_scale;
    }

    // -- Accessors --

    pub fn status(&self) -> TweenStatus {
        self.status
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn duration(&self) -> f32 {
        self.settings.duration
    }

    /// Normalized progress [0, 1].
    pub fn progress(&self) -> f32 {
        if self.settings.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.settings.duration).clamp(0.0, 1.0)
        }
    }

    /// Last computed sample (the start value before the first sample).
    pub fn current_value(&self) -> P::Value {
        self.current
    }

    pub fn property(&self) -> &P {
        &self.property
    }

    pub fn target(&self) -> TweenTarget {
        self.target
    }

    pub fn settings(&self) -> &TweenSettings {
        &self.settings
    }

    pub fn loops_remaining(&self) -> i32 {
        self.loops_remaining
    }

    pub fn is_prepared(&self) -> bool {
        self.prepared
    }

    pub fn is_deleted(&self) -> bool {
        self.status == TweenStatus::Deleted
    }

    /// Node whose contacts this tween currently listens to.
    pub fn bound_node(&self) -> Option<NodeHandle> {
        self.binding.map(|_| self.target.handle)
    }

    pub fn ignores_global_pause(&self) -> bool {
        self.settings.ignore_global_pause
    }

    /// Token that lets a listener delete this tween from inside a callback.
    pub fn delete_handle(&self) -> DeleteHandle {
        self.delete_request.clone()
    }

    // -- Lifecycle --

    /// Bind contact handlers on the target. Runs at most once per tween.
    ///
    /// Any target with a collider gets a binding, so `on_hit` and
    /// `on_overlap` listeners added later still receive contacts.
    ///
    /// A deletion flag whose contact kind the target cannot produce is
    /// dropped with a warning; the tween itself carries on.
    pub fn pre_delay(&mut self, scene: &mut Scene) {
        if self.has_bound_functions {
            return;
        }
        self.has_bound_functions = true;

        let Some(node) = scene.get(self.target.handle) else {
            log::warn!("pre_delay: target {:?} does not exist", self.target.handle);
            return;
        };
        let (hits, overlaps, has_collider) =
            (node.generates_hits(), node.generates_overlaps(), node.collision.is_some());

        self.delete_on_hit = self.settings.delete_on_hit && hits;
        if self.settings.delete_on_hit && !hits {
            log::warn!(
                "delete_on_hit ignored: target {:?} produces no hit events",
                self.target.handle
            );
        }
        self.delete_on_overlap = self.settings.delete_on_overlap && overlaps;
        if self.settings.delete_on_overlap && !overlaps {
            log::warn!(
                "delete_on_overlap ignored: target {:?} produces no overlap events",
                self.target.handle
            );
        }

        if has_collider {
            self.binding = scene.bind_contacts(self.target.handle);
        }
    }

    /// Capture the start values from the live target and enter `Running`.
    ///
    /// Only the first successful call does anything. Returns `false` if the
    /// target is unusable.
    pub fn prepare(&mut self, scene: &Scene) -> bool {
        if self.prepared {
            return true;
        }
        if let Err(err) = self.property.prepare(scene, self.target) {
            log::warn!("tween could not start: {}", err);
            return false;
        }
        self.prepared = true;
        // Scrubbing a paused tween must not unpause it.
        if self.status == TweenStatus::Paused {
            self.resume_status = TweenStatus::Running;
        } else {
            self.status = TweenStatus::Running;
        }
        let start = self.property.start_value();
        self.current = start;
        self.delegates.on_start.broadcast(&start);
        true
    }

    /// Advance by `dt` seconds scaled by the tween's own and the global time
    /// scale. Returns `true` once the tween has ended (completed or deleted).
    pub fn update(&mut self, dt: f32, global_time_scale: f32, scene: &mut Scene) -> bool {
        if self.flush_delete_request(scene) {
            return true;
        }
        match self.status {
            TweenStatus::Completed | TweenStatus::Deleted => return true,
            TweenStatus::Paused => return false,
            TweenStatus::Created | TweenStatus::Delayed | TweenStatus::Running => {}
        }

        let mut step = (dt * self.settings.time_scale * global_time_scale).max(0.0);

        if self.status == TweenStatus::Created {
            self.pre_delay(scene);
            self.status = TweenStatus::Delayed;
        }

        if self.status == TweenStatus::Delayed {
            if self.delay_remaining > step {
                self.delay_remaining -= step;
                return false;
            }
            // Time left over after the delay counts toward the tween.
            step -= self.delay_remaining;
            self.delay_remaining = 0.0;
            if !self.prepare(scene) {
                self.delete(scene);
                return true;
            }
            if self.flush_delete_request(scene) {
                return true;
            }
        }

        self.elapsed += step;
        self.advance(scene)
    }

    fn advance(&mut self, scene: &mut Scene) -> bool {
        if self.elapsed >= self.settings.duration {
            return self.finish_cycle(scene);
        }

        let value = self.property.sample(self.alpha());
        self.current = value;
        self.push(scene);
        self.delegates.on_update.broadcast(&value);
        self.flush_delete_request(scene)
    }

    // Snap to the end value, then loop or complete.
    fn finish_cycle(&mut self, scene: &mut Scene) -> bool {
        let end = self.property.end_value();
        self.current = end;
        self.push(scene);
        self.delegates.on_update.broadcast(&end);
        if self.flush_delete_request(scene) {
            return true;
        }

        if self.loops_remaining != 0 {
            if self.loops_remaining > 0 {
                self.loops_remaining -= 1;
            }
            self.delegates.on_loop.broadcast(&end);
            if self.flush_delete_request(scene) {
                return true;
            }
            // Time past the end of this cycle carries into the next one.
            let overflow = (self.elapsed - self.settings.duration).max(0.0);
            self.restart(self.settings.loop_type == LoopType::PingPong);
            self.elapsed = overflow.min(self.settings.duration).max(0.0);
            return false;
        }

        self.status = TweenStatus::Completed;
        self.delegates.on_end.broadcast(&end);
        self.flush_delete_request(scene);
        true
    }

    fn alpha(&self) -> f32 {
        let duration = self.settings.duration;
        match &self.curve {
            Some(curve) => compute_custom_easing(curve, self.elapsed, 0.0, 1.0, duration),
            None => compute_easing(self.settings.easing, self.elapsed, 0.0, 1.0, duration),
        }
    }

    fn push(&mut self, scene: &mut Scene) {
        if !self.property.apply(&self.current, scene, self.target) && !self.warned_stale {
            self.warned_stale = true;
            log::warn!("tween target {:?} can no longer be written", self.target.handle);
        }
    }

    /// Freeze time. Works from `Created`, `Delayed` and `Running`.
    pub fn pause(&mut self) {
        if self.status.is_active() {
            self.resume_status = self.status;
            self.status = TweenStatus::Paused;
        }
    }

    /// Continue from where `pause` froze the tween.
    pub fn resume(&mut self) {
        if self.status == TweenStatus::Paused {
            self.status = self.resume_status;
        }
    }

    /// Reset time to zero, optionally swapping start and end first.
    ///
    /// A completed tween becomes `Running` again. Before the start values
    /// are captured only the time is reset.
    pub fn restart(&mut self, restart_from_end: bool) {
        if self.status == TweenStatus::Deleted {
            return;
        }
        self.elapsed = 0.0;
        if !self.prepared {
            log::debug!("restart before start: endpoints left as they are");
            return;
        }
        if restart_from_end {
            self.property.swap_endpoints();
        }
        self.current = self.property.start_value();
        self.reopen();
    }

    /// Swap start and end without resetting time. With `should_invert_elapsed`
    /// the elapsed time is mirrored so the sample does not jump.
    pub fn invert(&mut self, should_invert_elapsed: bool) {
        if self.status == TweenStatus::Deleted {
            return;
        }
        if !self.prepared {
            log::debug!("invert before start ignored");
            return;
        }
        self.property.swap_endpoints();
        let duration = self.settings.duration.max(0.0);
        if should_invert_elapsed {
            self.elapsed = (duration - self.elapsed.min(duration)).max(0.0);
        }
        if self.elapsed >= self.settings.duration {
            self.current = self.property.end_value();
        } else {
            self.current = self.property.sample(self.alpha());
            self.reopen();
        }
    }

    /// Jump to the start or the end and apply that value immediately.
    /// Captures the start values first if that has not happened yet.
    pub fn position_at(&mut self, at_beginning: bool, scene: &mut Scene) {
        if self.status == TweenStatus::Deleted {
            return;
        }
        if !self.prepared {
            self.pre_delay(scene);
            self.delay_remaining = 0.0;
            if !self.prepare(scene) {
                return;
            }
        }
        if at_beginning {
            self.elapsed = 0.0;
            self.current = self.property.start_value();
            self.reopen();
        } else {
            self.elapsed = self.settings.duration.max(0.0);
            self.current = self.property.end_value();
        }
        self.push(scene);
    }

    // A completed tween that has time left again goes back to Running.
    fn reopen(&mut self) {
        match self.status {
            TweenStatus::Completed => self.status = TweenStatus::Running,
            TweenStatus::Paused if self.resume_status == TweenStatus::Completed => {
                self.resume_status = TweenStatus::Running;
            }
            _ => {}
        }
    }

    /// Tear down: release the contact binding and fire `on_deleted`.
    /// Safe to call any number of times; only the first does anything.
    pub fn delete(&mut self, scene: &mut Scene) {
        if self.status == TweenStatus::Deleted {
            log::debug!("delete: tween on {:?} already deleted", self.target.handle);
            return;
        }
        if let Some(binding) = self.binding.take() {
            scene.unbind_contacts(binding);
        }
        self.status = TweenStatus::Deleted;
        let last = self.current;
        self.delegates.on_deleted.broadcast(&last);
    }

    /// Ask for deletion at the next safe point.
    pub fn request_delete(&self) {
        self.delete_request.request();
    }

    // Honor a pending deletion request. Returns `true` if the tween is deleted.
    fn flush_delete_request(&mut self, scene: &mut Scene) -> bool {
        if self.status == TweenStatus::Deleted {
            return true;
        }
        if self.delete_request.is_requested() {
            self.delete(scene);
            return true;
        }
        false
    }

    /// Deliver a contact on the target. Listeners always see it; the tween
    /// then deletes itself if the matching flag is in effect.
    pub fn handle_contact(&mut self, event: &ContactEvent, scene: &mut Scene) {
        if self.status == TweenStatus::Deleted || event.node != self.target.handle {
            return;
        }
        let delete = match event.kind {
            ContactKind::Hit => {
                self.delegates.on_hit.broadcast(event);
                self.delete_on_hit
            }
            ContactKind::Overlap => {
                self.delegates.on_overlap.broadcast(event);
                self.delete_on_overlap
            }
        };
        if delete {
            self.delete(scene);
        } else {
            self.flush_delete_request(scene);
        }
    }
}

/// Object-safe view of a tween, for containers that hold several value kinds.
pub trait Tweenable {
    fn update(&mut self, dt: f32, global_time_scale: f32, scene: &mut Scene) -> bool;
    fn pause(&mut self);
    fn resume(&mut self);
    fn restart(&mut self, restart_from_end: bool);
    fn invert(&mut self, should_invert_elapsed: bool);
    fn position_at(&mut self, at_beginning: bool, scene: &mut Scene);
    fn delete(&mut self, scene: &mut Scene);
    fn request_delete(&self);
    fn handle_contact(&mut self, event: &ContactEvent, scene: &mut Scene);
    fn status(&self) -> TweenStatus;
    fn target(&self) -> TweenTarget;
    fn bound_node(&self) -> Option<NodeHandle>;
    fn ignores_global_pause(&self) -> bool;
    fn elapsed(&self) -> f32;
    fn duration(&self) -> f32;
}

impl<P: TweenProperty> Tweenable for Tween<P> {
    fn update(&mut self, dt: f32, global_time_scale: f32, scene: &mut Scene) -> bool {
        Tween::update(self, dt, global_time_scale, scene)
    }

    fn pause(&mut self) {
        Tween::pause(self)
    }

    fn resume(&mut self) {
        Tween::resume(self)
    }

    fn restart(&mut self, restart_from_end: bool) {
        Tween::restart(self, restart_from_end)
    }

    fn invert(&mut self, should_invert_elapsed: bool) {
        Tween::invert(self, should_invert_elapsed)
    }

    fn position_at(&mut self, at_beginning: bool, scene: &mut Scene) {
        Tween::position_at(self, at_beginning, scene)
    }

    fn delete(&mut self, scene: &mut Scene) {
        Tween::delete(self, scene)
    }

    fn request_delete(&self) {
        Tween::request_delete(self)
    }

    fn handle_contact(&mut self, event: &ContactEvent, scene: &mut Scene) {
        Tween::handle_contact(self, event, scene)
    }

    fn status(&self) -> TweenStatus {
        self.status
    }

    fn target(&self) -> TweenTarget {
        self.target
    }

    fn bound_node(&self) -> Option<NodeHandle> {
        Tween::bound_node(self)
    }

    fn ignores_global_pause(&self) -> bool {
        Tween::ignores_global_pause(self)
    }

    fn elapsed(&self) -> f32 {
        self.elapsed
    }

    fn duration(&self) -> f32 {
        self.settings.duration
    }
}
