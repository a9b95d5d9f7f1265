//! Deferred, time-keyed continuations.
//!
//! Attack windups, dash ends and death delays are not timers ticking on the
//! entity. They are tasks in one queue keyed by an absolute fire time and an
//! owning entity:
//!
//! ```text
//!   schedule(now + windup, enemy, FireAttack(Normal))
//!   ...
//!   drain_due(now)        -> tasks with fire_at <= now, oldest first
//!   cancel_owner(enemy)   -> drops everything the enemy still had queued
//! ```
//!
//! An enemy that dies mid-windup has its tasks cancelled, so its attack never
//! fires after death. Tasks whose owner has been despawned are skipped by the
//! consumer.

use bevy::prelude::*;

use crate::common::state::GameState;
use crate::plugins::enemies::components::AttackKind;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TaskAction {
    /// Resolve the effect of an attack whose windup has finished.
    FireAttack(AttackKind),
    /// Release a dashing enemy back to `Idle`.
    EndDash,
    /// The death delay ran out: drops, puff, teardown.
    Despawn,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScheduledTask {
    pub fire_at: f32,
    pub owner: Entity,
    pub action: TaskAction,
    seq: u64,
}

#[derive(Resource, Debug, Default)]
pub struct ScheduledTasks {
    queue: Vec<ScheduledTask>,
    next_seq: u64,
}

impl ScheduledTasks {
    pub fn schedule(&mut self, fire_at: f32, owner: Entity, action: TaskAction) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(ScheduledTask {
            fire_at,
            owner,
            action,
            seq,
        });
    }

    /// Remove and return every task due at `now`, ordered by fire time and then
    /// by scheduling order.
    pub fn drain_due(&mut self, now: f32) -> Vec<ScheduledTask> {
        if !self.queue.iter().any(|t| t.fire_at <= now) {
            return Vec::new();
        }
        let (mut due, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut self.queue)
            .into_iter()
            .partition(|t| t.fire_at <= now);
        self.queue = pending;
        due.sort_by(|a, b| a.fire_at.total_cmp(&b.fire_at).then(a.seq.cmp(&b.seq)));
        due
    }

    /// Drop every task owned by `owner`. Returns how many were removed.
    pub fn cancel_owner(&mut self, owner: Entity) -> usize {
        let before = self.queue.len();
        self.queue.retain(|t| t.owner != owner);
        before - self.queue.len()
    }

    pub fn pending_for(&self, owner: Entity) -> impl Iterator<Item = &ScheduledTask> {
        self.queue.iter().filter(move |t| t.owner == owner)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn clear(&mut self) {
        self.queue.clear();
    }
}

pub fn plugin(app: &mut App) {
    app.init_resource::<ScheduledTasks>();
    app.add_systems(OnExit(GameState::InGame), clear_tasks);
}

fn clear_tasks(mut tasks: ResMut<ScheduledTasks>) {
    if !tasks.is_empty() {
        debug!("dropping {} scheduled tasks at scene end", tasks.len());
    }
    tasks.clear();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::test_utils::run_system_once;

    fn owners(world: &mut World) -> (Entity, Entity) {
        (world.spawn_empty().id(), world.spawn_empty().id())
    }

    #[test]
    fn drain_due_returns_only_due_tasks_in_time_then_insertion_order() {
        let mut world = World::new();
        let (a, b) = owners(&mut world);
        let mut tasks = ScheduledTasks::default();

        tasks.schedule(2.0, a, TaskAction::Despawn);
        tasks.schedule(1.0, b, TaskAction::FireAttack(AttackKind::Normal));
        tasks.schedule(1.0, a, TaskAction::EndDash);
        tasks.schedule(5.0, b, TaskAction::Despawn);

        let due: Vec<_> = tasks.drain_due(2.0).iter().map(|t| (t.owner, t.action)).collect();
        assert_eq!(
            due,
            vec![
                (b, TaskAction::FireAttack(AttackKind::Normal)),
                (a, TaskAction::EndDash),
                (a, TaskAction::Despawn),
            ]
        );
        assert_eq!(tasks.len(), 1);
        assert!(tasks.drain_due(2.0).is_empty());
    }

    #[test]
    fn cancel_owner_removes_only_that_owners_tasks() {
        let mut world = World::new();
        let (a, b) = owners(&mut world);
        let mut tasks = ScheduledTasks::default();

        tasks.schedule(0.6, a, TaskAction::FireAttack(AttackKind::Normal));
        tasks.schedule(0.9, a, TaskAction::EndDash);
        tasks.schedule(0.6, b, TaskAction::FireAttack(AttackKind::Normal));

        assert_eq!(tasks.cancel_owner(a), 2);
        assert_eq!(tasks.cancel_owner(a), 0);
        assert_eq!(tasks.pending_for(a).count(), 0);
        assert_eq!(tasks.pending_for(b).count(), 1);

        let due = tasks.drain_due(10.0);
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].owner, b);
    }

    #[test]
    fn clear_tasks_empties_queue() {
        let mut world = World::new();
        let owner = world.spawn_empty().id();
        let mut tasks = ScheduledTasks::default();
        tasks.schedule(1.0, owner, TaskAction::Despawn);
        world.insert_resource(tasks);

        run_system_once(&mut world, clear_tasks);

        assert!(world.resource::<ScheduledTasks>().is_empty());
    }
}
