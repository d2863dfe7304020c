//! Ownership of the live particle groups.
//!
//! [`SceneParticleManager`] is the only thing that adds groups to or removes
//! them from a [`RenderScene`]. Every parameter change goes through
//! [`SceneParticleManager::replace_all`], which fully disposes the old set
//! before the first new group is inserted.

use std::collections::HashMap;

use tracing::debug;

use crate::error::SceneError;
use crate::generator::{GroupId, ParticleFieldGenerator, ParticleGroup};
use crate::params::GenerationParameters;

/// Opaque handle a render scene hands out for an inserted group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SceneHandle(pub u64);

/// Something groups can be drawn into.
///
/// `insert` uploads whatever the scene needs to draw the group; `remove`
/// releases it. Removing an unknown handle must be a no-op.
pub trait RenderScene {
    fn insert(&mut self, group: &ParticleGroup) -> Result<SceneHandle, SceneError>;

    fn remove(&mut self, handle: SceneHandle);

    /// Number of groups currently in the scene.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// CPU-only scene that just records membership.
///
/// Useful headless and for checking what a manager actually installed.
#[derive(Debug, Default)]
pub struct SceneGraph {
    members: Vec<(SceneHandle, GroupId, usize)>,
    next_handle: u64,
    removed: usize,
    closed: bool,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ids of the groups currently in the scene, in insertion order.
    pub fn group_ids(&self) -> Vec<GroupId> {
        self.members.iter().map(|(_, id, _)| *id).collect()
    }

    pub fn contains(&self, id: GroupId) -> bool {
        self.members.iter().any(|(_, member, _)| *member == id)
    }

    /// Total points across all members.
    pub fn point_count(&self) -> usize {
        self.members.iter().map(|(_, _, n)| n).sum()
    }

    /// How many groups have been removed over the scene's lifetime.
    pub fn removed(&self) -> usize {
        self.removed
    }

    /// Refuse any further inserts.
    pub fn close(&mut self) {
        self.closed = true;
    }
}

impl RenderScene for SceneGraph {
    fn insert(&mut self, group: &ParticleGroup) -> Result<SceneHandle, SceneError> {
        if self.closed {
            return Err(SceneError::Closed);
        }
        let handle = SceneHandle(self.next_handle);
        self.next_handle += 1;
        self.members.push((handle, group.id(), group.len()));
        Ok(handle)
    }

    fn remove(&mut self, handle: SceneHandle) {
        let before = self.members.len();
        self.members.retain(|(h, _, _)| *h != handle);
        self.removed += before - self.members.len();
    }

    fn len(&self) -> usize {
        self.members.len()
    }
}

/// Lifecycle of a manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManagerState {
    /// Nothing installed yet.
    Empty,
    /// Owns the current set of groups (possibly zero of them).
    Populated,
    /// Torn down. A later `replace_all` repopulates it.
    Disposed,
}

struct OwnedGroup {
    group: ParticleGroup,
    handle: SceneHandle,
}

/// Owns the live particle groups and the scene they are drawn in.
pub struct SceneParticleManager<S: RenderScene> {
    scene: S,
    owned: Vec<OwnedGroup>,
    state: ManagerState,
    rotation: f32,
}

impl<S: RenderScene> SceneParticleManager<S> {
    pub fn new(scene: S) -> Self {
        Self {
            scene,
            owned: Vec::new(),
            state: ManagerState::Empty,
            rotation: 0.0,
        }
    }

    /// Dispose every owned group, then install `new_groups`.
    ///
    /// On success the scene holds exactly `new_groups`. If the scene rejects
    /// a group, the old set is already gone, groups inserted before the
    /// failure stay owned, and the error is returned.
    pub fn replace_all(&mut self, new_groups: Vec<ParticleGroup>) -> Result<(), SceneError> {
        let released = self.release_all();
        self.state = ManagerState::Populated;

        let incoming = new_groups.len();
        self.owned.reserve(incoming);
        for group in new_groups {
            let handle = self.scene.insert(&group)?;
            self.owned.push(OwnedGroup { group, handle });
        }

        debug!(released, installed = incoming, points = self.total_points(), "replaced particle groups");
        Ok(())
    }

    /// Generate a fresh set from `params` and install it.
    pub fn regenerate(
        &mut self,
        generator: &ParticleFieldGenerator,
        params: &GenerationParameters,
    ) -> Result<(), SceneError> {
        self.replace_all(generator.create_all(params))
    }

    /// Release every owned group. Safe to call repeatedly.
    pub fn dispose(&mut self) {
        let released = self.release_all();
        if released > 0 {
            debug!(released, "disposed particle groups");
        }
        self.state = ManagerState::Disposed;
    }

    fn release_all(&mut self) -> usize {
        let count = self.owned.len();
        for owned in self.owned.drain(..) {
            self.scene.remove(owned.handle);
        }
        count
    }

    /// Advance the shared spin angle to `elapsed * rotation_scaler`.
    pub fn tick(&mut self, elapsed: f32, rotation_scaler: f32) {
        self.rotation = elapsed * rotation_scaler;
    }

    /// Current spin around the Y axis, in radians.
    #[inline]
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn groups(&self) -> impl Iterator<Item = &ParticleGroup> + '_ {
        self.owned.iter().map(|o| &o.group)
    }

    /// Scene handle for each owned group, keyed by group id.
    pub fn handles(&self) -> HashMap<GroupId, SceneHandle> {
        self.owned.iter().map(|o| (o.group.id(), o.handle)).collect()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.owned.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.owned.is_empty()
    }

    pub fn total_points(&self) -> usize {
        self.owned.iter().map(|o| o.group.len()).sum()
    }

    #[inline]
    pub fn state(&self) -> ManagerState {
        self.state
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut S {
        &mut self.scene
    }
}

impl<S: RenderScene> Drop for SceneParticleManager<S> {
    fn drop(&mut self) {
        self.release_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::Range;

    fn small_params(rings: u32) -> GenerationParameters {
        let mut p = GenerationParameters::default();
        p.num_rings = rings;
        p.count = Range::new(5.0, 20.0);
        p
    }

    #[test]
    fn test_starts_empty() {
        let manager = SceneParticleManager::new(SceneGraph::new());
        assert_eq!(manager.state(), ManagerState::Empty);
        assert!(manager.is_empty());
        assert!(manager.scene().is_empty());
    }

    #[test]
    fn test_replace_all_installs_exactly_new_groups() {
        let generator = ParticleFieldGenerator::new();
        let mut manager = SceneParticleManager::new(SceneGraph::new());

        manager.replace_all(generator.create_all(&small_params(4))).unwrap();
        let first: Vec<_> = manager.groups().map(|g| g.id()).collect();
        assert_eq!(manager.state(), ManagerState::Populated);

        let next = generator.create_all(&small_params(3));
        let expected: Vec<_> = next.iter().map(|g| g.id()).collect();
        manager.replace_all(next).unwrap();

        assert_eq!(manager.scene().group_ids(), expected);
        assert!(first.iter().all(|id| !manager.scene().contains(*id)));
        assert_eq!(manager.scene().removed(), 4);
        assert_eq!(manager.scene().point_count(), manager.total_points());
    }

    #[test]
    fn test_dispose_is_idempotent() {
        let mut manager = SceneParticleManager::new(SceneGraph::new());
        manager
            .regenerate(&ParticleFieldGenerator::new(), &small_params(2))
            .unwrap();
        manager.dispose();
        manager.dispose();
        assert!(manager.is_empty());
        assert!(manager.scene().is_empty());
        assert_eq!(manager.scene().removed(), 2);
        assert_eq!(manager.state(), ManagerState::Disposed);
    }

    #[test]
    fn test_replace_after_dispose_repopulates() {
        let generator = ParticleFieldGenerator::new();
        let mut manager = SceneParticleManager::new(SceneGraph::new());
        manager.dispose();
        manager.regenerate(&generator, &small_params(2)).unwrap();
        assert_eq!(manager.state(), ManagerState::Populated);
        assert_eq!(manager.len(), 2);
    }

    #[test]
    fn test_insert_failure_leaves_no_old_groups() {
        let generator = ParticleFieldGenerator::new();
        let mut manager = SceneParticleManager::new(SceneGraph::new());
        manager.regenerate(&generator, &small_params(3)).unwrap();

        manager.scene_mut().close();
        let err = manager.regenerate(&generator, &small_params(2)).unwrap_err();
        assert!(matches!(err, SceneError::Closed));
        assert!(manager.is_empty());
        assert!(manager.scene().is_empty());
    }

    #[test]
    fn test_tick_sets_rotation() {
        let mut manager = SceneParticleManager::new(SceneGraph::new());
        manager.tick(10.0, 0.05);
        assert!((manager.rotation() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_handles_match_groups() {
        let mut manager = SceneParticleManager::new(SceneGraph::new());
        manager
            .regenerate(&ParticleFieldGenerator::new(), &small_params(3))
            .unwrap();
        let handles = manager.handles();
        assert_eq!(handles.len(), 3);
        assert!(manager.groups().all(|g| handles.contains_key(&g.id())));
    }
}
