// core/scene.rs
//
// Node storage plus the hierarchy queries and contact plumbing tweens need.
// Handles are generational: a despawned node's handle stays stale forever.

use glam::{Quat, Vec3};
use slotmap::{new_key_type, SlotMap};

use super::transform::Transform;
use crate::api::types::ContactEvent;
use crate::components::node::{Node, NodeKind};

new_key_type! {
    /// Non-owning reference to a node. Check `Scene::is_alive` before trusting it.
    pub struct NodeHandle;
    /// Registration of a listener for a node's contact events.
    pub struct ContactBinding;
}

/// Upper bound on parent-chain walks; guards against accidental cycles.
const MAX_DEPTH: usize = 64;

/// Node storage backed by a generational arena.
#[derive(Debug, Default)]
pub struct Scene {
    nodes: SlotMap<NodeHandle, Node>,
    bindings: SlotMap<ContactBinding, NodeHandle>,
    contacts: Vec<ContactEvent>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node. Any parent set on the node is kept if it is alive.
    pub fn spawn(&mut self, mut node: Node) -> NodeHandle {
        if let Some(parent) = node.parent {
            if !self.nodes.contains_key(parent) {
                node.parent = None;
            }
        }
        self.nodes.insert(node)
    }

    /// Add a sub-object owned by `owner`. Returns `None` if the owner is gone.
    pub fn spawn_attached(&mut self, mut node: Node, owner: NodeHandle) -> Option<NodeHandle> {
        if !self.nodes.contains_key(owner) {
            log::warn!("spawn_attached: owner {:?} does not exist", owner);
            return None;
        }
        node.kind = NodeKind::Attached;
        node.parent = Some(owner);
        Some(self.nodes.insert(node))
    }

    /// Remove a node. Children become roots and its contact bindings are dropped.
    pub fn despawn(&mut self, handle: NodeHandle) -> Option<Node> {
        let node = self.nodes.remove(handle)?;
        for child in self.nodes.values_mut() {
            if child.parent == Some(handle) {
                child.parent = None;
            }
        }
        self.bindings.retain(|_, bound| *bound != handle);
        self.contacts.retain(|c| c.node != handle);
        Some(node)
    }

    /// Re-parent a node, keeping its local transform. Pass `None` to make it a root.
    pub fn set_parent(&mut self, child: NodeHandle, parent: Option<NodeHandle>) -> bool {
        if let Some(p) = parent {
            if p == child || !self.nodes.contains_key(p) || self.is_ancestor(child, p) {
                return false;
            }
        }
        match self.nodes.get_mut(child) {
            Some(node) => {
                node.parent = parent;
                true
            }
            None => false,
        }
    }

    // Whether `ancestor` appears in the parent chain of `node`.
    fn is_ancestor(&self, ancestor: NodeHandle, node: NodeHandle) -> bool {
        let mut current = self.nodes.get(node).and_then(|n| n.parent);
        for _ in 0..MAX_DEPTH {
            match current {
                Some(h) if h == ancestor => return true,
                Some(h) => current = self.nodes.get(h).and_then(|n| n.parent),
                None => return false,
            }
        }
        true
    }

    pub fn is_alive(&self, handle: NodeHandle) -> bool {
        self.nodes.contains_key(handle)
    }

    pub fn get(&self, handle: NodeHandle) -> Option<&Node> {
        self.nodes.get(handle)
    }

    pub fn get_mut(&mut self, handle: NodeHandle) -> Option<&mut Node> {
        self.nodes.get_mut(handle)
    }

    pub fn kind_of(&self, handle: NodeHandle) -> Option<NodeKind> {
        self.nodes.get(handle).map(|n| n.kind)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // -- Transform queries --

    /// World transform of the node's parent, or identity for roots.
    pub fn parent_world_transform(&self, handle: NodeHandle) -> Option<Transform> {
        let node = self.nodes.get(handle)?;
        Some(match node.parent {
            Some(parent) => self.world_transform(parent).unwrap_or(Transform::IDENTITY),
            None => Transform::IDENTITY,
        })
    }

    /// Compose local transforms from the root down to `handle`.
    pub fn world_transform(&self, handle: NodeHandle) -> Option<Transform> {
        let mut chain = Vec::new();
        let mut current = Some(handle);
        while let Some(h) = current {
            let node = self.nodes.get(h)?;
            chain.push(node.local);
            if chain.len() > MAX_DEPTH {
                log::warn!("world_transform: parent chain of {:?} too deep", handle);
                break;
            }
            current = node.parent;
        }
        Some(
            chain
                .iter()
                .rev()
                .fold(Transform::IDENTITY, |parent, local| parent.compose(local)),
        )
    }

    pub fn relative_rotation(&self, handle: NodeHandle) -> Option<Quat> {
        self.nodes.get(handle).map(|n| n.local.rotation)
    }

    pub fn world_rotation(&self, handle: NodeHandle) -> Option<Quat> {
        self.world_transform(handle).map(|t| t.rotation)
    }

    pub fn set_relative_rotation(&mut self, handle: NodeHandle, rotation: Quat) -> bool {
        match self.nodes.get_mut(handle) {
            Some(node) => {
                node.local.rotation = rotation.normalize();
                true
            }
            None => false,
        }
    }

    pub fn set_world_rotation(&mut self, handle: NodeHandle, rotation: Quat) -> bool {
        let Some(parent) = self.parent_world_transform(handle) else { return false };
        self.set_relative_rotation(handle, parent.inverse_rotation(rotation))
    }

    pub fn relative_location(&self, handle: NodeHandle) -> Option<Vec3> {
        self.nodes.get(handle).map(|n| n.local.location)
    }

    pub fn world_location(&self, handle: NodeHandle) -> Option<Vec3> {
        self.world_transform(handle).map(|t| t.location)
    }

    pub fn set_relative_location(&mut self, handle: NodeHandle, location: Vec3) -> bool {
        match self.nodes.get_mut(handle) {
            Some(node) => {
                node.local.location = location;
                true
            }
            None => false,
        }
    }

    pub fn set_world_location(&mut self, handle: NodeHandle, location: Vec3) -> bool {
        let Some(parent) = self.parent_world_transform(handle) else { return false };
        self.set_relative_location(handle, parent.inverse_location(location))
    }

    pub fn relative_scale(&self, handle: NodeHandle) -> Option<Vec3> {
        self.nodes.get(handle).map(|n| n.local.scale)
    }

    pub fn world_scale(&self, handle: NodeHandle) -> Option<Vec3> {
        self.world_transform(handle).map(|t| t.scale)
    }

    pub fn set_relative_scale(&mut self, handle: NodeHandle, scale: Vec3) -> bool {
        match self.nodes.get_mut(handle) {
            Some(node) => {
                node.local.scale = scale;
                true
            }
            None => false,
        }
    }

    pub fn set_world_scale(&mut self, handle: NodeHandle, scale: Vec3) -> bool {
        let Some(parent) = self.parent_world_transform(handle) else { return false };
        self.set_relative_scale(handle, parent.inverse_scale(scale))
    }

    // -- Contacts --

    /// Register interest in a node's contacts. Fails for dead nodes and nodes
    /// without a collider.
    pub fn bind_contacts(&mut self, handle: NodeHandle) -> Option<ContactBinding> {
        let node = self.nodes.get(handle)?;
        node.collision?;
        Some(self.bindings.insert(handle))
    }

    /// Drop a registration. Returns `false` if it was already gone.
    pub fn unbind_contacts(&mut self, binding: ContactBinding) -> bool {
        let removed = self.bindings.remove(binding).is_some();
        if !removed {
            log::debug!("unbind_contacts: {:?} already released", binding);
        }
        removed
    }

    pub fn is_bound(&self, binding: ContactBinding) -> bool {
        self.bindings.contains_key(binding)
    }

    /// Number of live registrations for one node.
    pub fn binding_count(&self, handle: NodeHandle) -> usize {
        self.bindings.values().filter(|bound| **bound == handle).count()
    }

    /// Queue a contact for delivery. Contacts on nodes nobody listens to are dropped.
    pub fn notify_contact(&mut self, event: ContactEvent) {
        if self.bindings.values().any(|bound| *bound == event.node) {
            self.contacts.push(event);
        }
    }

    /// Take all queued contacts.
    pub fn drain_contacts(&mut self) -> Vec<ContactEvent> {
        std::mem::take(&mut self.contacts)
    }

    /// Remove every node, binding and queued contact.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.bindings.clear();
        self.contacts.clear();
    }
}
