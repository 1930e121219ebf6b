use std::collections::HashMap;
use std::rc::Rc;

use foundation::ids::{Id, IdGen};

use crate::node::NodeId;

/// Pointer transitions the map reacts to. Neither bubbles.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PointerEvent {
    Enter,
    Leave,
}

impl PointerEvent {
    /// DOM event type name.
    pub fn as_str(&self) -> &'static str {
        match self {
            PointerEvent::Enter => "mouseenter",
            PointerEvent::Leave => "mouseleave",
        }
    }
}

/// Listener callback. It receives the document it was registered on, so it
/// can read and write attributes of any node.
pub type Handler<D> = Rc<dyn Fn(&mut D)>;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ListenerId(pub Id);

struct Registered<D> {
    id: ListenerId,
    event: PointerEvent,
    handler: Handler<D>,
}

/// Per-node listener lists, in registration order.
pub struct ListenerRegistry<D> {
    ids: IdGen,
    by_node: HashMap<NodeId, Vec<Registered<D>>>,
}

impl<D> Default for ListenerRegistry<D> {
    fn default() -> Self {
        Self {
            ids: IdGen::new(),
            by_node: HashMap::new(),
        }
    }
}

impl<D> std::fmt::Debug for ListenerRegistry<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let total: usize = self.by_node.values().map(Vec::len).sum();
        f.debug_struct("ListenerRegistry")
            .field("nodes", &self.by_node.len())
            .field("listeners", &total)
            .finish()
    }
}

impl<D> ListenerRegistry<D> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, node: NodeId, event: PointerEvent, handler: Handler<D>) -> ListenerId {
        let id = ListenerId(self.ids.next_id());
        self.by_node.entry(node).or_default().push(Registered {
            id,
            event,
            handler,
        });
        id
    }

    /// Returns `true` if a listener was removed.
    pub fn remove(&mut self, node: NodeId, event: PointerEvent, id: ListenerId) -> bool {
        let Some(list) = self.by_node.get_mut(&node) else {
            return false;
        };
        let before = list.len();
        list.retain(|r| !(r.id == id && r.event == event));
        let removed = list.len() != before;
        if list.is_empty() {
            self.by_node.remove(&node);
        }
        removed
    }

    pub fn count(&self, node: NodeId, event: PointerEvent) -> usize {
        self.by_node
            .get(&node)
            .map(|list| list.iter().filter(|r| r.event == event).count())
            .unwrap_or(0)
    }

    /// Snapshot of the handlers for `event` on `node`, so dispatch can hand
    /// out `&mut D` while the registry itself is part of `D`.
    pub fn matching(&self, node: NodeId, event: PointerEvent) -> Vec<Handler<D>> {
        self.by_node
            .get(&node)
            .map(|list| {
                list.iter()
                    .filter(|r| r.event == event)
                    .map(|r| Rc::clone(&r.handler))
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use foundation::handles::Handle;

    use super::{Handler, ListenerRegistry, PointerEvent};
    use crate::node::NodeId;

    fn n(idx: u32) -> NodeId {
        NodeId(Handle::new(idx, 0))
    }

    #[test]
    fn add_and_remove_by_id() {
        let mut reg: ListenerRegistry<()> = ListenerRegistry::new();
        let h: Handler<()> = Rc::new(|_: &mut ()| {});
        let a = reg.add(n(1), PointerEvent::Enter, Rc::clone(&h));
        let b = reg.add(n(1), PointerEvent::Leave, h);
        assert_eq!(reg.count(n(1), PointerEvent::Enter), 1);
        assert_eq!(reg.count(n(1), PointerEvent::Leave), 1);

        // Wrong event kind: nothing removed.
        assert!(!reg.remove(n(1), PointerEvent::Leave, a));
        assert!(reg.remove(n(1), PointerEvent::Enter, a));
        assert!(reg.remove(n(1), PointerEvent::Leave, b));
        assert_eq!(reg.count(n(1), PointerEvent::Leave), 0);
    }

    #[test]
    fn matching_preserves_registration_order() {
        let mut reg: ListenerRegistry<Vec<u8>> = ListenerRegistry::new();
        reg.add(n(0), PointerEvent::Enter, Rc::new(|v: &mut Vec<u8>| v.push(1)));
        reg.add(n(0), PointerEvent::Enter, Rc::new(|v: &mut Vec<u8>| v.push(2)));
        let mut out = Vec::new();
        for h in reg.matching(n(0), PointerEvent::Enter) {
            h(&mut out);
        }
        assert_eq!(out, vec![1, 2]);
        assert!(reg.matching(n(0), PointerEvent::Leave).is_empty());
    }

    #[test]
    fn handler_snapshot_outlives_removal() {
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        let mut reg: ListenerRegistry<()> = ListenerRegistry::new();
        let id = reg.add(
            n(3),
            PointerEvent::Enter,
            Rc::new(move |_: &mut ()| counter.set(counter.get() + 1)),
        );
        let snapshot = reg.matching(n(3), PointerEvent::Enter);
        reg.remove(n(3), PointerEvent::Enter, id);
        for h in snapshot {
            h(&mut ());
        }
        assert_eq!(hits.get(), 1);
    }
}
