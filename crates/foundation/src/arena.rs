use crate::handles::Handle;

/// Append-only arena. Slots are never freed, so every handle it hands out
/// stays valid for the arena's lifetime.
#[derive(Debug, Clone)]
pub struct Arena<T> {
    items: Vec<T>,
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Arena<T> {
    pub fn new() -> Self {
        Arena { items: Vec::new() }
    }

    pub fn alloc(&mut self, v: T) -> Handle {
        self.items.push(v);
        Handle::new((self.items.len() - 1) as u32, 0)
    }

    pub fn get(&self, handle: Handle) -> Option<&T> {
        self.items.get(handle.index() as usize)
    }

    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        self.items.get_mut(handle.index() as usize)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates slots in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = (Handle, &T)> + '_ {
        self.items
            .iter()
            .enumerate()
            .map(|(idx, v)| (Handle::new(idx as u32, 0), v))
    }
}

#[cfg(test)]
mod tests {
    use super::Arena;

    #[test]
    fn alloc_returns_sequential_handles() {
        let mut arena = Arena::new();
        let a = arena.alloc("a");
        let b = arena.alloc("b");
        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
        assert_eq!(arena.get(b), Some(&"b"));
        assert_eq!(arena.len(), 2);
    }

    #[test]
    fn get_mut_updates_slot() {
        let mut arena = Arena::new();
        let h = arena.alloc(1);
        if let Some(v) = arena.get_mut(h) {
            *v = 7;
        }
        assert_eq!(arena.get(h), Some(&7));
        let all: Vec<i32> = arena.iter().map(|(_, v)| *v).collect();
        assert_eq!(all, vec![7]);
    }
}
