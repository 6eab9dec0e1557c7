use alloc::vec::Vec;

use super::handle::Handle;

// Vacant slots chain into an intrusive free-list threaded through the slots
// themselves, so freeing and reallocating a node never reallocates.
enum Slot<T> {
    Occupied(T),
    Vacant(Option<Handle>),
}

pub(crate) struct Arena<T> {
    slots: Vec<Slot<T>>,
    free_head: Option<Handle>,
    len: usize,
}

impl<T> Arena<T> {
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_head: None,
            len: 0,
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_head: None,
            len: 0,
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) fn alloc(&mut self, element: T) -> Handle {
        self.len += 1;
        if let Some(handle) = self.free_head {
            // Reuse the most recently freed slot/handle.
            match self.slots[handle.to_index()] {
                Slot::Vacant(next) => self.free_head = next,
                Slot::Occupied(_) => unreachable!("`Arena::alloc()` - free-list reached an occupied slot!"),
            }
            self.slots[handle.to_index()] = Slot::Occupied(element);
            handle
        } else {
            // Use strict less-than to ensure the total slot count stays
            // addressable: slots.len() < Handle::MAX before the push means at
            // most Handle::MAX slots after it.
            assert!(
                self.slots.len() < Handle::MAX,
                "`Arena::alloc()` - arena is at maximum capacity ({})",
                Handle::MAX
            );
            self.slots.push(Slot::Occupied(element));
            Handle::from_index(self.slots.len() - 1)
        }
    }

    #[inline]
    pub(crate) fn get(&self, handle: Handle) -> &T {
        match &self.slots[handle.to_index()] {
            Slot::Occupied(element) => element,
            Slot::Vacant(_) => panic!("`Arena::get()` - `handle` is invalid!"),
        }
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, handle: Handle) -> &mut T {
        match &mut self.slots[handle.to_index()] {
            Slot::Occupied(element) => element,
            Slot::Vacant(_) => panic!("`Arena::get_mut()` - `handle` is invalid!"),
        }
    }

    pub(crate) fn take(&mut self, handle: Handle) -> T {
        assert!(
            matches!(self.slots[handle.to_index()], Slot::Occupied(_)),
            "`Arena::take()` - `handle` is invalid!"
        );
        let slot = core::mem::replace(&mut self.slots[handle.to_index()], Slot::Vacant(self.free_head));
        self.free_head = Some(handle);
        self.len -= 1;
        match slot {
            Slot::Occupied(element) => element,
            Slot::Vacant(_) => unreachable!(),
        }
    }

    pub(crate) fn free(&mut self, handle: Handle) {
        drop(self.take(handle));
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free_head = None;
        self.len = 0;
    }

    /// Rebuilds the arena slot-for-slot through `convert`.
    ///
    /// Every handle into `self` is valid for the result and addresses the
    /// converted element; vacant slots and the free-list carry over
    /// unchanged.
    pub(crate) fn map_ref<U>(&self, convert: &mut impl FnMut(&T) -> U) -> Arena<U> {
        let mut slots = Vec::with_capacity(self.slots.len());
        for slot in &self.slots {
            slots.push(match slot {
                Slot::Occupied(element) => Slot::Occupied(convert(element)),
                Slot::Vacant(next) => Slot::Vacant(*next),
            });
        }

        Arena {
            slots,
            free_head: self.free_head,
            len: self.len,
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn arena_capacity() {
        let arena: Arena<u32> = Arena::with_capacity(10);
        assert_eq!(arena.capacity(), 10);
    }

    #[test]
    fn freed_slots_are_reused() {
        let mut arena: Arena<u32> = Arena::new();
        let first = arena.alloc(1);
        let second = arena.alloc(2);
        arena.free(first);
        arena.free(second);
        // Last freed, first reused.
        assert_eq!(arena.alloc(3), second);
        assert_eq!(arena.alloc(4), first);
        assert_eq!(arena.len(), 2);
    }

    #[test]
    fn map_ref_preserves_handles() {
        let mut arena: Arena<u32> = Arena::new();
        let first = arena.alloc(1);
        let second = arena.alloc(2);
        let third = arena.alloc(3);
        arena.free(second);

        let mut mapped: Arena<u64> = arena.map_ref(&mut |&v| u64::from(v) * 10);
        assert_eq!(mapped.len(), arena.len());
        assert_eq!(*mapped.get(first), 10);
        assert_eq!(*mapped.get(third), 30);
        // The vacant slot still heads the mapped arena's free-list.
        assert_eq!(mapped.alloc(0), second);
    }

    proptest! {
        #[test]
        fn arena_behaves_like_vec(operations in prop::collection::vec(strategy(), 0..256)) {
            let mut model: Vec<(Handle, u32)> = Vec::new();
            let mut arena: Arena<u32> = Arena::new();

            for operation in operations {
                match operation {
                    Operation::Alloc(value) => {
                        let handle = arena.alloc(value);
                        model.push((handle, value));
                    }
                    Operation::Get(which) => {
                        if model.is_empty() {
                            continue;
                        }

                        let index = which % model.len();
                        let handle = model[index].0;
                        prop_assert_eq!(*arena.get(handle), model[index].1);
                    }
                    Operation::GetMut(which, value) => {
                        if model.is_empty() {
                            continue;
                        }

                        let index = which % model.len();
                        let handle = model[index].0;
                        *arena.get_mut(handle) = value;
                        model[index].1 = value;
                    }
                    Operation::Take(which) => {
                        if model.is_empty() {
                            continue;
                        }

                        let index = which % model.len();
                        let handle = model[index].0;
                        let value1 = arena.take(handle);
                        let (_, value2) = model.swap_remove(index);
                        prop_assert_eq!(value1, value2);
                    }
                    Operation::Free(which) => {
                        if model.is_empty() {
                            continue;
                        }

                        let index = which % model.len();
                        let handle = model[index].0;
                        arena.free(handle);
                        model.swap_remove(index);
                    }
                    Operation::Clear => {
                        arena.clear();
                        model.clear();
                    }
                }

                prop_assert_eq!(arena.len(), model.len());
                prop_assert_eq!(arena.is_empty(), model.is_empty());

                for &(handle, value) in &model {
                    prop_assert_eq!(*arena.get(handle), value);
                }
            }
        }
    }

    #[derive(Clone, Debug)]
    enum Operation {
        Alloc(u32),
        Get(usize),
        GetMut(usize, u32),
        Take(usize),
        Free(usize),
        Clear,
    }

    fn strategy() -> impl Strategy<Value = Operation> {
        prop_oneof![
            20 => any::<u32>().prop_map(Operation::Alloc),
            5 => any::<usize>().prop_map(Operation::Get),
            5 => (any::<usize>(), any::<u32>()).prop_map(|(which, value)| Operation::GetMut(which, value)),
            5 => any::<usize>().prop_map(Operation::Take),
            5 => any::<usize>().prop_map(Operation::Free),
            1 => Just(Operation::Clear),
        ]
    }
}
