use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::sync::atomic::{AtomicU64, Ordering};

//a slot holding one value and the epoch it was written at
struct Slot<T>{
    data: T,
    epoch: u64,
}

//bounded buffer with per-slot epochs
//freshness bias: pushing into a full buffer discards the oldest slot
pub struct RingBuffer<T>{
    slots: Mutex<VecDeque<Slot<T>>>,
    write_epoch: AtomicU64,
    capacity: usize,
}

impl<T> RingBuffer<T>{
    pub fn new(capacity: usize) -> Self{
        assert!(capacity > 0, "ring buffer capacity must be greater than 0");

        RingBuffer{
            slots: Mutex::new(VecDeque::with_capacity(capacity)),
            write_epoch: AtomicU64::new(0),
            capacity,
        }
    }

    //a panicked writer cannot leave a slot half written, so poison is ignored
    fn slots(&self) -> MutexGuard<'_, VecDeque<Slot<T>>>{
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }

    //push item, returns the epoch assigned to it
    pub fn push(&self, item: T) -> u64{
        let mut slots = self.slots();

        if slots.len() == self.capacity{
            slots.pop_front();
        }

        let epoch = self.write_epoch.fetch_add(1, Ordering::AcqRel) + 1;
        slots.push_back(Slot{ data: item, epoch });
        epoch
    }

    //pop the oldest item with its epoch
    pub fn pop(&self) -> Option<(T, u64)>{
        self.slots().pop_front().map(|slot| (slot.data, slot.epoch))
    }
}
