//! Two-slot frame buffer arena.
//!
//! One slot is visible (front), the other is being drawn. Swapping flips the
//! front index; nothing is allocated per frame.

/// Token naming the writable slot.
///
/// Not `Clone`: presenting consumes it, so the drawer cannot keep writing to
/// a buffer after handing it back.
#[derive(Debug, PartialEq, Eq)]
pub struct BackBuffer {
    slot: usize,
}

impl BackBuffer {
    pub fn slot(&self) -> usize {
        self.slot
    }
}

#[derive(Debug, Clone)]
pub struct DoubleBuffer<T> {
    slots: [T; 2],
    front: usize,
}

impl<T> DoubleBuffer<T> {
    /// `visible` starts as the front slot.
    pub fn new(visible: T, hidden: T) -> Self {
        Self {
            slots: [visible, hidden],
            front: 0,
        }
    }

    /// Token for the slot that is not on screen.
    ///
    /// Only one token may be outstanding at a time.
    pub fn back_buffer(&self) -> BackBuffer {
        BackBuffer {
            slot: 1 - self.front,
        }
    }

    pub fn get_mut(&mut self, buffer: &BackBuffer) -> &mut T {
        &mut self.slots[buffer.slot]
    }

    pub fn front(&self) -> &T {
        &self.slots[self.front]
    }

    pub fn front_index(&self) -> usize {
        self.front
    }

    /// Promote `buffer` to front and hand back the old front.
    pub fn swap(&mut self, buffer: BackBuffer) -> BackBuffer {
        debug_assert_ne!(buffer.slot, self.front, "presented the visible buffer");
        self.front = buffer.slot;
        self.back_buffer()
    }
}
