//! Checks that a table gives back every byte it allocated.
//!
//! Lives in its own test binary because it swaps the global allocator.

use std::{
    alloc::{GlobalAlloc, Layout, System},
    cell::Cell,
};

use probetable::{HashTable, Options};

struct Counting;

thread_local! {
    static LIVE: Cell<isize> = const { Cell::new(0) };
}

fn track(delta: isize) {
    let _ = LIVE.try_with(|live| live.set(live.get() + delta));
}

fn live_bytes() -> isize {
    LIVE.with(Cell::get)
}

unsafe impl GlobalAlloc for Counting {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let ptr = unsafe { System.alloc(layout) };
        if !ptr.is_null() {
            track(layout.size() as isize);
        }
        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        unsafe { System.dealloc(ptr, layout) };
        track(-(layout.size() as isize));
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        let new = unsafe { System.realloc(ptr, layout, new_size) };
        if !new.is_null() {
            track(new_size as isize - layout.size() as isize);
        }
        new
    }
}

#[global_allocator]
static GLOBAL: Counting = Counting;

#[test]
fn create_destroy_releases_everything() {
    for shift in 0..=12 {
        let before = live_bytes();
        let t = HashTable::new(1 << shift).unwrap();
        assert!(live_bytes() > before);
        t.destroy();
        assert_eq!(live_bytes(), before, "capacity {}", 1 << shift);
    }
}

#[test]
fn entries_are_released_with_the_table() {
    let before = live_bytes();
    let mut t = HashTable::with_options(4, Options::corrected()).unwrap();
    for i in 0..64 {
        t.insert(&format!("key-{i}"), &[i as u8; 32]).unwrap();
    }
    for i in (0..64).step_by(2) {
        drop(t.remove(&format!("key-{i}")));
    }
    t.insert("key-1", b"replaced").unwrap();
    drop(t);
    assert_eq!(live_bytes(), before);
}
