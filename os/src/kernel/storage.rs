//! The boot processor's descriptor tables.

use core::sync::atomic::{AtomicBool, Ordering};

use super::tables::DescriptorTables;

static mut TABLES: DescriptorTables = DescriptorTables::new();
static TAKEN: AtomicBool = AtomicBool::new(false);

/// Hand out the table storage. Only the first call gets it.
pub fn take() -> Option<&'static mut DescriptorTables> {
    if TAKEN.swap(true, Ordering::AcqRel) {
        return None;
    }
    // SAFETY: TAKEN guarantees this is the only reference ever created.
    Some(unsafe { &mut *core::ptr::addr_of_mut!(TABLES) })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_is_handed_out_once() {
        let tables = take().unwrap();
        assert!(tables.gdt().iter().all(|entry| entry.is_null()));
        assert!(take().is_none());
    }
}
