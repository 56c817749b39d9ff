//! Raw table storage and the pointer records `lgdt`/`lidt` consume.

use core::mem::size_of;

use super::gdt::{SegmentDescriptor, GDT_ENTRIES};
use super::idt::{GateDescriptor, IDT_ENTRIES};

/// Operand of `lgdt`/`lidt` in protected mode: byte limit, then base.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(C, packed)]
pub struct TablePointer {
    limit: u16,
    base: u32,
}

const _: () = assert!(size_of::<TablePointer>() == 6);

impl TablePointer {
    /// Describe `table` in place.
    pub fn for_table<T, const N: usize>(table: &[T; N]) -> Self {
        Self {
            limit: (N * size_of::<T>() - 1) as u16,
            base: table.as_ptr() as usize as u32,
        }
    }

    pub fn limit(&self) -> u16 {
        self.limit
    }

    pub fn base(&self) -> u32 {
        self.base
    }
}

/// Both descriptor tables.
///
/// The CPU keeps using the memory after the load, so the value must stay
/// where it is for as long as the tables are installed; [`crate::kernel::init`]
/// only accepts a `'static` borrow.
#[repr(C, align(16))]
pub struct DescriptorTables {
    pub(crate) gdt: [SegmentDescriptor; GDT_ENTRIES],
    pub(crate) idt: [GateDescriptor; IDT_ENTRIES],
}

impl Default for DescriptorTables {
    fn default() -> Self {
        Self::new()
    }
}

impl DescriptorTables {
    pub const fn new() -> Self {
        Self {
            gdt: [SegmentDescriptor::NULL; GDT_ENTRIES],
            idt: [GateDescriptor::MISSING; IDT_ENTRIES],
        }
    }

    pub fn gdt(&self) -> &[SegmentDescriptor; GDT_ENTRIES] {
        &self.gdt
    }

    pub fn idt(&self) -> &[GateDescriptor; IDT_ENTRIES] {
        &self.idt
    }

    pub fn gdt_pointer(&self) -> TablePointer {
        TablePointer::for_table(&self.gdt)
    }

    pub fn idt_pointer(&self) -> TablePointer {
        TablePointer::for_table(&self.idt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_limits() {
        let tables = DescriptorTables::new();
        assert_eq!(tables.gdt_pointer().limit(), 39);
        assert_eq!(tables.idt_pointer().limit(), 2047);
    }

    #[test]
    fn pointer_bases_follow_the_arrays() {
        let tables = DescriptorTables::new();
        assert_eq!(tables.gdt_pointer().base(), tables.gdt.as_ptr() as usize as u32);
        assert_eq!(tables.idt_pointer().base(), tables.idt.as_ptr() as usize as u32);
    }

    #[test]
    fn new_tables_are_zero() {
        let tables = DescriptorTables::new();
        assert!(tables.gdt().iter().all(|entry| entry.is_null()));
        assert!(tables.idt().iter().all(|gate| gate.as_u64() == 0));
    }
}
