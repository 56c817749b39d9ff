//! `lgdt` / `lidt` for 32-bit protected mode.

use core::arch::asm;

use super::TableRegisters;
use crate::kernel::gdt::{KERNEL_CODE_SELECTOR, KERNEL_DATA_SELECTOR};
use crate::kernel::tables::TablePointer;

/// The boot processor's table registers.
pub struct Cpu {
    _private: (),
}

impl Cpu {
    /// # Safety
    /// Must run in ring 0 with interrupts disabled.
    pub const unsafe fn new() -> Self {
        Self { _private: () }
    }
}

impl TableRegisters for Cpu {
    fn load_gdt(&mut self, pointer: &TablePointer) {
        // CS can only be reloaded through a far transfer, so push the new
        // selector and return address and `retf` into the label.
        unsafe {
            asm!(
                "lgdt [{ptr}]",
                "mov ds, {data:x}",
                "mov es, {data:x}",
                "mov fs, {data:x}",
                "mov gs, {data:x}",
                "mov ss, {data:x}",
                "push {code}",
                "lea {tmp}, [2f]",
                "push {tmp}",
                "retf",
                "2:",
                ptr = in(reg) pointer as *const TablePointer,
                data = in(reg) u32::from(KERNEL_DATA_SELECTOR.0),
                code = in(reg) u32::from(KERNEL_CODE_SELECTOR.0),
                tmp = out(reg) _,
            );
        }
    }

    fn load_idt(&mut self, pointer: &TablePointer) {
        unsafe {
            asm!(
                "lidt [{}]",
                in(reg) pointer as *const TablePointer,
                options(readonly, nostack, preserves_flags)
            );
        }
    }
}
