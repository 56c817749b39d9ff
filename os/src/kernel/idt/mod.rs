//! Interrupt Descriptor Table (IDT)
//!
//! Vectors 0–31 are the CPU exceptions, the PIC window (32–47 by default)
//! carries hardware IRQs, everything else stays not-present until some
//! later subsystem claims it.

pub mod gate;
pub mod handlers;
pub mod stubs;

pub use gate::{GateDescriptor, GateFlags};
pub use handlers::{HandlerId, HandlerSlot, HandlerTable};
pub use stubs::StubTable;

use x86_64::structures::gdt::SegmentSelector;

use super::config::InitConfig;
use super::gdt::KERNEL_CODE_SELECTOR;

pub const IDT_ENTRIES: usize = 256;

/// Vectors reserved by the architecture for exceptions.
pub const EXCEPTION_VECTORS: usize = 32;

const EXCEPTION_NAMES: [&str; EXCEPTION_VECTORS] = [
    "divide error",
    "debug",
    "non-maskable interrupt",
    "breakpoint",
    "overflow",
    "bound range exceeded",
    "invalid opcode",
    "device not available",
    "double fault",
    "coprocessor segment overrun",
    "invalid TSS",
    "segment not present",
    "stack-segment fault",
    "general protection fault",
    "page fault",
    "reserved",
    "x87 floating-point exception",
    "alignment check",
    "machine check",
    "SIMD floating-point exception",
    "virtualization exception",
    "control protection exception",
    "reserved",
    "reserved",
    "reserved",
    "reserved",
    "reserved",
    "reserved",
    "hypervisor injection exception",
    "VMM communication exception",
    "security exception",
    "reserved",
];

/// Architectural name of an exception vector.
pub fn exception_name(vector: u8) -> Option<&'static str> {
    EXCEPTION_NAMES.get(usize::from(vector)).copied()
}

/// Mark every vector not-present.
pub fn clear(idt: &mut [GateDescriptor; IDT_ENTRIES]) {
    idt.fill(GateDescriptor::MISSING);
}

/// Write one gate.
pub fn set_gate(
    idt: &mut [GateDescriptor; IDT_ENTRIES],
    vector: u8,
    offset: u32,
    selector: SegmentSelector,
    flags: GateFlags,
) {
    idt[usize::from(vector)] = GateDescriptor::new(offset, selector, flags);
}

/// Point the exception vectors and the PIC window at their stubs.
pub fn bind(idt: &mut [GateDescriptor; IDT_ENTRIES], stubs: &StubTable, config: &InitConfig) {
    let flags = if config.user_accessible_gates() {
        GateFlags::USER_INTERRUPT
    } else {
        GateFlags::KERNEL_INTERRUPT
    };

    for (vector, address) in stubs.bindings(config.pics()) {
        match exception_name(vector) {
            Some(name) => log::trace!("idt: vector {vector} ({name}) -> {address:#010x}"),
            None => log::trace!("idt: vector {vector} (irq) -> {address:#010x}"),
        }
        set_gate(idt, vector, address, KERNEL_CODE_SELECTOR, flags);
    }
}
