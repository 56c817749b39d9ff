//! x86 hardware seams.
//!
//! Everything that touches the machine goes through [`PortIo`] or
//! [`TableRegisters`]. The real implementations live in [`port`] and [`cpu`];
//! tests substitute a recorder.

#[cfg(target_arch = "x86")]
pub mod cpu;
pub mod pic;
pub mod port;

use crate::kernel::tables::TablePointer;

/// Single-byte writes to the I/O port space.
pub trait PortIo {
    /// Write `value` to `port`. The write has completed when this returns.
    fn write_u8(&mut self, port: u16, value: u8);

    /// Give a slow device time to settle between two writes.
    fn io_wait(&mut self) {}
}

/// The CPU's descriptor-table registers (GDTR and IDTR).
pub trait TableRegisters {
    /// Load GDTR from `pointer` and reload the segment registers.
    fn load_gdt(&mut self, pointer: &TablePointer);

    /// Load IDTR from `pointer`.
    fn load_idt(&mut self, pointer: &TablePointer);
}

/// Ports and table registers of the running machine.
#[cfg(target_arch = "x86")]
pub struct X86Platform {
    ports: port::X86Ports,
    cpu: cpu::Cpu,
}

#[cfg(target_arch = "x86")]
impl X86Platform {
    /// # Safety
    /// Must run in ring 0 with interrupts disabled, and only one instance
    /// may exist at a time.
    pub const unsafe fn new() -> Self {
        Self {
            ports: port::X86Ports::new(),
            cpu: cpu::Cpu::new(),
        }
    }
}

#[cfg(target_arch = "x86")]
impl PortIo for X86Platform {
    fn write_u8(&mut self, port: u16, value: u8) {
        self.ports.write_u8(port, value);
    }

    fn io_wait(&mut self) {
        self.ports.io_wait();
    }
}

#[cfg(target_arch = "x86")]
impl TableRegisters for X86Platform {
    fn load_gdt(&mut self, pointer: &TablePointer) {
        self.cpu.load_gdt(pointer);
    }

    fn load_idt(&mut self, pointer: &TablePointer) {
        self.cpu.load_idt(pointer);
    }
}
