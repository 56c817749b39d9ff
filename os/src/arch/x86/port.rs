//! Raw port I/O.

use super::PortIo;

/// Unused POST diagnostic port; writing to it takes roughly one microsecond.
const IO_WAIT_PORT: u16 = 0x80;

/// Write byte to port
///
/// # Safety
/// Writing to an arbitrary port can reconfigure any device on the bus.
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
#[inline(always)]
pub unsafe fn outb(port: u16, value: u8) {
    core::arch::asm!(
        "out dx, al",
        in("dx") port,
        in("al") value,
        options(nomem, nostack, preserves_flags)
    );
}

/// Read byte from port
///
/// # Safety
/// Reading some ports has side effects on the device behind them.
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
#[inline(always)]
pub unsafe fn inb(port: u16) -> u8 {
    let value: u8;
    core::arch::asm!(
        "in al, dx",
        in("dx") port,
        out("al") value,
        options(nomem, nostack, preserves_flags)
    );
    value
}

/// [`PortIo`] backed by the `out` instruction.
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
pub struct X86Ports {
    _private: (),
}

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
impl X86Ports {
    /// # Safety
    /// The caller must be allowed to perform port I/O (ring 0 or IOPL).
    pub const unsafe fn new() -> Self {
        Self { _private: () }
    }
}

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
impl PortIo for X86Ports {
    fn write_u8(&mut self, port: u16, value: u8) {
        unsafe { outb(port, value) }
    }

    fn io_wait(&mut self) {
        unsafe { outb(IO_WAIT_PORT, 0) }
    }
}
