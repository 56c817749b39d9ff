//! Entry points of the assembly trampolines.
//!
//! The stubs themselves save CPU state and call into the dispatcher; here
//! they are only addresses to put into gates.

use super::EXCEPTION_VECTORS;
use crate::arch::x86::pic::{ChainedPics, IRQ_LINES};

/// Signature of a trampoline symbol. It is never called from Rust.
pub type EntryPoint = unsafe extern "C" fn();

/// Addresses of the 32 exception stubs and 16 IRQ stubs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StubTable {
    exceptions: [u32; EXCEPTION_VECTORS],
    irqs: [u32; IRQ_LINES],
}

impl StubTable {
    pub const fn new(exceptions: [u32; EXCEPTION_VECTORS], irqs: [u32; IRQ_LINES]) -> Self {
        Self { exceptions, irqs }
    }

    /// Take the addresses of linked trampoline symbols.
    ///
    /// Addresses are truncated to 32 bits, which is exact on the protected
    /// mode target.
    pub fn from_entry_points(
        exceptions: [EntryPoint; EXCEPTION_VECTORS],
        irqs: [EntryPoint; IRQ_LINES],
    ) -> Self {
        Self {
            exceptions: exceptions.map(|entry| entry as usize as u32),
            irqs: irqs.map(|entry| entry as usize as u32),
        }
    }

    pub fn exception(&self, vector: u8) -> Option<u32> {
        self.exceptions.get(usize::from(vector)).copied()
    }

    pub fn irq(&self, line: u8) -> Option<u32> {
        self.irqs.get(usize::from(line)).copied()
    }

    /// Every (vector, stub address) pair: exceptions on vectors 0–31, IRQ
    /// lines on the vectors `pics` raises them as.
    pub fn bindings(&self, pics: ChainedPics) -> impl Iterator<Item = (u8, u32)> + '_ {
        let exceptions = (0u8..).zip(self.exceptions.iter().copied());
        let irqs = (0u8..)
            .zip(self.irqs.iter().copied())
            .filter_map(move |(line, address)| Some((pics.vector_for(line).ok()?, address)));
        exceptions.chain(irqs)
    }
}
