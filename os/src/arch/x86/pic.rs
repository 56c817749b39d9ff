//! 8259 PIC (Programmable Interrupt Controller), master/slave pair.
//!
//! Power-on offsets put IRQ 0–7 on vectors 8–15, on top of the CPU
//! exceptions. [`ChainedPics::remap`] moves both chips to a caller-chosen
//! window (32–47 by default).

use super::PortIo;
use crate::kernel::error::{TableError, TableResult};
use crate::kernel::idt::EXCEPTION_VECTORS;

pub const MASTER_CMD: u16 = 0x20;
pub const MASTER_DATA: u16 = 0x21;
pub const SLAVE_CMD: u16 = 0xA0;
pub const SLAVE_DATA: u16 = 0xA1;

/// ICW1: edge triggered, cascade mode, ICW4 follows.
const ICW1_INIT: u8 = 0x11;
/// ICW4: 8086/88 mode.
const ICW4_8086: u8 = 0x01;
/// ICW3 for the master: slave sits on IR2.
const MASTER_CASCADE: u8 = 1 << CASCADE_LINE;
/// ICW3 for the slave: its cascade identity.
const SLAVE_CASCADE: u8 = 0x02;
const EOI: u8 = 0x20;

const CASCADE_LINE: u8 = 2;

/// IRQ lines handled by each chip.
pub const LINES_PER_PIC: u8 = 8;
/// IRQ lines across both chips.
pub const IRQ_LINES: usize = 16;

bitflags::bitflags! {
    /// Hardware IRQ lines, bit n = IRQ n.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct IrqLines: u16 {
        const TIMER          = 1 << 0;
        const KEYBOARD       = 1 << 1;
        const CASCADE        = 1 << 2;
        const COM2           = 1 << 3;
        const COM1           = 1 << 4;
        const LPT2           = 1 << 5;
        const FLOPPY_DISK    = 1 << 6;
        const LPT1           = 1 << 7;
        const RTC            = 1 << 8;
        const PERIPHERAL0    = 1 << 9;
        const PERIPHERAL1    = 1 << 10;
        const PERIPHERAL2    = 1 << 11;
        const PS2_MOUSE      = 1 << 12;
        const FPU            = 1 << 13;
        const PRIMARY_ATA    = 1 << 14;
        const SECONDARY_ATA  = 1 << 15;
    }
}

impl IrqLines {
    /// Lines owned by the master.
    #[inline(always)]
    pub const fn low(self) -> u8 {
        self.bits() as u8
    }

    /// Lines owned by the slave.
    #[inline(always)]
    pub const fn high(self) -> u8 {
        (self.bits() >> 8) as u8
    }
}

/// The chained pair, described by the first vector of each chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainedPics {
    master_offset: u8,
    slave_offset: u8,
}

impl ChainedPics {
    /// Vectors 32–47, right after the CPU exceptions.
    pub const DEFAULT: Self = Self {
        master_offset: 32,
        slave_offset: 40,
    };

    /// Describe the pair with its vector windows at `master_offset` and
    /// `slave_offset`.
    ///
    /// Each offset must be a multiple of 8 and at least 32, and the two
    /// windows must not overlap.
    pub fn new(master_offset: u8, slave_offset: u8) -> TableResult<Self> {
        for offset in [master_offset, slave_offset] {
            if offset % LINES_PER_PIC != 0 {
                return Err(TableError::MisalignedOffset { offset });
            }
            if usize::from(offset) < EXCEPTION_VECTORS {
                return Err(TableError::OffsetInExceptionRange { offset });
            }
        }
        // Both are aligned to 8, so the windows overlap only when equal.
        if master_offset == slave_offset {
            return Err(TableError::OverlappingOffsets {
                master: master_offset,
                slave: slave_offset,
            });
        }

        Ok(Self {
            master_offset,
            slave_offset,
        })
    }

    pub const fn master_offset(&self) -> u8 {
        self.master_offset
    }

    pub const fn slave_offset(&self) -> u8 {
        self.slave_offset
    }

    /// CPU vector raised for IRQ `line` once remapped.
    pub fn vector_for(&self, line: u8) -> TableResult<u8> {
        if line < LINES_PER_PIC {
            Ok(self.master_offset + line)
        } else if usize::from(line) < IRQ_LINES {
            Ok(self.slave_offset + (line - LINES_PER_PIC))
        } else {
            Err(TableError::InvalidIrqLine { line })
        }
    }

    fn master_handles(&self, vector: u8) -> bool {
        vector.wrapping_sub(self.master_offset) < LINES_PER_PIC
    }

    fn slave_handles(&self, vector: u8) -> bool {
        vector.wrapping_sub(self.slave_offset) < LINES_PER_PIC
    }

    /// Whether `vector` is raised by either chip.
    pub fn handles(&self, vector: u8) -> bool {
        self.master_handles(vector) || self.slave_handles(vector)
    }

    /// Run the initialization sequence on both chips.
    ///
    /// Writes ICW1 through ICW4 and then the interrupt masks, interleaving
    /// master and slave. The chips do not acknowledge anything, so every
    /// write is followed by an `io_wait`.
    pub fn remap<P: PortIo>(&self, io: &mut P, enabled: IrqLines) {
        let master_mask = !enabled.low() & !MASTER_CASCADE;
        let slave_mask = !enabled.high();

        let sequence = [
            (MASTER_CMD, ICW1_INIT),
            (SLAVE_CMD, ICW1_INIT),
            (MASTER_DATA, self.master_offset),
            (SLAVE_DATA, self.slave_offset),
            (MASTER_DATA, MASTER_CASCADE),
            (SLAVE_DATA, SLAVE_CASCADE),
            (MASTER_DATA, ICW4_8086),
            (SLAVE_DATA, ICW4_8086),
            (MASTER_DATA, master_mask),
            (SLAVE_DATA, slave_mask),
        ];

        for (port, value) in sequence {
            io.write_u8(port, value);
            io.io_wait();
        }

        log::debug!(
            "pic: remapped to {:#04x}/{:#04x}, masks {:#04x}/{:#04x}",
            self.master_offset,
            self.slave_offset,
            master_mask,
            slave_mask
        );
    }

    /// Acknowledge `vector` so the chips deliver the next interrupt.
    ///
    /// Slave interrupts arrive through the master's cascade line, so the
    /// master always gets an EOI too.
    pub fn end_of_interrupt<P: PortIo>(&self, io: &mut P, vector: u8) -> TableResult<()> {
        if self.slave_handles(vector) {
            io.write_u8(SLAVE_CMD, EOI);
            io.write_u8(MASTER_CMD, EOI);
            Ok(())
        } else if self.master_handles(vector) {
            io.write_u8(MASTER_CMD, EOI);
            Ok(())
        } else {
            Err(TableError::NotPicVector { vector })
        }
    }
}
