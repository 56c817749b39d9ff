//! Interrupt gate encoding
//!
//! | bits  | field            |
//! |-------|------------------|
//! | 0–15  | offset 0–15      |
//! | 16–31 | segment selector |
//! | 32–39 | zero             |
//! | 40–47 | flags            |
//! | 48–63 | offset 16–31     |

use bit_field::BitField;
use x86_64::structures::gdt::SegmentSelector;
use x86_64::PrivilegeLevel;

bitflags::bitflags! {
    /// Type and attribute byte of a gate.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct GateFlags: u8 {
        /// 32-bit interrupt gate: IF is cleared on entry.
        const INTERRUPT_32 = 0x0E;
        const DPL_RING_3 = 0b11 << 5;
        const PRESENT = 1 << 7;
    }
}

impl GateFlags {
    /// 0x8E
    pub const KERNEL_INTERRUPT: Self = Self::PRESENT.union(Self::INTERRUPT_32);
    /// 0xEE, reachable from ring 3 through `int n`.
    pub const USER_INTERRUPT: Self = Self::KERNEL_INTERRUPT.union(Self::DPL_RING_3);
}

/// One IDT entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(transparent)]
pub struct GateDescriptor(u64);

impl GateDescriptor {
    /// Not-present entry; the CPU raises #NP through it.
    pub const MISSING: Self = Self(0);

    pub fn new(offset: u32, selector: SegmentSelector, flags: GateFlags) -> Self {
        let mut raw = 0u64;
        raw.set_bits(0..16, u64::from(offset.get_bits(0..16)));
        raw.set_bits(16..32, u64::from(selector.0));
        raw.set_bits(32..40, 0);
        raw.set_bits(40..48, u64::from(flags.bits()));
        raw.set_bits(48..64, u64::from(offset.get_bits(16..32)));
        Self(raw)
    }

    pub const fn as_u64(&self) -> u64 {
        self.0
    }

    pub const fn to_bytes(&self) -> [u8; 8] {
        self.0.to_le_bytes()
    }

    pub fn offset(&self) -> u32 {
        (self.0.get_bits(0..16) | (self.0.get_bits(48..64) << 16)) as u32
    }

    pub fn selector(&self) -> SegmentSelector {
        SegmentSelector(self.0.get_bits(16..32) as u16)
    }

    /// The byte the CPU requires to be zero.
    pub fn reserved(&self) -> u8 {
        self.0.get_bits(32..40) as u8
    }

    pub fn flags(&self) -> GateFlags {
        GateFlags::from_bits_retain(self.0.get_bits(40..48) as u8)
    }

    pub fn present(&self) -> bool {
        self.0.get_bit(47)
    }

    pub fn dpl(&self) -> PrivilegeLevel {
        PrivilegeLevel::from_u16(self.0.get_bits(45..47) as u16)
    }
}

const _: () = assert!(core::mem::size_of::<GateDescriptor>() == 8);
