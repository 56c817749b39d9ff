//! Segment descriptor encoding
//!
//! A descriptor is kept as the raw 64-bit word the CPU reads, packed and
//! unpacked with explicit bit ranges:
//!
//! | bits  | field                    |
//! |-------|--------------------------|
//! | 0–15  | limit 0–15               |
//! | 16–39 | base 0–23                |
//! | 40–47 | access byte              |
//! | 48–51 | limit 16–19              |
//! | 52–55 | flags (G, D/B, L, AVL)   |
//! | 56–63 | base 24–31               |

use bit_field::BitField;
use x86_64::PrivilegeLevel;

bitflags::bitflags! {
    /// Access byte of a code or data segment descriptor.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct SegmentAccess: u8 {
        const ACCESSED = 1 << 0;
        /// Readable for code, writable for data.
        const READ_WRITE = 1 << 1;
        /// Conforming for code, expand-down for data.
        const DIRECTION_CONFORMING = 1 << 2;
        const EXECUTABLE = 1 << 3;
        /// Code/data segment rather than a system descriptor.
        const CODE_DATA = 1 << 4;
        const DPL_RING_3 = 0b11 << 5;
        const PRESENT = 1 << 7;
    }
}

impl SegmentAccess {
    /// 0x9A
    pub const KERNEL_CODE: Self = Self::PRESENT
        .union(Self::CODE_DATA)
        .union(Self::EXECUTABLE)
        .union(Self::READ_WRITE);
    /// 0x92
    pub const KERNEL_DATA: Self = Self::PRESENT.union(Self::CODE_DATA).union(Self::READ_WRITE);
    /// 0xFA
    pub const USER_CODE: Self = Self::KERNEL_CODE.with_dpl(PrivilegeLevel::Ring3);
    /// 0xF2
    pub const USER_DATA: Self = Self::KERNEL_DATA.with_dpl(PrivilegeLevel::Ring3);

    /// Replace the descriptor privilege level.
    pub const fn with_dpl(self, level: PrivilegeLevel) -> Self {
        Self::from_bits_retain((self.bits() & !Self::DPL_RING_3.bits()) | ((level as u8) << 5))
    }
}

bitflags::bitflags! {
    /// Upper nibble of the granularity byte. The lower nibble holds limit
    /// bits 16–19 and is never taken from here.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct SegmentFlags: u8 {
        const AVAILABLE = 1 << 4;
        const LONG_MODE = 1 << 5;
        /// 32-bit default operand size.
        const PROTECTED_32 = 1 << 6;
        /// Limit counts 4 KiB pages instead of bytes.
        const PAGE_GRANULARITY = 1 << 7;
    }
}

impl SegmentFlags {
    /// 4 KiB granularity, 32-bit segment.
    pub const FLAT_32: Self = Self::PAGE_GRANULARITY.union(Self::PROTECTED_32);
}

/// Largest value the 20-bit limit field can hold.
pub const MAX_LIMIT: u32 = 0x000F_FFFF;

/// One GDT entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(transparent)]
pub struct SegmentDescriptor(u64);

impl SegmentDescriptor {
    /// The mandatory all-zero entry 0.
    pub const NULL: Self = Self(0);

    /// Pack a descriptor. Limit bits above 19 are dropped, as are the low
    /// four bits of `flags`.
    pub fn new(base: u32, limit: u32, access: SegmentAccess, flags: SegmentFlags) -> Self {
        let mut raw = 0u64;
        raw.set_bits(0..16, u64::from(limit.get_bits(0..16)));
        raw.set_bits(16..40, u64::from(base.get_bits(0..24)));
        raw.set_bits(40..48, u64::from(access.bits()));
        raw.set_bits(48..52, u64::from(limit.get_bits(16..20)));
        raw.set_bits(52..56, u64::from(flags.bits() >> 4));
        raw.set_bits(56..64, u64::from(base.get_bits(24..32)));
        Self(raw)
    }

    pub const fn as_u64(&self) -> u64 {
        self.0
    }

    /// Hardware byte image, lowest address first.
    pub const fn to_bytes(&self) -> [u8; 8] {
        self.0.to_le_bytes()
    }

    pub fn is_null(&self) -> bool {
        self.0 == 0
    }

    pub fn base(&self) -> u32 {
        (self.0.get_bits(16..40) | (self.0.get_bits(56..64) << 24)) as u32
    }

    /// The raw 20-bit limit field.
    pub fn limit(&self) -> u32 {
        (self.0.get_bits(0..16) | (self.0.get_bits(48..52) << 16)) as u32
    }

    /// Offset of the last addressable byte, after applying granularity.
    pub fn effective_limit(&self) -> u32 {
        if self.flags().contains(SegmentFlags::PAGE_GRANULARITY) {
            (self.limit() << 12) | 0xFFF
        } else {
            self.limit()
        }
    }

    pub fn access(&self) -> SegmentAccess {
        SegmentAccess::from_bits_retain(self.0.get_bits(40..48) as u8)
    }

    pub fn flags(&self) -> SegmentFlags {
        SegmentFlags::from_bits_retain((self.0.get_bits(52..56) as u8) << 4)
    }

    /// The whole granularity byte: flags nibble and limit bits 16–19.
    pub fn granularity(&self) -> u8 {
        self.0.get_bits(48..56) as u8
    }

    pub fn present(&self) -> bool {
        self.0.get_bit(47)
    }

    pub fn dpl(&self) -> PrivilegeLevel {
        PrivilegeLevel::from_u16(self.0.get_bits(45..47) as u16)
    }
}

const _: () = assert!(core::mem::size_of::<SegmentDescriptor>() == 8);
