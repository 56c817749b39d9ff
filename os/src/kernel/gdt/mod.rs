//! Global Descriptor Table (GDT)
//!
//! Flat memory model: every non-null segment covers the whole 4 GiB address
//! space and the entries differ only in type and privilege level.
//!
//! | index | selector | segment     |
//! |-------|----------|-------------|
//! | 0     | 0x00     | null        |
//! | 1     | 0x08     | kernel code |
//! | 2     | 0x10     | kernel data |
//! | 3     | 0x1B     | user code   |
//! | 4     | 0x23     | user data   |

pub mod descriptor;

pub use descriptor::{SegmentAccess, SegmentDescriptor, SegmentFlags};

use x86_64::structures::gdt::SegmentSelector;
use x86_64::PrivilegeLevel;

pub const GDT_ENTRIES: usize = 5;

/// GDT slots, in table order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum SegmentIndex {
    Null = 0,
    KernelCode = 1,
    KernelData = 2,
    UserCode = 3,
    UserData = 4,
}

impl SegmentIndex {
    pub const ALL: [Self; GDT_ENTRIES] = [
        Self::Null,
        Self::KernelCode,
        Self::KernelData,
        Self::UserCode,
        Self::UserData,
    ];

    /// Selector for this slot with the given requested privilege level.
    pub const fn selector(self, rpl: PrivilegeLevel) -> SegmentSelector {
        SegmentSelector::new(self as u16, rpl)
    }
}

pub const KERNEL_CODE_SELECTOR: SegmentSelector =
    SegmentIndex::KernelCode.selector(PrivilegeLevel::Ring0);
pub const KERNEL_DATA_SELECTOR: SegmentSelector =
    SegmentIndex::KernelData.selector(PrivilegeLevel::Ring0);
pub const USER_CODE_SELECTOR: SegmentSelector =
    SegmentIndex::UserCode.selector(PrivilegeLevel::Ring3);
pub const USER_DATA_SELECTOR: SegmentSelector =
    SegmentIndex::UserData.selector(PrivilegeLevel::Ring3);

/// Entry layout of the flat model: (slot, base, limit, access, flags).
const FLAT_MODEL: [(SegmentIndex, u32, u32, SegmentAccess, SegmentFlags); GDT_ENTRIES] = [
    (SegmentIndex::Null, 0, 0, SegmentAccess::empty(), SegmentFlags::empty()),
    (SegmentIndex::KernelCode, 0, 0xFFFF_FFFF, SegmentAccess::KERNEL_CODE, SegmentFlags::FLAT_32),
    (SegmentIndex::KernelData, 0, 0xFFFF_FFFF, SegmentAccess::KERNEL_DATA, SegmentFlags::FLAT_32),
    (SegmentIndex::UserCode, 0, 0xFFFF_FFFF, SegmentAccess::USER_CODE, SegmentFlags::FLAT_32),
    (SegmentIndex::UserData, 0, 0xFFFF_FFFF, SegmentAccess::USER_DATA, SegmentFlags::FLAT_32),
];

/// Write one descriptor.
pub fn set_segment(
    gdt: &mut [SegmentDescriptor; GDT_ENTRIES],
    index: SegmentIndex,
    base: u32,
    limit: u32,
    access: SegmentAccess,
    flags: SegmentFlags,
) {
    gdt[index as usize] = SegmentDescriptor::new(base, limit, access, flags);
}

/// Fill all five slots with the flat model.
pub fn build(gdt: &mut [SegmentDescriptor; GDT_ENTRIES]) {
    for (index, base, limit, access, flags) in FLAT_MODEL {
        set_segment(gdt, index, base, limit, access, flags);
    }
}
