//! Boot-time configuration for descriptor-table setup.

use super::error::TableResult;
use crate::arch::x86::pic::{ChainedPics, IrqLines};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitConfig {
    pics: ChainedPics,
    enabled_irqs: IrqLines,
    user_accessible_gates: bool,
}

impl Default for InitConfig {
    fn default() -> Self {
        Self {
            pics: ChainedPics::DEFAULT,
            enabled_irqs: IrqLines::all(),
            user_accessible_gates: false,
        }
    }
}

impl InitConfig {
    /// Move the PIC vector windows. See [`ChainedPics::new`] for the rules.
    pub fn with_offsets(self, master: u8, slave: u8) -> TableResult<Self> {
        Ok(Self {
            pics: ChainedPics::new(master, slave)?,
            ..self
        })
    }

    /// IRQ lines left unmasked after the remap.
    pub fn with_enabled_irqs(self, enabled_irqs: IrqLines) -> Self {
        Self {
            enabled_irqs,
            ..self
        }
    }

    /// Let ring 3 raise the bound vectors with `int n` (gate DPL 3).
    pub fn with_user_accessible_gates(self, user_accessible_gates: bool) -> Self {
        Self {
            user_accessible_gates,
            ..self
        }
    }

    pub fn pics(&self) -> ChainedPics {
        self.pics
    }

    pub fn enabled_irqs(&self) -> IrqLines {
        self.enabled_irqs
    }

    pub fn user_accessible_gates(&self) -> bool {
        self.user_accessible_gates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::error::TableError;

    #[test]
    fn defaults_match_the_classic_layout() {
        let config = InitConfig::default();
        assert_eq!(config.pics(), ChainedPics::new(32, 40).unwrap());
        assert_eq!(config.enabled_irqs(), IrqLines::all());
        assert!(!config.user_accessible_gates());
    }

    #[test]
    fn accepts_aligned_disjoint_offsets() {
        let config = InitConfig::default().with_offsets(0x70, 0x78).unwrap();
        assert_eq!(config.pics().master_offset(), 0x70);
        assert_eq!(config.pics().slave_offset(), 0x78);
    }

    #[test]
    fn rejects_misaligned_offset() {
        assert_eq!(
            InitConfig::default().with_offsets(33, 40),
            Err(TableError::MisalignedOffset { offset: 33 })
        );
    }

    #[test]
    fn rejects_power_on_offsets() {
        assert_eq!(
            InitConfig::default().with_offsets(0x08, 0x70),
            Err(TableError::OffsetInExceptionRange { offset: 0x08 })
        );
    }

    #[test]
    fn rejects_shared_window() {
        assert_eq!(
            InitConfig::default().with_offsets(48, 48),
            Err(TableError::OverlappingOffsets { master: 48, slave: 48 })
        );
    }

    #[test]
    fn error_display_names_the_value() {
        let err = TableError::MisalignedOffset { offset: 0x21 };
        assert_eq!(
            format!("{err}"),
            "PIC vector offset is not a multiple of 8: offset 0x21"
        );
    }
}
