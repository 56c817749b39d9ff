//! End-to-end initialization against recorded hardware.

use super::idt::{GateFlags, HandlerId};
use super::*;
use crate::arch::x86::pic::{MASTER_CMD, MASTER_DATA, SLAVE_CMD, SLAVE_DATA};
use crate::testing::{leak_tables, sample_stubs, HwEvent, RecordingHardware};

type InitRun = (&'static DescriptorTables, RecordingHardware, HandlerTable);

fn run_init(config: &InitConfig) -> InitRun {
    let mut hw = RecordingHardware::default();
    let mut handlers = HandlerTable::new();
    handlers.register(3, HandlerId(1));
    handlers.register(33, HandlerId(2));

    let tables = init(leak_tables(), &mut hw, &sample_stubs(), &mut handlers, config);
    (tables, hw, handlers)
}

#[test]
fn loads_gdt_then_idt_exactly_once() {
    let (tables, hw, _) = run_init(&InitConfig::default());

    assert_eq!(
        hw.table_loads(),
        vec![
            HwEvent::LoadGdt(tables.gdt_pointer()),
            HwEvent::LoadIdt(tables.idt_pointer()),
        ]
    );
}

#[test]
fn pic_is_remapped_between_the_two_loads() {
    let (_, hw, _) = run_init(&InitConfig::default());

    assert!(matches!(hw.events.first(), Some(HwEvent::LoadGdt(_))));
    assert!(matches!(hw.events.last(), Some(HwEvent::LoadIdt(_))));

    let middle = &hw.events[1..hw.events.len() - 1];
    assert_eq!(middle.len(), 20);
    for pair in middle.chunks(2) {
        assert!(
            matches!(
                pair,
                [
                    HwEvent::PortWrite {
                        port: MASTER_CMD | MASTER_DATA | SLAVE_CMD | SLAVE_DATA,
                        ..
                    },
                    HwEvent::IoWait,
                ]
            ),
            "{pair:?}"
        );
    }
    assert_eq!(hw.port_writes()[2..4], [(MASTER_DATA, 0x20), (SLAVE_DATA, 0x28)]);
}

#[test]
fn loaded_pointers_have_hardware_limits() {
    let (_, hw, _) = run_init(&InitConfig::default());

    match hw.table_loads()[..] {
        [HwEvent::LoadGdt(gdt), HwEvent::LoadIdt(idt)] => {
            assert_eq!(gdt.limit(), 39);
            assert_eq!(idt.limit(), 2047);
        }
        ref other => panic!("unexpected loads: {other:?}"),
    }
}

#[test]
fn handler_table_is_cleared() {
    let (_, _, handlers) = run_init(&InitConfig::default());
    assert!(handlers.is_clear());
}

#[test]
fn installed_tables_are_complete() {
    let (tables, _, _) = run_init(&InitConfig::default());

    assert!(tables.gdt()[0].is_null());
    assert!(tables.gdt()[1..].iter().all(|entry| entry.present()));

    let present: Vec<usize> = (0..idt::IDT_ENTRIES)
        .filter(|&vector| tables.idt()[vector].present())
        .collect();
    assert_eq!(present, (0..48).collect::<Vec<_>>());
    assert_eq!(tables.idt()[0x20].flags(), GateFlags::KERNEL_INTERRUPT);
}

#[test]
fn stages_can_be_driven_one_at_a_time() {
    let mut hw = RecordingHardware::default();
    let stage = Init::new(leak_tables()).load_gdt(&mut hw);
    assert_eq!(hw.table_loads().len(), 1);
    assert!(stage.tables().gdt()[1].present());
    assert!(stage.tables().idt().iter().all(|gate| !gate.present()));

    let stage = stage.load_idt(&mut hw, &sample_stubs(), &InitConfig::default());
    assert_eq!(hw.table_loads().len(), 2);

    let mut handlers = HandlerTable::new();
    handlers.register(200, HandlerId(9));
    stage.clear_handlers(&mut handlers);
    assert!(handlers.is_clear());
}

#[test]
fn custom_config_reaches_hardware() {
    let config = InitConfig::default()
        .with_offsets(0x50, 0x58)
        .unwrap()
        .with_enabled_irqs(crate::arch::x86::pic::IrqLines::TIMER)
        .with_user_accessible_gates(true);
    let (tables, hw, _) = run_init(&config);

    let writes = hw.port_writes();
    assert_eq!(writes[2], (MASTER_DATA, 0x50));
    assert_eq!(writes[3], (SLAVE_DATA, 0x58));
    assert_eq!(writes[8], (MASTER_DATA, 0xFA));
    assert_eq!(writes[9], (SLAVE_DATA, 0xFF));

    assert!(tables.idt()[0x50].present());
    assert!(!tables.idt()[0x20].present());
    assert_eq!(tables.idt()[0].flags(), GateFlags::USER_INTERRUPT);
}
