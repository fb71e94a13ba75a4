//! Tests for the memory-mapped 32x32 display.

use std::sync::{Arc, Mutex};

use sim6502::display::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use sim6502::{assemble, Cpu, DisplayBus, FlatMemory, Framebuffer, MemoryBus, PixelWrite, PALETTE};

/// A bus that records every pixel write it reports
fn recording_bus() -> (DisplayBus<FlatMemory>, Arc<Mutex<Vec<PixelWrite>>>) {
    let writes = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&writes);
    let bus = DisplayBus::new(FlatMemory::new())
        .with_sink(move |pixel: PixelWrite| sink.lock().unwrap().push(pixel));
    (bus, writes)
}

// ========== Pixel Mapping ==========

#[test]
fn test_framebuffer_corners() {
    assert_eq!(
        PixelWrite::from_write(0x0200, 0x01),
        Some(PixelWrite { x: 0, y: 0, color: 1 })
    );
    assert_eq!(
        PixelWrite::from_write(0x021F, 0x02),
        Some(PixelWrite { x: 31, y: 0, color: 2 })
    );
    assert_eq!(
        PixelWrite::from_write(0x05FF, 0x03),
        Some(PixelWrite { x: 31, y: 31, color: 3 })
    );
}

#[test]
fn test_outside_framebuffer() {
    assert_eq!(PixelWrite::from_write(0x01FF, 0x01), None);
    assert_eq!(PixelWrite::from_write(0x0600, 0x01), None);
}

#[test]
fn test_color_uses_low_nibble() {
    let pixel = PixelWrite::from_write(0x0200, 0xF7).unwrap();

    assert_eq!(pixel.color, 0x07);
    assert_eq!(pixel.rgb(), PALETTE[7]);
}

// ========== Notifications ==========

#[test]
fn test_single_write_notifies_once() {
    let (mut bus, writes) = recording_bus();

    bus.write(0x0205, 0x05);

    let writes = writes.lock().unwrap();
    assert_eq!(writes.len(), 1);
    assert_eq!(writes[0], PixelWrite { x: 5, y: 0, color: 5 });
    assert_eq!(bus.read(0x0205), 0x05);
}

#[test]
fn test_reads_and_other_writes_are_silent() {
    let (mut bus, writes) = recording_bus();

    bus.write(0x0010, 0x01);
    bus.write(0x0600, 0x01);
    let _ = bus.read(0x0200);

    assert!(writes.lock().unwrap().is_empty());
}

#[test]
fn test_cpu_store_reaches_display() {
    let (mut bus, writes) = recording_bus();
    let program = assemble("LDA #$01\nSTA $0200\nLDA #$05\nSTA $0221\nBRK").unwrap();
    bus.load(program.entry_point, &program.bytes);

    let mut cpu = Cpu::new(bus);
    while !cpu.is_halted() {
        cpu.step().unwrap();
    }

    assert_eq!(
        *writes.lock().unwrap(),
        vec![
            PixelWrite { x: 0, y: 0, color: 1 },
            PixelWrite { x: 1, y: 1, color: 5 },
        ]
    );
}

// ========== Framebuffer ==========

#[test]
fn test_framebuffer_tracks_writes() {
    let screen = Framebuffer::new();
    let mut bus = DisplayBus::new(FlatMemory::new()).with_sink(screen.clone());

    bus.write(0x0200 + 32 * 3 + 4, 0x0E);

    assert_eq!(screen.color_index(4, 3), 0x0E);
    assert_eq!(screen.color_index(0, 0), 0x00);
}

#[test]
fn test_framebuffer_rgba() {
    let screen = Framebuffer::new();
    let mut bus = DisplayBus::new(FlatMemory::new()).with_sink(screen.clone());
    bus.write(0x0200, 0x01);

    let rgba = screen.to_rgba();

    assert_eq!(rgba.len(), DISPLAY_WIDTH * DISPLAY_HEIGHT * 4);
    assert_eq!(&rgba[..4], &[0xFF, 0xFF, 0xFF, 0xFF]);
    assert_eq!(&rgba[4..8], &[0x00, 0x00, 0x00, 0xFF]);
}

#[test]
fn test_refresh_from_memory() {
    let mut memory = FlatMemory::new();
    memory.write(0x05FF, 0x02);

    let mut screen = Framebuffer::new();
    screen.refresh_from(&memory);

    assert_eq!(screen.color_index(31, 31), 0x02);
}

#[test]
fn test_into_inner_keeps_memory() {
    let (mut bus, _) = recording_bus();
    bus.write(0x0300, 0x0A);

    let memory = bus.into_inner();
    assert_eq!(memory.read(0x0300), 0x0A);
}
