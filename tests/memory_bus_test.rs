//! Tests for the memory backends and memory image I/O.

use std::thread;

use sim6502::{dump, format_rows, load_listing, FlatMemory, MemoryBus, SharedMemory};

// ===== FlatMemory =====

#[test]
fn test_flat_memory_full_range() {
    let mut mem = FlatMemory::new();

    mem.write(0x0000, 0x11);
    mem.write(0xFFFF, 0x22);

    assert_eq!(mem.read(0x0000), 0x11);
    assert_eq!(mem.read(0xFFFF), 0x22);
    assert_eq!(mem.read(0x1234), 0x00);
}

#[test]
fn test_read_word_little_endian() {
    let mut mem = FlatMemory::new();
    mem.load(0x0300, &[0x34, 0x12]);

    assert_eq!(mem.read_word(0x0300), 0x1234);
}

#[test]
fn test_load_wraps_at_top() {
    let mut mem = FlatMemory::new();
    mem.load(0xFFFF, &[0xAA, 0xBB]);

    assert_eq!(mem.read(0xFFFF), 0xAA);
    assert_eq!(mem.read(0x0000), 0xBB);
}

// ===== SharedMemory =====

#[test]
fn test_shared_memory_visible_across_threads() {
    let mut mem = SharedMemory::new();
    let observer = mem.clone();

    let writer = thread::spawn(move || {
        mem.write(0x0200, 0x05);
        mem
    });
    let mem = writer.join().unwrap();

    assert_eq!(observer.read(0x0200), 0x05);
    assert_eq!(mem.snapshot(0x0200, 2), vec![0x05, 0x00]);
}

#[test]
fn test_shared_store_without_mut() {
    let mem = SharedMemory::new();
    mem.store(0x00FF, 0x61);

    assert_eq!(mem.read(0x00FF), 0x61);
}

// ===== Memory Images =====

#[test]
fn test_load_listing_multiple_rows() {
    let mut mem = FlatMemory::new();
    let lines = ["0600: a9 01 8d 00 02", "", "0700: ea"];

    let written = load_listing(&mut mem, &lines).unwrap();

    assert_eq!(written, 6);
    assert_eq!(mem.read(0x0604), 0x02);
    assert_eq!(mem.read(0x0700), 0xEA);
}

#[test]
fn test_load_listing_errors() {
    let mut mem = FlatMemory::new();

    let err = load_listing(&mut mem, &["0600 a9"]).unwrap_err();
    assert_eq!(err.line, 1);

    let err = load_listing(&mut mem, &["0600: a9", "0601: zz"]).unwrap_err();
    assert_eq!(err.line, 2);
    assert!(err.to_string().contains("line 2"));

    let err = load_listing(&mut mem, &["wxyz: 00"]).unwrap_err();
    assert_eq!(err.line, 1);
}

#[test]
fn test_format_rows_aligns_on_sixteen() {
    let rows = format_rows(0x060E, [1u8, 2, 3, 4]);
    assert_eq!(rows, vec!["060e: 01 02", "0610: 03 04"]);
}

#[test]
fn test_dump_round_trips_through_load() {
    let mut source = FlatMemory::new();
    source.load(0x0600, &(0u8..40).collect::<Vec<_>>());

    let rows = dump(&source, 0x0600, 40);
    assert_eq!(rows.len(), 3);

    let mut copy = FlatMemory::new();
    assert_eq!(load_listing(&mut copy, &rows).unwrap(), 40);
    for addr in 0x0600..0x0628u16 {
        assert_eq!(copy.read(addr), source.read(addr));
    }
}
