use std::{io, panic};

use bitweave::{Error, Policy, Writer};

#[test]
fn write_typed_values() {
    let mut buf = [0; 8];
    let mut writer = Writer::from_buffer(&mut buf);

    for i in 0..8 {
        writer.write_bool((i + 1) % 4 == 0);
    }
    writer.write_u8(0x1F, 8);
    writer.write_u8(0x1, 4);
    writer.write_u16(0xF, 4);
    writer.write_u32(0x1F, 3);
    writer.flush(true);
    assert_eq!(writer.index(), 4);

    writer.write_u64(0x11223344, 32);
    assert_eq!(writer.index(), 8);
    assert!(writer.error().is_none());

    drop(writer);
    assert_eq!(buf, [0x11, 0x1F, 0x1F, 0xFF, 0x11, 0x22, 0x33, 0x44]);
}

#[test]
fn overflow_emits_nothing() {
    let mut writer = Writer::new(Vec::new());

    writer.write_u8(0xFF, 9);
    assert!(writer.error().is_some_and(Error::is_overflow));
    assert!(writer.is_aligned());

    writer.write_i32(-1, 33);
    writer.flush(true);
    assert_eq!(writer.index(), 0);
    assert!(writer.into_inner().is_empty());
}

#[test]
fn write_signed_values() {
    let mut writer = Writer::new(Vec::new());

    writer.write_i8(-1, 3);
    writer.write_i8(1, 3);
    writer.write_i16(-1, 2);
    writer.write_i32(i32::MIN, 32);
    writer.write_i64(0x7F, 8);
    assert!(writer.error().is_none());

    assert_eq!(writer.into_inner(), [0b1110_0111, 0x80, 0, 0, 0, 0x7F]);
}

#[test]
#[should_panic(expected = "cannot fit 9 bits into a 8-bit integer")]
fn abort_policy_panics_on_overflow() {
    let mut writer = Writer::new(Vec::new()).must();
    writer.write_u8(1, 9);
}

#[test]
fn abort_policy_stops_chain() {
    let mut buf = [0; 1];
    let mut reached = 0;

    let res = panic::catch_unwind(panic::AssertUnwindSafe(|| {
        let mut writer = Writer::from_buffer(&mut buf);
        writer.write_u8(0xAB, 8);
        reached += 1;
        writer.write_bool(true);
        writer.flush(false);
        reached += 1;
    }));

    assert!(res.is_err());
    assert_eq!(reached, 1);
    assert_eq!(buf, [0xAB]);
}

#[test]
fn checked_policy_keeps_most_recent_error() {
    let mut buf = [0; 2];
    let mut writer = Writer::from_buffer(&mut buf).check();

    writer.write_u16(0, 17);
    assert!(writer.error().is_some_and(Error::is_overflow));

    writer.write_u16(0xBEEF, 16);
    assert!(writer.error().is_some_and(Error::is_overflow));

    writer.write_u8(0x12, 8);
    writer.write_bool(true);
    assert!(writer.error().is_some_and(Error::is_exhausted));
    assert_eq!(writer.index(), 2);

    drop(writer);
    assert_eq!(buf, [0xBE, 0xEF]);
}

#[test]
fn strict_capacity() {
    let mut buf = [0; 4];
    let mut writer = Writer::from_buffer(&mut buf).check();

    assert_eq!(writer.write(&[1, 2, 3, 4]), 4);
    assert!(writer.error().is_none());

    assert_eq!(writer.write(&[5]), 0);
    assert!(writer.error().is_some_and(Error::is_exhausted));
    assert_eq!(writer.index(), 4);
}

#[test]
fn default_policies() {
    assert_eq!(Writer::new(Vec::<u8>::new()).policy(), Policy::Checked);

    let mut buf = [0; 1];
    assert_eq!(Writer::from_buffer(&mut buf).policy(), Policy::Abort);
}

#[test]
fn resume_across_passes() {
    let mut writer = Writer::new(Vec::new());
    writer.write_u8(0b101, 3);
    writer.flush(false);
    let first = writer.reset(Vec::new());
    assert_eq!(first, [0b1010_0000]);

    writer.resume(first[0], 5);
    writer.write_u8(0b11, 2);
    writer.write_u8(0b001, 3);
    assert!(writer.is_aligned());
    assert_eq!(writer.into_inner(), [0b1011_1001]);
}

#[test]
fn failing_sink_is_recorded() {
    struct Broken;

    impl io::Write for Broken {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "gone"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    let mut writer = Writer::new(Broken);
    writer.write_u32(0xDEAD, 16);
    writer.write_bool(false);

    let err = writer.take_error().unwrap();
    assert!(!err.is_exhausted());
    assert!(matches!(err, Error::Io(ref e) if e.kind() == io::ErrorKind::BrokenPipe));
}

#[test]
fn wrapped_engine_starts_checked() {
    let writer = Writer::from(bitweave::BitWriter::new(Vec::<u8>::new()));
    assert_eq!(writer.policy(), Policy::Checked);
    assert!(writer.error().is_none());
}
