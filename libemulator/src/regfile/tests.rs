use super::{RegFile, Register8};

#[test]
fn register_captures_only_when_enabled_on_rising_edge() {
    let mut register = Register8::new();

    register.clock(0xAB, false, false);
    assert_eq!(register.clock(0xAB, false, true), 0);

    register.clock(0xAB, true, false);
    assert_eq!(register.clock(0xAB, true, true), 0xAB);
    // Level high, no new edge.
    assert_eq!(register.clock(0x12, true, true), 0xAB);

    register.load(0x5A);
    assert_eq!(register.read(), 0x5A);
}

#[test]
fn registers_start_zeroed() {
    assert_eq!(RegFile::new().values(), [0; libisa::REGISTER_COUNT]);
}

#[test]
fn write_then_read_every_register() {
    let mut reg_file = RegFile::new();

    for index in 0..libisa::REGISTER_COUNT {
        reg_file.write(index, (index as u8 + 1) * 17, true);
    }

    for index in 0..libisa::REGISTER_COUNT {
        assert_eq!(reg_file.read(index), (index as u8 + 1) * 17);
    }
}

#[test]
fn writes_do_not_alias() {
    let mut reg_file = RegFile::new();

    reg_file.write(3, 0xFF, true);
    assert_eq!(reg_file.values(), [0, 0, 0, 0xFF, 0, 0, 0, 0]);

    reg_file.write(3, 0x01, true);
    assert_eq!(reg_file.read(3), 0x01);
}

#[test]
fn disabled_write_is_ignored() {
    let mut reg_file = RegFile::new();

    reg_file.write(2, 0x42, false);
    assert_eq!(reg_file.read(2), 0);
}

#[test]
fn out_of_range_access_is_harmless() {
    let mut reg_file = RegFile::new();
    reg_file.write(1, 9, true);

    reg_file.write(8, 0x77, true);
    reg_file.write(15, 0x77, true);

    assert_eq!(reg_file.read(8), 0);
    assert_eq!(reg_file.read(usize::MAX), 0);
    assert_eq!(reg_file.values(), [0, 9, 0, 0, 0, 0, 0, 0]);
}

#[test]
fn read_two() {
    let mut reg_file = RegFile::new();
    reg_file.write(4, 40, true);
    reg_file.write(5, 50, true);

    assert_eq!(reg_file.read_two(4, 5), (40, 50));
    assert_eq!(reg_file.read_two(5, 9), (50, 0));
}
