use super::*;

#[test]
fn fnv_split_writes_match_single_write() {
    let mut a = Fnv1a64::new_default();
    a.write_bytes(b"gearers");
    let mut b = Fnv1a64::new_default();
    b.write_u8(b'g');
    b.write_bytes(b"earers");
    assert_eq!(a.finish(), b.finish());
}

#[test]
fn mix64_separates_adjacent_inputs() {
    assert_ne!(mix64(1), mix64(2));
    assert_eq!(mix64(42), mix64(42));
}

#[test]
fn unit_f64_stays_below_one() {
    assert_eq!(unit_f64(0), 0.0);
    assert!(unit_f64(u64::MAX) < 1.0);
}
