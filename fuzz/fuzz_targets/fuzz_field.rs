#![no_main]

use libfuzzer_sys::fuzz_target;
use gf28_ssss::gf28;

// Checks the checked arithmetic against its own identities for arbitrary
// (possibly out of range) operands.
fuzz_target!(|input: (i64, i64, i32)| {
    let (x, y, n) = input;
    let valid = gf28::is_elem(x) && gf28::is_elem(y);

    match gf28::mul(x, y) {
        Ok(product) => {
            assert!(valid);
            if y != 0 {
                assert_eq!(gf28::div(i64::from(product), y).unwrap() as i64, x);
            }
        }
        Err(_) => assert!(!valid),
    }

    assert_eq!(gf28::add(x, y).is_ok(), valid);

    if gf28::is_elem(x) && (x != 0 || n >= 0) {
        assert!(gf28::pow(x, n).is_ok());
    }
});
