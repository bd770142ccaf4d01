#![no_main]

use libfuzzer_sys::fuzz_target;
use gf28_ssss::{DefaultSource, Share, get_x, get_y, split};

// Drives split with arbitrary parameters and message bytes, then feeds the
// output and raw fuzzer bytes through the accessors. Nothing here may panic:
// bad parameters must surface as errors.
fuzz_target!(|data: &[u8]| {
    if data.len() < 3 {
        return;
    }

    let k = data[0] as usize;
    let n = (data[1] as usize) | ((data[2] as usize & 1) << 8);
    let message = &data[3..];

    let mut seed = [0u8; 32];
    for (s, b) in seed.iter_mut().zip(message.iter()) {
        *s = *b;
    }
    let mut rng = DefaultSource::from_seed(seed);

    match split(message, k, n, &mut rng) {
        Ok(shares) => {
            let expected = if n == 0 { k } else { n };
            assert_eq!(shares.len(), expected);
            for (j, share) in shares.iter().enumerate() {
                assert_eq!(share.x() as usize, j + 1);
                assert_eq!(share.secret_len(), message.len());
                assert!(share.y(message.len()).is_err());
            }
        }
        Err(_) => {
            assert!(k <= 1 || (n != 0 && n < k) || n > 255 || (n == 0 && k > 255));
        }
    }

    let _ = get_x(message);
    let _ = get_y(message, data[0] as usize);
    if let Ok(share) = Share::try_from(message.to_vec()) {
        assert_eq!(share.x(), message[0]);
        assert_eq!(share.secret_len(), message.len() - 1);
    }
});
