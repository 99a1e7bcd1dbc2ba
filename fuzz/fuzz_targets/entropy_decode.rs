#![no_main]
use bitdict::{ByteDeserializer, Entropy};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: (Vec<u64>, Vec<u8>)| {
    let (commons, bytes) = data;

    if commons.is_empty() {
        return;
    }

    // Arbitrary bytes must come back as values or errors, never panics.
    let mut de = ByteDeserializer::from_bytes(&bytes);
    while de.ext_value::<u64, _>(Entropy::new(&commons)).is_ok() {}
});
