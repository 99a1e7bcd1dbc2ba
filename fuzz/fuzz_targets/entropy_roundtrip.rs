#![no_main]
use bitdict::{ByteDeserializer, ByteSerializer, Entropy};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: (Vec<u32>, Vec<u32>)| {
    let (commons, input) = data;

    if commons.is_empty() {
        return;
    }

    let mut ser = ByteSerializer::new_vec();
    for v in &input {
        ser.ext_value(v, Entropy::new(&commons)).unwrap();
    }
    let bytes = ser.into_bytes().unwrap();

    let mut de = ByteDeserializer::from_bytes(&bytes);
    for v in &input {
        let back: u32 = de.ext_value(Entropy::new(&commons)).unwrap();
        assert_eq!(back, *v);
    }
});
