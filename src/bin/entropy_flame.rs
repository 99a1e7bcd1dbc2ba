use bitdict::{ByteDeserializer, ByteSerializer, Entropy};

fn main() {
    let commons = [0u64, 1, 4096, 65_536, 1 << 20, 1 << 30, u64::MAX];
    let input = (0..10_000usize)
        .map(|i| {
            if i % 4 == 3 {
                0xDEAD_BEEF + i as u64
            } else {
                commons[i % commons.len()]
            }
        })
        .collect::<Vec<_>>();

    for _ in 0..1000 {
        let mut ser = ByteSerializer::new_vec();
        for v in &input {
            ser.ext_value(v, Entropy::new(commons.as_slice())).unwrap();
        }
        let bytes = ser.into_bytes().unwrap();

        let mut de = ByteDeserializer::from_bytes(&bytes);
        for v in &input {
            let back: u64 = de.ext_value(Entropy::new(commons.as_slice())).unwrap();
            assert_eq!(back, *v);
        }
    }
}
