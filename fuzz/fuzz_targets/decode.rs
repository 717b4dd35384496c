#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|bytes: [u8; 4]| {
    let measurement = cps120::RawSample(bytes).decode();
    assert!((30.0..120.0).contains(&measurement.pressure));
    assert!((-40.0..125.0).contains(&measurement.celsius));
    assert_eq!(measurement.fahrenheit, measurement.celsius * 1.8 + 32.0);
});
