#![no_main]
use embedded_hal_fuzz::{i2c::I2cFuzz, shared_data::FuzzData};
use libfuzzer_sys::fuzz_target;

type Error = ();

fuzz_target!(|data: &[u8]| {
    let data = FuzzData::new(data);
    let i2c: I2cFuzz<'_, Error> = I2cFuzz::new(data);
    let mut pressure_sensor = cps120::new(i2c, cps120::mock_utils::SleepNop);
    // We ignore the result as it is likely garbage. We don't care about
    // the result/error just if it crashes or not.
    let _ = pressure_sensor.measure();
});
