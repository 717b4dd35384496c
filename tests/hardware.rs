//! Tests against a real sensor attached to `/dev/i2c-1` (or `CPS120_I2C_DEVICE`).
//!
//! Run with `cargo test --features linux -- --ignored`.

use linux_embedded_hal::{Delay, I2cdev};

fn device() -> I2cdev {
    let path = std::env::var("CPS120_I2C_DEVICE").unwrap_or_else(|_| "/dev/i2c-1".into());
    I2cdev::new(path).unwrap()
}

#[test]
#[ignore = "requires a CPS120 on the I2C bus"]
fn pressure_and_temperature() {
    let mut pressure_sensor = cps120::new(device(), Delay);
    let cps120::Measurement {
        pressure,
        celsius,
        fahrenheit,
    } = pressure_sensor.measure().unwrap();
    println!("Temperature: {celsius:.2} deg C, Pressure: {pressure:.2} kPa");
    // Assuming temperature is above 0deg C
    assert!(celsius > 0.0);
    // Max operating temperature.
    assert!(celsius < 85.0);
    assert_eq!(fahrenheit, celsius * 1.8 + 32.0);
    // Assuming this test is not conducted above 3000m altitude.
    assert!(pressure > 70.0);
    // Assuming this test is not conducted below the water surface.
    assert!(pressure < 110.0);
}

