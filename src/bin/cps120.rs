//! Prints one reading each of pressure and temperature to the console.
//!
//! Run with `RUST_LOG=debug` to see the raw bytes fetched from the sensor.

use std::{thread, time::Duration};

use anyhow::Context;
use clap::Parser;
use linux_embedded_hal::{Delay, I2cdev};
use log::{debug, info, warn};

#[derive(Parser, Debug)]
#[command(version, about = "Read pressure and temperature from a CPS120 over I2C")]
struct Args {
    /// I2C character device the sensor is attached to
    #[arg(short, long, default_value = "/dev/i2c-1")]
    device: String,

    /// Keep measuring until interrupted
    #[arg(short, long)]
    follow: bool,

    /// Gap between readings when following, on top of the 100ms conversion
    /// time of each reading
    #[arg(long, default_value_t = 100)]
    interval_ms: u64,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    info!("opening {}", args.device);
    let i2c = I2cdev::new(&args.device)
        .with_context(|| format!("couldn't open I2C device {}", args.device))?;
    let mut cps120 = cps120::new(i2c, Delay);

    loop {
        let raw = cps120
            .read_raw_sample()
            .with_context(|| format!("couldn't read CPS120 on {}", args.device))?;
        debug!("raw sample: {:02x?}", raw.bytes());
        if raw.status() != cps120::Status::Valid {
            warn!("sensor reported status {:?}", raw.status());
        }

        print!("{}", raw.decode());

        if !args.follow {
            break;
        }
        thread::sleep(Duration::from_millis(args.interval_ms));
    }

    Ok(())
}
