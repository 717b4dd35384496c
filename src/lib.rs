//! # Getting started
//!
//! A platform agnostic driver for the CPS120 digital barometric pressure and
//! temperature sensor.
//!
//! This driver supports triggering a measurement and reading back the
//! compensated pressure (kPa) and temperature (deg C / deg F).
//!
//! ## Example
//! ```rust
//! # // NOTE: Use real i2c instance for your app.
//! # use embedded_hal_mock::i2c::{Mock as I2cMock, Transaction as I2cTransaction};
//! # let i2c = I2cMock::new(&[I2cTransaction::write(0x28, vec![0x80]),
//! #     I2cTransaction::write_read(0x28, vec![0x00], vec![0x20, 0x00, 0x66, 0x68]),
//! # ]);
//! use cps120::mock_utils::SleepNop;
//! // NOTE: You should implement the DelayUs trait for this driver to work
//! // correctly.
//! let mut pressure_sensor = cps120::new(i2c, SleepNop);
//! println!("{}", pressure_sensor.measure().unwrap());
//! ```
//!
//! ## Conversion time
//!
//! After the measurement request the driver waits a fixed 100ms before
//! fetching the data. The status bits returned with the sample are not polled,
//! use [`RawSample::status`] if you need to detect a stale sample.

#![no_std]

#[cfg(any(test, feature = "std"))]
#[macro_use]
extern crate std;

use core::fmt;

use embedded_hal::blocking::{
    delay::DelayUs,
    i2c::{Write, WriteRead},
};

/// Mock utils is a set of tools to aid in testing and documenting you should not
/// use any of the mocks defined in this module in your release binaries.
pub mod mock_utils {
    /// A sleep implementation that does nothing and immediately exits. This is
    /// useful for testing and fuzzing.
    pub struct SleepNop;

    impl embedded_hal::blocking::delay::DelayUs<u32> for SleepNop {
        fn delay_us(&mut self, _us: u32) {
            // Nop
        }
    }
}


/// A catch all error for this driver
#[derive(Debug, PartialEq)]
pub enum SensorError<E> {
    I2cError(E),
}

impl<E: fmt::Debug> fmt::Display for SensorError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SensorError::I2cError(e) => write!(f, "i2c error: {:?}", e),
        }
    }
}

#[cfg(feature = "std")]
impl<E: fmt::Debug> std::error::Error for SensorError<E> {}

const I2C_ADDRESS: u8 = 0x28;

/// Time the sensor needs to complete a conversion after a measurement request.
const CONVERSION_TIME_US: u32 = 100_000;

/// Full scale of the 14-bit ADC.
const ADC_FULL_SCALE: f64 = 16384.0;

pub trait I2cMarker: WriteRead + Write
where
    Self: Write<Error = <Self as WriteRead>::Error>,
{
}
impl<T: WriteRead + Write> I2cMarker for T where Self: Write<Error = <Self as WriteRead>::Error> {}

/// Create a driver object
///
/// # Example
///
/// ```
/// // NOTE: Use real i2c instance for your app.
/// use embedded_hal_mock::i2c::{Mock as I2cMock, Transaction as I2cTransaction};
/// use cps120::mock_utils::SleepNop;
/// // NOTE: You should implement the DelayUs trait for this driver to work
/// // correctly.
/// let i2c = I2cMock::new(&[]);
/// let pressure_sensor = cps120::new(i2c, SleepNop);
/// ```
pub fn new<I2C: I2cMarker, D: DelayUs<u32>>(i2c: I2C, sleep: D) -> Cps120<I2C, D> {
    Cps120 { i2c, sleep }
}

/// An I2C command to send to the pressure sensor.
enum Command {
    MeasurementRequest,
    DataFetch,
}

/// Convert the command into a single byte that can be sent over i2c.
impl From<Command> for u8 {
    fn from(val: Command) -> u8 {
        use Command::*;
        match val {
            MeasurementRequest => 0x80,
            DataFetch => 0x00,
        }
    }
}

/// The two status bits reported in the top of the pressure MSB.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Status {
    /// Fresh data from the last conversion.
    Valid,
    /// The sensor is in command mode.
    CommandMode,
    /// Data has already been fetched since the last conversion.
    Stale,
    Reserved,
}

/// The four data bytes fetched from the sensor: pressure MSB, pressure LSB,
/// temperature MSB, temperature LSB.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct RawSample(pub [u8; 4]);

impl RawSample {
    pub fn bytes(&self) -> [u8; 4] {
        self.0
    }

    /// The 14-bit pressure count, with the status bits masked off.
    pub fn raw_pressure(&self) -> u16 {
        (((self.0[0] & 0x3F) as u16) << 8) | self.0[1] as u16
    }

    /// The temperature word with the two unused low bits cleared. The count
    /// itself is the upper 14 bits.
    pub fn raw_temperature(&self) -> u16 {
        ((self.0[2] as u16) << 8) + (self.0[3] & 0xFC) as u16
    }

    pub fn status(&self) -> Status {
        match self.0[0] >> 6 {
            0b00 => Status::Valid,
            0b01 => Status::CommandMode,
            0b10 => Status::Stale,
            _ => Status::Reserved,
        }
    }

    /// Converts the raw counts into kPa and degrees.
    pub fn decode(&self) -> Measurement {
        let pressure = (self.raw_pressure() as f64 / ADC_FULL_SCALE) * 90.0 + 30.0;
        let celsius =
            (self.raw_temperature() as f64 / 4.0) * (165.0 / ADC_FULL_SCALE) - 40.0;
        Measurement {
            pressure,
            celsius,
            fahrenheit: celsius_to_fahrenheit(celsius),
        }
    }
}

impl From<[u8; 4]> for RawSample {
    fn from(bytes: [u8; 4]) -> Self {
        RawSample(bytes)
    }
}

pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 1.8 + 32.0
}

/// A pressure reading in kPa along with the temperature in degrees C and F.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct Measurement {
    pub pressure: f64,
    pub celsius: f64,
    pub fahrenheit: f64,
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Pressure is : {:.2} kPa", self.pressure)?;
        writeln!(f, "Temperature in Celsius : {:.2} C", self.celsius)?;
        writeln!(f, "Temperature in Fahrenheit : {:.2} F", self.fahrenheit)
    }
}

/// A cps120 object.
pub struct Cps120<I2C: I2cMarker, D: DelayUs<u32>> {
    i2c: I2C,
    sleep: D,
}

impl<I2C: I2cMarker, D: DelayUs<u32>> Cps120<I2C, D> {
    /// Releases the i2c handle consuming the driver object.
    ///
    /// # Example
    ///
    /// ```
    /// // NOTE: Use real i2c instance for your app.
    /// use embedded_hal_mock::i2c::{Mock as I2cMock, Transaction as I2cTransaction};
    /// // Dummy sleep implementation.
    /// use cps120::mock_utils::SleepNop;
    /// let i2c = I2cMock::new(&[]);
    /// let pressure_sensor = cps120::new(i2c, SleepNop);
    /// let (i2c, _) = pressure_sensor.release();
    /// ```
    pub fn release(self) -> (I2C, D) {
        (self.i2c, self.sleep)
    }

    /// Sends a measurement request, waking the sensor to perform a single
    /// conversion.
    pub fn start_conversion(&mut self) -> Result<(), SensorError<<I2C as WriteRead>::Error>> {
        self.i2c
            .write(I2C_ADDRESS, &[Command::MeasurementRequest.into()])
            .map_err(SensorError::I2cError)
    }

    /// Fetches the four data bytes without requesting a new conversion.
    pub fn read_raw(&mut self) -> Result<RawSample, SensorError<<I2C as WriteRead>::Error>> {
        let mut buffer = [0u8; 4];
        self.i2c
            .write_read(I2C_ADDRESS, &[Command::DataFetch.into()], &mut buffer)
            .map_err(SensorError::I2cError)?;
        Ok(RawSample(buffer))
    }

    /// Starts conversion, waits for it to complete and fetches the raw sample.
    pub fn read_raw_sample(&mut self) -> Result<RawSample, SensorError<<I2C as WriteRead>::Error>> {
        self.start_conversion()?;
        // Fixed wait, the ready status is not polled.
        self.sleep.delay_us(CONVERSION_TIME_US);
        self.read_raw()
    }

    /// Reads the pressure and temperature from the sensor.
    ///
    /// # Errors
    /// This may return an error if there is a problem with i2c communication.
    ///
    /// # Example
    ///
    /// ```rust
    /// # // NOTE: Use real i2c instance for your app.
    /// # use embedded_hal_mock::i2c::{Mock as I2cMock, Transaction as I2cTransaction};
    /// # let i2c = I2cMock::new(&[I2cTransaction::write(0x28, vec![0x80]),
    /// #     I2cTransaction::write_read(0x28, vec![0x00], vec![0x00, 0x00, 0x00, 0x00]),
    /// # ]);
    /// use cps120::mock_utils::SleepNop;
    /// let mut pressure_sensor = cps120::new(i2c, SleepNop);
    /// let measurement = pressure_sensor.measure().unwrap();
    /// assert_eq!(format!("{:.2}", measurement.pressure), "30.00");
    /// ```
    pub fn measure(&mut self) -> Result<Measurement, SensorError<<I2C as WriteRead>::Error>> {
        Ok(self.read_raw_sample()?.decode())
    }

    /// Reads the pressure from the sensor in kPa.
    ///
    /// # Errors
    /// This may return an error if there is a problem with i2c communication.
    pub fn read_pressure(&mut self) -> Result<f64, SensorError<<I2C as WriteRead>::Error>> {
        Ok(self.measure()?.pressure)
    }

    /// Reads the temperature from the sensor in degrees C.
    ///
    /// # Errors
    /// This may return an error if there is a problem with i2c communication.
    pub fn read_temperature(&mut self) -> Result<f64, SensorError<<I2C as WriteRead>::Error>> {
        Ok(self.measure()?.celsius)
    }
}
