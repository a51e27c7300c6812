//! Sensor drivers.
//!
//! The sensor kind is a closed enum chosen at configuration load, and each
//! kind has its own [`Sensor`] implementation behind a common trait. The
//! drivers here are stubs that report a fixed value per kind; a real
//! deployment would swap in I2C/GPIO/1-Wire implementations without
//! touching the cycle driver.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::NodeError;

/// Supported sensor kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SensorKind {
    /// Sensirion SHT40 (I2C).
    Sht40,
    /// DHT22 (GPIO).
    Dht22,
    /// Bosch BME280 (I2C/SPI).
    Bme280,
    /// Dallas DS18B20 (1-Wire).
    Dallas,
}

impl SensorKind {
    /// Returns the kind as its configuration name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Sht40 => "sht40",
            Self::Dht22 => "dht22",
            Self::Bme280 => "bme280",
            Self::Dallas => "dallas",
        }
    }
}

impl fmt::Display for SensorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A temperature sensor.
///
/// One reading per cycle; a failed read is recoverable and skips the cycle.
pub trait Sensor: Send + fmt::Debug {
    /// Returns the kind of this sensor.
    fn kind(&self) -> SensorKind;

    /// Reads the current temperature in degrees Celsius.
    ///
    /// # Errors
    ///
    /// Returns [`NodeError::SensorRead`] when the sample cannot be taken.
    fn read(&self) -> Result<f64, NodeError>;
}

/// Creates the driver for a configured sensor kind and pin.
#[must_use]
pub fn for_kind(kind: SensorKind, pin: impl Into<String>) -> Box<dyn Sensor> {
    let pin = pin.into();
    match kind {
        SensorKind::Sht40 => Box::new(Sht40Sensor { pin }),
        SensorKind::Dht22 => Box::new(Dht22Sensor { pin }),
        SensorKind::Bme280 => Box::new(Bme280Sensor { pin }),
        SensorKind::Dallas => Box::new(DallasSensor { pin }),
    }
}

/// SHT40 stub driver.
#[derive(Debug)]
pub struct Sht40Sensor {
    pin: String,
}

impl Sensor for Sht40Sensor {
    fn kind(&self) -> SensorKind {
        SensorKind::Sht40
    }

    fn read(&self) -> Result<f64, NodeError> {
        debug!(pin = %self.pin, "reading SHT40 sensor");
        Ok(22.5)
    }
}

/// DHT22 stub driver.
#[derive(Debug)]
pub struct Dht22Sensor {
    pin: String,
}

impl Sensor for Dht22Sensor {
    fn kind(&self) -> SensorKind {
        SensorKind::Dht22
    }

    fn read(&self) -> Result<f64, NodeError> {
        debug!(pin = %self.pin, "reading DHT22 sensor");
        Ok(23.0)
    }
}

/// BME280 stub driver.
#[derive(Debug)]
pub struct Bme280Sensor {
    pin: String,
}

impl Sensor for Bme280Sensor {
    fn kind(&self) -> SensorKind {
        SensorKind::Bme280
    }

    fn read(&self) -> Result<f64, NodeError> {
        debug!(pin = %self.pin, "reading BME280 sensor");
        Ok(24.5)
    }
}

/// Dallas DS18B20 stub driver.
#[derive(Debug)]
pub struct DallasSensor {
    pin: String,
}

impl Sensor for DallasSensor {
    fn kind(&self) -> SensorKind {
        SensorKind::Dallas
    }

    fn read(&self) -> Result<f64, NodeError> {
        debug!(pin = %self.pin, "reading Dallas sensor");
        Ok(25.0)
    }
}
