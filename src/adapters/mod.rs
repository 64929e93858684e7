//! Adapters — concrete implementations of the port traits.
//!
//! | Adapter    | Implements   | Connects to                      |
//! |------------|--------------|----------------------------------|
//! | `hardware` | SensorPort   | ADC1 probes, DHT11 GPIO          |
//! | `console`  | ConsolePort  | UART / USB-CDC stdout            |
//! | `power`    | PowerPort    | Sensor power rail, light sleep   |
//! | `log_sink` | EventSink    | `log` facade                     |
//!
//! The ePaper panel adapter lives in [`crate::drivers::epaper`] since it
//! is a driver in its own right.

pub mod console;
pub mod hardware;
pub mod log_sink;
pub mod power;
