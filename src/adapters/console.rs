//! Serial console adapter for the calibration text path.
//!
//! On the device stdout is routed to UART0 / USB-CDC by ESP-IDF, so a
//! plain [`std::io::Write`] is all the console needs.

use std::io::Write;

use crate::app::ports::ConsolePort;
use crate::error::DisplayError;

pub struct SerialConsole<W> {
    out: W,
}

impl SerialConsole<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self {
            out: std::io::stdout(),
        }
    }
}

impl<W: Write> SerialConsole<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ConsolePort for SerialConsole<W> {
    fn write_line(&mut self, line: &str) -> Result<(), DisplayError> {
        writeln!(self.out, "{line}")
            .and_then(|()| self.out.flush())
            .map_err(|_| DisplayError::ConsoleWrite)
    }
}
