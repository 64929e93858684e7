//! Hardware initialisation and the ePaper panel driver.

pub mod epaper;
pub mod hw_init;
