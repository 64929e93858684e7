//! Application boundary — ports and events, zero I/O.
//!
//! All interaction with hardware happens through the **port traits**
//! defined in [`ports`]; everything the loop reports leaves as an
//! [`events::AppEvent`].

pub mod events;
pub mod ports;
