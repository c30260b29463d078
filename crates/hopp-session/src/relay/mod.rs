//! Raw socket relay worker.
//!
//! A low-level binary transport experiment kept independent of the main
//! call transport: one background task, at most one live connection,
//! inbound frames forwarded to the host with their receive timestamp.

pub mod connector;
pub mod worker;

pub use connector::{Connector, RelayConnection, TcpConnector, CLOSE_NORMAL};
pub use worker::{spawn, RelayCommand, RelayEvent, RelayStatus};
