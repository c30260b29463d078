//! Top-level facade crate for Hopp's protocol and session layers.
//!
//! Re-exports the protocol core and the session runtime so hosts can
//! depend on a single crate.

pub mod proto {
    pub use hopp_proto::*;
}

pub mod session {
    pub use hopp_session::*;
}
