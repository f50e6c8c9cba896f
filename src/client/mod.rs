//! The `client` module is the machine's half of the protocol.
//!
//! It provides `MachineClient`, which signs poll and ack bodies with the
//! shared secret and verifies the jobs returned by a poll.

pub mod machine;
pub use machine::{MachineClient, SignedRequest};
