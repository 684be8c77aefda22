//! Outbound ports - what the client needs from its transport.

mod request_port;

pub use request_port::NpcRequestPort;

#[cfg(test)]
pub use request_port::MockNpcRequestPort;
