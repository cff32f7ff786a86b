pub mod client;
pub mod handshake;
pub mod response;
pub mod signing;
