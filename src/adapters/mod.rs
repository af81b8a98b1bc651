//! Port adapters binding the control core to the (simulated) board.

pub mod hardware;
pub mod log_sink;
