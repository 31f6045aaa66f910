//! Process helpers shared by the binaries

mod heartbeat;
mod logging;
mod shutdown;

pub use heartbeat::Heartbeat;
pub use logging::init_tracing;
pub use shutdown::ShutdownManager;
