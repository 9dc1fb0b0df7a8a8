pub mod dates;
pub mod http;
pub mod logging;
pub mod resources;
pub mod transport;
