pub mod api_provider;
pub mod util;
