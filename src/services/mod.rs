pub mod spot_service;
pub use spot_service::{SpotError, SpotService};

pub mod spot_service_impl;
pub use spot_service_impl::SeaOrmSpotService;
