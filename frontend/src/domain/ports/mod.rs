//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod api_error;
mod image_probe;
mod positions_api;
mod users_api;

pub use api_error::ApiError;
#[cfg(test)]
pub use image_probe::MockImageProbe;
pub use image_probe::{Dimensions, ImageProbe, ImageProbeError};
#[cfg(test)]
pub use positions_api::MockPositionsApi;
pub use positions_api::{FixturePositionsApi, PositionsApi};
#[cfg(test)]
pub use users_api::MockUsersApi;
pub use users_api::{FixtureUsersApi, UsersApi};
