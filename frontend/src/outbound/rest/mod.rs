//! REST adapters for the users and positions endpoints.
//!
//! Both adapters share one [`ApiClient`], which owns the connection pool,
//! the base URL, and the mapping of transport failures into
//! [`ApiError`](crate::domain::ports::ApiError).

mod client;
mod dto;
mod positions;
mod users;

#[cfg(test)]
mod test_server;

pub use client::ApiClient;
pub use positions::RestPositionsApi;
pub use users::RestUsersApi;
