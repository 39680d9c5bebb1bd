pub mod beds;
pub mod evolutions;
pub mod generate;
pub mod labs;
pub mod patients;
pub mod shifts;
pub mod tasks;
pub mod units;
pub mod users;

use axum::http::StatusCode;

pub use beds::*;
pub use evolutions::*;
pub use generate::*;
pub use labs::*;
pub use patients::*;
pub use shifts::*;
pub use tasks::*;
pub use units::*;
pub use users::*;

/// Health check endpoint
pub async fn health_check() -> StatusCode {
    StatusCode::OK
}
