pub mod enums;
pub mod evolution;
pub mod hospital;
pub mod laboratory;
pub mod patient;
pub mod task;
pub mod user;

pub use enums::*;
pub use evolution::*;
pub use hospital::*;
pub use laboratory::*;
pub use patient::*;
pub use task::*;
pub use user::*;
