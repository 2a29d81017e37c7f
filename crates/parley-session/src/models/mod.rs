mod session;
mod turn;
mod uploads;

pub use session::Session;
pub use turn::{Turn, TurnRole};
pub use uploads::UploadedFiles;
