mod app;
mod request_file;
mod validation;

#[cfg(test)]
mod test_support;

pub use app::{AppError, AppResult};
pub use request_file::RequestFileError;
pub use validation::ValidationError;
