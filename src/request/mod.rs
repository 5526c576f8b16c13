//! Request descriptors: file parsing and reqwest request construction.
mod builder;
mod model;
mod parser;


pub use builder::build_request;
pub use model::RequestSpec;
pub use parser::parse_request_file;
