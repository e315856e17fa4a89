pub mod fields;
pub mod pipeline;

pub use fields::ContactPayload;
