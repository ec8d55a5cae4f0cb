pub mod chat;
pub mod product;

pub use chat::{ChatRequest, ChatResponse};
pub use product::{ProductsResponse, SaveProductRequest, SaveProductResponse};
