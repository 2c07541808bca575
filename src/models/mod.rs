mod client;
mod request;
mod response;

pub use client::{Client, Gender};
pub use request::{ClientFields, CreateClientRequest, UpdateClientRequest};
pub use response::{ClientResponse, IdResponse};
