//! Service layer

mod query_client;

pub use query_client::QueryServiceClient;
