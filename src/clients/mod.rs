//! Reqwest adapters for the third-party HTTP APIs.

pub mod openai;
pub mod supabase_storage;

pub use openai::OpenAiClient;
pub use supabase_storage::SupabaseStorage;

use std::time::Duration;

fn http_client(timeout: Option<Duration>) -> Result<reqwest::Client, reqwest::Error> {
    let mut builder = reqwest::Client::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build()
}
