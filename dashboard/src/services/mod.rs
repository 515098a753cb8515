pub mod engine_client;
