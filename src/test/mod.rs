mod client;
mod token_store;
