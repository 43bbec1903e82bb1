pub mod api;
pub mod app;
pub mod models;
pub mod session;

#[cfg(test)]
mod test;
