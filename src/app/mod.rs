pub mod app;
pub mod calc;
pub mod ui;
pub mod utils;
pub mod wallet;

pub use app::App;
pub use wallet::{Wallet, WalletData, WalletSnapshot};
