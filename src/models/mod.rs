pub mod asset;
pub mod displayable_investment;
pub mod investment;
pub mod wallet_summary;

pub use asset::{Asset, AssetType};
pub use displayable_investment::DisplayableInvestment;
pub use investment::Investment;
pub use wallet_summary::WalletSummary;
