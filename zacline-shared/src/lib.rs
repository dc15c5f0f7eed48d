pub mod identity;
pub mod money;
pub mod pii;

pub use identity::Identity;
pub use money::Amount;
pub use pii::Masked;
