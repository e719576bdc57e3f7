mod coin;
mod preferences;
mod price;

pub use coin::{fold_case, PairKey};
pub use preferences::{DisplayMode, ParseDisplayModeError, Preferences};
pub use price::{FetchResult, PriceRecord};
