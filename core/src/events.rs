use std::time::SystemTime;

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// one formatted display line; the view core never looks inside the text,
/// it only preserves order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextUnit {
    pub text: String,
    pub timestamp: SystemTime,
}

impl TextUnit {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            timestamp: SystemTime::now(),
        }
    }

    pub fn at(text: impl Into<String>, timestamp: SystemTime) -> Self {
        Self {
            text: text.into(),
            timestamp,
        }
    }
}

/// user prefix ranks, lowest to highest so `Ord` sorts ops above voiced
/// users above everyone else
#[derive(Debug, Display, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    #[default]
    #[display("")]
    None,
    #[display("+")]
    Voice,
    #[display("%")]
    HalfOp,
    #[display("@")]
    Op,
    #[display("&")]
    Admin,
    #[display("~")]
    Owner,
}

/// one roster row as handed to the render target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NickEntry {
    pub name: String,
    pub rank: Rank,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn ranks_order_by_power() {
        assert!(Rank::Owner > Rank::Op);
        assert!(Rank::Op > Rank::HalfOp);
        assert!(Rank::HalfOp > Rank::Voice);
        assert!(Rank::Voice > Rank::None);
    }

    #[test]
    fn rank_sigils() {
        assert_eq!(Rank::Op.to_string(), "@");
        assert_eq!(Rank::Voice.to_string(), "+");
        assert_eq!(Rank::None.to_string(), "");
    }
}
