use serde::{Deserialize, Serialize};

/// Message priority band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Normal,
    High,
    Urgent,
}

impl Default for Priority {
    fn default() -> Self {
        Self::Normal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orders_low_to_urgent() {
        let mut v = vec![Priority::Urgent, Priority::Low, Priority::High, Priority::Normal];
        v.sort();
        assert_eq!(v, vec![Priority::Low, Priority::Normal, Priority::High, Priority::Urgent]);
    }
}
