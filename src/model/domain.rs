use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub type Rgb = [u8; 3];

/// Display settings for a single cell or material id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainOverride {
    pub id: i32,
    /// `None` falls back to the renderer's palette color.
    pub color: Option<Rgb>,
    pub masked: bool,
    pub highlighted: bool,
}

impl DomainOverride {
    pub fn new(id: i32) -> Self {
        Self {
            id,
            color: None,
            masked: false,
            highlighted: false,
        }
    }

    pub fn is_default(&self) -> bool {
        self.color.is_none() && !self.masked && !self.highlighted
    }
}

pub type DomainMap = BTreeMap<i32, DomainOverride>;
