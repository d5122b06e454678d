use anchor_lang::prelude::*;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct Prize {
    pub id: u32,
    pub name: String,
    pub description: String,
}

/// Caller-facing shape of a prize; ids are assigned by position.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PrizeSpec {
    pub name: String,
    pub description: String,
}

impl PrizeSpec {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }

    /// Placeholder used when a configuration declares more prizes than it names.
    pub fn placeholder(id: u32) -> Self {
        Self::new(format!("Prize {id}"), format!("Description for prize {id}"))
    }

    pub fn into_prize(self, id: u32) -> Prize {
        Prize {
            id,
            name: self.name,
            description: self.description,
        }
    }
}
