use super::ModelTagId;
use aliri_braid::braid;

/// Tag of a promptable model, substituted into the prompt route.
#[braid(serde)]
pub struct ModelTag;

impl From<ModelTagId> for ModelTag {
    fn from(id: ModelTagId) -> Self {
        ModelTag::new(id.0.to_string())
    }
}

/// AI Manager account username.
#[braid(serde)]
pub struct Username;
