use serde::{Deserialize, Serialize};
use shrinkwraprs::Shrinkwrap;
use std::fmt::{Display, Formatter};

/// Datasource ID
#[derive(Copy, Clone, Shrinkwrap, Serialize, Deserialize, Debug, Hash, Eq, PartialEq)]
pub struct DatasourceId(pub i64);

impl Display for DatasourceId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Model ID
#[derive(Copy, Clone, Shrinkwrap, Serialize, Deserialize, Debug, Default, Eq, PartialEq)]
pub struct ModelId(pub u32);

/// Model tag ID, the numeric form of a [crate::types::ModelTag].
#[derive(Copy, Clone, Shrinkwrap, Serialize, Deserialize, Debug, Default, Eq, PartialEq)]
pub struct ModelTagId(pub u32);
