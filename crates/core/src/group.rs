//! Brand lines ("groups") of the catalog.

use core::str::FromStr;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CatalogError;

/// One of the fixed brand lines. Every product document lives in exactly one
/// group's collection.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Group {
    Heal,
    Shield,
    Elite,
    Togs,
    Spirit,
    WorkWearUniforms,
}

impl Group {
    /// All groups in their fixed enumeration order.
    pub const ALL: [Group; 6] = [
        Group::Heal,
        Group::Shield,
        Group::Elite,
        Group::Togs,
        Group::Spirit,
        Group::WorkWearUniforms,
    ];

    /// Name as stored in `group.name` on product documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            Group::Heal => "HEAL",
            Group::Shield => "SHIELD",
            Group::Elite => "ELITE",
            Group::Togs => "TOGS",
            Group::Spirit => "SPIRIT",
            Group::WorkWearUniforms => "WORK WEAR UNIFORMS",
        }
    }

    /// Name of the backing document collection.
    pub fn collection(&self) -> &'static str {
        match self {
            Group::Heal => "heal_products",
            Group::Shield => "shield_products",
            Group::Elite => "elite_products",
            Group::Togs => "togs_products",
            Group::Spirit => "spirit_products",
            Group::WorkWearUniforms => "work_wear_products",
        }
    }
}

impl core::fmt::Display for Group {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Group {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "HEAL" => Ok(Group::Heal),
            "SHIELD" => Ok(Group::Shield),
            "ELITE" => Ok(Group::Elite),
            "TOGS" => Ok(Group::Togs),
            "SPIRIT" => Ok(Group::Spirit),
            "WORK WEAR UNIFORMS" | "WORK_WEAR_UNIFORMS" => Ok(Group::WorkWearUniforms),
            other => Err(CatalogError::unsupported_group(other)),
        }
    }
}

impl Serialize for Group {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Group {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
