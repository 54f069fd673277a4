//! Catalogue schema definitions.
//!
//! A catalogue lists, for each unified property, the legacy properties it
//! replaces. Legacy keys are organised in alias groups: the keys of one
//! group are alternatives that only apply under mutually exclusive
//! profiles, for example the gateway setting of a standalone gateway and
//! the embedded gateway setting of a broker.

use std::collections::BTreeSet;

use serde::{Deserialize, Deserializer, Serialize};

use crate::coerce::TargetType;
use crate::key::{Profile, Profiles, PropertyKey};

/// Complete catalogue document.
///
/// # Examples
///
/// ```
/// use unicfg::catalogue::Catalogue;
///
/// let catalogue: Catalogue = serde_yaml::from_str(
///     r"
/// mappings:
///   - unified: camunda.cluster.node-id
///     legacy:
///       - key: zeebe.broker.cluster.nodeId
/// ",
/// )
/// .unwrap();
/// assert_eq!(catalogue.mappings.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Catalogue {
    /// The unified properties and their legacy aliases, in catalogue order.
    #[serde(default)]
    pub mappings: Vec<LegacyMapping>,
}

/// A unified property and the legacy properties it replaces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LegacyMapping {
    /// The unified key.
    pub unified: PropertyKey,

    /// The declared value type, in [`TargetType`] notation (`duration`,
    /// `list:string`, `enum:NONE|GZIP`, ...).
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub value_type: Option<TargetType>,

    /// Alias groups, in catalogue order.
    #[serde(default)]
    pub legacy: Vec<AliasGroup>,
}

impl LegacyMapping {
    /// Returns every legacy key of the mapping, in catalogue order.
    pub fn legacy_keys(&self) -> impl Iterator<Item = &PropertyKey> {
        self.legacy
            .iter()
            .flat_map(|group| group.aliases.iter().map(|alias| &alias.key))
    }
}

/// Legacy keys that are alternatives under mutually exclusive profiles.
///
/// In YAML a group is a sequence of aliases. A group holding a single
/// alias may also be written as the alias mapping itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AliasGroup {
    /// The aliases of the group.
    pub aliases: Vec<LegacyAlias>,
}

impl AliasGroup {
    /// Creates a group from its aliases.
    #[must_use]
    pub fn new(aliases: Vec<LegacyAlias>) -> Self {
        Self { aliases }
    }

    /// Returns the keys of the group.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.aliases.iter().map(|alias| alias.key.to_string()).collect()
    }
}

impl<'de> Deserialize<'de> for AliasGroup {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum GroupForm {
            Many(Vec<LegacyAlias>),
            One(LegacyAlias),
        }

        Ok(match GroupForm::deserialize(deserializer)? {
            GroupForm::Many(aliases) => Self { aliases },
            GroupForm::One(alias) => Self {
                aliases: vec![alias],
            },
        })
    }
}

/// A single legacy key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LegacyAlias {
    /// The legacy key.
    pub key: PropertyKey,

    /// Profiles under which the key applies; empty means always.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub profiles: BTreeSet<Profile>,
}

impl LegacyAlias {
    /// Creates an unrestricted alias.
    #[must_use]
    pub fn new(key: PropertyKey) -> Self {
        Self {
            key,
            profiles: BTreeSet::new(),
        }
    }

    /// Restricts the alias to the given profiles.
    #[must_use]
    pub fn with_profiles<'a>(mut self, profiles: impl IntoIterator<Item = &'a str>) -> Self {
        self.profiles = profiles.into_iter().map(Profile::new).collect();
        self
    }

    /// Returns `true` if the alias applies under `active` profiles.
    #[must_use]
    pub fn applies_to(&self, active: &Profiles) -> bool {
        self.profiles.is_empty() || active.intersects(&self.profiles)
    }
}
