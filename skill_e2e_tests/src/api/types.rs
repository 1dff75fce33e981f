// api/types.rs - Request bodies accepted by /api/v1/skills

use serde::{Deserialize, Serialize};

use crate::fixtures::Skill;

/// Body of `POST /api/v1/skills`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateSkill {
    pub key: String,
    pub name: String,
    pub description: String,
    pub logo: String,
    pub tags: Vec<String>,
}

impl From<&Skill> for CreateSkill {
    fn from(skill: &Skill) -> Self {
        Self {
            key: skill.key.clone(),
            name: skill.name.clone(),
            description: skill.description.clone(),
            logo: skill.logo.clone(),
            tags: skill.tags.clone(),
        }
    }
}

/// Body of `PUT /api/v1/skills/:key` (whole-record replace, key stays)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateSkill {
    pub name: String,
    pub description: String,
    pub logo: String,
    pub tags: Vec<String>,
}

impl UpdateSkill {
    /// The Skill this update would produce for `key`
    pub fn applied_to(&self, key: &str) -> Skill {
        Skill {
            key: key.to_string(),
            name: self.name.clone(),
            description: self.description.clone(),
            logo: self.logo.clone(),
            tags: self.tags.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct UpdateName<'a> {
    pub name: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct UpdateDescription<'a> {
    pub description: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct UpdateLogo<'a> {
    pub logo: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct UpdateTags<'a> {
    pub tags: &'a [String],
}
