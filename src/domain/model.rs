use glam::{Quat, Vec3};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// One curriculum standard as served by the stack endpoint.
///
/// The endpoint spells the compound keys in lowercase (`standardid`), so both
/// that form and camelCase are accepted. Missing or `null` strings decode as "".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    #[serde(default)]
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub subject: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub grade: String,
    #[serde(default)]
    pub mastery: i32,
    #[serde(default, alias = "domainid", deserialize_with = "null_as_empty")]
    pub domain_id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub domain: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub cluster: String,
    #[serde(default, alias = "standardid", deserialize_with = "null_as_empty")]
    pub standard_id: String,
    #[serde(
        default,
        alias = "standarddescription",
        deserialize_with = "null_as_empty"
    )]
    pub standard_description: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// The three grade towers, in build order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradeGroup {
    Sixth,
    Seventh,
    Eighth,
}

impl GradeGroup {
    pub const ALL: [GradeGroup; 3] = [GradeGroup::Sixth, GradeGroup::Seventh, GradeGroup::Eighth];

    /// Picks the group from the leading ASCII digit of a grade string ("6th Grade" -> Sixth).
    pub fn from_grade(grade: &str) -> Option<Self> {
        match grade.chars().next()?.to_digit(10)? {
            6 => Some(GradeGroup::Sixth),
            7 => Some(GradeGroup::Seventh),
            8 => Some(GradeGroup::Eighth),
            _ => None,
        }
    }

    pub fn index(self) -> usize {
        match self {
            GradeGroup::Sixth => 0,
            GradeGroup::Seventh => 1,
            GradeGroup::Eighth => 2,
        }
    }

    pub fn level(self) -> u8 {
        self.index() as u8 + 6
    }

    /// World-space offset that keeps the three towers apart.
    pub fn offset(self) -> Vec3 {
        match self {
            GradeGroup::Sixth => Vec3::new(0.0, 0.0, -30.0),
            GradeGroup::Seventh => Vec3::ZERO,
            GradeGroup::Eighth => Vec3::new(0.0, 0.0, 30.0),
        }
    }
}

impl fmt::Display for GradeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "grade {}", self.level())
    }
}

/// Visual style of a block, keyed by mastery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialTier {
    Glass,
    Wood,
    Stone,
}

impl MaterialTier {
    /// Mastery outside 0..=2 has no tier; the renderer picks a fallback.
    pub fn from_mastery(mastery: i32) -> Option<Self> {
        match mastery {
            0 => Some(MaterialTier::Glass),
            1 => Some(MaterialTier::Wood),
            2 => Some(MaterialTier::Stone),
            _ => None,
        }
    }

    pub fn mastery(self) -> i32 {
        match self {
            MaterialTier::Glass => 0,
            MaterialTier::Wood => 1,
            MaterialTier::Stone => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            MaterialTier::Glass => "glass",
            MaterialTier::Wood => "wood",
            MaterialTier::Stone => "stone",
        }
    }
}

/// A record bound to where and how it sits in the tower.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedBlock {
    pub record: Record,
    pub group: GradeGroup,
    pub position: Vec3,
    pub rotation: Quat,
    pub material_tier: Option<MaterialTier>,
}

impl PlacedBlock {
    pub fn yaw_degrees(&self) -> f32 {
        let (yaw, _, _) = self.rotation.to_euler(glam::EulerRot::YXZ);
        yaw.to_degrees().round()
    }
}

/// Full placement plan handed to the renderer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TowerPlan {
    pub blocks: Vec<PlacedBlock>,
    /// Block count per group, indexed by `GradeGroup::index`.
    pub group_sizes: [usize; 3],
    /// Records whose grade did not map to a group.
    pub dropped: usize,
}

impl TowerPlan {
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn group(&self, group: GradeGroup) -> impl Iterator<Item = &PlacedBlock> {
        self.blocks.iter().filter(move |b| b.group == group)
    }
}

/// The fields shown in the detail panel when a block is clicked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockDetails {
    pub grade: String,
    pub domain: String,
    pub cluster: String,
    pub standard_id: String,
    pub standard_description: String,
}

impl From<&Record> for BlockDetails {
    fn from(record: &Record) -> Self {
        Self {
            grade: record.grade.clone(),
            domain: record.domain.clone(),
            cluster: record.cluster.clone(),
            standard_id: record.standard_id.clone(),
            standard_description: record.standard_description.clone(),
        }
    }
}

/// Opaque reference to an object spawned by a `SceneHost`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlockHandle(pub usize);

impl fmt::Display for BlockHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_accepts_lowercase_endpoint_keys() {
        let json = serde_json::json!({
            "id": 4,
            "subject": "Math",
            "grade": "6th Grade",
            "mastery": 2,
            "domainid": "RP",
            "domain": "Ratios & Proportional Relationships",
            "cluster": "Understand ratio concepts",
            "standardid": "CCSS.MATH.CONTENT.6.RP.A.1",
            "standarddescription": "Understand the concept of a ratio"
        });

        let record: Record = serde_json::from_value(json).unwrap();
        assert_eq!(record.domain_id, "RP");
        assert_eq!(record.standard_id, "CCSS.MATH.CONTENT.6.RP.A.1");
        assert_eq!(record.standard_description, "Understand the concept of a ratio");
    }

    #[test]
    fn test_record_null_and_missing_strings_become_empty() {
        let json = serde_json::json!({ "id": 1, "grade": null, "mastery": 1 });
        let record: Record = serde_json::from_value(json).unwrap();
        assert_eq!(record.grade, "");
        assert_eq!(record.domain, "");
        assert_eq!(record.mastery, 1);
    }

    #[test]
    fn test_grade_group_from_grade() {
        assert_eq!(GradeGroup::from_grade("6th Grade"), Some(GradeGroup::Sixth));
        assert_eq!(GradeGroup::from_grade("7"), Some(GradeGroup::Seventh));
        assert_eq!(GradeGroup::from_grade("8th Grade"), Some(GradeGroup::Eighth));
        assert_eq!(GradeGroup::from_grade("5th Grade"), None);
        assert_eq!(GradeGroup::from_grade("Algebra I"), None);
        assert_eq!(GradeGroup::from_grade(""), None);
        // only ASCII digits count
        assert_eq!(GradeGroup::from_grade("٦th"), None);
    }

    #[test]
    fn test_material_tier_mapping() {
        assert_eq!(MaterialTier::from_mastery(0), Some(MaterialTier::Glass));
        assert_eq!(MaterialTier::from_mastery(1), Some(MaterialTier::Wood));
        assert_eq!(MaterialTier::from_mastery(2), Some(MaterialTier::Stone));
        assert_eq!(MaterialTier::from_mastery(3), None);
        assert_eq!(MaterialTier::from_mastery(-1), None);
        assert_eq!(MaterialTier::Stone.mastery(), 2);
    }
}
