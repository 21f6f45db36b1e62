//! User profile with derived age and BMI.

use super::HandlerContext;
use crate::records::UserProfile;
use crate::tools::args::ToolArgs;
use crate::tools::schema::{ParameterSchema, PropertySchema, ToolSchema};
use crate::types::Result;
use chrono::NaiveDate;
use serde_json::{json, Map, Value};

pub const NO_PROFILE_MESSAGE: &str =
    "No profile found. The user has not filled in their health profile yet.";

/// Independently requestable parts of the profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileSection {
    Basic,
    Conditions,
    Allergies,
    Surgeries,
    FamilyHistory,
    Lifestyle,
}

impl ProfileSection {
    pub const ALL: [ProfileSection; 6] = [
        ProfileSection::Basic,
        ProfileSection::Conditions,
        ProfileSection::Allergies,
        ProfileSection::Surgeries,
        ProfileSection::FamilyHistory,
        ProfileSection::Lifestyle,
    ];

    /// Name used in the `sections` argument.
    pub fn as_str(self) -> &'static str {
        match self {
            ProfileSection::Basic => "basic",
            ProfileSection::Conditions => "conditions",
            ProfileSection::Allergies => "allergies",
            ProfileSection::Surgeries => "surgeries",
            ProfileSection::FamilyHistory => "family_history",
            ProfileSection::Lifestyle => "lifestyle",
        }
    }

    /// Key of the section in the returned profile object.
    pub fn key(self) -> &'static str {
        match self {
            ProfileSection::FamilyHistory => "familyHistory",
            other => other.as_str(),
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL.into_iter().find(|sec| sec.as_str().eq_ignore_ascii_case(s))
    }

    /// Sections named in `requested`. Absent, empty, `"all"`, or nothing recognizable
    /// selects every section.
    pub fn select(requested: Option<&[String]>) -> Vec<ProfileSection> {
        let Some(names) = requested else {
            return Self::ALL.to_vec();
        };
        if names.iter().any(|n| n.trim().eq_ignore_ascii_case("all")) {
            return Self::ALL.to_vec();
        }
        let picked: Vec<ProfileSection> = Self::ALL
            .into_iter()
            .filter(|sec| names.iter().any(|n| Self::parse(n) == Some(*sec)))
            .collect();
        if picked.is_empty() {
            Self::ALL.to_vec()
        } else {
            picked
        }
    }

    fn render(self, profile: &UserProfile, today: NaiveDate) -> Value {
        match self {
            ProfileSection::Basic => json!({
                "age": profile.age_on(today),
                "dateOfBirth": profile.date_of_birth,
                "sex": profile.sex,
                "heightCm": profile.height_cm,
                "weightKg": profile.weight_kg,
                "bmi": profile.bmi(),
                "bloodType": profile.blood_type,
            }),
            ProfileSection::Conditions => json!(profile.conditions),
            ProfileSection::Allergies => json!(profile.allergies),
            ProfileSection::Surgeries => json!(profile.surgeries),
            ProfileSection::FamilyHistory => json!(profile.family_history),
            ProfileSection::Lifestyle => json!({
                "diet": profile.diet,
                "exerciseFrequency": profile.exercise_frequency,
                "sleepHours": profile.sleep_hours,
                "smokingStatus": profile.smoking_status,
                "alcoholConsumption": profile.alcohol_consumption,
                "stressLevel": profile.stress_level,
            }),
        }
    }
}

pub(super) fn schema(name: &str) -> ToolSchema {
    let mut section_names: Vec<&str> = vec!["all"];
    section_names.extend(ProfileSection::ALL.map(ProfileSection::as_str));

    ToolSchema::new(
        name,
        "Get the user's health profile: age, sex, height, weight and BMI, known \
         conditions, allergies, past surgeries, family history and lifestyle.",
        ParameterSchema::new().optional(
            "sections",
            PropertySchema::array_of(
                PropertySchema::string("").with_enum(section_names),
                "Profile sections to return; omit or use 'all' for everything",
            ),
        ),
    )
}

pub(super) async fn handle(ctx: &HandlerContext<'_>, args: ToolArgs<'_>) -> Result<Value> {
    let requested = args.string_list("sections");
    let sections = ProfileSection::select(requested.as_deref());

    let Some(profile) = ctx.store.get_profile(ctx.caller).await? else {
        return Ok(json!({ "profile": null, "message": NO_PROFILE_MESSAGE }));
    };

    let mut rendered = Map::new();
    for section in sections {
        rendered.insert(section.key().to_string(), section.render(&profile, ctx.today));
    }

    Ok(json!({ "profile": rendered }))
}
