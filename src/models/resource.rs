use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::models::Hex;
use crate::projection::filter::{CategoryKind, Categorized, Searchable};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    Article,
    Video,
    Guide,
    Infographic,
    Tip,
}

impl ResourceType {
    pub fn label(self) -> &'static str {
        match self {
            ResourceType::Article => "Artículo",
            ResourceType::Video => "Video",
            ResourceType::Guide => "Guía",
            ResourceType::Infographic => "Infografía",
            ResourceType::Tip => "Consejo",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            ResourceType::Article => "article",
            ResourceType::Video => "play-circle",
            ResourceType::Guide => "menu-book",
            ResourceType::Infographic => "image",
            ResourceType::Tip => "lightbulb",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResourceCategory {
    Hygiene,
    Prevention,
    Treatments,
    PostCare,
    Nutrition,
    Pediatric,
    Emergency,
}

impl CategoryKind for ResourceCategory {
    const ALL: &'static [Self] = &[
        ResourceCategory::Hygiene,
        ResourceCategory::Prevention,
        ResourceCategory::Treatments,
        ResourceCategory::PostCare,
        ResourceCategory::Nutrition,
        ResourceCategory::Pediatric,
        ResourceCategory::Emergency,
    ];

    fn key(self) -> &'static str {
        match self {
            ResourceCategory::Hygiene => "hygiene",
            ResourceCategory::Prevention => "prevention",
            ResourceCategory::Treatments => "treatments",
            ResourceCategory::PostCare => "post-care",
            ResourceCategory::Nutrition => "nutrition",
            ResourceCategory::Pediatric => "pediatric",
            ResourceCategory::Emergency => "emergency",
        }
    }
}

impl ResourceCategory {
    pub fn label(self) -> &'static str {
        match self {
            ResourceCategory::Hygiene => "Higiene Dental",
            ResourceCategory::Prevention => "Prevención",
            ResourceCategory::Treatments => "Tratamientos",
            ResourceCategory::PostCare => "Cuidados Post-Tratamiento",
            ResourceCategory::Nutrition => "Nutrición",
            ResourceCategory::Pediatric => "Odontopediatría",
            ResourceCategory::Emergency => "Emergencias",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            ResourceCategory::Hygiene => "cleaning-services",
            ResourceCategory::Prevention => "shield",
            ResourceCategory::Treatments => "medical-services",
            ResourceCategory::PostCare => "favorite",
            ResourceCategory::Nutrition => "restaurant",
            ResourceCategory::Pediatric => "child-care",
            ResourceCategory::Emergency => "emergency",
        }
    }

    pub fn color(self) -> Hex {
        match self {
            ResourceCategory::Hygiene => "#3b82f6",
            ResourceCategory::Prevention => "#10b981",
            ResourceCategory::Treatments => "#8b5cf6",
            ResourceCategory::PostCare => "#ef4444",
            ResourceCategory::Nutrition => "#f59e0b",
            ResourceCategory::Pediatric => "#ec4899",
            ResourceCategory::Emergency => "#dc2626",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ResourceType,
    pub category: ResourceCategory,
    pub title: String,
    pub description: String,
    pub content: Option<String>,
    pub video_url: Option<String>,
    /// Video length in seconds.
    pub duration: Option<u32>,
    /// Estimated reading time in minutes.
    pub read_time: Option<u32>,
    pub author: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub published_at: OffsetDateTime,
    pub tags: Vec<String>,
    pub views: u32,
    pub likes: u32,
    #[serde(default)]
    pub is_favorite: bool,
}

impl Searchable for Resource {
    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        let mut fields = vec![
            Cow::Borrowed(self.title.as_str()),
            Cow::Borrowed(self.description.as_str()),
        ];
        fields.extend(self.tags.iter().map(|tag| Cow::Borrowed(tag.as_str())));
        fields
    }
}

impl Categorized for Resource {
    type Category = ResourceCategory;

    fn category(&self) -> ResourceCategory {
        self.category
    }
}
