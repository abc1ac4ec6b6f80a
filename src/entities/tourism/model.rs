//! Tourism package document

use crate::core::entity::Data;
use crate::core::field::FieldValue;
use crate::core::validation::{EntityValidationConfig, ValidatableEntity, filters, validators};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

crate::wire_enum!(
    /// Package catalogue section
    PackageCategory {
        Holiday => "holiday",
        Wedding => "wedding",
        Spiritual => "spiritual",
        Senior => "senior",
        Nri => "nri",
        Custom => "custom",
        Meeting => "meeting",
    } default Holiday
);

crate::wire_enum!(
    /// Whether the package is offered
    PackageStatus {
        Active => "active",
        Inactive => "inactive",
        ComingSoon => "coming_soon",
    } default Active
);

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TourismPackage {
    pub id: Uuid,
    pub title: String,
    pub image: String,
    pub alt: String,
    pub quote: String,
    pub price: String,
    pub description: String,
    pub duration: String,
    pub features: Vec<String>,
    pub category: PackageCategory,
    #[serde(default)]
    pub status: PackageStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

crate::impl_entity!(TourismPackage, "tourisms", "tourism", "Tourism package");
crate::impl_has_status!(TourismPackage, PackageStatus);

impl Data for TourismPackage {
    fn indexed_fields() -> &'static [&'static str] {
        &["category", "status"]
    }

    fn field_value(&self, field: &str) -> Option<FieldValue> {
        match field {
            "id" => Some(self.id.into()),
            "title" => Some(self.title.as_str().into()),
            "category" => Some(self.category.as_str().into()),
            "status" => Some(self.status.as_str().into()),
            "createdAt" => Some(self.created_at.into()),
            "updatedAt" => Some(self.updated_at.into()),
            _ => None,
        }
    }
}

impl ValidatableEntity for TourismPackage {
    fn validation_config() -> EntityValidationConfig {
        let mut config = EntityValidationConfig::new().status_in(PackageStatus::ALLOWED);
        for field in [
            "title",
            "image",
            "alt",
            "quote",
            "price",
            "description",
            "duration",
            "features",
            "category",
        ] {
            config = config.require(field);
        }

        config
            .filter("title", filters::trim())
            .filter("features", filters::trim_items())
            .validate("features", validators::non_empty_items())
            .validate("category", validators::in_list(PackageCategory::ALLOWED))
    }
}
