//! Registration lifecycle across collections
//!
//! Creating a registration is a read of the referenced property or package,
//! a write of the registration, and (for properties) an append to the
//! property's `registrations` list. Deleting one is the mirror image. The
//! two writes are independent: a failure of the second is reported but the
//! first is not undone.

use super::model::{Registration, RegistrationTarget};
use crate::core::error::{ApiResult, EntityError, StorageError, ValidationError};
use crate::core::extractors::parse_reference;
use crate::core::query::{Filter, Page, PaginationMeta};
use crate::core::resource::Resource;
use crate::core::service::{DataService, InvestmentStore, ReferenceList};
use crate::core::validation::ValidatableEntity;
use crate::entities::investment::{Investment, REGISTRATIONS_FIELD};
use crate::entities::tourism::TourismPackage;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

/// Label used when a referenced property does not resolve
pub const PROPERTY_LABEL: &str = "Property";

/// Label used when a referenced package does not resolve
pub const PACKAGE_LABEL: &str = "Tourism package";

/// A registration with its referenced document embedded
#[derive(Debug, Clone, Serialize)]
pub struct Populated<P> {
    #[serde(flatten)]
    pub registration: Registration,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property: Option<P>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package: Option<TourismPackage>,
}

/// The slice of a property shown next to its registrations
#[derive(Debug, Clone, Serialize)]
pub struct PropertySummary {
    pub id: Uuid,
    pub title: String,
    pub price: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bedrooms: Option<String>,
}

impl PropertySummary {
    /// `{id, title, price}`
    pub fn brief(investment: &Investment) -> Self {
        Self {
            id: investment.id,
            title: investment.title.clone(),
            price: investment.price.clone(),
            size: None,
            bedrooms: None,
        }
    }

    /// `{id, title, price, size, bedrooms}`
    pub fn detailed(investment: &Investment) -> Self {
        Self {
            size: Some(investment.size.clone()),
            bedrooms: Some(investment.bedrooms.clone()),
            ..Self::brief(investment)
        }
    }
}

#[derive(Clone)]
pub struct RegistrationService {
    registrations: Resource<Registration>,
    investments: Arc<dyn InvestmentStore>,
    packages: Resource<TourismPackage>,
}

impl RegistrationService {
    pub fn new(
        registrations: Resource<Registration>,
        investments: Arc<dyn InvestmentStore>,
        packages: Resource<TourismPackage>,
    ) -> Self {
        Self {
            registrations,
            investments,
            packages,
        }
    }

    pub fn registrations(&self) -> &Resource<Registration> {
        &self.registrations
    }

    /// File a new registration
    ///
    /// 1. the discriminator must come with its reference id (400)
    /// 2. every other field is validated (400)
    /// 3. the referenced document must exist (404)
    /// 4. the registration is stored with status `pending`
    /// 5. property registrations are appended to the property
    pub async fn register(&self, mut payload: Value) -> ApiResult<Registration> {
        check_discriminator(&payload)?;

        if let Some(obj) = payload.as_object_mut() {
            obj.remove("status");
        }
        let payload = Registration::validate_payload(payload)?;

        match payload.get("type").and_then(Value::as_str) {
            Some("investment") => {
                let id = self.resolve_property(payload.get("propertyId")).await?;
                tracing::debug!(property = %id, "registration target resolved");
            }
            _ => {
                let id = self.resolve_package(payload.get("packageId")).await?;
                tracing::debug!(package = %id, "registration target resolved");
            }
        }

        let registration = Registration::from_payload(payload)?;
        let registration = self.registrations.create(registration).await?;

        if let RegistrationTarget::Investment { property_id } = registration.target {
            self.link(property_id, registration.id).await?;
        }

        Ok(registration)
    }

    /// Delete a registration and prune it from its property, best effort
    pub async fn remove(&self, raw_id: &str) -> ApiResult<Registration> {
        let removed = self.registrations.delete(raw_id).await?;

        if let RegistrationTarget::Investment { property_id } = removed.target {
            match self
                .investments
                .pull_reference(&property_id, REGISTRATIONS_FIELD, removed.id)
                .await
            {
                Ok(true) => {}
                Ok(false) => tracing::debug!(
                    property = %property_id,
                    registration = %removed.id,
                    "property already gone, nothing to prune"
                ),
                Err(e) => tracing::warn!(
                    property = %property_id,
                    registration = %removed.id,
                    error = %e,
                    "failed to prune registration from property"
                ),
            }
        }

        Ok(removed)
    }

    /// Paginated registrations with `{id, title, price}` of their property
    pub async fn page_with_properties(
        &self,
        filter: &Filter,
        page: Page,
    ) -> ApiResult<(Vec<Populated<PropertySummary>>, PaginationMeta)> {
        let (items, meta) = self.registrations.page(filter, page).await?;
        let mut cache = HashMap::new();
        let mut rows = Vec::with_capacity(items.len());

        for registration in items {
            let property = match registration.target.property_id() {
                Some(id) => self.cached_property(&mut cache, id).await?,
                None => None,
            };
            rows.push(Populated {
                registration,
                property: property.as_ref().map(PropertySummary::brief),
                package: None,
            });
        }

        Ok((rows, meta))
    }

    /// Embed the full referenced property or package
    pub async fn populate_all(
        &self,
        registrations: Vec<Registration>,
    ) -> ApiResult<Vec<Populated<Investment>>> {
        let mut properties = HashMap::new();
        let mut packages = HashMap::new();
        let mut rows = Vec::with_capacity(registrations.len());

        for registration in registrations {
            let row = match registration.target {
                RegistrationTarget::Investment { property_id } => Populated {
                    property: self.cached_property(&mut properties, property_id).await?,
                    package: None,
                    registration,
                },
                RegistrationTarget::Tourism { package_id } => {
                    let package = match packages.get(&package_id) {
                        Some(cached) => Option::clone(cached),
                        None => {
                            let fetched = self.packages.get(&package_id).await?;
                            packages.insert(package_id, fetched.clone());
                            fetched
                        }
                    };
                    Populated {
                        property: None,
                        package,
                        registration,
                    }
                }
            };
            rows.push(row);
        }

        Ok(rows)
    }

    pub async fn populate(&self, registration: Registration) -> ApiResult<Populated<Investment>> {
        let mut rows = self.populate_all(vec![registration]).await?;
        rows.pop()
            .ok_or_else(|| EntityError::not_found("Registration", "").into())
    }

    /// A registration with `{id, title, price, size, bedrooms}` of its property
    pub async fn with_property_details(
        &self,
        registration: Registration,
    ) -> ApiResult<Populated<PropertySummary>> {
        let property = match registration.target.property_id() {
            Some(id) => self.property(&id).await?,
            None => None,
        };

        Ok(Populated {
            registration,
            property: property.as_ref().map(PropertySummary::detailed),
            package: None,
        })
    }

    async fn property(&self, id: &Uuid) -> ApiResult<Option<Investment>> {
        Ok(self
            .investments
            .get(id)
            .await
            .map_err(|e| StorageError::failed("fetching", "investment", e))?)
    }

    async fn cached_property(
        &self,
        cache: &mut HashMap<Uuid, Option<Investment>>,
        id: Uuid,
    ) -> ApiResult<Option<Investment>> {
        if let Some(cached) = cache.get(&id) {
            return Ok(cached.clone());
        }
        let fetched = self.property(&id).await?;
        cache.insert(id, fetched.clone());
        Ok(fetched)
    }

    async fn resolve_property(&self, raw: Option<&Value>) -> ApiResult<Uuid> {
        let not_found = || EntityError::reference_not_found(PROPERTY_LABEL, display(raw));
        let id = parse_reference(raw).ok_or_else(not_found)?;
        match self.property(&id).await? {
            Some(_) => Ok(id),
            None => Err(not_found().into()),
        }
    }

    async fn resolve_package(&self, raw: Option<&Value>) -> ApiResult<Uuid> {
        let not_found = || EntityError::reference_not_found(PACKAGE_LABEL, display(raw));
        let id = parse_reference(raw).ok_or_else(not_found)?;
        match self.packages.get(&id).await? {
            Some(_) => Ok(id),
            None => Err(not_found().into()),
        }
    }

    async fn link(&self, property_id: Uuid, registration_id: Uuid) -> ApiResult<()> {
        let linked = self
            .investments
            .push_reference(&property_id, REGISTRATIONS_FIELD, registration_id)
            .await
            .map_err(|e| {
                tracing::warn!(
                    property = %property_id,
                    registration = %registration_id,
                    error = %e,
                    "registration stored but not linked to property"
                );
                StorageError::failed("updating", "investment", e)
            })?;

        if !linked {
            tracing::warn!(
                property = %property_id,
                registration = %registration_id,
                "property vanished before the registration could be linked"
            );
            return Err(EntityError::reference_not_found(PROPERTY_LABEL, property_id).into());
        }

        Ok(())
    }
}

/// Step 1: `type` must come with its own reference id
fn check_discriminator(payload: &Value) -> Result<(), ValidationError> {
    let present = |field: &str| {
        payload
            .get(field)
            .and_then(Value::as_str)
            .is_some_and(|s| !s.trim().is_empty())
    };

    match payload.get("type").and_then(Value::as_str) {
        Some("investment") if !present("propertyId") => Err(ValidationError::MissingReference {
            label: "Property ID",
            kind: "investment",
        }),
        Some("tourism") if !present("packageId") => Err(ValidationError::MissingReference {
            label: "Package ID",
            kind: "tourism",
        }),
        _ => Ok(()),
    }
}

fn display(raw: Option<&Value>) -> String {
    match raw {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_discriminator_requires_matching_reference() {
        let err = check_discriminator(&json!({"type": "investment", "packageId": "x"})).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Property ID is required for investment registration"
        );

        let err = check_discriminator(&json!({"type": "tourism", "packageId": "  "})).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Package ID is required for tourism registration"
        );

        assert!(check_discriminator(&json!({"type": "tourism", "packageId": "x"})).is_ok());
        assert!(check_discriminator(&json!({"name": "no type"})).is_ok());
    }

    #[test]
    fn test_property_summary_shapes() {
        let investment = Investment::from_payload(json!({
            "title": "Garden Retreat Villa",
            "price": "₹ 3.2 Cr",
            "size": "3200 sq ft",
            "bedrooms": "3 BHK",
            "image": "/images/villa3.jpg",
            "description": "Villa in landscaped gardens",
            "features": ["Garden"]
        }))
        .unwrap();

        let brief = serde_json::to_value(PropertySummary::brief(&investment)).unwrap();
        assert_eq!(brief.as_object().unwrap().len(), 3);

        let detailed = serde_json::to_value(PropertySummary::detailed(&investment)).unwrap();
        assert_eq!(detailed["bedrooms"], "3 BHK");
        assert_eq!(detailed["size"], "3200 sq ft");
    }
}
