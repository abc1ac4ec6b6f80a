//! Server host: every store, resource and descriptor the API needs
//!
//! The host is built once at startup and owns the storage handles. Routers
//! are derived from it; nothing else holds a store.

use crate::auth::Authenticator;
use crate::config::{AppConfig, StorageBackend};
use crate::core::resource::Resource;
use crate::core::service::{DataService, InvestmentStore};
use crate::entities::booking::{Booking, BookingDescriptor};
use crate::entities::dashboard::{DashboardDescriptor, DashboardService};
use crate::entities::form_response::{FormResponse, FormResponseDescriptor};
use crate::entities::investment::{Investment, InvestmentDescriptor};
use crate::entities::registration::{
    PropertyRegistrationDescriptor, Registration, RegistrationDescriptor, RegistrationService,
};
use crate::entities::tourism::{TourismDescriptor, TourismPackage};
use crate::entities::user::{User, UserDescriptor};
use crate::server::entity_registry::EntityRegistry;
use crate::storage::InMemoryDataService;
use anyhow::Result;
use std::sync::Arc;

/// One store per collection
///
/// Investments appear twice: once as plain documents and once with
/// back-reference operations. Both handles point at the same store.
pub struct Stores {
    pub bookings: Arc<dyn DataService<Booking>>,
    pub investments: Arc<dyn DataService<Investment>>,
    pub investment_refs: Arc<dyn InvestmentStore>,
    pub packages: Arc<dyn DataService<TourismPackage>>,
    pub registrations: Arc<dyn DataService<Registration>>,
    pub form_responses: Arc<dyn DataService<FormResponse>>,
    pub users: Arc<dyn DataService<User>>,
}

impl Stores {
    pub fn in_memory() -> Self {
        let investments = Arc::new(InMemoryDataService::<Investment>::new());
        Self {
            bookings: Arc::new(InMemoryDataService::<Booking>::new()),
            investments: investments.clone(),
            investment_refs: investments,
            packages: Arc::new(InMemoryDataService::<TourismPackage>::new()),
            registrations: Arc::new(InMemoryDataService::<Registration>::new()),
            form_responses: Arc::new(InMemoryDataService::<FormResponse>::new()),
            users: Arc::new(InMemoryDataService::<User>::new()),
        }
    }

    /// Collections in `database`, with the unique index on user emails
    #[cfg(feature = "mongodb_backend")]
    pub async fn mongodb(database: mongodb::Database) -> Result<Self> {
        use crate::storage::MongoDataService;

        let users = MongoDataService::<User>::new(database.clone());
        users.ensure_unique("email").await?;

        let investments = Arc::new(MongoDataService::<Investment>::new(database.clone()));
        Ok(Self {
            bookings: Arc::new(MongoDataService::<Booking>::new(database.clone())),
            investments: investments.clone(),
            investment_refs: investments,
            packages: Arc::new(MongoDataService::<TourismPackage>::new(database.clone())),
            registrations: Arc::new(MongoDataService::<Registration>::new(database.clone())),
            form_responses: Arc::new(MongoDataService::<FormResponse>::new(database)),
            users: Arc::new(users),
        })
    }
}

/// Host context containing all application state
pub struct ServerHost {
    pub config: Arc<AppConfig>,
    pub bookings: Resource<Booking>,
    pub investments: Resource<Investment>,
    pub packages: Resource<TourismPackage>,
    pub registrations: RegistrationService,
    pub form_responses: Resource<FormResponse>,
    pub users: Resource<User>,
    pub auth: Authenticator,

    /// Entity registry for the `/api` routes
    pub entity_registry: EntityRegistry,
}

impl ServerHost {
    pub fn new(config: AppConfig, stores: Stores) -> Self {
        let auth = Authenticator::from_config(&config);

        let bookings = Resource::new(stores.bookings);
        let investments = Resource::new(stores.investments);
        let packages = Resource::new(stores.packages);
        let form_responses = Resource::new(stores.form_responses);
        let users = Resource::new(stores.users);
        let registrations = RegistrationService::new(
            Resource::new(stores.registrations),
            stores.investment_refs,
            packages.clone(),
        );

        let mut entity_registry = EntityRegistry::new();
        entity_registry.register(Box::new(BookingDescriptor::new(bookings.clone())));
        entity_registry.register(Box::new(InvestmentDescriptor::new(investments.clone())));
        entity_registry.register(Box::new(TourismDescriptor::new(packages.clone())));
        entity_registry.register(Box::new(RegistrationDescriptor::new(
            registrations.clone(),
        )));
        entity_registry.register(Box::new(PropertyRegistrationDescriptor::new(
            registrations.clone(),
        )));
        entity_registry.register(Box::new(FormResponseDescriptor::new(
            form_responses.clone(),
            investments.clone(),
            packages.clone(),
        )));
        entity_registry.register(Box::new(UserDescriptor::new(users.clone(), auth.clone())));
        entity_registry.register(Box::new(DashboardDescriptor::new(DashboardService {
            bookings: bookings.clone(),
            investments: investments.clone(),
            packages: packages.clone(),
            responses: form_responses.clone(),
        })));

        Self {
            config: Arc::new(config),
            bookings,
            investments,
            packages,
            registrations,
            form_responses,
            users,
            auth,
            entity_registry,
        }
    }

    /// Host over fresh in-memory stores
    pub fn in_memory(config: AppConfig) -> Self {
        Self::new(config, Stores::in_memory())
    }

    #[cfg(feature = "mongodb_backend")]
    pub async fn mongodb(config: AppConfig, database: mongodb::Database) -> Result<Self> {
        let stores = Stores::mongodb(database).await?;
        Ok(Self::new(config, stores))
    }

    /// Open the backend named by `config.storage`
    pub async fn connect(config: AppConfig) -> Result<Self> {
        match config.storage {
            StorageBackend::Memory => {
                tracing::info!("using in-memory storage");
                Ok(Self::in_memory(config))
            }
            #[cfg(feature = "mongodb_backend")]
            StorageBackend::Mongodb => {
                let uri = config
                    .mongo_uri
                    .clone()
                    .ok_or_else(|| anyhow::anyhow!("MONGO_URI is required for the mongodb backend"))?;
                let client = mongodb::Client::with_uri_str(&uri).await?;
                let database = client.database(&config.database_name);
                tracing::info!(database = %config.database_name, "connected to MongoDB");
                Self::mongodb(config, database).await
            }
            #[cfg(not(feature = "mongodb_backend"))]
            StorageBackend::Mongodb => Err(anyhow::anyhow!(
                "storage backend 'mongodb' requires the mongodb_backend feature"
            )),
        }
    }

    /// Registered entity types
    pub fn entity_types(&self) -> Vec<&str> {
        self.entity_registry.entity_types()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_host_registers_every_resource() {
        let host = ServerHost::in_memory(AppConfig::default());
        let mut types = host.entity_types();
        types.sort();

        assert_eq!(
            types,
            vec![
                "booking",
                "dashboard",
                "form_response",
                "investment",
                "property_registration",
                "registration",
                "tourism",
                "user",
            ]
        );
    }

    #[test]
    fn test_auth_follows_config() {
        let host = ServerHost::in_memory(AppConfig::default());
        assert!(!host.auth.tokens.is_configured());

        let host = ServerHost::in_memory(AppConfig {
            jwt_secret: Some("secret".into()),
            ..AppConfig::default()
        });
        assert!(host.auth.tokens.is_configured());
    }

    #[cfg(not(feature = "mongodb_backend"))]
    #[tokio::test]
    async fn test_connect_without_mongodb_feature_fails() {
        let config = AppConfig {
            storage: StorageBackend::Mongodb,
            ..AppConfig::default()
        };
        assert!(ServerHost::connect(config).await.is_err());
    }
}
