//! Sample listings for a fresh database
//!
//! Each collection is seeded only while it is empty, so restarting with
//! `SEED_DATA=true` never duplicates or overwrites anything.

use crate::core::entity::Data;
use crate::core::error::ApiResult;
use crate::core::query::Filter;
use crate::core::resource::Resource;
use crate::core::validation::ValidatableEntity;
use crate::server::ServerHost;
use serde_json::{Value, json};

/// How many documents each collection received
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub investments: usize,
    pub packages: usize,
}

pub async fn seed_if_empty(host: &ServerHost) -> ApiResult<SeedReport> {
    let report = SeedReport {
        investments: seed_collection(&host.investments, sample_investments()).await?,
        packages: seed_collection(&host.packages, sample_packages()).await?,
    };
    tracing::info!(
        investments = report.investments,
        packages = report.packages,
        "seeding finished"
    );
    Ok(report)
}

async fn seed_collection<T>(resource: &Resource<T>, samples: Vec<Value>) -> ApiResult<usize>
where
    T: Data + ValidatableEntity,
{
    if resource.count(&Filter::new()).await? > 0 {
        tracing::debug!(entity = T::resource_name(), "collection not empty, skipping seed");
        return Ok(0);
    }

    let mut inserted = 0;
    for sample in samples {
        resource.create(T::from_payload(sample)?).await?;
        inserted += 1;
    }
    Ok(inserted)
}

pub fn sample_investments() -> Vec<Value> {
    vec![
        json!({
            "title": "Ocean Front Villa",
            "price": "₹1.95 Cr",
            "size": "3500 sq.ft",
            "bedrooms": "3 Bedrooms",
            "image": "https://images.unsplash.com/photo-1613490493576-7fde63acd811?q=80&w=2071&auto=format&fit=crop",
            "description": "Luxurious oceanfront villa with private pool and direct beach access. Perfect for those seeking privacy and uninterrupted sea views.",
            "features": ["Private Pool", "Direct Beach Access", "Landscaped Garden", "Smart Home Tech", "Luxury Furnishings"],
            "status": "available"
        }),
        json!({
            "title": "Sunset View Residence",
            "price": "₹1.45 Cr",
            "size": "2800 sq.ft",
            "bedrooms": "2 Bedrooms",
            "image": "https://images.unsplash.com/photo-1600596542815-ffad4c1539a9?q=80&w=2075&auto=format&fit=crop",
            "description": "Elevated property with stunning sunset views over the ocean and coastline. Modern architecture with floor-to-ceiling windows.",
            "features": ["Infinity Edge Pool", "Panoramic Views", "Gourmet Kitchen", "Home Office", "Outdoor Dining"],
            "status": "available"
        }),
        json!({
            "title": "Garden Retreat Villa",
            "price": "₹95 Lakhs",
            "size": "2200 sq.ft",
            "bedrooms": "2 Bedrooms",
            "image": "https://images.unsplash.com/photo-1600585154340-be6161a56a0c?q=80&w=2070&auto=format&fit=crop",
            "description": "Serene garden villa surrounded by lush tropical landscaping. Close to resort amenities with private courtyard.",
            "features": ["Tropical Garden", "Courtyard", "Spa Bathroom", "Outdoor Shower", "Walk to Amenities"],
            "status": "available"
        }),
    ]
}

#[allow(clippy::too_many_arguments)]
fn package(
    title: &str,
    alt: &str,
    quote: &str,
    price: &str,
    duration: &str,
    description: &str,
    features: [&str; 4],
    category: &str,
) -> Value {
    json!({
        "title": title,
        "image": "https://images.unsplash.com/photo-1609619385002-f40f1df9b7eb?q=80&w=2070&auto=format&fit=crop",
        "alt": alt,
        "quote": quote,
        "price": price,
        "description": description,
        "duration": duration,
        "features": features,
        "category": category,
        "status": "active"
    })
}

pub fn sample_packages() -> Vec<Value> {
    vec![
        package(
            "Ananta/Holiday Destination",
            "Holiday Resort",
            "Boundless Serenity, Infinite Memories.",
            "₹45,000",
            "3-7 Days",
            "Immerse yourself in the natural beauty of pristine beaches and serene landscapes.",
            [
                "Luxury beach-front accommodation",
                "Guided tours to local attractions",
                "Gourmet dining experiences",
                "Water sports and activities",
            ],
            "holiday",
        ),
        package(
            "Saubhagya/Wedding Destination",
            "Wedding Destination",
            "Where Sacred Bonds Meet Ocean's Eternal Witness",
            "₹3,50,000",
            "3-5 Days",
            "Create unforgettable memories with a dream wedding at our exclusive oceanfront venue.",
            [
                "Beachfront ceremony setups",
                "Customized wedding planning",
                "Luxury accommodation for guests",
                "Professional photography services",
            ],
            "wedding",
        ),
        package(
            "Moksha Yatra/Spiritual Tourism",
            "Spiritual Tourism",
            "The Path to Enlightenment",
            "₹35,000",
            "4-10 Days",
            "Embark on a journey of self-discovery through ancient temples and spiritual retreats.",
            [
                "Guided temple tours",
                "Meditation and yoga sessions",
                "Authentic Ayurvedic treatments",
                "Spiritual discussions with local experts",
            ],
            "spiritual",
        ),
        package(
            "Vishram/Senior Citizen Haven",
            "Senior Citizen Haven",
            "A Haven of Rest & Renewal",
            "₹35,000",
            "4-10 Days",
            "Experience a peaceful retreat designed specifically for senior citizens with all amenities and care.",
            [
                "Accessible accommodations",
                "Medical assistance available",
                "Gentle activities and excursions",
                "24/7 support staff",
            ],
            "senior",
        ),
        package(
            "Vrindavan/NRI Holiday Package",
            "NRI Holiday Package",
            "A Journey Back to Your Roots",
            "₹35,000",
            "4-10 Days",
            "Rediscover your cultural heritage with our specially curated package for NRIs.",
            [
                "Cultural immersion programs",
                "Heritage site visits",
                "Traditional cuisine experiences",
                "Local community interactions",
            ],
            "nri",
        ),
        package(
            "Swa Rachana/Customized Packages",
            "Customized Packages",
            "Your Vision, Our Masterpiece",
            "₹35,000",
            "4-10 Days",
            "Create your perfect vacation with our fully customizable tourism packages.",
            [
                "Tailored itineraries",
                "Flexible duration",
                "Personalized activities",
                "Custom accommodation options",
            ],
            "custom",
        ),
        package(
            "Sangram/Meetings and Seminars",
            "Meetings and Seminars",
            "Where Business Meets Paradise",
            "₹35,000",
            "4-10 Days",
            "Host your corporate events in our state-of-the-art facilities with stunning ocean views.",
            [
                "Modern conference rooms",
                "Audio-visual equipment",
                "Catering services",
                "Team building activities",
            ],
            "meeting",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::entities::investment::Investment;
    use crate::entities::tourism::TourismPackage;

    #[test]
    fn test_samples_are_valid() {
        for sample in sample_investments() {
            Investment::from_payload(sample).unwrap();
        }
        for sample in sample_packages() {
            TourismPackage::from_payload(sample).unwrap();
        }
    }

    #[tokio::test]
    async fn test_seed_only_fills_empty_collections() {
        let host = ServerHost::in_memory(AppConfig::default());

        let first = seed_if_empty(&host).await.unwrap();
        assert_eq!(first.investments, 3);
        assert_eq!(first.packages, 7);

        let second = seed_if_empty(&host).await.unwrap();
        assert_eq!(second, SeedReport::default());
        assert_eq!(host.packages.count(&Filter::new()).await.unwrap(), 7);
    }
}
