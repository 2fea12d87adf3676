use serde::{Deserialize, Serialize};

/// A rentable bike as served by the catalog API
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Bike {
    pub id: i64,
    pub name: String,

    /// Bike category, e.g. "Electric"
    #[serde(rename = "type", default)]
    pub bike_type: Option<String>,

    /// Price per rented day
    pub rate: f64,

    #[serde(default)]
    pub image_urls: Vec<String>,
}

impl Bike {
    pub fn new(id: i64, name: impl Into<String>, rate: f64) -> Self {
        Self {
            id,
            name: name.into(),
            bike_type: None,
            rate,
            image_urls: Vec::new(),
        }
    }

    /// First image, used as the thumbnail
    pub fn primary_image(&self) -> Option<&str> {
        self.image_urls.first().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bike_from_catalog_json() {
        let bike: Bike = serde_json::from_value(serde_json::json!({
            "id": 7,
            "name": "Cannondale",
            "type": "Electric",
            "rate": 20.0,
            "imageUrls": ["https://cdn.example/cannondale.png"]
        }))
        .unwrap();

        assert_eq!(bike.id, 7);
        assert_eq!(bike.bike_type.as_deref(), Some("Electric"));
        assert_eq!(bike.primary_image(), Some("https://cdn.example/cannondale.png"));
    }

    #[test]
    fn test_bike_without_images() {
        let bike: Bike = serde_json::from_value(serde_json::json!({
            "id": 1,
            "name": "City",
            "rate": 12.5
        }))
        .unwrap();

        assert!(bike.primary_image().is_none());
        assert!(bike.bike_type.is_none());
    }
}
