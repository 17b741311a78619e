use serde::Deserialize;
use serde_json::Value;
use validator::Validate;

use crate::domain::geo::Coordinates;
use crate::domain::types::DietaryRestriction;
use crate::forms::FormError;

/// Profile fields supplied on create and on full-replace update.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ProfileForm {
    #[serde(default = "empty_preferences")]
    pub preferences: Value,
    #[validate(range(min = -90.0, max = 90.0))]
    pub home_lat: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub home_lon: f64,
    #[serde(default)]
    pub dietary_restrictions: Vec<String>,
}

fn empty_preferences() -> Value {
    Value::Object(Default::default())
}

/// Validated profile fields.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfilePayload {
    pub preferences: Value,
    pub home: Coordinates,
    pub dietary_restrictions: Vec<DietaryRestriction>,
}

impl TryFrom<ProfileForm> for ProfilePayload {
    type Error = FormError;

    fn try_from(form: ProfileForm) -> Result<Self, Self::Error> {
        form.validate()?;

        // Order is kept; repeated labels collapse onto their first occurrence.
        let mut dietary_restrictions: Vec<DietaryRestriction> = Vec::new();
        for label in form.dietary_restrictions {
            let restriction = DietaryRestriction::new(label)?;
            if !dietary_restrictions.contains(&restriction) {
                dietary_restrictions.push(restriction);
            }
        }

        Ok(Self {
            preferences: if form.preferences.is_null() {
                empty_preferences()
            } else {
                form.preferences
            },
            home: Coordinates::new(form.home_lat, form.home_lon)?,
            dietary_restrictions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deduplicates_restrictions_in_order() {
        let form: ProfileForm = serde_json::from_value(json!({
            "home_lat": 51.5,
            "home_lon": -0.12,
            "dietary_restrictions": ["vegan", " halal ", "vegan"]
        }))
        .unwrap();
        let payload = ProfilePayload::try_from(form).unwrap();
        let labels: Vec<&str> = payload
            .dietary_restrictions
            .iter()
            .map(|r| r.as_str())
            .collect();
        assert_eq!(labels, vec!["vegan", "halal"]);
        assert_eq!(payload.preferences, json!({}));
    }

    #[test]
    fn rejects_blank_restrictions() {
        let form = ProfileForm {
            preferences: json!({"cuisines": ["thai"]}),
            home_lat: 0.0,
            home_lon: 0.0,
            dietary_restrictions: vec!["".into()],
        };
        assert!(matches!(
            ProfilePayload::try_from(form),
            Err(FormError::TypeConstraint(_))
        ));
    }
}
