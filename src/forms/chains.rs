use chrono::Utc;
use serde::Deserialize;
use validator::Validate;

use crate::domain::chain::NewRestaurantChain;
use crate::domain::types::{ChainDescription, ChainName, WebsiteUrl};
use crate::forms::{FormError, non_blank};

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct AddChainForm {
    #[validate(length(min = 1))]
    pub name: String,
    pub website: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 1000, max = 2100))]
    pub founded_year: Option<i32>,
}

impl TryFrom<AddChainForm> for NewRestaurantChain {
    type Error = FormError;

    fn try_from(form: AddChainForm) -> Result<Self, Self::Error> {
        form.validate()?;

        Ok(Self {
            name: ChainName::new(form.name)?,
            website: non_blank(form.website).map(WebsiteUrl::new).transpose()?,
            description: non_blank(form.description)
                .map(ChainDescription::new)
                .transpose()?,
            founded_year: form.founded_year,
            created_at: Utc::now().naive_utc(),
        })
    }
}
