//! Deterministic content generation for offers.
//!
//! Stands behind the enhancement port without calling out to an external
//! service: the copy is rendered from the offer itself, so repeated
//! enhancement of the same offer produces the same text.

use async_trait::async_trait;
use loadquote_core::offers::ports::{ContentEnhancer, EnhancedContent};
use loadquote_domain::{Offer, Result};

const FUN_FACTS: [&str; 4] = [
    "A modern 40-tonne truck emits about 60% less CO2 per tonne-kilometre than its 1990s counterpart.",
    "Road freight moves roughly three quarters of all inland cargo in the European Union.",
    "The average long-haul truck in Europe covers more than 100,000 km per year.",
    "EU drivers' hours rules cap driving at 9 hours a day, extendable to 10 twice a week.",
];

/// Template-based implementation of the enhancement port.
#[derive(Debug, Default, Clone)]
pub struct TemplateContentEnhancer;

impl TemplateContentEnhancer {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ContentEnhancer for TemplateContentEnhancer {
    async fn enhance_offer(&self, offer: &Offer) -> Result<EnhancedContent> {
        let content = format!(
            "Thank you for considering our transport services. Based on the planned \
             route we can offer this shipment at {} EUR, which includes a {}% margin \
             over our calculated operating costs. The price covers fuel, tolls, driver \
             time and all scheduled stops along the way.",
            offer.final_price, offer.margin_percentage
        );

        // Stable per offer so re-enhancement does not change the stored text.
        let index = (offer.id.as_u128() % FUN_FACTS.len() as u128) as usize;
        let fun_fact = FUN_FACTS[index].to_string();

        Ok(EnhancedContent { content, fun_fact })
    }
}
