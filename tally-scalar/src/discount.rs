//! Price after a percentage discount

use serde::Serialize;
use tally_plugin::prelude::*;

use crate::helpers::require_non_negative;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Discount {
    pub saved: f64,
    pub final_price: f64,
}

/// Amount saved and final price, both rounded to cents.
///
/// The final price is taken from the rounded saving.
pub fn discount(price: f64, percent: f64) -> Result<Discount, TallyError> {
    let price = require_non_negative(price, "price")?;
    let saved = round_to(price * percent / 100.0, 2);
    let final_price = round_to(price - saved, 2);
    Ok(Discount { saved, final_price })
}

pub struct DiscountConverter;

static DISCOUNT_EXAMPLES: [&str; 1] = ["199.99 at 15% = Save  30.0 / Final  169.99"];

impl ConverterPlugin for DiscountConverter {
    fn meta(&self) -> ConverterMeta {
        ConverterMeta {
            name: "discount",
            title: "Discount",
            icon: "🏷",
            description: "Saving and final price after a percentage discount",
            fields: vec![
                FieldMeta::entry("price", "Original Price"),
                FieldMeta::entry("discount", "Discount  (%)"),
            ],
            failure: "Invalid input",
            examples: &DISCOUNT_EXAMPLES,
            category: "money",
        }
    }

    fn compute(&self, fields: &Fields, _ctx: &ConvertContext) -> Result<String, TallyError> {
        let result = discount(fields.real("price")?, fields.real("discount")?)?;
        Ok(format!(
            "Save  {}\nFinal  {}",
            format_real(result.saved),
            format_real(result.final_price)
        ))
    }
}
