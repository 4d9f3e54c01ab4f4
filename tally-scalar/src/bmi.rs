//! Body mass index

use serde::Serialize;
use tally_plugin::prelude::*;

use crate::helpers::require_positive;

/// Weight band a BMI falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BmiBand {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiBand {
    /// Band for an already rounded BMI
    pub fn classify(bmi: f64) -> Self {
        if bmi < 18.5 {
            BmiBand::Underweight
        } else if bmi < 25.0 {
            BmiBand::Normal
        } else if bmi < 30.0 {
            BmiBand::Overweight
        } else {
            BmiBand::Obese
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BmiBand::Underweight => "Underweight",
            BmiBand::Normal => "Normal weight",
            BmiBand::Overweight => "Overweight",
            BmiBand::Obese => "Obese",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bmi {
    /// Rounded to two decimals
    pub value: f64,
    pub band: BmiBand,
}

/// BMI from weight in kilograms and height in centimeters
pub fn bmi(weight_kg: f64, height_cm: f64) -> Result<Bmi, TallyError> {
    let weight = require_positive(weight_kg, "weight")?;
    let height = require_positive(height_cm, "height")? / 100.0;

    let value = round_to(weight / (height * height), 2);
    if !value.is_finite() {
        return Err(TallyError::overflow().in_field("weight"));
    }
    Ok(Bmi { value, band: BmiBand::classify(value) })
}

pub struct BmiConverter;

static BMI_EXAMPLES: [&str; 2] = [
    "70 kg, 175 cm = BMI  22.86 / Normal weight",
    "95 kg, 180 cm = BMI  29.32 / Overweight",
];

impl ConverterPlugin for BmiConverter {
    fn meta(&self) -> ConverterMeta {
        ConverterMeta {
            name: "bmi",
            title: "BMI Calculator",
            icon: "⚖",
            description: "Body mass index and weight band",
            fields: vec![
                FieldMeta::entry("weight", "Weight (kg)"),
                FieldMeta::entry("height", "Height (cm)"),
            ],
            failure: "Invalid input",
            examples: &BMI_EXAMPLES,
            category: "health",
        }
    }

    fn compute(&self, fields: &Fields, _ctx: &ConvertContext) -> Result<String, TallyError> {
        let result = bmi(fields.real("weight")?, fields.real("height")?)?;
        Ok(format!("BMI  {}\n{}", format_real(result.value), result.band.label()))
    }
}
