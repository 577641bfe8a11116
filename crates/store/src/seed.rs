//! Demo catalog used to pre-populate development stores.

use catalog_core::ProductId;
use catalog_products::{Financials, NewProduct, Product, SpecValue, Specs};

fn spec_map(entries: Vec<(&str, SpecValue)>) -> Specs {
    entries
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

fn number(value: f64) -> SpecValue {
    SpecValue::number(value).unwrap_or(SpecValue::Text(value.to_string()))
}

/// Three embroidery machines with specs and pricing, each under a fresh id.
pub fn demo_products() -> Vec<Product> {
    vec![
        Product::create(
            ProductId::new(),
            NewProduct {
                model_code: "BEKY-Y912".to_string(),
                commercial_name: "High Speed Machine".to_string(),
                category: "Flat Embroidery".to_string(),
                ncm_code: "8447.90.90".to_string(),
                active: true,
                description: "High speed flat embroidery machine with 12 needles.".to_string(),
                specs: spec_map(vec![
                    ("needles", 12i64.into()),
                    ("heads", 1i64.into()),
                    ("embroidery_field", "500x360mm".into()),
                    ("dimensions", "W1200 x D800 x H1500mm".into()),
                    ("weight_kg", 250i64.into()),
                    ("power_consumption_kw", number(1.5)),
                ]),
            },
            Financials {
                price_net_jpy: 1_500_000.0,
                price_fob_jpy: 1_200_000.0,
                tax_market_rate: 0.035,
                tax_sales_factor: 1.2,
                price_final_brl: 50_000.0,
            },
        ),
        Product::create(
            ProductId::new(),
            NewProduct {
                model_code: "BEXY-S1506C".to_string(),
                commercial_name: "Professional Cylinder Machine".to_string(),
                category: "Cylinder".to_string(),
                ncm_code: "8447.90.90".to_string(),
                active: true,
                description: "Robust machine for cylinder embroidery and assembled pieces."
                    .to_string(),
                specs: spec_map(vec![
                    ("needles", 15i64.into()),
                    ("heads", 6i64.into()),
                    ("embroidery_field", "360x300mm".into()),
                    ("dimensions", "W3000 x D1200 x H1800mm".into()),
                    ("weight_kg", 800i64.into()),
                    ("power_consumption_kw", number(3.0)),
                ]),
            },
            Financials {
                price_net_jpy: 8_000_000.0,
                price_fob_jpy: 6_500_000.0,
                tax_market_rate: 0.035,
                tax_sales_factor: 1.25,
                price_final_brl: 280_000.0,
            },
        ),
        Product::create(
            ProductId::new(),
            NewProduct {
                model_code: "LEM-100".to_string(),
                commercial_name: "Sequin Embroidery Machine".to_string(),
                category: "Special".to_string(),
                ncm_code: "8447.90.90".to_string(),
                active: false,
                description: "Specialized equipment for high-volume sequin application."
                    .to_string(),
                specs: spec_map(vec![
                    ("needles", 9i64.into()),
                    ("heads", 1i64.into()),
                    ("embroidery_field", "400x400mm".into()),
                    ("sequin_device", true.into()),
                    ("dimensions", "W1500 x D900 x H1600mm".into()),
                    ("weight_kg", 350i64.into()),
                    ("power_consumption_kw", number(2.0)),
                ]),
            },
            Financials {
                price_net_jpy: 3_000_000.0,
                price_fob_jpy: 2_500_000.0,
                tax_market_rate: 0.035,
                tax_sales_factor: 1.3,
                price_final_brl: 120_000.0,
            },
        ),
    ]
}
