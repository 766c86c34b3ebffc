use std::collections::BTreeMap;

use chrono::DateTime;

use catalog_pricing_engine::{
    error::EngineError,
    models::{
        Condition, ConfigSelection, ConfigurationVariant, DEFAULT_WARRANTY_ID, PriceTier, Product,
        VariantKind, WarrantyOption,
    },
    services::pricing_service,
};

#[test]
fn retail_quote_adds_config_and_warranty_to_base() -> anyhow::Result<()> {
    let product = configurable_laptop();
    let selection = ConfigSelection::new("32GB", "1TB");
    let quote = pricing_service::quote(&product, &selection, Some("24 Months"), 1)?;
    assert_eq!(quote.unit_price, 54500);
    assert_eq!(quote.tier, PriceTier::Retail);
    Ok(())
}

#[test]
fn bulk_quote_falls_back_to_discounted_base_price() -> anyhow::Result<()> {
    // no bulk price on the product: base becomes 50000 * 0.85
    let product = configurable_laptop();
    let selection = ConfigSelection::new("32GB", "1TB");
    let quote = pricing_service::quote(&product, &selection, Some("24 Months"), 10)?;
    assert_eq!(quote.unit_price, 47000);
    assert_eq!(quote.tier, PriceTier::Bulk);
    Ok(())
}

#[test]
fn bulk_quote_prefers_the_explicit_bulk_price() -> anyhow::Result<()> {
    let mut product = configurable_laptop();
    product.bulk_price = Some(45000);
    let selection = ConfigSelection::new("16GB", "512GB");
    let quote = pricing_service::quote(&product, &selection, None, 12)?;
    assert_eq!(quote.unit_price, 45000);
    Ok(())
}

#[test]
fn tier_boundary_is_inclusive_at_ten_units() -> anyhow::Result<()> {
    let product = configurable_laptop();
    let selection = ConfigSelection::defaults_for(&product);

    assert_eq!(pricing_service::tier_for_quantity(9), PriceTier::Retail);
    assert_eq!(pricing_service::tier_for_quantity(10), PriceTier::Bulk);

    let retail = pricing_service::quote(&product, &selection, None, 9)?;
    assert_eq!(retail.tier, PriceTier::Retail);
    let bulk = pricing_service::quote(&product, &selection, None, 10)?;
    assert_eq!(bulk.tier, PriceTier::Bulk);
    Ok(())
}

#[test]
fn default_selection_picks_zero_adjustment_variants() -> anyhow::Result<()> {
    let product = configurable_laptop();
    let selection = ConfigSelection::defaults_for(&product);
    assert_eq!(selection, ConfigSelection::new("16GB", "512GB"));
    let quote = pricing_service::quote(&product, &selection, None, 1)?;
    assert_eq!(quote.unit_price, 50000);
    Ok(())
}

#[test]
fn missing_configuration_selection_is_refused() {
    let product = configurable_laptop();

    let no_memory = ConfigSelection {
        memory: None,
        storage: Some("1TB".to_string()),
    };
    assert_eq!(
        pricing_service::quote(&product, &no_memory, None, 1),
        Err(EngineError::ConfigurationRequired(VariantKind::Memory))
    );

    let blank_storage = ConfigSelection {
        memory: Some("16GB".to_string()),
        storage: Some(String::new()),
    };
    assert_eq!(
        pricing_service::quote(&product, &blank_storage, None, 1),
        Err(EngineError::ConfigurationRequired(VariantKind::Storage))
    );
}

#[test]
fn products_without_variants_need_no_selection() -> anyhow::Result<()> {
    let product = bare_laptop(30000);
    let quote = pricing_service::quote(&product, &ConfigSelection::default(), None, 1)?;
    assert_eq!(quote.unit_price, 30000);
    Ok(())
}

#[test]
fn unknown_warranty_and_variant_fall_back_to_zero() -> anyhow::Result<()> {
    let product = configurable_laptop();

    // stale warranty id costs nothing rather than failing the session
    let selection = ConfigSelection::new("32GB", "1TB");
    let quote = pricing_service::quote(&product, &selection, Some("99 Months"), 1)?;
    assert_eq!(quote.unit_price, 53000);

    // selected variant no longer in the catalog: adjustment is zero
    let stale = ConfigSelection::new("64GB", "1TB");
    let quote = pricing_service::quote(&product, &stale, None, 1)?;
    assert_eq!(quote.unit_price, 51000);
    Ok(())
}

#[test]
fn default_warranty_id_costs_nothing() -> anyhow::Result<()> {
    let product = configurable_laptop();
    let selection = ConfigSelection::new("16GB", "512GB");
    let quote = pricing_service::quote(&product, &selection, Some(DEFAULT_WARRANTY_ID), 1)?;
    assert_eq!(quote.unit_price, 50000);
    Ok(())
}

#[test]
fn unit_price_never_goes_negative() -> anyhow::Result<()> {
    let mut product = bare_laptop(1000);
    product.configuration_variants = vec![ConfigurationVariant {
        kind: VariantKind::Memory,
        value: "4GB".to_string(),
        price_adjustment: -5000,
    }];
    let selection = ConfigSelection {
        memory: Some("4GB".to_string()),
        storage: None,
    };
    let quote = pricing_service::quote(&product, &selection, None, 1)?;
    assert_eq!(quote.unit_price, 0);
    Ok(())
}

#[test]
fn zero_quantity_is_rejected() {
    let product = bare_laptop(30000);
    assert!(matches!(
        pricing_service::quote(&product, &ConfigSelection::default(), None, 0),
        Err(EngineError::BadRequest(_))
    ));
}

#[test]
fn warranty_choices_start_with_the_included_default() {
    let product = configurable_laptop();
    let choices = product.warranty_choices();
    assert_eq!(choices[0].id, DEFAULT_WARRANTY_ID);
    assert_eq!(choices[0].label, "12 Months");
    assert_eq!(choices[0].price, 0);
    assert_eq!(choices[1].id, "24 Months");
    assert_eq!(choices[1].price, 1500);
}

fn bare_laptop(base_price: i64) -> Product {
    Product {
        id: "laptop-1".to_string(),
        name: "Inspiron 15".to_string(),
        brand: "Dell".to_string(),
        category: "laptops".to_string(),
        base_price,
        mrp: None,
        bulk_price: None,
        discount_percentage: 0.0,
        rating: 0.0,
        reviews_count: 0,
        sold_count: 0,
        condition: Condition::New,
        is_active: true,
        specifications: BTreeMap::new(),
        configuration_variants: Vec::new(),
        warranty_options: Vec::new(),
        default_warranty: None,
        created_at: DateTime::UNIX_EPOCH,
    }
}

fn configurable_laptop() -> Product {
    let mut product = bare_laptop(50000);
    product.configuration_variants = vec![
        ConfigurationVariant {
            kind: VariantKind::Memory,
            value: "16GB".to_string(),
            price_adjustment: 0,
        },
        ConfigurationVariant {
            kind: VariantKind::Memory,
            value: "32GB".to_string(),
            price_adjustment: 2000,
        },
        ConfigurationVariant {
            kind: VariantKind::Storage,
            value: "512GB".to_string(),
            price_adjustment: 0,
        },
        ConfigurationVariant {
            kind: VariantKind::Storage,
            value: "1TB".to_string(),
            price_adjustment: 1000,
        },
    ];
    product.warranty_options = vec![WarrantyOption {
        duration: "24 Months".to_string(),
        price: 1500,
    }];
    product.default_warranty = Some("12 Months".to_string());
    product
}
