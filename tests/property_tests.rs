//! Property-based tests for catalog filtering and CSV export.

use bol_api::catalog::{ClientFilter, ProductFilter};
use bol_api::models::{Client, Product, CLIENT_COLUMNS, PRODUCT_COLUMNS};
use bol_api::services::export::{from_csv, to_csv};
use proptest::prelude::*;
use rust_decimal::Decimal;

// Printable text without surrounding whitespace; may contain commas and quotes.
fn field_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[A-Za-z0-9][A-Za-z0-9 ,\"%.-]{0,18}[A-Za-z0-9]",
    ]
}

fn status_strategy() -> impl Strategy<Value = String> {
    prop_oneof![Just("Active"), Just("Inactive"), Just("")].prop_map(String::from)
}

fn weight_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..100_000).prop_map(|cents| Decimal::new(cents, 2))
}

prop_compose! {
    fn product_strategy()(
        id in proptest::option::of(1i64..10_000),
        name in field_strategy(),
        code in "[A-Z]{2,3}[0-9]{3,4}",
        description in field_strategy(),
        hazardous in any::<bool>(),
        hazmat_class in field_strategy(),
        net_weight in weight_strategy(),
        gross_weight in weight_strategy(),
        active_status in status_strategy(),
    ) -> Product {
        Product {
            id,
            name,
            code,
            unit_of_measure: "LB".to_string(),
            description,
            grade: String::new(),
            nmfc_number: String::new(),
            freight_class: "85".to_string(),
            packing_group: String::new(),
            net_weight,
            gross_weight,
            stackable: String::new(),
            hazardous,
            hazmat_class,
            non_hazmat_class: String::new(),
            account: String::new(),
            price: Decimal::ZERO,
            active_status,
        }
    }
}

prop_compose! {
    fn client_strategy()(
        name in field_strategy(),
        code in "[A-Z]{3}[0-9]{3}",
        address in field_strategy(),
        city in field_strategy(),
        state in "[A-Z]{2}",
        zip in "[0-9]{5}",
        status in status_strategy(),
    ) -> Client {
        Client {
            name,
            code,
            address,
            city,
            state,
            zip,
            phone: String::new(),
            email: String::new(),
            contact_person: String::new(),
            status,
        }
    }
}

fn search_strategy() -> impl Strategy<Value = Option<String>> {
    proptest::option::of("[a-zA-Z0-9 ]{0,4}")
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn product_filter_is_idempotent(
        products in prop::collection::vec(product_strategy(), 0..20),
        active_only in any::<bool>(),
        hazmat_only in any::<bool>(),
        search in search_strategy(),
    ) {
        let filter = ProductFilter { active_only, hazmat_only, search };
        let once = filter.apply(&products);
        let twice = filter.apply(&once);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn product_filter_results_all_match(
        products in prop::collection::vec(product_strategy(), 0..20),
        search in search_strategy(),
    ) {
        let filter = ProductFilter { active_only: true, hazmat_only: true, search };
        for product in filter.apply(&products) {
            prop_assert!(product.is_active());
            prop_assert!(product.hazardous);
        }
    }

    #[test]
    fn active_only_commutes_with_search(
        clients in prop::collection::vec(client_strategy(), 0..20),
        search in search_strategy(),
    ) {
        let active = ClientFilter { active_only: true, search: None };
        let searched = ClientFilter { active_only: false, search: search.clone() };
        let combined = ClientFilter { active_only: true, search };

        let a = searched.apply(&active.apply(&clients));
        let b = active.apply(&searched.apply(&clients));
        prop_assert_eq!(&a, &b);
        prop_assert_eq!(a, combined.apply(&clients));
    }

    #[test]
    fn product_csv_round_trips(products in prop::collection::vec(product_strategy(), 0..10)) {
        let csv = to_csv(&PRODUCT_COLUMNS, &products).unwrap();
        prop_assert_eq!(csv.lines().count(), products.len() + 1);
        let parsed: Vec<Product> = from_csv(&csv).unwrap();
        prop_assert_eq!(parsed, products);
    }

    #[test]
    fn client_csv_round_trips(clients in prop::collection::vec(client_strategy(), 0..10)) {
        let csv = to_csv(&CLIENT_COLUMNS, &clients).unwrap();
        let parsed: Vec<Client> = from_csv(&csv).unwrap();
        prop_assert_eq!(parsed, clients);
    }
}

#[test]
fn quoted_description_survives_export() {
    let mut product = bol_api::seed::sample_products().remove(0);
    product.description = "Acid, concentrated".to_string();

    let csv = to_csv(&PRODUCT_COLUMNS, std::slice::from_ref(&product)).unwrap();
    assert!(csv.contains("\"Acid, concentrated\""));

    let parsed: Vec<Product> = from_csv(&csv).unwrap();
    assert_eq!(parsed, vec![product]);
}
