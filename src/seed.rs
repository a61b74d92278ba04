//! Demonstration catalog used to populate empty stores and as the client's
//! offline fallback.

use crate::models::{Client, Product, ACTIVE_STATUS};
use rust_decimal_macros::dec;

fn hazmat_drum(id: i64, name: &str, code: &str) -> Product {
    Product {
        id: Some(id),
        name: name.to_string(),
        code: code.to_string(),
        unit_of_measure: "LB".to_string(),
        description: String::new(),
        grade: "Technical".to_string(),
        nmfc_number: String::new(),
        freight_class: "85".to_string(),
        packing_group: "II".to_string(),
        net_weight: dec!(55),
        gross_weight: dec!(58),
        stackable: "No".to_string(),
        hazardous: true,
        hazmat_class: "8".to_string(),
        non_hazmat_class: String::new(),
        account: String::new(),
        price: dec!(0),
        active_status: ACTIVE_STATUS.to_string(),
    }
}

/// Five representative products; ids 1 through 5.
pub fn sample_products() -> Vec<Product> {
    vec![
        Product {
            description: "Concentrated sulfuric acid 93-98%".to_string(),
            nmfc_number: "45615".to_string(),
            account: "ACIDS".to_string(),
            price: dec!(1.25),
            ..hazmat_drum(1, "Sulfuric Acid", "UN1830")
        },
        Product {
            description: "Caustic soda solution 50%".to_string(),
            nmfc_number: "45635".to_string(),
            account: "BASES".to_string(),
            price: dec!(1.05),
            ..hazmat_drum(2, "Sodium Hydroxide", "UN1824")
        },
        Product {
            description: "Hydrogen peroxide solution 35%".to_string(),
            nmfc_number: "45617".to_string(),
            hazmat_class: "5.1 (8)".to_string(),
            account: "OXIDIZERS".to_string(),
            price: dec!(1.75),
            ..hazmat_drum(3, "Hydrogen Peroxide", "UN2014")
        },
        Product {
            description: "Pure acetone solvent".to_string(),
            grade: "ACS".to_string(),
            nmfc_number: "45612".to_string(),
            net_weight: dec!(44),
            gross_weight: dec!(47),
            hazmat_class: "3".to_string(),
            account: "SOLVENTS".to_string(),
            price: dec!(2.55),
            ..hazmat_drum(4, "Acetone", "UN1090")
        },
        Product {
            description: "USP glycerin 99.5%".to_string(),
            grade: "USP".to_string(),
            nmfc_number: "45620".to_string(),
            freight_class: "60".to_string(),
            packing_group: String::new(),
            gross_weight: dec!(57),
            stackable: "Yes".to_string(),
            hazardous: false,
            hazmat_class: String::new(),
            non_hazmat_class: "60".to_string(),
            account: "GLYCOLS".to_string(),
            price: dec!(1.85),
            ..hazmat_drum(5, "Glycerin", "GLY001")
        },
    ]
}

#[allow(clippy::too_many_arguments)]
fn client(
    name: &str,
    code: &str,
    address: &str,
    city: &str,
    state: &str,
    zip: &str,
    phone: &str,
    email: &str,
    contact_person: &str,
    status: &str,
) -> Client {
    Client {
        name: name.to_string(),
        code: code.to_string(),
        address: address.to_string(),
        city: city.to_string(),
        state: state.to_string(),
        zip: zip.to_string(),
        phone: phone.to_string(),
        email: email.to_string(),
        contact_person: contact_person.to_string(),
        status: status.to_string(),
    }
}

/// Five clients across three states; one inactive.
pub fn sample_clients() -> Vec<Client> {
    vec![
        client(
            "AquaPhoenix Scientific",
            "APS001",
            "860 Gitts Run Road",
            "Hanover",
            "PA",
            "17331",
            "717-632-1291",
            "info@aquaphoenix.com",
            "John Smith",
            "Active",
        ),
        client(
            "Brenntag North America",
            "BRN002",
            "5083 Pottsville Pike",
            "Reading",
            "PA",
            "19605",
            "610-926-4151",
            "orders@brenntag.com",
            "Sarah Johnson",
            "Active",
        ),
        client(
            "ChemTreat",
            "CHT003",
            "4301 Dominion Blvd",
            "Glen Allen",
            "VA",
            "23060",
            "804-935-2000",
            "support@chemtreat.com",
            "Michael Brown",
            "Active",
        ),
        client(
            "Univar Solutions",
            "UNV004",
            "3075 Highland Pkwy Suite 200",
            "Downers Grove",
            "IL",
            "60515",
            "331-777-6000",
            "info@univar.com",
            "Jennifer Davis",
            "Active",
        ),
        client(
            "Hawkins Inc",
            "HWK005",
            "2381 Rosegate",
            "Roseville",
            "MN",
            "55113",
            "612-331-6910",
            "support@hawkinsinc.com",
            "Robert Wilson",
            "Inactive",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use validator::Validate;

    #[test]
    fn sample_data_is_valid_and_unique() {
        let products = sample_products();
        let codes: HashSet<_> = products.iter().map(|p| p.code.as_str()).collect();
        assert_eq!(codes.len(), products.len());
        assert!(products.iter().all(|p| p.validate().is_ok()));

        let clients = sample_clients();
        let codes: HashSet<_> = clients.iter().map(|c| c.code.as_str()).collect();
        assert_eq!(codes.len(), clients.len());
        assert_eq!(clients.iter().filter(|c| c.is_active()).count(), 4);
    }

    #[test]
    fn only_glycerin_is_non_hazmat() {
        let non_hazmat: Vec<_> = sample_products()
            .into_iter()
            .filter(|p| !p.hazardous)
            .map(|p| p.code)
            .collect();
        assert_eq!(non_hazmat, vec!["GLY001".to_string()]);
    }
}
