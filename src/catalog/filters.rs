use serde::Deserialize;

use super::state::{sort_clients, sort_products};
use crate::models::{Client, Product};

fn matches_search(term: &str, fields: &[&str]) -> bool {
    fields
        .iter()
        .any(|field| field.to_lowercase().contains(term))
}

fn normalized(search: &Option<String>) -> Option<String> {
    search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase)
}

/// Product table filter. Criteria combine with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ProductFilter {
    pub active_only: bool,
    pub hazmat_only: bool,
    /// Case-insensitive substring over name, code and description.
    pub search: Option<String>,
}

impl ProductFilter {
    pub fn matches(&self, product: &Product) -> bool {
        if self.active_only && !product.is_active() {
            return false;
        }
        if self.hazmat_only && !product.hazardous {
            return false;
        }
        match normalized(&self.search) {
            Some(term) => matches_search(
                &term,
                &[&product.name, &product.code, &product.description],
            ),
            None => true,
        }
    }

    /// Matching products, sorted by name.
    pub fn apply(&self, products: &[Product]) -> Vec<Product> {
        let mut matched: Vec<Product> = products
            .iter()
            .filter(|p| self.matches(p))
            .cloned()
            .collect();
        sort_products(&mut matched);
        matched
    }
}

/// Client table filter. Criteria combine with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientFilter {
    pub active_only: bool,
    /// Case-insensitive substring over name, code, address and city.
    pub search: Option<String>,
}

impl ClientFilter {
    pub fn matches(&self, client: &Client) -> bool {
        if self.active_only && !client.is_active() {
            return false;
        }
        match normalized(&self.search) {
            Some(term) => matches_search(
                &term,
                &[&client.name, &client.code, &client.address, &client.city],
            ),
            None => true,
        }
    }

    pub fn apply(&self, clients: &[Client]) -> Vec<Client> {
        let mut matched: Vec<Client> = clients
            .iter()
            .filter(|c| self.matches(c))
            .cloned()
            .collect();
        sort_clients(&mut matched);
        matched
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::{sample_clients, sample_products};
    use rstest::rstest;

    #[rstest]
    #[case(ProductFilter::default(), 5)]
    #[case(ProductFilter { hazmat_only: true, ..Default::default() }, 4)]
    #[case(ProductFilter { search: Some("ACID".into()), ..Default::default() }, 1)]
    #[case(ProductFilter { search: Some("un18".into()), ..Default::default() }, 2)]
    #[case(ProductFilter { search: Some("solvent".into()), ..Default::default() }, 1)]
    #[case(ProductFilter { hazmat_only: true, search: Some("usp".into()), ..Default::default() }, 0)]
    #[case(ProductFilter { search: Some("   ".into()), ..Default::default() }, 5)]
    fn product_filter_counts(#[case] filter: ProductFilter, #[case] expected: usize) {
        assert_eq!(filter.apply(&sample_products()).len(), expected);
    }

    #[rstest]
    #[case(ClientFilter::default(), 5)]
    #[case(ClientFilter { active_only: true, ..Default::default() }, 4)]
    #[case(ClientFilter { search: Some("reading".into()), ..Default::default() }, 1)]
    #[case(ClientFilter { search: Some("hwk".into()), active_only: true }, 0)]
    fn client_filter_counts(#[case] filter: ClientFilter, #[case] expected: usize) {
        assert_eq!(filter.apply(&sample_clients()).len(), expected);
    }

    #[test]
    fn output_is_sorted_regardless_of_input_order() {
        let mut products = sample_products();
        products.reverse();
        let names: Vec<_> = ProductFilter::default()
            .apply(&products)
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(
            names,
            ["Acetone", "Glycerin", "Hydrogen Peroxide", "Sodium Hydroxide", "Sulfuric Acid"]
        );
    }
}
