use crate::spec::TestStep;

use super::{click, product_checks, BASKET_LINK, NAVBAR_TOGGLER};

/// Settle time after adding a product, while the basket badge updates
const ADD_TO_BASKET_SETTLE_MS: u64 = 500;

/// Storefront landing page
#[derive(Debug, Clone, Copy, Default)]
pub struct SweetshopPage;

impl SweetshopPage {
    pub fn launch_application(&self) -> Vec<TestStep> {
        vec![TestStep::Navigate {
            url: "/".to_string(),
            wait_for_selector: None,
        }]
    }

    /// Add the product with `data-id` `index` to the basket
    pub fn add_to_basket(&self, index: usize) -> Vec<TestStep> {
        vec![
            click(&format!(r#"[data-id="{}"]"#, index)),
            TestStep::Sleep {
                ms: ADD_TO_BASKET_SETTLE_MS,
            },
        ]
    }

    pub fn open_navbar(&self) -> Vec<TestStep> {
        vec![click(NAVBAR_TOGGLER)]
    }

    pub fn click_on_basket(&self) -> Vec<TestStep> {
        vec![click(BASKET_LINK)]
    }

    pub fn validate_product_title_price_and_quantity(
        &self,
        title: &str,
        price: &str,
        quantity: &str,
    ) -> Vec<TestStep> {
        product_checks(title, price, quantity)
    }
}
