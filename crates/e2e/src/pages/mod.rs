//! Page objects for the Sweetshop storefront
//!
//! Page methods return the [`TestStep`]s that perform an interaction, so a
//! flow is assembled by concatenating them into a [`TestSpec`](crate::spec::TestSpec).
//! Validations are soft checks: they report mismatches at suite teardown
//! instead of stopping the test.

mod checkout;
mod storefront;
mod sweetshop;

pub use checkout::{CheckoutDetails, CheckoutPage};
pub use storefront::{
    basket_and_checkout_specs, calculate_total_price, load_products, Product, STOREFRONT_SUITE,
};
pub use sweetshop::SweetshopPage;

use crate::spec::{SoftCheck, TestStep};

const NAVBAR_TOGGLER: &str = ".navbar-toggler";
const BASKET_LINK: &str = r#"a[href="/basket"]"#;

/// Soft check on the text of the first `selector` match containing `text`
pub fn soft_text(selector: &str, text: &str, message: impl Into<String>) -> TestStep {
    TestStep::SoftAssert {
        selector: selector.to_string(),
        has_text: Some(text.to_string()),
        check: SoftCheck::Text {
            expected: text.to_string(),
        },
        message: message.into(),
    }
}

/// Soft check that the first `selector` match containing `text` is visible
pub fn soft_visible(selector: &str, text: &str, message: impl Into<String>) -> TestStep {
    TestStep::SoftAssert {
        selector: selector.to_string(),
        has_text: Some(text.to_string()),
        check: SoftCheck::Visible { expected: true },
        message: message.into(),
    }
}

fn click(selector: &str) -> TestStep {
    TestStep::Click {
        selector: selector.to_string(),
        timeout_ms: None,
        force: false,
        nth: None,
    }
}

fn type_text(selector: &str, text: &str) -> TestStep {
    TestStep::Type {
        selector: selector.to_string(),
        text: text.to_string(),
        delay_ms: None,
    }
}

/// Title, price and quantity checks for a product listed in the basket
fn product_checks(title: &str, price: &str, quantity: &str) -> Vec<TestStep> {
    let quantity = format!("x {}", quantity);
    vec![
        soft_text("h6", title, format!("Product title should be \"{}\"", title)),
        soft_visible("h6", title, "Product visibility should be true"),
        soft_text("span", price, format!("Product price should be \"{}\"", price)),
        soft_visible("span", price, "Product price visibility should be true"),
        soft_text("small", &quantity, format!("Product quantity should be \"{}\"", quantity)),
        soft_visible("small", &quantity, "Product quantity visibility should be true"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_checks() {
        let steps = product_checks("Sherbert Straws", "£0.75", "1");
        assert_eq!(steps.len(), 6);
        assert_eq!(
            steps[4],
            TestStep::SoftAssert {
                selector: "small".to_string(),
                has_text: Some("x 1".to_string()),
                check: SoftCheck::Text { expected: "x 1".to_string() },
                message: "Product quantity should be \"x 1\"".to_string(),
            }
        );
        assert!(matches!(
            &steps[1],
            TestStep::SoftAssert { check: SoftCheck::Visible { expected: true }, message, .. }
                if message == "Product visibility should be true"
        ));
    }
}
