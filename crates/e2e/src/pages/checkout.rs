use serde::{Deserialize, Serialize};

use crate::spec::{SoftCheck, TestStep};

use super::{click, product_checks, soft_text, soft_visible, type_text, BASKET_LINK, NAVBAR_TOGGLER};

const BASKET_COUNT: &str = "#basketCount";
const STANDARD_SHIPPING: &str = "#exampleRadios2";
const NAME_INPUT: &str = "#name >> nth=0";
const LAST_NAME_INPUT: &str = r#"label[for="lastName"]+input"#;
const EMAIL_INPUT: &str = "#email";
const ADDRESS_INPUT: &str = "#address";
const CITY_SELECT: &str = "#city";
const ZIP_INPUT: &str = "#zip";
const COUNTRY_SELECT: &str = "#country";
const CARD_NAME_INPUT: &str = "#cc-name";
const CARD_NUMBER_INPUT: &str = "#cc-number";
const CARD_EXPIRY_INPUT: &str = "#cc-expiration";
const CARD_CVV_INPUT: &str = "#cc-cvv";
const CHECKOUT_BUTTON: &str = r#"button[type="submit"]"#;

/// Values entered into the checkout form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutDetails {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub address: String,
    pub city: String,
    pub zip: String,
    pub country: String,
    pub card_name: String,
    pub card_number: String,
    pub card_expiry: String,
    pub card_cvv: String,
}

impl Default for CheckoutDetails {
    fn default() -> Self {
        Self {
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            email: "johndoe@example.com".to_string(),
            address: "123 Example Street".to_string(),
            city: "Bristol".to_string(),
            zip: "12345".to_string(),
            country: "United Kingdom".to_string(),
            card_name: "John Doe".to_string(),
            card_number: "4111111111111111".to_string(),
            card_expiry: "12/24".to_string(),
            card_cvv: "123".to_string(),
        }
    }
}

/// Basket and checkout page
#[derive(Debug, Clone, Copy, Default)]
pub struct CheckoutPage;

impl CheckoutPage {
    pub fn open_navbar(&self) -> Vec<TestStep> {
        vec![click(NAVBAR_TOGGLER)]
    }

    pub fn click_on_basket(&self) -> Vec<TestStep> {
        vec![click(BASKET_LINK)]
    }

    pub fn fill_name(&self, name: &str) -> Vec<TestStep> {
        vec![type_text(NAME_INPUT, name)]
    }

    pub fn fill_last_name(&self, last_name: &str) -> Vec<TestStep> {
        vec![type_text(LAST_NAME_INPUT, last_name)]
    }

    pub fn fill_email(&self, email: &str) -> Vec<TestStep> {
        vec![type_text(EMAIL_INPUT, email)]
    }

    pub fn fill_address(&self, address: &str) -> Vec<TestStep> {
        vec![type_text(ADDRESS_INPUT, address)]
    }

    pub fn select_city(&self, city: &str) -> Vec<TestStep> {
        vec![select(CITY_SELECT, city)]
    }

    pub fn fill_zip(&self, zip: &str) -> Vec<TestStep> {
        vec![type_text(ZIP_INPUT, zip)]
    }

    pub fn select_country(&self, country: &str) -> Vec<TestStep> {
        vec![select(COUNTRY_SELECT, country)]
    }

    pub fn fill_card_name(&self, card_name: &str) -> Vec<TestStep> {
        vec![type_text(CARD_NAME_INPUT, card_name)]
    }

    pub fn fill_card_number(&self, card_number: &str) -> Vec<TestStep> {
        vec![type_text(CARD_NUMBER_INPUT, card_number)]
    }

    pub fn fill_card_exp_date(&self, card_expiry: &str) -> Vec<TestStep> {
        vec![type_text(CARD_EXPIRY_INPUT, card_expiry)]
    }

    pub fn fill_card_cvv(&self, card_cvv: &str) -> Vec<TestStep> {
        vec![type_text(CARD_CVV_INPUT, card_cvv)]
    }

    /// Fill every field of the checkout form, in page order
    pub fn fill_checkout_form(&self, details: &CheckoutDetails) -> Vec<TestStep> {
        [
            self.fill_name(&details.first_name),
            self.fill_last_name(&details.last_name),
            self.fill_email(&details.email),
            self.fill_address(&details.address),
            self.select_city(&details.city),
            self.fill_zip(&details.zip),
            self.select_country(&details.country),
            self.fill_card_name(&details.card_name),
            self.fill_card_number(&details.card_number),
            self.fill_card_exp_date(&details.card_expiry),
            self.fill_card_cvv(&details.card_cvv),
        ]
        .concat()
    }

    pub fn validate_product_title_price_and_quantity(
        &self,
        title: &str,
        price: &str,
        quantity: &str,
    ) -> Vec<TestStep> {
        product_checks(title, price, quantity)
    }

    pub fn validate_checkout_currency(&self, currency: &str) -> Vec<TestStep> {
        let label = format!("Total ({})", currency);
        vec![
            soft_text("span", &label, format!("Checkout currency should be \"{}\"", currency)),
            soft_visible("span", &label, "Checkout currency visibility should be true"),
        ]
    }

    pub fn validate_total_price(&self, value: &str) -> Vec<TestStep> {
        vec![
            soft_text("strong", value, format!("Total price should be \"{}\"", value)),
            soft_visible("strong", value, "Total price visibility should be true"),
        ]
    }

    /// Switch delivery to standard shipping; the total must not change
    pub fn click_on_standard_shipping_and_verify_total_price(&self, price: &str) -> Vec<TestStep> {
        let mut steps = vec![TestStep::Click {
            selector: STANDARD_SHIPPING.to_string(),
            timeout_ms: None,
            force: true,
            nth: None,
        }];
        steps.extend(self.validate_total_price(price));
        steps
    }

    pub fn validate_basket_count(&self, count: usize) -> Vec<TestStep> {
        vec![TestStep::SoftAssert {
            selector: BASKET_COUNT.to_string(),
            has_text: None,
            check: SoftCheck::Text {
                expected: count.to_string(),
            },
            message: format!("Basket count should be \"{}\"", count),
        }]
    }

    pub fn click_on_checkout_button(&self) -> Vec<TestStep> {
        vec![TestStep::Click {
            selector: CHECKOUT_BUTTON.to_string(),
            timeout_ms: None,
            force: false,
            nth: Some(0),
        }]
    }
}

fn select(selector: &str, value: &str) -> TestStep {
    TestStep::Select {
        selector: selector.to_string(),
        value: value.to_string(),
    }
}
