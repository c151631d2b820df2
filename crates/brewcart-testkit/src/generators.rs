//! Proptest generators for property-based testing.

use proptest::prelude::*;

use brewcart::CartEngine;
use brewcart_core::Email;
use brewcart_store::Store;

/// Menu item names. A small pool so that op sequences revisit items.
pub const MENU: &[&str] = &[
    "Espresso",
    "Cappuccino",
    "Latte",
    "Mocha",
    "Cold Brew",
    "Masala Chai",
];

/// Generate an item name from the menu.
pub fn item_name() -> impl Strategy<Value = String> {
    prop::sample::select(MENU).prop_map(String::from)
}

/// Generate a unit price in rupees.
pub fn unit_price() -> impl Strategy<Value = u64> {
    0u64..=1_000
}

/// Generate a quantity delta, biased towards small steps.
pub fn delta() -> impl Strategy<Value = i64> {
    prop_oneof![
        4 => -3i64..=3,
        1 => -100i64..=100,
    ]
}

/// Generate a valid email address.
pub fn email() -> impl Strategy<Value = Email> {
    ("[a-z][a-z0-9.]{0,11}", "[a-z]{1,10}", "(com|in|org|cafe)").prop_filter_map(
        "must parse",
        |(local, domain, tld)| Email::parse(&format!("{}@{}.{}", local, domain, tld)).ok(),
    )
}

/// Generate a password that passes form validation.
pub fn password() -> impl Strategy<Value = String> {
    "[A-Za-z0-9!@#]{6,20}".prop_map(String::from)
}

/// A single cart command.
#[derive(Debug, Clone)]
pub enum CartOp {
    Add { name: String, price: u64 },
    Change { name: String, delta: i64 },
    Remove { name: String },
    Checkout,
}

impl Arbitrary for CartOp {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        prop_oneof![
            4 => (item_name(), unit_price())
                .prop_map(|(name, price)| CartOp::Add { name, price }),
            3 => (item_name(), delta()).prop_map(|(name, delta)| CartOp::Change { name, delta }),
            2 => item_name().prop_map(|name| CartOp::Remove { name }),
            1 => Just(CartOp::Checkout),
        ]
        .boxed()
    }
}

impl CartOp {
    /// Apply this command to an engine. Panics if the store fails.
    pub fn apply<S: Store>(&self, engine: &mut CartEngine<S>) {
        let result = match self {
            CartOp::Add { name, price } => engine.add_item(name, *price, "").map(drop),
            CartOp::Change { name, delta } => engine.change_quantity(name, *delta).map(drop),
            CartOp::Remove { name } => engine.remove_item(name).map(drop),
            CartOp::Checkout => engine.checkout().map(drop),
        };
        if let Err(e) = result {
            panic!("cart op {:?} failed: {}", self, e);
        }
    }
}

/// Generate a sequence of cart commands.
pub fn cart_ops(max_len: usize) -> impl Strategy<Value = Vec<CartOp>> {
    prop::collection::vec(any::<CartOp>(), 0..=max_len)
}
