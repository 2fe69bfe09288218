//! Strategy
//!
//! The checkout does not know how a payment is taken. It asks the chosen
//! payment strategy to collect its own details and then to pay.

use crate::console::Prompt;
use crate::error::{PlaygroundError, Result};
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::{BTreeMap, HashMap};
use std::io::{BufRead, Write};

pub const CARD_START_BALANCE: u64 = 100_000;
/// Largest quantity of one product accepted per selection.
pub const MAX_COUNT: u64 = 10_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub name: &'static str,
    pub price: u64,
}

lazy_static! {
    /// Product id -> product, in menu order.
    pub static ref CATALOG: BTreeMap<u32, Product> = {
        let mut catalog = BTreeMap::new();
        catalog.insert(1, Product { name: "Mother board", price: 2200 });
        catalog.insert(2, Product { name: "CPU", price: 1850 });
        catalog.insert(3, Product { name: "HDD", price: 1100 });
        catalog.insert(4, Product { name: "Memory", price: 890 });
        catalog
    };
    static ref CARD_NUMBER: Regex = Regex::new(r"^\d{12,19}$").expect("valid regex");
    static ref CARD_DATE: Regex = Regex::new(r"^(0[1-9]|1[0-2])/\d{2}$").expect("valid regex");
    static ref CARD_CVV: Regex = Regex::new(r"^\d{3,4}$").expect("valid regex");
}

pub trait PayStrategy {
    fn collect_payment_details<R: BufRead, W: Write>(
        &mut self,
        prompt: &mut Prompt<R, W>,
    ) -> Result<()>;

    fn pay(&mut self, amount: u64, out: &mut dyn Write) -> Result<bool>;
}

pub struct PayByPayPal {
    // password -> email
    accounts: HashMap<String, String>,
    email: String,
    password: String,
    signed_in: bool,
}

impl Default for PayByPayPal {
    fn default() -> Self {
        Self::new()
    }
}

impl PayByPayPal {
    pub fn new() -> Self {
        let accounts = [("amanda1985", "amanda@ya.com"), ("qwerty", "john@amazon.eu")]
            .into_iter()
            .map(|(password, email)| (password.to_string(), email.to_string()))
            .collect();
        Self {
            accounts,
            email: String::new(),
            password: String::new(),
            signed_in: false,
        }
    }

    pub fn is_signed_in(&self) -> bool {
        self.signed_in
    }

    fn verify(&mut self) -> bool {
        self.signed_in = self
            .accounts
            .get(&self.password)
            .is_some_and(|email| *email == self.email);
        self.signed_in
    }
}

impl PayStrategy for PayByPayPal {
    fn collect_payment_details<R: BufRead, W: Write>(
        &mut self,
        prompt: &mut Prompt<R, W>,
    ) -> Result<()> {
        while !self.signed_in {
            self.email = prompt.ask("Enter the user's email: ")?;
            self.password = prompt.ask("Enter the password: ")?;
            if self.verify() {
                writeln!(prompt.out(), "Data verification has been successful.")?;
            } else {
                writeln!(prompt.out(), "Wrong email or password!")?;
            }
        }
        Ok(())
    }

    fn pay(&mut self, amount: u64, out: &mut dyn Write) -> Result<bool> {
        if !self.signed_in {
            return Ok(false);
        }
        writeln!(out, "Paying {amount} using PayPal.")?;
        Ok(true)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreditCard {
    pub number: String,
    pub date: String,
    pub cvv: String,
    pub amount: u64,
}

impl CreditCard {
    pub fn new(number: impl Into<String>, date: impl Into<String>, cvv: impl Into<String>) -> Self {
        Self {
            number: number.into(),
            date: date.into(),
            cvv: cvv.into(),
            amount: CARD_START_BALANCE,
        }
    }
}

#[derive(Debug, Default)]
pub struct PayByCreditCard {
    card: Option<CreditCard>,
}

impl PayByCreditCard {
    pub fn with_card(card: CreditCard) -> Self {
        Self { card: Some(card) }
    }

    pub fn card(&self) -> Option<&CreditCard> {
        self.card.as_ref()
    }
}

fn ask_matching<R: BufRead, W: Write>(
    prompt: &mut Prompt<R, W>,
    question: &str,
    pattern: &Regex,
) -> Result<String> {
    loop {
        let answer = prompt.ask(question)?;
        if pattern.is_match(&answer) {
            return Ok(answer);
        }
        writeln!(prompt.out(), "'{answer}' does not look right, try again.")?;
    }
}

impl PayStrategy for PayByCreditCard {
    fn collect_payment_details<R: BufRead, W: Write>(
        &mut self,
        prompt: &mut Prompt<R, W>,
    ) -> Result<()> {
        let number = ask_matching(prompt, "Enter the card number: ", &CARD_NUMBER)?;
        let date = ask_matching(prompt, "Enter the card expiration date 'mm/yy': ", &CARD_DATE)?;
        let cvv = ask_matching(prompt, "Enter the CVV code: ", &CARD_CVV)?;
        self.card = Some(CreditCard::new(number, date, cvv));
        Ok(())
    }

    fn pay(&mut self, amount: u64, out: &mut dyn Write) -> Result<bool> {
        let Some(card) = self.card.as_mut() else {
            return Ok(false);
        };
        if amount > card.amount {
            tracing::warn!(amount, balance = card.amount, "insufficient funds");
            return Ok(false);
        }
        writeln!(out, "Paying {amount} using Credit Card.")?;
        card.amount -= amount;
        Ok(true)
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Order {
    total_cost: u64,
    closed: bool,
}

impl Order {
    pub fn process_order<S: PayStrategy, R: BufRead, W: Write>(
        &self,
        strategy: &mut S,
        prompt: &mut Prompt<R, W>,
    ) -> Result<()> {
        strategy.collect_payment_details(prompt)
    }

    pub fn total_cost(&self) -> u64 {
        self.total_cost
    }

    /// Adds to the running total; a total past `u64::MAX` is refused.
    pub fn add_cost(&mut self, cost: u64) -> Result<()> {
        self.total_cost = self
            .total_cost
            .checked_add(cost)
            .ok_or(PlaygroundError::OrderTooLarge)?;
        Ok(())
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn close(&mut self) {
        self.closed = true;
    }
}

/// Payment method picked at checkout.
pub enum PaymentMethod {
    PayPal(PayByPayPal),
    CreditCard(PayByCreditCard),
}

impl PaymentMethod {
    /// "1" is PayPal, anything else a credit card.
    pub fn from_choice(choice: &str) -> Self {
        if choice == "1" {
            PaymentMethod::PayPal(PayByPayPal::new())
        } else {
            PaymentMethod::CreditCard(PayByCreditCard::default())
        }
    }

    fn collect<R: BufRead, W: Write>(&mut self, order: &Order, prompt: &mut Prompt<R, W>) -> Result<()> {
        match self {
            PaymentMethod::PayPal(s) => order.process_order(s, prompt),
            PaymentMethod::CreditCard(s) => order.process_order(s, prompt),
        }
    }

    fn pay(&mut self, amount: u64, out: &mut dyn Write) -> Result<bool> {
        match self {
            PaymentMethod::PayPal(s) => s.pay(amount, out),
            PaymentMethod::CreditCard(s) => s.pay(amount, out),
        }
    }
}

fn product_menu() -> String {
    let mut menu = String::from("Please, select a product:\n");
    for (id, product) in CATALOG.iter() {
        menu.push_str(&format!("{id} - {}\n", product.name));
    }
    menu
}

/// The interactive shop: pick products, pick a payment method, pay.
pub fn run_checkout<R: BufRead, W: Write>(prompt: &mut Prompt<R, W>) -> Result<Order> {
    let mut order = Order::default();
    let mut method: Option<PaymentMethod> = None;

    while !order.is_closed() {
        loop {
            let id: u32 = prompt.ask_parsed(&product_menu(), |id| CATALOG.contains_key(id))?;
            let price = CATALOG[&id].price;
            let count: u64 = prompt.ask_parsed("Count: ", |n| (1..=MAX_COUNT).contains(n))?;
            let cost = price.checked_mul(count).ok_or(PlaygroundError::OrderTooLarge)?;
            order.add_cost(cost)?;

            let more = prompt.ask("Do you wish to continue selecting products? Y/N: ")?;
            if !more.eq_ignore_ascii_case("y") {
                break;
            }
        }

        if method.is_none() {
            writeln!(
                prompt.out(),
                "Please, select a payment method:\n1 - PalPay\n2 - Credit Card"
            )?;
            let choice = prompt.ask("")?;
            let mut chosen = PaymentMethod::from_choice(&choice);
            chosen.collect(&order, prompt)?;
            method = Some(chosen);
        }

        let proceed = prompt.ask(&format!(
            "Pay {} units or Continue shopping? P/C: ",
            order.total_cost()
        ))?;
        if proceed.eq_ignore_ascii_case("p") {
            if let Some(strategy) = method.as_mut() {
                let paid = strategy.pay(order.total_cost(), prompt.out())?;
                if paid {
                    writeln!(prompt.out(), "Payment has been successful.")?;
                } else {
                    writeln!(prompt.out(), "FAIL! Please, check your data.")?;
                }
            }
            order.close();
        }
    }
    Ok(order)
}
