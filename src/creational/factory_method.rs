//! Factory Method
//!
//! `ProductFabric::work_with_product` is written once against the product
//! interface; each fabric decides which concrete product the factory method
//! returns.

pub trait Product {
    fn do_stuff(&self) -> String;
}

pub struct FirstProduct {
    info: String,
}

impl Product for FirstProduct {
    fn do_stuff(&self) -> String {
        format!("FirstProduct with info: {}", self.info)
    }
}

pub struct SecondProduct {
    number: i32,
}

impl Product for SecondProduct {
    fn do_stuff(&self) -> String {
        format!("SecondProduct with number: {}", self.number)
    }
}

pub trait ProductFabric {
    /// The factory method.
    fn create_product(&self) -> Box<dyn Product>;

    fn work_with_product(&self) -> String {
        self.create_product().do_stuff()
    }
}

pub struct FirstProductFabric;

impl ProductFabric for FirstProductFabric {
    fn create_product(&self) -> Box<dyn Product> {
        Box::new(FirstProduct {
            info: "created in FirstProductFabric".to_string(),
        })
    }
}

pub struct SecondProductFabric;

impl ProductFabric for SecondProductFabric {
    fn create_product(&self) -> Box<dyn Product> {
        Box::new(SecondProduct { number: 2 })
    }
}

/// Even days use the first fabric, odd days the second.
pub fn fabric_for_day(day_of_month: u32) -> Box<dyn ProductFabric> {
    tracing::info!(day_of_month, "choosing product fabric");
    if day_of_month % 2 == 0 {
        Box::new(FirstProductFabric)
    } else {
        Box::new(SecondProductFabric)
    }
}
