//! Builder
//!
//! The same step-by-step parameter builder produces either a car or the
//! car's manual; the product type is fixed by the builder's type parameter.
//! A director knows the recipes for particular configurations.

use crate::error::{PlaygroundError, Result};
use serde::Serialize;
use std::fmt::Write as _;
use std::marker::PhantomData;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CarType {
    CityCar,
    SportsCar,
    Suv,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CarTransmission {
    SingleSpeed,
    Manual,
    Automatic,
    SemiAutomatic,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CarEngine {
    pub volume: f64,
}

impl CarEngine {
    pub fn new(volume: f64) -> Self {
        Self { volume }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CarNavigator {
    pub destination: String,
}

impl CarNavigator {
    pub fn new(destination: impl Into<String>) -> Self {
        Self {
            destination: destination.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Car {
    pub car_type: CarType,
    pub engine: Option<CarEngine>,
    pub transmission: Option<CarTransmission>,
    pub navigator: Option<CarNavigator>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CarManual {
    pub car_type: Option<CarType>,
    pub engine: Option<CarEngine>,
    pub transmission: Option<CarTransmission>,
    pub navigator: Option<CarNavigator>,
}

impl CarManual {
    pub fn describe(&self) -> String {
        let mut text = String::new();
        let _ = writeln!(text, "Type of car: {}", display_opt(self.car_type.as_ref()));
        let engine = self
            .engine
            .as_ref()
            .map_or("Not available".to_string(), |e| format!("volume - {}", e.volume));
        let _ = writeln!(text, "Engine: {engine}");
        let _ = writeln!(text, "Transmission: {}", display_opt(self.transmission.as_ref()));
        let navigator = self
            .navigator
            .as_ref()
            .map_or("Not available".to_string(), |n| format!("route to {}", n.destination));
        let _ = writeln!(text, "GPS Navigator: {navigator}");
        text
    }
}

fn display_opt<T: std::fmt::Debug>(value: Option<&T>) -> String {
    value.map_or("Not available".to_string(), |v| format!("{v:?}"))
}

/// Collects parameters; `build` is provided per product type.
#[derive(Debug, Clone)]
pub struct CarParametersBuilder<T> {
    car_type: Option<CarType>,
    engine: Option<CarEngine>,
    transmission: Option<CarTransmission>,
    navigator: Option<CarNavigator>,
    _product: PhantomData<T>,
}

pub type CarBuilder = CarParametersBuilder<Car>;
pub type CarManualBuilder = CarParametersBuilder<CarManual>;

impl<T> Default for CarParametersBuilder<T> {
    fn default() -> Self {
        Self {
            car_type: None,
            engine: None,
            transmission: None,
            navigator: None,
            _product: PhantomData,
        }
    }
}

impl<T> CarParametersBuilder<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn car_type(mut self, car_type: CarType) -> Self {
        self.car_type = Some(car_type);
        self
    }

    pub fn engine(mut self, engine: CarEngine) -> Self {
        self.engine = Some(engine);
        self
    }

    pub fn transmission(mut self, transmission: CarTransmission) -> Self {
        self.transmission = Some(transmission);
        self
    }

    pub fn navigator(mut self, navigator: CarNavigator) -> Self {
        self.navigator = Some(navigator);
        self
    }
}

impl CarParametersBuilder<Car> {
    /// A car cannot exist without a type.
    pub fn build(self) -> Result<Car> {
        Ok(Car {
            car_type: self.car_type.ok_or(PlaygroundError::MissingField("car_type"))?,
            engine: self.engine,
            transmission: self.transmission,
            navigator: self.navigator,
        })
    }
}

impl CarParametersBuilder<CarManual> {
    pub fn build(self) -> CarManual {
        CarManual {
            car_type: self.car_type,
            engine: self.engine,
            transmission: self.transmission,
            navigator: self.navigator,
        }
    }
}

pub struct CarDirector;

impl CarDirector {
    pub fn construct_suv_car(&self) -> Result<Car> {
        CarBuilder::new()
            .engine(CarEngine::new(2.0))
            .navigator(CarNavigator::new("somewhere"))
            .transmission(CarTransmission::SemiAutomatic)
            .car_type(CarType::Suv)
            .build()
    }

    pub fn construct_city_car_manual(&self) -> CarManual {
        CarManualBuilder::new()
            .navigator(CarNavigator::new("manual"))
            .car_type(CarType::CityCar)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_director_builds_suv() {
        let car = CarDirector.construct_suv_car().unwrap();
        assert_eq!(car.car_type, CarType::Suv);
        assert_eq!(car.engine, Some(CarEngine::new(2.0)));
        assert_eq!(car.transmission, Some(CarTransmission::SemiAutomatic));
        assert_eq!(car.navigator.unwrap().destination, "somewhere");
    }

    #[test]
    fn test_director_builds_partial_manual() {
        let manual = CarDirector.construct_city_car_manual();
        assert_eq!(manual.car_type, Some(CarType::CityCar));
        assert_eq!(manual.engine, None);

        let text = manual.describe();
        assert!(text.contains("Type of car: CityCar"));
        assert!(text.contains("Engine: Not available"));
        assert!(text.contains("GPS Navigator: route to manual"));
    }

    #[test]
    fn test_car_without_type_is_rejected() {
        let err = CarBuilder::new().engine(CarEngine::new(1.6)).build().unwrap_err();
        assert!(matches!(err, PlaygroundError::MissingField("car_type")));
    }

    #[test]
    fn test_car_serializes_with_screaming_enums() {
        let car = CarDirector.construct_suv_car().unwrap();
        let json = serde_json::to_value(&car).unwrap();
        assert_eq!(json["car_type"], "SUV");
        assert_eq!(json["transmission"], "SEMI_AUTOMATIC");
        assert_eq!(json["engine"]["volume"], 2.0);
    }
}
